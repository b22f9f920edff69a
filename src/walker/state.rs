//! Graphics state with a save/restore transform stack.

use super::Matrix;

/// Current transform plus a stack of saved states.
///
/// One instance lives for exactly one page walk; it is created at page
/// start and discarded at page end, never shared across pages.
#[derive(Debug, Clone)]
pub struct GraphicsState {
    current: Matrix,
    saved: Vec<Matrix>,
}

impl GraphicsState {
    /// Create a state with the identity transform and an empty stack.
    pub fn new() -> Self {
        Self {
            current: Matrix::IDENTITY,
            saved: Vec::new(),
        }
    }

    /// The current transform.
    pub fn matrix(&self) -> &Matrix {
        &self.current
    }

    /// Number of saved states on the stack.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Save a copy of the current transform onto the stack.
    pub fn save(&mut self) {
        self.saved.push(self.current);
    }

    /// Restore the most recently saved transform.
    ///
    /// A restore on an empty stack is tolerated as a no-op: content
    /// streams with unbalanced state operators still occur in the wild and
    /// must not abort the page.
    pub fn restore(&mut self) {
        match self.saved.pop() {
            Some(matrix) => self.current = matrix,
            None => log::debug!("restore on empty graphics state stack, ignoring"),
        }
    }

    /// Concatenate an incoming transform onto the current one.
    pub fn apply(&mut self, incoming: &Matrix) {
        self.current = self.current.concat(incoming);
    }
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self::new()
    }
}
