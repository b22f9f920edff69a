//! Page-content interpretation.
//!
//! This module holds the transform interpreter: the affine [`Matrix`]
//! algebra, the save/restore [`GraphicsState`] stack, the input-boundary
//! types the upstream parser hands over, and the [`ContentStreamWalker`]
//! that folds a page's operators into positioned content items.

mod matrix;
mod source;
mod state;
mod stream;

pub use matrix::Matrix;
pub use source::{PageContent, PageOp, PageSource, ResolvedImage, TextRunInput};
pub use state::GraphicsState;
pub use stream::ContentStreamWalker;
