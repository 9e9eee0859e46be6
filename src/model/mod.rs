//! Document model types: the block contract and its concrete kinds.
//!
//! Every renderable unit implements the [`Block`] contract against the
//! shared value-type toolkit (alignment, margins, unit conversion); the
//! [`Document`] composer sequences blocks and concatenates their markup.

mod block;
mod document;
mod image;
mod paragraph;

pub use block::{Alignment, Block, Direction, Margins};
pub use document::{Document, Metadata};
pub use image::{ImageBlock, ImageFormat, ImageSize};
pub use paragraph::{CharFormat, Paragraph};
