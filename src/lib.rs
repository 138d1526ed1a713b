// Photo framing: decode a photo, paint one of nine decorative frames around it,
// and export the result as PNG. `session::Session` is the entry point; the
// `canvas` module holds the software 2D primitives the frame painters use.

pub mod blur;
pub mod canvas;
pub mod cli;
pub mod codec;
pub mod color;
pub mod draw;
pub mod error;
pub mod frames;
pub mod render;
pub mod session;
pub mod types;
