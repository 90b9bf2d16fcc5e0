//! C# emitter: renders the abstract wrapper-class tree to C# source.

mod emitter;
mod writer;

pub use emitter::CsharpEmitter;
pub use writer::CodeWriter;
