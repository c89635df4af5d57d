//! Chunking infrastructure

mod remainder_buffer;
mod splitter;

pub use remainder_buffer::RemainderBuffer;
pub use splitter::CodeBlockSplitter;
