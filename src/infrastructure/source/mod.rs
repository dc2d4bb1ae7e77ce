//! Text source infrastructure module

mod file;
mod memory;

pub use file::FileTextSource;
pub use memory::MemoryTextSource;
