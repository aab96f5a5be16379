// Adapters layer: concrete implementations of the domain ports.

pub mod json_file;
pub mod line_source;
pub mod memory;

pub use json_file::JsonFileStore;
pub use line_source::{ScriptedSource, StdinSource};
pub use memory::MemoryStore;
