// Model persistence — durable storage for the corpus model.
//
// The whole model is one record. Training rewrites it in a single write after
// the batch is applied; classification only ever reads it.

pub mod traits;
pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use traits::ModelStore;
