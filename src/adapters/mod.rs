// Adapters layer: concrete implementations of the domain ports.

pub mod file_store;

pub use file_store::FileStore;
