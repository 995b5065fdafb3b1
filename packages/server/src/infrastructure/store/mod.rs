//! Store trait の実装

pub mod memory;

pub use memory::InMemoryStore;
