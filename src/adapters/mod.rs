// Adapters layer: concrete implementations for external systems (http lookup, storage)

pub mod http;
pub mod memory;
