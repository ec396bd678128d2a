// Adapters layer: concrete implementations for external systems (explorer API, local filesystem).

pub mod http;
pub mod storage;
