// Adapters layer: concrete implementations for external systems (storage, pdf, http).

pub mod http;
pub mod pdf;
pub mod storage;
