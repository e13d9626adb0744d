pub mod chat;
pub mod marker_store;
pub mod source_host;

pub use chat::ChatService;
pub use marker_store::MarkerStore;
pub use source_host::SourceHostService;
