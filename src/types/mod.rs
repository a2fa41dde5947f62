// Public modules
pub mod chat_request;
pub mod chat_response;
pub mod conversation;
pub mod file_upload;
pub mod message;
pub mod metadata;
pub mod search_result;
pub mod thinking_mode;
pub mod upload_response;

// Re-exports
pub use chat_request::ChatRequest;
pub use chat_response::ChatResponse;
pub use conversation::{Conversation, HistoryEntry};
pub use file_upload::FileUpload;
pub use message::{Message, Role};
pub use metadata::MessageMetadata;
pub use search_result::SearchResult;
pub use thinking_mode::{KNOWN_THINKING_MODES, ThinkingMode};
pub use upload_response::UploadResponse;
