// Public modules
pub mod chat;
pub mod client;
pub mod error;
pub mod observability;
pub mod render;
pub mod types;
pub mod utils;
pub mod view;

// Re-exports
pub use client::{Backend, ChatApi};
pub use error::{Error, Result};
pub use observability::register_biometrics;
pub use types::*;
