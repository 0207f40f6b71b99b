#![forbid(unsafe_code)]

pub mod json_file;
pub mod repository;
pub mod session_store;

pub use json_file::JsonFileStore;
pub use repository::{InMemoryStore, KeyValueStore, StorageError};
pub use session_store::{DISPLAY_NAME_KEY, SessionStore, TOKEN_KEY};
