//! Client-side session state: an explicit store over a pluggable durable
//! storage backend. Independent from the HTTP server; embedded clients
//! construct it directly.
pub mod storage;
pub mod store;

pub use storage::{FileStorage, SessionStorage};
pub use store::{LoggedInUser, SessionStore};
