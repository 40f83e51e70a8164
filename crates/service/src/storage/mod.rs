//! Storage abstractions for service layer
//!
//! Contains reusable file-backed stores shared by the `users` backends.

pub mod json_map_store;
