//! Storage abstractions for service layer
//!
//! Contains the reusable directory-of-JSON-files store shared by every blog
//! entity kind.

pub mod json_dir_store;

pub use json_dir_store::JsonDirStore;
