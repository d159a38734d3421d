//! Service layer for the blog: file-backed entity storage and the form helpers
//! the editing UI relies on.
//! - `storage` holds the generic one-file-per-entity store.
//! - `file` wires three stores into the `BlogApi` surface.
//! - `forms` maps edit state to CSS classes.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod blog_api;
pub mod file;
pub mod forms;

pub use blog_api::BlogApi;
pub use file::blog_api_json::BlogApiJsonDirectAccess;
