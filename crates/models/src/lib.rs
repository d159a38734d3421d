//! Blog entities persisted by the JSON-file store.
//!
//! Field names are serialized in PascalCase so that data folders written by
//! earlier versions of the blog stay readable.

pub mod errors;
pub mod entity;
pub mod blog_post;
pub mod category;
pub mod tag;

pub use blog_post::BlogPost;
pub use category::Category;
pub use entity::Entity;
pub use tag::Tag;
