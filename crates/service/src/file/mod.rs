//! File-backed implementations of the service traits.

pub mod blog_api_json;
