//! Typed records shared by the HTTP, normalizer and storage layers.

pub mod log;
pub mod request;
pub mod response;
