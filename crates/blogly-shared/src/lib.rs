//! # Blogly Shared
//!
//! Types exchanged at the HTTP boundary: submitted forms and error pages.

pub mod dto;
pub mod response;

pub use dto::{FormFields, MissingField, PostForm, TagForm, UserForm};
pub use response::ErrorResponse;
