//! Domain entities - the core business objects.

mod post;
mod tag;
mod user;

pub use post::{NewPost, Post};
pub use tag::{NewTag, PostTag, Tag, dedupe_tag_names};
pub use user::{DEFAULT_IMAGE_URL, NewUser, User};
