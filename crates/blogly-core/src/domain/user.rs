use serde::{Deserialize, Serialize};

/// Placeholder avatar stored when a user is created without an image URL.
pub const DEFAULT_IMAGE_URL: &str = "https://www.freeiconspng.com/uploads/icon-user-blue-symbol-people-person-generic--public-domain--21.png";

/// User entity - a site user who authors posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub image_url: String,
}

impl User {
    /// "{first_name} {last_name}"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A user that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub image_url: String,
}

impl NewUser {
    /// Build a new user; an empty `image_url` is replaced by [`DEFAULT_IMAGE_URL`].
    pub fn new(first_name: String, last_name: String, image_url: String) -> Self {
        let image_url = if image_url.is_empty() {
            DEFAULT_IMAGE_URL.to_string()
        } else {
            image_url
        };

        Self {
            first_name,
            last_name,
            image_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_image_url_falls_back_to_placeholder() {
        let user = NewUser::new("Ada".into(), "Lovelace".into(), String::new());
        assert_eq!(user.image_url, DEFAULT_IMAGE_URL);
    }

    #[test]
    fn submitted_image_url_is_kept_verbatim() {
        let user = NewUser::new(
            "Ada".into(),
            "Lovelace".into(),
            "http://example.com/ada.png".into(),
        );
        assert_eq!(user.image_url, "http://example.com/ada.png");
    }

    #[test]
    fn full_name_joins_first_and_last() {
        let user = User {
            id: 1,
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            image_url: DEFAULT_IMAGE_URL.into(),
        };
        assert_eq!(user.full_name(), "Grace Hopper");
    }
}
