//! Data Transfer Objects - the HTML forms accepted by the server.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A required form field was absent from the submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Missing form field: {0}")]
pub struct MissingField(pub &'static str);

/// Raw `application/x-www-form-urlencoded` pairs in submission order.
///
/// Kept as pairs so that multi-valued fields such as `selected-tags` survive decoding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// First value submitted for `name`. An empty value counts as present.
    pub fn required(&self, name: &'static str) -> Result<String, MissingField> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
            .ok_or(MissingField(name))
    }

    /// Every value submitted for `name`, possibly none.
    pub fn all(&self, name: &str) -> Vec<String> {
        self.0
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
            .collect()
    }
}

/// User create/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserForm {
    pub first_name: String,
    pub last_name: String,
    pub image_url: String,
}

impl TryFrom<&FormFields> for UserForm {
    type Error = MissingField;

    fn try_from(fields: &FormFields) -> Result<Self, Self::Error> {
        Ok(Self {
            first_name: fields.required("first_name")?,
            last_name: fields.required("last_name")?,
            image_url: fields.required("image_url")?,
        })
    }
}

/// Post create/edit form. `selected_tags` holds tag names, not ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostForm {
    pub title: String,
    pub content: String,
    pub selected_tags: Vec<String>,
}

impl TryFrom<&FormFields> for PostForm {
    type Error = MissingField;

    fn try_from(fields: &FormFields) -> Result<Self, Self::Error> {
        Ok(Self {
            title: fields.required("title")?,
            content: fields.required("content")?,
            selected_tags: fields.all("selected-tags"),
        })
    }
}

/// Tag create/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagForm {
    pub name: String,
}

impl TryFrom<&FormFields> for TagForm {
    type Error = MissingField;

    fn try_from(fields: &FormFields) -> Result<Self, Self::Error> {
        Ok(Self {
            name: fields.required("tag-name")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> FormFields {
        FormFields::new(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn post_form_collects_every_selected_tag() {
        let form = PostForm::try_from(&fields(&[
            ("title", "Hi"),
            ("content", "World"),
            ("selected-tags", "funny"),
            ("selected-tags", "news"),
        ]))
        .unwrap();

        assert_eq!(form.selected_tags, vec!["funny", "news"]);
    }

    #[test]
    fn post_form_without_tags_has_empty_selection() {
        let form = PostForm::try_from(&fields(&[("title", "Hi"), ("content", "World")])).unwrap();
        assert!(form.selected_tags.is_empty());
    }

    #[test]
    fn empty_value_counts_as_present() {
        let form = UserForm::try_from(&fields(&[
            ("first_name", "Ada"),
            ("last_name", "Lovelace"),
            ("image_url", ""),
        ]))
        .unwrap();

        assert_eq!(form.image_url, "");
    }

    #[test]
    fn absent_field_is_reported_by_name() {
        let err = UserForm::try_from(&fields(&[("first_name", "Ada")])).unwrap_err();
        assert_eq!(err, MissingField("last_name"));
    }

    #[test]
    fn tag_form_reads_hyphenated_field() {
        let form = TagForm::try_from(&fields(&[("tag-name", "funny")])).unwrap();
        assert_eq!(form.name, "funny");
    }
}
