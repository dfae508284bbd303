use serde::{Deserialize, Serialize};

/// Tag entity. Names are unique across the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTag {
    pub name: String,
}

impl NewTag {
    pub fn new(name: String) -> Self {
        Self { name }
    }
}

/// Association between a post and a tag. A pair appears at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostTag {
    pub post_id: i32,
    pub tag_id: i32,
}

/// Collapse repeated names in a submitted tag selection, keeping first-seen order.
pub fn dedupe_tag_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut seen = Vec::new();
    for name in names {
        let name = name.into();
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedupe_keeps_first_occurrence_order() {
        let names = dedupe_tag_names(["funny", "rust", "funny", "news", "rust"]);
        assert_eq!(names, vec!["funny", "rust", "news"]);
    }

    #[test]
    fn dedupe_of_empty_selection_is_empty() {
        let names = dedupe_tag_names(Vec::<String>::new());
        assert!(names.is_empty());
    }
}
