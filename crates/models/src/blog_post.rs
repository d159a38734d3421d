use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::entity::Entity;
use crate::errors::ModelError;
use crate::tag::Tag;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BlogPost {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default = "Utc::now")]
    pub publish_date: DateTime<Utc>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Default for BlogPost {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            text: String::new(),
            publish_date: Utc::now(),
            category: None,
            tags: Vec::new(),
        }
    }
}

impl BlogPost {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self { title: title.into(), text: text.into(), ..Self::default() }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.title.trim().is_empty() {
            return Err(ModelError::Validation("title required".into()));
        }
        if self.text.trim().is_empty() {
            return Err(ModelError::Validation("text required".into()));
        }
        Ok(())
    }
}

impl Entity for BlogPost {
    const KIND: &'static str = "blog post";

    fn id(&self) -> Option<&str> { self.id.as_deref() }

    fn set_id(&mut self, id: String) { self.id = Some(id); }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_pascal_case() {
        let mut post = BlogPost::new("Hello", "World");
        post.set_id("abc".into());
        post.tags.push(Tag { id: Some("t1".into()), name: "rust".into() });
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["Id"], "abc");
        assert_eq!(json["Title"], "Hello");
        assert_eq!(json["Tags"][0]["Name"], "rust");
        assert!(json.get("PublishDate").is_some());
    }

    #[test]
    fn reads_sparse_legacy_file() {
        let json = r#"{"Id":"42","Title":"Old","Text":"post","PublishDate":"2022-01-01T00:00:00Z","Extra":1}"#;
        let post: BlogPost = serde_json::from_str(json).unwrap();
        assert_eq!(post.id(), Some("42"));
        assert!(post.category.is_none());
        assert!(post.tags.is_empty());
    }

    #[test]
    fn empty_id_counts_as_unset() {
        let mut post = BlogPost::new("t", "x");
        assert!(!post.has_id());
        post.set_id(String::new());
        assert!(!post.has_id());
        post.set_id("x".into());
        assert!(post.has_id());
    }

    #[test]
    fn validate_requires_title_and_text() {
        assert!(BlogPost::new("t", "x").validate().is_ok());
        assert_eq!(
            BlogPost::new(" ", "x").validate(),
            Err(ModelError::Validation("title required".into()))
        );
        assert!(BlogPost::new("t", "").validate().is_err());
        assert!(Category::new("").validate().is_err());
        assert!(Tag::new("rust").validate().is_ok());
    }
}
