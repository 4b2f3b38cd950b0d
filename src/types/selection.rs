//! Explicit operation target.

use serde::{Deserialize, Serialize};

/// Which URLs an operation applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "arg", rename_all = "snake_case")]
pub enum Selection {
    Hashes(Vec<String>),
    Tags(Vec<String>),
}

impl Selection {
    pub fn hashes<I, S>(hashes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selection::Hashes(hashes.into_iter().map(Into::into).collect())
    }

    pub fn tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selection::Tags(tags.into_iter().map(Into::into).collect())
    }

    pub fn values(&self) -> &[String] {
        match self {
            Selection::Hashes(v) | Selection::Tags(v) => v,
        }
    }

    pub fn len(&self) -> usize {
        self.values().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values().is_empty()
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Selection::Hashes(_) => "hashes",
            Selection::Tags(_) => "tags",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_and_values() {
        let s = Selection::tags(vec!["promo".to_string()]);
        assert_eq!(s.kind(), "tags");
        assert_eq!(s.values(), ["promo".to_string()]);
        assert!(Selection::hashes(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn serializes_tagged() {
        let v = serde_json::to_value(Selection::hashes(["a"])).unwrap();
        assert_eq!(v, serde_json::json!({"type": "hashes", "arg": ["a"]}));
    }
}
