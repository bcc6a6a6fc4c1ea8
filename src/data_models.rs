use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A trimmed, non-empty question typed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query(String);

impl Query {
    /// Trims `raw` and returns `None` when nothing is left.
    pub fn parse(raw: &str) -> Option<Query> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Query(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Query {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// What the backend answers for a query.
///
/// The remote service is trusted structurally: missing or `null` fields
/// decode to their empty values instead of failing, so an incomplete body
/// shows up as an empty summary or an empty article list.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    #[serde(
        rename = "ai_summary_answer",
        default,
        deserialize_with = "null_as_default"
    )]
    pub summary: String,

    #[serde(rename = "ai_relevant_articles", default)]
    pub related_articles: Option<Vec<Article>>,
}

impl SearchResult {
    pub fn new(summary: impl Into<String>, related_articles: Vec<Article>) -> SearchResult {
        SearchResult {
            summary: summary.into(),
            related_articles: Some(related_articles),
        }
    }

    /// Related articles, or `None` when the backend sent none (or `null`).
    pub fn articles(&self) -> Option<&[Article]> {
        self.related_articles.as_deref()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Article {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
}

impl Article {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Article {
        Article {
            id: id.into(),
            title: title.into(),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
