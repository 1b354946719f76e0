//! Sorting and searching over an in-memory list of posts.

use crate::model::{
    date::PostDate,
    post::{Post, PostValidationError},
};
use serde::{Deserialize, Deserializer, Serialize, de::Error};
use std::{cmp::Reverse, str::FromStr};

/// A post field that can be sorted by.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub enum PostField {
    Title,
    Content,
    Author,
    Date,
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct PostSort {
    pub field: PostField,
    pub direction: SortDirection,
}

/// Search terms. A post matches if any supplied term matches it.
/// Empty terms count as not supplied.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub struct PostSearch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    #[serde(default, deserialize_with = "empty_date_as_none")]
    pub date: Option<PostDate>,
}

fn empty_date_as_none<'de, D>(deserializer: D) -> Result<Option<PostDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(date) if !date.is_empty() => PostDate::from_str(&date)
            .map(Some)
            .map_err(D::Error::custom),
        _ => Ok(None),
    }
}

impl PostField {
    /// Case-folded value of this field, used as the sort key.
    #[must_use]
    pub fn sort_key(self, post: &Post) -> String {
        match self {
            PostField::Title => post.title.to_lowercase(),
            PostField::Content => post.content.to_lowercase(),
            PostField::Author => post.author.to_lowercase(),
            PostField::Date => post.date.to_string(),
        }
    }
}

impl FromStr for PostField {
    type Err = PostValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(PostField::Title),
            "content" => Ok(PostField::Content),
            "author" => Ok(PostField::Author),
            "date" => Ok(PostField::Date),
            _ => Err(PostValidationError::UnknownSortField(s.to_owned())),
        }
    }
}

impl FromStr for SortDirection {
    type Err = PostValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Ascending),
            "desc" => Ok(SortDirection::Descending),
            _ => Err(PostValidationError::UnknownSortDirection(s.to_owned())),
        }
    }
}

impl PostSort {
    #[must_use]
    pub fn new(field: PostField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Builds a sort from raw `sort` and `direction` query values.
    ///
    /// Empty values count as not supplied. A direction is validated even when no
    /// field is given, in which case the result is `None` and the collection keeps
    /// its stored order.
    pub fn from_params(
        field: Option<&str>,
        direction: Option<&str>,
    ) -> Result<Option<Self>, PostValidationError> {
        let field = field.filter(|field| !field.is_empty());
        let direction = direction
            .filter(|direction| !direction.is_empty())
            .map(SortDirection::from_str)
            .transpose()?
            .unwrap_or_default();

        let Some(field) = field else {
            return Ok(None);
        };

        Ok(Some(Self::new(field.parse()?, direction)))
    }

    /// Stable sort; posts with equal keys keep their relative order in both directions.
    pub fn apply(self, posts: &mut [Post]) {
        match self.direction {
            SortDirection::Ascending => posts.sort_by_cached_key(|post| self.field.sort_key(post)),
            SortDirection::Descending => {
                posts.sort_by_cached_key(|post| Reverse(self.field.sort_key(post)));
            }
        }
    }
}

impl PostSearch {
    fn term(term: Option<&str>) -> Option<&str> {
        term.filter(|term| !term.is_empty())
    }

    /// Whether no non-empty search term was supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Self::term(self.title.as_deref()).is_none()
            && Self::term(self.content.as_deref()).is_none()
            && Self::term(self.author.as_deref()).is_none()
            && self.date.is_none()
    }

    #[must_use]
    pub fn matches(&self, post: &Post) -> bool {
        let contains = |haystack: &str, needle: Option<&str>| {
            Self::term(needle)
                .is_some_and(|needle| haystack.to_lowercase().contains(&needle.to_lowercase()))
        };

        contains(&post.title, self.title.as_deref())
            || contains(&post.content, self.content.as_deref())
            || contains(&post.author, self.author.as_deref())
            || self.date.is_some_and(|date| date == post.date)
    }

    /// Posts matching this search, in stored order.
    #[must_use]
    pub fn filter(&self, posts: Vec<Post>) -> Vec<Post> {
        if self.is_empty() {
            return Vec::new();
        }

        posts.into_iter().filter(|post| self.matches(post)).collect()
    }
}
