use crate::model::{Id, date::PostDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostMarker;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize, Serialize)]
pub struct Post {
    pub id: Id<PostMarker>,
    pub title: String,
    pub content: String,
    pub author: String,
    pub date: PostDate,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Error)]
pub enum PostValidationError {
    #[error("Invalid post data, '{0}' is required")]
    MissingField(&'static str),
    #[error("Invalid sort field '{0}', expected one of title, content, author, date")]
    UnknownSortField(String),
    #[error("Invalid sort direction '{0}', expected asc or desc")]
    UnknownSortDirection(String),
}

/// Post fields as submitted by a client, before the required ones are checked.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub struct PostDraft {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
}

/// A post that has everything except an id and a date.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author: String,
}

/// Fields to overwrite on an existing post. Absent fields are left alone.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub date: Option<PostDate>,
}

impl Post {
    #[must_use]
    pub fn from_new(id: Id<PostMarker>, new_post: NewPost, date: PostDate) -> Self {
        let NewPost {
            title,
            content,
            author,
        } = new_post;

        Self {
            id,
            title,
            content,
            author,
            date,
        }
    }
}

impl PostDraft {
    pub fn validate(self) -> Result<NewPost, PostValidationError> {
        let title = self
            .title
            .ok_or(PostValidationError::MissingField("title"))?;
        let content = self
            .content
            .ok_or(PostValidationError::MissingField("content"))?;
        let author = self
            .author
            .ok_or(PostValidationError::MissingField("author"))?;

        Ok(NewPost {
            title,
            content,
            author,
        })
    }
}

impl TryFrom<PostDraft> for NewPost {
    type Error = PostValidationError;

    fn try_from(value: PostDraft) -> Result<Self, Self::Error> {
        value.validate()
    }
}

impl PostUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.author.is_none()
            && self.date.is_none()
    }

    pub fn apply(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(author) = self.author {
            post.author = author;
        }
        if let Some(date) = self.date {
            post.date = date;
        }
    }
}
