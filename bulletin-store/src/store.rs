use bulletin_common::model::{
    Id,
    date::PostDate,
    post::{NewPost, Post, PostMarker, PostUpdate},
    query::{PostSearch, PostSort},
};
use std::{
    ffi::OsString,
    io::ErrorKind,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tokio::{fs, sync::Mutex};
use tracing::{debug, warn};

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Posts file could not be read or written: {0}")]
    Io(#[from] std::io::Error),
    #[error("Posts could not be serialized: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Posts file holds JSON that is not a list of posts: {0}")]
    InvalidPosts(serde_json::Error),
    #[error("No post id is left after {0}")]
    IdsExhausted(Id<PostMarker>),
}

/// Posts kept in a single JSON file.
///
/// Every operation loads the whole file, and every mutation writes the whole
/// collection back. Mutations within one process are serialized; separate
/// processes sharing the same file are not coordinated.
#[derive(Debug)]
pub struct PostStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl PostStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut temp_path = OsString::from(self.path.as_os_str());
        temp_path.push(".tmp");
        temp_path.into()
    }

    /// Reads all posts. A missing file or one that is not JSON at all reads as no posts.
    ///
    /// Well-formed JSON that does not describe posts is an error, so that a later
    /// save cannot replace posts that were never read.
    pub async fn load(&self) -> Result<Vec<Post>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No posts file found");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_slice(&bytes) {
            Ok(posts) => Ok(posts),
            Err(err) if err.is_data() => Err(StoreError::InvalidPosts(err)),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "Posts file is malformed, treating it as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Replaces the file with `posts`. The file is swapped in whole.
    pub async fn save(&self, posts: &[Post]) -> Result<()> {
        let json = serde_json::to_vec_pretty(posts)?;
        let temp_path = self.temp_path();

        fs::write(&temp_path, json).await?;
        fs::rename(&temp_path, &self.path).await?;

        debug!(path = %self.path.display(), count = posts.len(), "Saved posts");
        Ok(())
    }

    pub async fn list(&self, sort: Option<PostSort>) -> Result<Vec<Post>> {
        let mut posts = self.load().await?;

        if let Some(sort) = sort {
            sort.apply(&mut posts);
        }

        Ok(posts)
    }

    pub async fn search(&self, search: &PostSearch) -> Result<Vec<Post>> {
        let posts = self.load().await?;

        Ok(search.filter(posts))
    }

    pub async fn create(&self, new_post: NewPost) -> Result<Post> {
        self.create_at(new_post, PostDate::today()).await
    }

    pub async fn create_at(&self, new_post: NewPost, date: PostDate) -> Result<Post> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.load().await?;

        let id = match posts.iter().map(|post| post.id).max() {
            Some(max_id) => max_id.next().ok_or(StoreError::IdsExhausted(max_id))?,
            None => Id::new(1),
        };
        let post = Post::from_new(id, new_post, date);

        posts.push(post.clone());
        self.save(&posts).await?;

        debug!(%id, "Created post");
        Ok(post)
    }

    /// Applies `update` to the post with `id` and returns all posts afterwards,
    /// or `None` if there is no such post.
    pub async fn update(
        &self,
        id: Id<PostMarker>,
        update: PostUpdate,
    ) -> Result<Option<Vec<Post>>> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.load().await?;

        let Some(post) = posts.iter_mut().find(|post| post.id == id) else {
            return Ok(None);
        };

        if !update.is_empty() {
            update.apply(post);
            self.save(&posts).await?;
            debug!(%id, "Updated post");
        }

        Ok(Some(posts))
    }

    /// Removes the post with `id` and returns it, or `None` if there is no such post.
    pub async fn delete(&self, id: Id<PostMarker>) -> Result<Option<Post>> {
        let _guard = self.write_lock.lock().await;
        let mut posts = self.load().await?;

        let Some(index) = posts.iter().position(|post| post.id == id) else {
            return Ok(None);
        };

        let post = posts.remove(index);
        self.save(&posts).await?;

        debug!(%id, "Deleted post");
        Ok(Some(post))
    }
}
