//! JSON-file backed post store.
//!
//! The whole board lives in memory as an ordered `Vec<Post>` and is written
//! back to a single pretty-printed JSON file after every mutation. Writes go
//! to a temporary file in the same directory which is then renamed over the
//! target, so a crash mid-write never leaves a truncated store behind.

mod models;

pub use models::*;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tempfile::NamedTempFile;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("post {post_id} does not exist (the board has {len} posts)")]
    OutOfRange { post_id: PostId, len: usize },
    #[error("failed to create store directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read store file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("store file {} is malformed: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode posts: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to write store file {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Handle to the board's posts.
///
/// Cloning is cheap and every clone shares the same posts. All mutations hold
/// the lock for the full read-modify-persist cycle, so concurrent requests
/// are applied one at a time and each write contains every earlier one.
#[derive(Debug, Clone)]
pub struct PostStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    path: PathBuf,
    posts: Mutex<Vec<Post>>,
}

impl PostStore {
    /// Load the store from `path`.
    ///
    /// A missing file yields an empty board. The parent directory is created
    /// if needed so the first write succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] if the file exists but is not a valid
    /// post list, [`StoreError::CreateDir`] if its directory cannot be
    /// created, or [`StoreError::Read`] if it cannot be read.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        let dir = parent_dir(&path);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| StoreError::CreateDir {
                path: dir.clone(),
                source,
            })?;

        let posts = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let mut posts: Vec<Post> =
                    serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
                        path: path.clone(),
                        source,
                    })?;
                if normalize_ids(&mut posts) {
                    warn!(path = %path.display(), "Store file had missing or inconsistent ids; renumbered by position");
                }
                posts
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No store file found, starting with an empty board");
                Vec::new()
            }
            Err(source) => return Err(StoreError::Read { path, source }),
        };

        info!(path = %path.display(), posts = posts.len(), "Post store loaded");

        Ok(Self {
            inner: Arc::new(Inner {
                path,
                posts: Mutex::new(posts),
            }),
        })
    }

    /// Append a new post with no comments and persist the board.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the write fails; the post is then
    /// removed again so memory and disk stay identical.
    pub async fn append_post(&self, new: NewPost) -> Result<Post, StoreError> {
        let mut posts = self.inner.posts.lock().await;

        let post = Post {
            id: posts.last().map_or(0, |p| p.id + 1),
            author: new.author,
            text: new.text,
            image: new.image,
            created_at: Some(Utc::now()),
            comments: Vec::new(),
        };
        posts.push(post.clone());

        if let Err(e) = write_posts(&self.inner.path, &posts).await {
            posts.pop();
            return Err(e);
        }

        debug!(post_id = post.id, "Post appended");
        Ok(post)
    }

    /// Append a comment to the post with id `post_id` and persist the board.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::OutOfRange`] if no such post exists, or a
    /// persistence error if the write fails (the comment is rolled back).
    pub async fn append_comment(
        &self,
        post_id: PostId,
        new: NewComment,
    ) -> Result<Comment, StoreError> {
        let mut posts = self.inner.posts.lock().await;

        let len = posts.len();
        let index = posts
            .iter()
            .position(|p| p.id == post_id)
            .ok_or(StoreError::OutOfRange { post_id, len })?;

        let post = &mut posts[index];
        let comment = Comment {
            id: post.next_comment_id(),
            author: new.author,
            text: new.text,
            created_at: Some(Utc::now()),
        };
        post.comments.push(comment.clone());

        if let Err(e) = write_posts(&self.inner.path, &posts).await {
            posts[index].comments.pop();
            return Err(e);
        }

        debug!(post_id, comment_id = comment.id, "Comment appended");
        Ok(comment)
    }

    /// Snapshot of every post in insertion order.
    pub async fn list(&self) -> Vec<Post> {
        self.inner.posts.lock().await.clone()
    }

    /// Look up a single post.
    pub async fn get(&self, post_id: PostId) -> Option<Post> {
        self.inner
            .posts
            .lock()
            .await
            .iter()
            .find(|p| p.id == post_id)
            .cloned()
    }

    /// Number of posts on the board.
    pub async fn len(&self) -> usize {
        self.inner.posts.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Write the full board to disk, replacing the previous file.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    pub async fn persist(&self) -> Result<(), StoreError> {
        let posts = self.inner.posts.lock().await;
        write_posts(&self.inner.path, &posts).await
    }

    /// Flush the board one last time and release this handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the final write fails.
    pub async fn close(self) -> Result<(), StoreError> {
        self.persist().await?;
        info!(path = %self.inner.path.display(), "Post store closed");
        Ok(())
    }
}

/// Directory the store file lives in; `.` for bare file names.
fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Encode posts as JSON indented by four spaces.
fn encode_posts(posts: &[Post]) -> Result<Vec<u8>, StoreError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    posts
        .serialize(&mut serializer)
        .map_err(StoreError::Encode)?;
    buf.push(b'\n');
    Ok(buf)
}

async fn write_posts(path: &Path, posts: &[Post]) -> Result<(), StoreError> {
    let contents = encode_posts(posts)?;
    let target = path.to_path_buf();

    let result = tokio::task::spawn_blocking(move || write_atomic(&target, &contents))
        .await
        .unwrap_or_else(|e| Err(io::Error::other(e)));

    result.map_err(|source| StoreError::Persist {
        path: path.to_path_buf(),
        source,
    })
}

fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut tmp = NamedTempFile::new_in(parent_dir(path))?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
