//! Board operations: reading the feed, posting, and commenting.
//!
//! These functions hold the request-level rules (required fields, optional
//! image upload) and are independent of HTTP so they can be driven from the
//! web layer and from tests alike.

use thiserror::Error;
use tracing::info;

use crate::store::{Comment, NewComment, NewPost, Post, PostId, PostStore, StoreError};
use crate::uploads::{UploadError, UploadStore};

#[derive(Debug, Error)]
pub enum ForumError {
    #[error("{0} is required")]
    Validation(&'static str),
    #[error("image file name {0:?} is not usable")]
    InvalidImage(String),
    #[error("post {post_id} not found")]
    OutOfRange { post_id: PostId },
    #[error("storage error: {0}")]
    Persistence(#[source] StoreError),
    #[error("upload failed: {0}")]
    Upload(#[from] UploadError),
}

impl From<StoreError> for ForumError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::OutOfRange { post_id, .. } => Self::OutOfRange { post_id },
            other => Self::Persistence(other),
        }
    }
}

/// A file attached to a new post.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// A new post as submitted by a client.
#[derive(Debug, Clone, Default)]
pub struct PostSubmission {
    pub author: String,
    pub text: String,
    pub image: Option<UploadedFile>,
}

/// A new comment as submitted by a client.
#[derive(Debug, Clone, Default)]
pub struct CommentSubmission {
    pub author: String,
    pub text: String,
}

/// Every post on the board, oldest first.
pub async fn list_feed(store: &PostStore) -> Vec<Post> {
    store.list().await
}

/// Fetch a single post for its detail view.
///
/// # Errors
///
/// Returns [`ForumError::OutOfRange`] if the post does not exist.
pub async fn show_post(store: &PostStore, post_id: PostId) -> Result<Post, ForumError> {
    store
        .get(post_id)
        .await
        .ok_or(ForumError::OutOfRange { post_id })
}

/// Validate and publish a new post, storing its image first if one is attached.
///
/// Nothing is written when validation fails.
///
/// # Errors
///
/// Returns a validation error for an empty author or text,
/// [`ForumError::InvalidImage`] if the image's file name has no usable final
/// component, an upload error if the image cannot be stored, or a persistence error if the board cannot be
/// saved.
pub async fn create_post(
    store: &PostStore,
    uploads: &UploadStore,
    submission: PostSubmission,
) -> Result<Post, ForumError> {
    required("name", &submission.author)?;
    required("text", &submission.text)?;

    let image = match submission.image {
        Some(file) if !file.filename.trim().is_empty() && !file.bytes.is_empty() => {
            let url = uploads
                .save(&file.filename, &file.bytes)
                .await
                .map_err(|e| match e {
                    UploadError::InvalidName(name) => ForumError::InvalidImage(name),
                    other => ForumError::Upload(other),
                })?;
            Some(url)
        }
        _ => None,
    };

    let post = store
        .append_post(NewPost {
            author: submission.author,
            text: submission.text,
            image,
        })
        .await?;

    info!(post_id = post.id, author = %post.author, has_image = post.image.is_some(), "Post created");
    Ok(post)
}

/// Validate and attach a comment to an existing post.
///
/// # Errors
///
/// Returns a validation error for an empty author or text,
/// [`ForumError::OutOfRange`] if the post does not exist, or a persistence
/// error if the board cannot be saved.
pub async fn create_comment(
    store: &PostStore,
    post_id: PostId,
    submission: CommentSubmission,
) -> Result<Comment, ForumError> {
    required("name", &submission.author)?;
    required("comment", &submission.text)?;

    let comment = store
        .append_comment(
            post_id,
            NewComment {
                author: submission.author,
                text: submission.text,
            },
        )
        .await?;

    info!(post_id, comment_id = comment.id, author = %comment.author, "Comment created");
    Ok(comment)
}

/// Fields are stored exactly as submitted; only an empty value is rejected.
fn required(field: &'static str, value: &str) -> Result<(), ForumError> {
    if value.is_empty() {
        return Err(ForumError::Validation(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn setup() -> (PostStore, UploadStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = PostStore::load(dir.path().join("posts.json")).await.unwrap();
        let uploads = UploadStore::new(dir.path().join("uploads"), "/static/uploads");
        (store, uploads, dir)
    }

    fn post(author: &str, text: &str) -> PostSubmission {
        PostSubmission {
            author: author.to_string(),
            text: text.to_string(),
            image: None,
        }
    }

    fn comment(author: &str, text: &str) -> CommentSubmission {
        CommentSubmission {
            author: author.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_required_rejects_only_empty() {
        assert!(required("name", "alice").is_ok());
        assert!(required("name", " ").is_ok());
        assert!(matches!(
            required("name", ""),
            Err(ForumError::Validation("name"))
        ));
    }

    #[test]
    fn test_store_errors_map_to_taxonomy() {
        let err: ForumError = StoreError::OutOfRange { post_id: 4, len: 1 }.into();
        assert!(matches!(err, ForumError::OutOfRange { post_id: 4 }));

        let err: ForumError = StoreError::Persist {
            path: "x".into(),
            source: std::io::Error::other("disk full"),
        }
        .into();
        assert!(matches!(err, ForumError::Persistence(_)));
    }

    #[tokio::test]
    async fn test_create_post_appends_last_with_no_comments() {
        let (store, uploads, _dir) = setup().await;
        create_post(&store, &uploads, post("Alice", "Hello")).await.unwrap();
        create_post(&store, &uploads, post("Bob", "Second")).await.unwrap();

        let feed = list_feed(&store).await;
        assert_eq!(feed.len(), 2);
        let last = feed.last().unwrap();
        assert_eq!(last.author, "Bob");
        assert_eq!(last.text, "Second");
        assert!(last.comments.is_empty());
        assert!(last.image.is_none());
    }

    #[tokio::test]
    async fn test_create_post_requires_fields() {
        let (store, uploads, _dir) = setup().await;

        let err = create_post(&store, &uploads, post("", "Hello")).await.unwrap_err();
        assert!(matches!(err, ForumError::Validation("name")));

        let err = create_post(&store, &uploads, post("Alice", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, ForumError::Validation("text")));

        assert!(list_feed(&store).await.is_empty());
    }

    #[tokio::test]
    async fn test_post_text_is_stored_verbatim() {
        let (store, uploads, _dir) = setup().await;

        let created = create_post(&store, &uploads, post(" ", "    indented code\n"))
            .await
            .unwrap();
        assert_eq!(created.author, " ");
        assert_eq!(created.text, "    indented code\n");

        create_comment(&store, created.id, comment("  bob", "line one\nline two\n"))
            .await
            .unwrap();

        let stored = show_post(&store, created.id).await.unwrap();
        assert_eq!(stored.text, "    indented code\n");
        assert_eq!(stored.comments[0].author, "  bob");
        assert_eq!(stored.comments[0].text, "line one\nline two\n");
    }

    #[tokio::test]
    async fn test_unusable_image_name_is_rejected_without_writing() {
        let (store, uploads, dir) = setup().await;
        let submission = PostSubmission {
            author: "Alice".to_string(),
            text: "Look".to_string(),
            image: Some(UploadedFile {
                filename: "..".to_string(),
                bytes: b"meow".to_vec(),
            }),
        };

        let err = create_post(&store, &uploads, submission).await.unwrap_err();
        assert!(matches!(err, ForumError::InvalidImage(ref name) if name == ".."));
        assert!(list_feed(&store).await.is_empty());
        assert!(!dir.path().join("uploads").exists());
    }

    #[tokio::test]
    async fn test_invalid_post_does_not_store_upload() {
        let (store, uploads, dir) = setup().await;
        let submission = PostSubmission {
            author: String::new(),
            text: "Hello".to_string(),
            image: Some(UploadedFile {
                filename: "cat.png".to_string(),
                bytes: b"meow".to_vec(),
            }),
        };

        assert!(create_post(&store, &uploads, submission).await.is_err());
        assert!(!dir.path().join("uploads").join("cat.png").exists());
    }

    #[tokio::test]
    async fn test_create_post_with_image() {
        let (store, uploads, dir) = setup().await;
        let submission = PostSubmission {
            author: "Alice".to_string(),
            text: "Look".to_string(),
            image: Some(UploadedFile {
                filename: "cat.png".to_string(),
                bytes: b"meow".to_vec(),
            }),
        };

        let created = create_post(&store, &uploads, submission).await.unwrap();
        assert_eq!(created.image.as_deref(), Some("/static/uploads/cat.png"));
        assert!(dir.path().join("uploads").join("cat.png").exists());
    }

    #[tokio::test]
    async fn test_empty_file_field_means_no_image() {
        let (store, uploads, _dir) = setup().await;
        let submission = PostSubmission {
            author: "Alice".to_string(),
            text: "No picture".to_string(),
            image: Some(UploadedFile {
                filename: String::new(),
                bytes: Vec::new(),
            }),
        };

        let created = create_post(&store, &uploads, submission).await.unwrap();
        assert!(created.image.is_none());
    }

    #[tokio::test]
    async fn test_create_comment_touches_only_target_post() {
        let (store, uploads, _dir) = setup().await;
        create_post(&store, &uploads, post("Alice", "One")).await.unwrap();
        create_post(&store, &uploads, post("Bob", "Two")).await.unwrap();
        let before = list_feed(&store).await;

        create_comment(&store, 1, comment("Eve", "Nice")).await.unwrap();

        let after = list_feed(&store).await;
        assert_eq!(after[0], before[0]);
        assert_eq!(after[1].comments.len(), before[1].comments.len() + 1);
        assert_eq!(after[1].comments[0].author, "Eve");
        assert_eq!(after[1].comments[0].text, "Nice");
    }

    #[tokio::test]
    async fn test_create_comment_requires_fields() {
        let (store, uploads, _dir) = setup().await;
        create_post(&store, &uploads, post("Alice", "One")).await.unwrap();

        let err = create_comment(&store, 0, comment("Bob", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, ForumError::Validation("comment")));
        assert!(show_post(&store, 0).await.unwrap().comments.is_empty());
    }

    #[tokio::test]
    async fn test_comment_out_of_range_leaves_store_unchanged() {
        let (store, uploads, _dir) = setup().await;
        create_post(&store, &uploads, post("Alice", "One")).await.unwrap();
        let before = list_feed(&store).await;

        let err = create_comment(&store, 1, comment("Eve", "x"))
            .await
            .unwrap_err();
        assert!(matches!(err, ForumError::OutOfRange { post_id: 1 }));
        assert_eq!(list_feed(&store).await, before);
    }

    #[tokio::test]
    async fn test_show_post_missing() {
        let (store, _uploads, _dir) = setup().await;
        assert!(matches!(
            show_post(&store, 0).await,
            Err(ForumError::OutOfRange { post_id: 0 })
        ));
    }
}
