use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a post. Assigned in creation order starting at 0.
pub type PostId = u64;

/// Identifier of a comment, unique within its parent post.
pub type CommentId = u64;

/// A top-level submission on the board.
///
/// Files written before ids and timestamps existed used `username` and
/// `answers` for the author and comment list; both still deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub id: PostId,
    #[serde(alias = "username")]
    pub author: String,
    pub text: String,
    /// URL of the attached image, if one was uploaded.
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "answers")]
    pub comments: Vec<Comment>,
}

/// A reply attached to exactly one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(default)]
    pub id: CommentId,
    #[serde(alias = "username")]
    pub author: String,
    pub text: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Data for creating a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author: String,
    pub text: String,
    pub image: Option<String>,
}

/// Data for creating a new comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub author: String,
    pub text: String,
}

impl Post {
    /// Number of comments on this post.
    #[must_use]
    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    pub(crate) fn next_comment_id(&self) -> CommentId {
        self.comments.last().map_or(0, |c| c.id + 1)
    }
}

/// Assign ids by position where a loaded file lacks consistent ones.
///
/// Returns true if anything was renumbered.
pub(crate) fn normalize_ids(posts: &mut [Post]) -> bool {
    let mut changed = false;
    for (post_id, post) in (0..).zip(posts.iter_mut()) {
        if post.id != post_id {
            post.id = post_id;
            changed = true;
        }
        for (comment_id, comment) in (0..).zip(post.comments.iter_mut()) {
            if comment.id != comment_id {
                comment.id = comment_id;
                changed = true;
            }
        }
    }
    changed
}
