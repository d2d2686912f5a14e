//! Card components for posts and their comments.

use maud::{html, Markup, Render};

use super::media::ImageViewer;
use crate::store::{Comment, Post};

/// A post as shown in the feed: text, author, image, comments and a link to
/// the comment page.
#[derive(Debug, Clone)]
pub struct PostCard<'a> {
    pub post: &'a Post,
}

impl<'a> PostCard<'a> {
    #[must_use]
    pub const fn new(post: &'a Post) -> Self {
        Self { post }
    }
}

impl Render for PostCard<'_> {
    fn render(&self) -> Markup {
        let post = self.post;
        let comment_href = format!("/answer/{}", post.id);
        let posted_at = post
            .created_at
            .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string());

        html! {
            article class="post-card" id=(format!("post-{}", post.id)) {
                h3 { (post.text) }
                p {
                    strong { "Posted by:" }
                    " "
                    (post.author)
                    @if let Some(ref posted_at) = posted_at {
                        " "
                        small class="timestamp" { (posted_at) }
                    }
                }
                @if let Some(ref image) = post.image {
                    (ImageViewer::new(image).with_alt("file"))
                }
                hr;
                h4 { "Comments:" }
                (CommentList::new(&post.comments))
                a href=(comment_href) { "Comment" }
            }
        }
    }
}

/// The comments under a post, or a prompt when there are none.
#[derive(Debug, Clone)]
pub struct CommentList<'a> {
    pub comments: &'a [Comment],
}

impl<'a> CommentList<'a> {
    #[must_use]
    pub const fn new(comments: &'a [Comment]) -> Self {
        Self { comments }
    }
}

impl Render for CommentList<'_> {
    fn render(&self) -> Markup {
        html! {
            @if self.comments.is_empty() {
                p class="no-comments" { "No comments yet. Be the first to comment!" }
            } @else {
                ul class="comments" {
                    @for comment in self.comments {
                        li {
                            strong { (comment.author) ":" }
                            " "
                            (comment.text)
                        }
                    }
                }
            }
        }
    }
}

/// Placeholder shown when a list has nothing in it.
#[derive(Debug, Clone)]
pub struct EmptyState<'a> {
    pub message: &'a str,
}

impl<'a> EmptyState<'a> {
    /// The "nothing posted yet" feed placeholder.
    #[must_use]
    pub const fn no_posts() -> Self {
        Self {
            message: "Nothing has been posted yet.",
        }
    }
}

impl Render for EmptyState<'_> {
    fn render(&self) -> Markup {
        html! {
            p class="empty-state" { (self.message) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post(comments: Vec<Comment>, image: Option<&str>) -> Post {
        Post {
            id: 7,
            author: "Alice".to_string(),
            text: "Hello".to_string(),
            image: image.map(str::to_string),
            created_at: None,
            comments,
        }
    }

    fn sample_comment(author: &str, text: &str) -> Comment {
        Comment {
            id: 0,
            author: author.to_string(),
            text: text.to_string(),
            created_at: None,
        }
    }

    #[test]
    fn test_post_card_without_comments() {
        let post = sample_post(vec![], None);
        let html = PostCard::new(&post).render().into_string();

        assert!(html.contains("<h3>Hello</h3>"));
        assert!(html.contains("Alice"));
        assert!(html.contains("No comments yet. Be the first to comment!"));
        assert!(html.contains(r#"href="/answer/7""#));
        assert!(html.contains(r#"id="post-7""#));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_post_card_with_image_and_comments() {
        let post = sample_post(
            vec![sample_comment("Bob", "Hi!")],
            Some("/static/uploads/cat.png"),
        );
        let html = PostCard::new(&post).render().into_string();

        assert!(html.contains(r#"src="/static/uploads/cat.png""#));
        assert!(html.contains("<strong>Bob:</strong> Hi!"));
        assert!(!html.contains("No comments yet"));
    }

    #[test]
    fn test_comment_list_escapes_content() {
        let comments = vec![sample_comment("<i>eve</i>", "<script>alert(1)</script>")];
        let html = CommentList::new(&comments).render().into_string();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&lt;i&gt;eve&lt;/i&gt;"));
    }

    #[test]
    fn test_empty_state() {
        let html = EmptyState::no_posts().render().into_string();
        assert!(html.contains("Nothing has been posted yet."));
    }
}
