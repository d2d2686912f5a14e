//! Post detail page with the comment form.

use maud::{html, Markup};

use super::FormDraft;
use crate::components::{
    Alert, BaseLayout, Button, Form, FormGroup, ImageViewer, Input, TextArea,
};
use crate::store::Post;

/// Parameters for the post detail page.
#[derive(Debug, Clone)]
pub struct PostDetailParams<'a> {
    pub site_title: &'a str,
    pub post: &'a Post,
    /// Validation error from a rejected comment.
    pub error: Option<&'a str>,
    pub draft: FormDraft<'a>,
}

impl<'a> PostDetailParams<'a> {
    #[must_use]
    pub fn new(site_title: &'a str, post: &'a Post) -> Self {
        Self {
            site_title,
            post,
            error: None,
            draft: FormDraft::default(),
        }
    }

    #[must_use]
    pub fn error(mut self, error: &'a str, draft: FormDraft<'a>) -> Self {
        self.error = Some(error);
        self.draft = draft;
        self
    }
}

/// Render one post, its comment form and all of its comments.
#[must_use]
pub fn render_post_detail_page(params: &PostDetailParams<'_>) -> Markup {
    let post = params.post;
    let action = format!("/answer/{}", post.id);

    let fields = html! {
        (FormGroup::new(
            "Your Answer:",
            "username",
            html! {
                (Input::text("username")
                    .id("username")
                    .placeholder("Name")
                    .value_opt(params.draft.author)
                    .required())
            },
        ))
        (FormGroup::new(
            "Answer",
            "answer",
            html! {
                (TextArea::new("answer")
                    .id("answer")
                    .placeholder("Your Answer")
                    .value_opt(params.draft.text)
                    .required())
            },
        ))
        (Button::primary("Post Answer").r#type("submit"))
    };

    let content = html! {
        p {
            strong { "Comment:" }
            " "
            (post.text)
        }
        p class="meta" {
            strong { "Posted by:" } " " (post.author)
        }
        @if let Some(ref image) = post.image {
            (ImageViewer::new(image).with_alt("Uploaded image").lazy(false))
        }

        @if let Some(err) = params.error {
            (Alert::error(err).with_title("Error:"))
        }

        (Form::post(&action, fields))

        hr;
        h2 { "All Comments:" }
        @for comment in &post.comments {
            p {
                strong { (comment.author) ":" }
                " "
                (comment.text)
            }
        }
        (Button::outline("Back to Home").href("/"))
    };

    BaseLayout::new("Answer", params.site_title).render(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Comment;

    fn sample_post() -> Post {
        Post {
            id: 3,
            author: "Alice".to_string(),
            text: "Hello".to_string(),
            image: Some("/static/uploads/cat.png".to_string()),
            created_at: None,
            comments: vec![
                Comment {
                    id: 0,
                    author: "Bob".to_string(),
                    text: "Hi!".to_string(),
                    created_at: None,
                },
                Comment {
                    id: 1,
                    author: "Eve".to_string(),
                    text: "Hey".to_string(),
                    created_at: None,
                },
            ],
        }
    }

    #[test]
    fn test_post_detail_page() {
        let post = sample_post();
        let html = render_post_detail_page(&PostDetailParams::new("Answerious", &post))
            .into_string();

        assert!(html.contains("<title>Answer - Answerious</title>"));
        assert!(html.contains("Hello"));
        assert!(html.contains(r#"src="/static/uploads/cat.png""#));
        assert!(html.contains(r#"action="/answer/3""#));
        assert!(html.contains(r#"name="answer""#));
        assert!(html.contains("<strong>Bob:</strong> Hi!"));
        assert!(html.contains("<strong>Eve:</strong> Hey"));
        assert!(html.contains(r#"href="/""#));
        assert!(!html.contains("enctype"));
    }

    #[test]
    fn test_post_detail_page_with_error() {
        let post = sample_post();
        let draft = FormDraft {
            author: None,
            text: Some("half-written"),
        };
        let params = PostDetailParams::new("Answerious", &post).error("name is required", draft);
        let html = render_post_detail_page(&params).into_string();

        assert!(html.contains("name is required"));
        assert!(html.contains("half-written"));
    }
}
