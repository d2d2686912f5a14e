//! Home page: the new-post form followed by the feed.

use maud::{html, Markup};

use super::FormDraft;
use crate::components::{
    Alert, BaseLayout, Button, EmptyState, Form, FormGroup, Input, PostCard, TextArea,
};
use crate::store::Post;

/// Parameters for the home page.
#[derive(Debug, Clone)]
pub struct HomePageParams<'a> {
    pub site_title: &'a str,
    pub posts: &'a [Post],
    /// Validation error from a rejected post submission.
    pub error: Option<&'a str>,
    pub draft: FormDraft<'a>,
}

impl<'a> HomePageParams<'a> {
    #[must_use]
    pub fn new(site_title: &'a str, posts: &'a [Post]) -> Self {
        Self {
            site_title,
            posts,
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

/// Render the feed with the post form above it.
#[must_use]
pub fn render_home_page(params: &HomePageParams<'_>) -> Markup {
    let content = html! {
        h1 { "Welcome" }

        @if let Some(err) = params.error {
            (Alert::error(err).with_title("Error:"))
        }

        (new_post_form(params.draft))

        hr;
        h2 { "Feed:" }

        @if params.posts.is_empty() {
            (EmptyState::no_posts())
        } @else {
            @for post in params.posts {
                (PostCard::new(post))
            }
        }
    };

    BaseLayout::new("Feed", params.site_title).render(content)
}

fn new_post_form(draft: FormDraft<'_>) -> Markup {
    let fields = html! {
        (FormGroup::new(
            "Post something:",
            "username",
            html! {
                (Input::text("username")
                    .id("username")
                    .placeholder("Name")
                    .value_opt(draft.author)
                    .required())
            },
        ))
        (FormGroup::new(
            "Text",
            "question",
            html! {
                (TextArea::new("question")
                    .id("question")
                    .placeholder("Text")
                    .value_opt(draft.text)
                    .required())
            },
        ))
        (FormGroup::new(
            "Upload a file (optional):",
            "image",
            html! { (Input::file("image").id("image").accept("image/*")) },
        ))
        (Button::primary("Post").r#type("submit"))
    };

    html! { (Form::post("/post-question", fields).multipart()) }
}
