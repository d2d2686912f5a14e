//! Maud-based page templates for the web UI.
//!
//! Each page module exports a render function that produces the complete HTML.

pub mod error;
pub mod home;
pub mod post;

pub use error::render_error_page;
pub use home::{render_home_page, HomePageParams};
pub use post::{render_post_detail_page, PostDetailParams};

/// Values a visitor typed into a form, echoed back when it is rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormDraft<'a> {
    pub author: Option<&'a str>,
    pub text: Option<&'a str>,
}
