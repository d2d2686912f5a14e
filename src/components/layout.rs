//! Base layout components for the web UI.
//!
//! This module provides the HTML skeleton shared by every page: head,
//! inline stylesheet, navigation and footer.

use maud::{html, Markup, PreEscaped, DOCTYPE};

/// Terminal-style theme. Inline so the board works without a static dir.
const BASE_STYLE: &str = r"
body { color: green; background-color: black; font-family: consolas, monospace; }
h1 { color: white; font-family: Arial, sans-serif; }
a { color: #7CFC00; }
input, textarea { color: green; font-family: consolas, monospace; background-color: black; }
img { max-width: 300px; display: block; margin-top: 10px; }
.post-card { border: 1px solid #ccc; padding: 10px; margin-bottom: 10px; }
.form-group { margin-bottom: 0.5rem; }
.form-group label { display: block; }
article.error { color: #ff5555; border: 1px solid #ff5555; padding: 0.5rem; }
.timestamp { color: #5a5; }
";

/// Base page layout builder.
///
/// # Example
///
/// ```ignore
/// use maud::html;
/// use crate::components::layout::BaseLayout;
///
/// let content = html! { h1 { "Hello World" } };
/// let page = BaseLayout::new("Feed", "Answerious").render(content);
/// ```
#[derive(Debug, Clone)]
pub struct BaseLayout<'a> {
    title: &'a str,
    site_title: &'a str,
}

impl<'a> BaseLayout<'a> {
    /// Create a new base layout with the given page title and site name.
    #[must_use]
    pub fn new(title: &'a str, site_title: &'a str) -> Self {
        Self { title, site_title }
    }

    /// Render the complete HTML page with the given content.
    ///
    /// The content will be placed inside the `<main class="container">` element.
    #[must_use]
    pub fn render(self, content: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1.0";
                    title { (self.title) " - " (self.site_title) }
                    style { (PreEscaped(BASE_STYLE)) }
                }
                body {
                    (self.render_header())
                    main class="container" {
                        (content)
                    }
                    (self.render_footer())
                }
            }
        }
    }

    /// Render the page header with navigation.
    fn render_header(&self) -> Markup {
        html! {
            header class="container" {
                nav {
                    a href="/" {
                        strong class="site-logo" { (self.site_title) }
                    }
                }
            }
        }
    }

    fn render_footer(&self) -> Markup {
        html! {
            footer class="container" {
                small {
                    (self.site_title)
                    " | "
                    a href="/api/posts" { "JSON" }
                }
            }
        }
    }
}
