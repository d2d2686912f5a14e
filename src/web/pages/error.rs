//! Error page shown for missing posts and failed requests.

use maud::{html, Markup};

use crate::components::{Alert, BaseLayout, Button};

/// Render a full page around an error message.
#[must_use]
pub fn render_error_page(site_title: &str, heading: &str, message: &str) -> Markup {
    let content = html! {
        h1 { (heading) }
        (Alert::error(message))
        p { (Button::outline("Back to Home").href("/")) }
    };

    BaseLayout::new(heading, site_title).render(content)
}
