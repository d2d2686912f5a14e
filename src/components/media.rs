//! Image display for post attachments.

use maud::{html, Markup, Render};

/// Image viewer component.
#[derive(Debug, Clone)]
pub struct ImageViewer<'a> {
    /// Source URL for the image
    pub src: &'a str,
    /// Optional alt text for accessibility
    pub alt: Option<&'a str>,
    /// Whether to use lazy loading
    pub lazy: bool,
}

impl<'a> ImageViewer<'a> {
    #[must_use]
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            alt: None,
            lazy: true,
        }
    }

    #[must_use]
    pub fn with_alt(mut self, alt: &'a str) -> Self {
        self.alt = Some(alt);
        self
    }

    #[must_use]
    pub fn lazy(mut self, lazy: bool) -> Self {
        self.lazy = lazy;
        self
    }
}

impl Render for ImageViewer<'_> {
    fn render(&self) -> Markup {
        let alt_text = self.alt.unwrap_or("Attached image");
        let loading = self.lazy.then_some("lazy");

        html! {
            div class="media-container" {
                img src=(self.src) alt=(alt_text) loading=[loading];
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_viewer_defaults() {
        let html = ImageViewer::new("/static/uploads/cat.png")
            .render()
            .into_string();
        assert!(html.contains(r#"src="/static/uploads/cat.png""#));
        assert!(html.contains(r#"alt="Attached image""#));
        assert!(html.contains(r#"loading="lazy""#));
    }

    #[test]
    fn test_image_viewer_eager_with_alt() {
        let html = ImageViewer::new("/x.png")
            .with_alt("file")
            .lazy(false)
            .render()
            .into_string();
        assert!(html.contains(r#"alt="file""#));
        assert!(!html.contains("loading"));
    }
}
