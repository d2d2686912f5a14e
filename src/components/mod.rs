//! Maud HTML template components for the web UI.
//!
//! - `layout`: Base page layout and navigation
//! - `button`: Button and link-button component
//! - `alert`: Alert messages
//! - `card`: Post cards, comment lists and the empty feed state
//! - `form`: Form elements and input components
//! - `media`: Image display
//!
//! # Example
//!
//! ```ignore
//! use maud::{html, Markup};
//! use crate::components::{Alert, BaseLayout, Button, Input};
//!
//! fn my_page() -> Markup {
//!     let content = html! {
//!         h1 { "Hello World" }
//!         (Alert::error("name is required"))
//!         (Button::primary("Click me"))
//!         (Input::text("username").placeholder("Name"))
//!     };
//!     BaseLayout::new("My Page", "Answerious").render(content)
//! }
//! ```

pub mod alert;
pub mod button;
pub mod card;
pub mod form;
pub mod layout;
pub mod media;

pub use alert::{Alert, AlertVariant};
pub use button::{Button, ButtonVariant};
pub use card::{CommentList, EmptyState, PostCard};
pub use form::{Form, FormGroup, Input, TextArea};
pub use layout::BaseLayout;
pub use media::ImageViewer;

/// Re-export maud for convenience
pub use maud::{html, Markup, PreEscaped, DOCTYPE};
