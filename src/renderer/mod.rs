//! Address text renderer
//!
//! Resolves the tokens of a country's template against an address, composes
//! them back into their template words and joins the result into text.

pub mod compose;
pub mod config;
pub mod resolve;
pub mod style;
pub mod text;

pub use compose::compose_line;
pub use config::RenderConfig;
pub use resolve::{resolve, RelatedEntities, RenderContext};
pub use style::{FormatSpec, Style};
pub use text::{generate, render_lines};
