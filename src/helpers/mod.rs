//! Helper functions shared by the content pipeline and the templates
//!
//! Date formatting and reading time are the derived fields attached to
//! every post; the URL helpers build routes and share links.

mod date;
mod reading;
mod url;

pub use date::*;
pub use reading::*;
pub use url::*;
