//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::SiteConfig;

/// Characters `encodeURIComponent` leaves alone
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Root-relative URL with a trailing slash for directory routes
///
/// # Examples
/// ```ignore
/// url_for("blog/2021/01/01/a") // -> "/blog/2021/01/01/a/"
/// ```
pub fn url_for(path: &str) -> String {
    let path = path.trim_matches('/');
    if path.is_empty() {
        "/".to_string()
    } else if path.ends_with(".html") {
        format!("/{}", path)
    } else {
        format!("/{}/", path)
    }
}

/// Href of a post detail page, each slug segment percent-encoded
pub fn post_path(config: &SiteConfig, slug: &str) -> String {
    let segments: Vec<String> = slug.split('/').map(encode_component).collect();
    post_route(config, &segments.join("/"))
}

/// Location of a post page under the public directory, unencoded
pub fn post_output_path(config: &SiteConfig, slug: &str) -> String {
    format!("{}index.html", post_route(config, slug))
}

// Always a directory route, even for a title ending in `.html`
fn post_route(config: &SiteConfig, slug: &str) -> String {
    match config.blog_route.trim_matches('/') {
        "" => format!("/{}/", slug),
        blog => format!("/{}/{}/", blog, slug),
    }
}

/// Percent-encode a URI component
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

/// Sharing links for a post
#[derive(Debug, Clone, serde::Serialize)]
pub struct ShareLinks {
    pub twitter: String,
    pub linkedin: String,
}

impl ShareLinks {
    pub fn new(url: &str, text: &str) -> Self {
        let url = encode_component(url);
        Self {
            twitter: format!(
                "https://twitter.com/intent/tweet?text={}&url={}",
                encode_component(text),
                url
            ),
            linkedin: format!(
                "https://www.linkedin.com/sharing/share-offsite/?url={}",
                url
            ),
        }
    }
}
