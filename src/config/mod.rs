//! Configuration module

mod site;

pub use site::MenuItem;
pub use site::SiteConfig;
pub use site::SocialConfig;
pub use site::DEFAULT_WORDS_PER_MINUTE;
