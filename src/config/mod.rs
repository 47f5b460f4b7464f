//! Configuration module

mod site;

pub use site::PrettyUrlsConfig;
pub use site::SiteConfig;
