//! External content sources for the KB growth cron.

mod woocommerce_source;
mod wordpress_source;

pub use woocommerce_source::{WoocommerceSource, WoocommerceStore};
pub use wordpress_source::{WordpressSite, WordpressSource};

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

/// Drops HTML tags and collapses whitespace.
pub(crate) fn strip_html(html: &str) -> String {
    let text = TAG_RE.replace_all(html, " ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
