//! Root-relative URL rewriting.
//!
//! Every page is written one or more directories below the shell, so any
//! relative `src="…"` or `href="…"` copied from the shell would resolve
//! against the wrong directory. Rooting rewrites those values to start at
//! the site root:
//!
//! ```text
//! src="img/a.png"          →  src="/img/a.png"
//! href="/already/rooted"   →  href="/already/rooted"
//! href="https://ex.com/x"  →  href="https://ex.com/x"
//! href="//cdn.ex.com/a.js" →  href="/cdn.ex.com/a.js"   (known limitation)
//! ```
//!
//! Only `http://` and `https://` values are treated as absolute. Leading
//! slashes are trimmed and exactly one is put back, so protocol-relative
//! URLs lose their host meaning. Fragments and other schemes (`#top`,
//! `mailto:`) are prefixed as well.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static URL_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(src|href)="([^"]+)""#).expect("valid url attribute regex"));

fn is_absolute(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Prefix every non-absolute `src`/`href` value with a single `/`.
pub fn root_all_urls(html: &str) -> String {
    URL_ATTR
        .replace_all(html, |caps: &Captures| {
            let value = &caps[2];
            if is_absolute(value) {
                caps[0].to_string()
            } else {
                format!("{}=\"/{}\"", &caps[1], value.trim_start_matches('/'))
            }
        })
        .into_owned()
}
