//! Removal of previously baked SEO and Open Graph tags.
//!
//! The shell may already carry a `<title>`, a description and Open Graph tags
//! (from the root page or from an earlier bake). Before fresh tags are
//! injected the shell is reduced to a blank template by removing, as whole
//! elements:
//!
//! - `<meta property="og:…">`
//! - `<meta name="description">`
//! - `<link rel="canonical">`
//! - `<title>…</title>`
//!
//! Matching is targeted pattern matching, not parsing: case-insensitive,
//! indifferent to attribute order, quote style and line breaks inside a tag.
//! Twitter card tags are left alone unless [`StripOptions::twitter`] is set,
//! since the generator never emits them.

use regex::Regex;
use std::sync::LazyLock;

static OG_META: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<meta\s+[^>]*\bproperty\s*=\s*['"]og:[^'"]+['"][^>]*>"#)
        .expect("valid og meta regex")
});

static TWITTER_META: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<meta\s+[^>]*\bname\s*=\s*['"]twitter:[^'"]+['"][^>]*>"#)
        .expect("valid twitter meta regex")
});

static DESCRIPTION_META: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<meta\s+[^>]*\bname\s*=\s*['"]description['"][^>]*>"#)
        .expect("valid description meta regex")
});

static CANONICAL_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<link\s+[^>]*\brel\s*=\s*['"]canonical['"][^>]*>"#)
        .expect("valid canonical link regex")
});

static TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<title(?:\s[^>]*)?>.*?</title\s*>").expect("valid title regex")
});

/// Which optional tag families to strip in addition to the standard set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StripOptions {
    /// Also strip `<meta name="twitter:…">`. Off by default.
    pub twitter: bool,
}

/// Strip the standard SEO tag set from `html`.
pub fn strip_seo_tags(html: &str) -> String {
    strip_with(html, StripOptions::default())
}

/// Strip SEO tags, repeating until nothing matches.
///
/// A removal can splice the surrounding text into a new match
/// (`<meta <title></title>property="og:x">`), so a single pass is not
/// idempotent. Each pass only ever shrinks the text, so the loop terminates.
pub fn strip_with(html: &str, options: StripOptions) -> String {
    let mut patterns: Vec<&Regex> = vec![&*OG_META];
    if options.twitter {
        patterns.push(&*TWITTER_META);
    }
    patterns.extend([&*DESCRIPTION_META, &*CANONICAL_LINK, &*TITLE]);

    let mut current = html.to_string();
    loop {
        let mut changed = false;
        for re in &patterns {
            if re.is_match(&current) {
                current = re.replace_all(&current, "").into_owned();
                changed = true;
            }
        }
        if !changed {
            return current;
        }
    }
}
