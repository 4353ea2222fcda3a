//! Shared test utilities for the og-bake test suite.
//!
//! Provides a realistic shell document, temp project setup, page builders and
//! extractors for the tags a bake injects.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let project = setup_project(SHELL);
//! let page = make_page("blog/post-1", "Post One", "First post");
//! ```

use regex::Regex;
use std::sync::LazyLock;
use tempfile::TempDir;

use crate::materialize::find_head_close;
use crate::pipeline::{SHELL_FILE, WWWROOT_DIR};
use crate::types::LogicalPage;

// =========================================================================
// Fixtures
// =========================================================================

/// A built root page as a static site generator leaves it: SEO tags from the
/// home page already present, relative asset URLs, a root `<base>`.
pub const SHELL: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>Home</title>
    <base href="/" />
    <meta name="description" content="The home page" />
    <link rel="canonical" href="https://ex.com/" />
    <meta property="og:type" content="website" />
    <meta property="og:title" content="Home" />
    <meta property="og:url" content="https://ex.com/" />
    <link rel="stylesheet" href="css/app.css" />
    <link rel="icon" type="image/png" href="favicon.png" />
</head>
<body>
    <div id="app">Loading...</div>
    <a href="https://github.com/ex/site">Source</a>
    <script src="_framework/blazor.webassembly.js"></script>
</body>
</html>
"#;

/// Create a temp project with `wwwroot/index.html` set to `shell`.
pub fn setup_project(shell: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    let wwwroot = tmp.path().join(WWWROOT_DIR);
    std::fs::create_dir_all(&wwwroot).unwrap();
    std::fs::write(wwwroot.join(SHELL_FILE), shell).unwrap();
    tmp
}

// =========================================================================
// Builders
// =========================================================================

/// A page without an image.
pub fn make_page(slug: &str, title: &str, description: &str) -> LogicalPage {
    LogicalPage {
        slug: slug.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        image: None,
    }
}

/// Owned argument list from string literals.
pub fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

// =========================================================================
// Extractors and assertions
// =========================================================================

static INJECTED_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<meta name="description"[^>]*>|<link rel="canonical"[^>]*>|<title>.*?</title>|<meta property="og:[^>]*>"#)
        .unwrap()
});

/// The SEO tags inside `<head>`, in document order.
pub fn generated_tags(html: &str) -> Vec<&str> {
    let head_close = find_head_close(html).expect("document has </head>");
    INJECTED_TAG
        .find_iter(&html[..head_close])
        .map(|m| m.as_str())
        .collect()
}

/// Assert that none of the stripped tag families survive in `html`.
pub fn assert_no_seo_tags(html: &str) {
    let lower = html.to_lowercase();
    for needle in [
        "property=\"og:",
        "name=\"description\"",
        "rel=\"canonical\"",
        "<title",
    ] {
        assert!(
            !lower.contains(needle),
            "found '{needle}' after stripping:\n{html}"
        );
    }
}
