//! SEO and Open Graph tag generation for a single page.
//!
//! Produces the tags in a fixed order so that baked output diffs cleanly
//! between runs:
//!
//! ```text
//! <meta name="description" content="…" />
//! <link rel="canonical" href="{base}/{slug}/" />
//! <title>…</title>
//! <meta property="og:type" content="article" />
//! <meta property="og:title" content="…" />
//! <meta property="og:description" content="…" />
//! <meta property="og:url" content="{base}/{slug}/" />
//! <meta property="og:image" content="{base}/{image}" />   (only with an image)
//! ```
//!
//! Title and description are plain text from the host build and are
//! entity-escaped before they land in attribute values or element text.
//! URLs built from the slug and image are escaped the same way, so a stray
//! quote cannot end the attribute.

use crate::types::LogicalPage;

/// Escape the five markup-significant characters.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Base URL without trailing slashes; `/` becomes the empty string.
pub fn normalize_base_url(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

/// Canonical URL of a page: `{base}/{slug}/` with exactly one slash at each joint.
pub fn canonical_url(base_url: &str, slug: &str) -> String {
    format!(
        "{}/{}/",
        normalize_base_url(base_url),
        slug.trim_matches('/')
    )
}

/// Absolute URL of a page image. Images already given as http(s) URLs pass through.
pub fn image_url(base_url: &str, image: &str) -> String {
    if image.starts_with("http://") || image.starts_with("https://") {
        image.to_string()
    } else {
        format!(
            "{}/{}",
            normalize_base_url(base_url),
            image.trim_start_matches('/')
        )
    }
}

/// Generate the ordered tag list for `page`.
pub fn generate_meta_tags(page: &LogicalPage, base_url: &str) -> Vec<String> {
    let title = escape_html(&page.title);
    let description = escape_html(&page.description);
    let url = escape_html(&canonical_url(base_url, &page.slug));

    let mut tags = vec![
        format!(r#"<meta name="description" content="{description}" />"#),
        format!(r#"<link rel="canonical" href="{url}" />"#),
        format!("<title>{title}</title>"),
        r#"<meta property="og:type" content="article" />"#.to_string(),
        format!(r#"<meta property="og:title" content="{title}" />"#),
        format!(r#"<meta property="og:description" content="{description}" />"#),
        format!(r#"<meta property="og:url" content="{url}" />"#),
    ];

    if let Some(image) = page.image() {
        tags.push(format!(
            r#"<meta property="og:image" content="{}" />"#,
            escape_html(&image_url(base_url, image))
        ));
    }

    tags
}
