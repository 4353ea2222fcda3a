//! Per-page output: blank template → page document → file on disk.
//!
//! ## Transform Order
//!
//! ```text
//! 1. <base href="/" />   →  <base href="{base}/" />
//! 2. generated tags      →  inserted before the first </head>, one per line
//! 3. root_all_urls       →  relative src/href values become /…
//! ```
//!
//! Rooting runs last so that anything inserted in steps 1-2 is covered too.
//! [`render_page`] is pure; [`materialize_page`] adds the filesystem write
//! to `{wwwroot}/{slug}/index.html`.

use crate::meta::{generate_meta_tags, normalize_base_url};
use crate::rooter::root_all_urls;
use crate::types::LogicalPage;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Base element the shell is expected to carry.
pub const ROOT_BASE_TAG: &str = r#"<base href="/" />"#;

const HEAD_CLOSE: &str = "</head>";

#[derive(Error, Debug)]
pub enum MaterializeError {
    #[error("Template has no </head> to inject tags before")]
    MissingHeadClose,
    #[error("Slug '{0}' would write outside the output directory")]
    UnsafeSlug(String),
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Byte offset of the first `</head>`, ignoring ASCII case.
pub fn find_head_close(html: &str) -> Option<usize> {
    html.as_bytes()
        .windows(HEAD_CLOSE.len())
        .position(|w| w.eq_ignore_ascii_case(HEAD_CLOSE.as_bytes()))
}

/// Build the output document for `page` from the shared blank template.
pub fn render_page(
    blank: &str,
    base_url: &str,
    page: &LogicalPage,
) -> Result<String, MaterializeError> {
    let base_tag = format!(r#"<base href="{}/" />"#, normalize_base_url(base_url));
    let html = blank.replace(ROOT_BASE_TAG, &base_tag);

    let head_close = find_head_close(&html).ok_or(MaterializeError::MissingHeadClose)?;
    let tags = generate_meta_tags(page, base_url).join("\n");

    let mut document = String::with_capacity(html.len() + tags.len() + 1);
    document.push_str(&html[..head_close]);
    document.push_str(&tags);
    document.push('\n');
    document.push_str(&html[head_close..]);

    Ok(root_all_urls(&document))
}

/// Output file for `page`: `{wwwroot}/{segments…}/index.html`.
///
/// Slugs are host-supplied; `.`/`..` segments and backslashes are refused
/// so no write lands outside `wwwroot`.
pub fn output_path(wwwroot: &Path, page: &LogicalPage) -> Result<PathBuf, MaterializeError> {
    let slug = page.trimmed_slug();
    let mut path = wwwroot.to_path_buf();
    for segment in slug.split('/').filter(|s| !s.is_empty()) {
        if segment == "." || segment == ".." || segment.contains('\\') {
            return Err(MaterializeError::UnsafeSlug(page.slug.clone()));
        }
        path.push(segment);
    }
    path.push("index.html");
    Ok(path)
}

/// Render `page` and write it, creating missing directories.
///
/// Existing files are overwritten. Returns the written path.
pub fn materialize_page(
    wwwroot: &Path,
    blank: &str,
    base_url: &str,
    page: &LogicalPage,
) -> Result<PathBuf, MaterializeError> {
    let path = output_path(wwwroot, page)?;
    let document = render_page(blank, base_url, page)?;

    if let Some(dir) = path.parent() {
        // create_dir_all tolerates directories created concurrently by another page
        fs::create_dir_all(dir).map_err(|source| MaterializeError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    fs::write(&path, document).map_err(|source| MaterializeError::Io {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}
