//! Shared types handed to the bake step by the host build.
//!
//! The host build discovers pages and serializes them into a page manifest
//! (JSON). These types are the deserialized form and are read-only for the
//! whole run.

use serde::{Deserialize, Serialize};

/// Reserved slug of the root page. The root page already is `index.html`.
pub const ROOT_SLUG: &str = "index";

/// One generated page as described by the host build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicalPage {
    /// URL path segment(s), e.g. `about` or `blog/post-1`. Leading and
    /// trailing slashes are tolerated and trimmed wherever the slug is used.
    pub slug: String,
    /// Plain-text page title
    pub title: String,
    /// Plain-text page description
    #[serde(default)]
    pub description: String,
    /// Social preview image, relative to the site root or an absolute URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl LogicalPage {
    /// The slug with leading and trailing `/` removed.
    pub fn trimmed_slug(&self) -> &str {
        self.slug.trim_matches('/')
    }

    /// Whether this is the root page, which the bake step never writes.
    ///
    /// An empty slug counts as root too: it would resolve to the shell itself.
    pub fn is_root(&self) -> bool {
        let slug = self.trimmed_slug();
        slug.is_empty() || slug == ROOT_SLUG
    }

    /// The image path if one is declared and not blank.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref().filter(|i| !i.trim().is_empty())
    }
}

/// Page list written by the host build.
///
/// Accepts either `{ "pages": [...] }` or a bare array of pages.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PageManifest {
    Bare(Vec<LogicalPage>),
    Wrapped { pages: Vec<LogicalPage> },
}

impl PageManifest {
    pub fn into_pages(self) -> Vec<LogicalPage> {
        match self {
            PageManifest::Bare(pages) | PageManifest::Wrapped { pages } => pages,
        }
    }
}
