//! The bake run: one shell in, one document per page out.
//!
//! ## Stages
//!
//! ```text
//! ResolveBaseUrl  →  ValidateInputs  →  StripOnce  →  PerPageLoop  →  Done
//! ```
//!
//! - **ResolveBaseUrl**: build arguments + `social.toml` → [`RunConfig`].
//!   A release build without a base URL fails here, before any file is read
//!   or written.
//! - **ValidateInputs**: `wwwroot/` and `wwwroot/index.html` must exist.
//!   Either missing is a warning and a successful [`BakeOutcome::Skipped`]:
//!   some builds produce no web output at all.
//! - **StripOnce**: the shell is reduced to a blank template a single time
//!   and shared read-only by every page.
//! - **PerPageLoop**: every page except the root is materialized. With more
//!   than one thread the pages are written on a rayon pool; each page owns a
//!   distinct output path, so no locking is needed. Results keep input order.
//!
//! ## Failure Policy
//!
//! The first page that fails (I/O, unsafe slug) aborts the run and its error
//! is returned. Pages already written stay on disk; nothing is rolled back.

use crate::config::{ConfigError, RunConfig, SocialConfig};
use crate::materialize::{self, MaterializeError, find_head_close};
use crate::strip::strip_with;
use crate::types::LogicalPage;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory under the project root holding the built site.
pub const WWWROOT_DIR: &str = "wwwroot";

/// Shell document inside [`WWWROOT_DIR`].
pub const SHELL_FILE: &str = "index.html";

#[derive(Error, Debug)]
pub enum BakeError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Page '{slug}': {source}")]
    Page {
        slug: String,
        #[source]
        source: MaterializeError,
    },
    #[error("Shell {0} has no </head>; cannot inject tags")]
    MissingHeadClose(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Inputs handed over by the host build.
#[derive(Debug, Clone)]
pub struct BakeContext {
    /// Project output root; the site lives in `{project_root}/wwwroot`.
    pub project_root: PathBuf,
    /// Raw build arguments (`--social:baseurl=…`, `-c release`, …).
    pub arguments: Vec<String>,
    /// All pages of the build in output order, root page included.
    pub pages: Vec<LogicalPage>,
}

impl BakeContext {
    pub fn wwwroot(&self) -> PathBuf {
        self.project_root.join(WWWROOT_DIR)
    }

    pub fn shell_path(&self) -> PathBuf {
        self.wwwroot().join(SHELL_FILE)
    }
}

/// Why a run did nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    MissingOutputDir(PathBuf),
    MissingShell(PathBuf),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::MissingOutputDir(path) => {
                write!(f, "output directory {} does not exist", path.display())
            }
            SkipReason::MissingShell(path) => {
                write!(f, "shell document {} does not exist", path.display())
            }
        }
    }
}

/// One written page.
#[derive(Debug, Clone, PartialEq)]
pub struct BakedPage {
    pub slug: String,
    pub title: String,
    pub path: PathBuf,
    pub has_image: bool,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct BakeReport {
    pub base_url: String,
    pub configuration: String,
    pub wwwroot: PathBuf,
    /// Written pages, in input order.
    pub pages: Vec<BakedPage>,
    /// Root pages that were passed over.
    pub skipped_root: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BakeOutcome {
    Baked(BakeReport),
    Skipped(SkipReason),
}

/// Run the bake, resolving settings from the context's arguments and `file_config`.
pub fn bake(ctx: &BakeContext, file_config: &SocialConfig) -> Result<BakeOutcome, BakeError> {
    let config = match RunConfig::resolve(&ctx.arguments, file_config) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Social meta generation aborted: {e}");
            return Err(e.into());
        }
    };
    bake_with(ctx, &config)
}

/// Run the bake with already resolved settings.
pub fn bake_with(ctx: &BakeContext, config: &RunConfig) -> Result<BakeOutcome, BakeError> {
    log::info!(
        "Baking social meta ({} configuration, base URL {})",
        config.configuration,
        config.base_url
    );

    let wwwroot = ctx.wwwroot();
    if !wwwroot.is_dir() {
        let reason = SkipReason::MissingOutputDir(wwwroot);
        log::warn!("Skipping social meta generation: {reason}");
        return Ok(BakeOutcome::Skipped(reason));
    }

    let shell_path = ctx.shell_path();
    if !shell_path.is_file() {
        let reason = SkipReason::MissingShell(shell_path);
        log::warn!("Skipping social meta generation: {reason}");
        return Ok(BakeOutcome::Skipped(reason));
    }

    let shell = fs::read_to_string(&shell_path)?;
    let blank = strip_with(&shell, config.strip);
    if find_head_close(&blank).is_none() {
        return Err(BakeError::MissingHeadClose(shell_path));
    }

    let pages: Vec<&LogicalPage> = ctx.pages.iter().filter(|p| !p.is_root()).collect();
    let skipped_root = ctx.pages.len() - pages.len();

    let baked = if config.threads > 1 && pages.len() > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build()?;
        pool.install(|| {
            pages
                .par_iter()
                .map(|page| bake_page(&wwwroot, &blank, &config.base_url, page))
                .collect::<Result<Vec<_>, _>>()
        })?
    } else {
        pages
            .iter()
            .map(|page| bake_page(&wwwroot, &blank, &config.base_url, page))
            .collect::<Result<Vec<_>, _>>()?
    };

    log::info!("Baked {} pages into {}", baked.len(), wwwroot.display());

    Ok(BakeOutcome::Baked(BakeReport {
        base_url: config.base_url.clone(),
        configuration: config.configuration.clone(),
        wwwroot,
        pages: baked,
        skipped_root,
    }))
}

fn bake_page(
    wwwroot: &Path,
    blank: &str,
    base_url: &str,
    page: &LogicalPage,
) -> Result<BakedPage, BakeError> {
    let path = materialize::materialize_page(wwwroot, blank, base_url, page).map_err(|source| {
        BakeError::Page {
            slug: page.slug.clone(),
            source,
        }
    })?;
    log::debug!("Wrote {} → {}", page.slug, path.display());

    Ok(BakedPage {
        slug: page.trimmed_slug().to_string(),
        title: page.title.clone(),
        path,
        has_image: page.image().is_some(),
    })
}

/// Read the page list written by the host build.
pub fn load_pages(path: &Path) -> Result<Vec<LogicalPage>, BakeError> {
    let content = fs::read_to_string(path)?;
    let manifest: crate::types::PageManifest = serde_json::from_str(&content)?;
    Ok(manifest.into_pages())
}
