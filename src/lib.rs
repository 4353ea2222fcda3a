//! # og-bake
//!
//! Post-build SEO and Open Graph injection for statically generated sites.
//!
//! A single-page-app style build produces one real HTML file, the shell at
//! `wwwroot/index.html`, while the host build knows about many logical pages.
//! Link previews and crawlers need a real document per page carrying that
//! page's title, description and Open Graph tags. og-bake fans the shell out:
//!
//! ```text
//! wwwroot/index.html ──strip──▶ blank template ──┬─▶ wwwroot/about/index.html
//!                                                ├─▶ wwwroot/blog/post-1/index.html
//!                                                └─▶ …
//! ```
//!
//! # Per-Page Transform
//!
//! ```text
//! 1. <base href="/" />  →  <base href="{base}/" />
//! 2. tags for the page  →  inserted before </head>
//! 3. relative src/href  →  rooted at /
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`pipeline`] | Driver: resolves settings, checks inputs, strips once, fans out pages |
//! | [`materialize`] | Per-page transform and write to `{slug}/index.html` |
//! | [`meta`] | Ordered description/canonical/title/og:* tag generation with escaping |
//! | [`strip`] | Removal of previously baked SEO tags from the shell |
//! | [`rooter`] | Rewrites relative `src`/`href` values to root-absolute |
//! | [`config`] | Build argument parsing, `social.toml` loading, [`config::RunConfig`] |
//! | [`types`] | `LogicalPage` and the page manifest handed over by the host build |
//! | [`output`] | CLI output formatting of a run |
//!
//! # Design Decisions
//!
//! ## Patterns, Not a DOM
//!
//! The shell is generator-produced and the tags touched are a known, fixed
//! set. Targeted regular expressions remove and insert exactly those elements
//! and leave every other byte of the document alone, which a parse/serialize
//! round trip would not.
//!
//! ## One Blank Template Per Run
//!
//! Stripping happens once and the result is shared read-only. Every page is a
//! pure function of `(blank template, base URL, page)`; pages never read each
//! other's output, so re-running a bake on its own output is stable and pages
//! can be written in parallel.

pub mod config;
pub mod materialize;
pub mod meta;
pub mod output;
pub mod pipeline;
pub mod rooter;
pub mod strip;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
