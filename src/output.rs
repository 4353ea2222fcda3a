//! CLI output formatting for bake runs.
//!
//! Output is **page-centric**: each written page leads with its positional
//! index and title, followed by the file it was written to. Pages with a
//! social image get an indented context line.
//!
//! # Output Format
//!
//! ```text
//! Base URL: https://ex.com (release)
//! 001 About → about/index.html
//!     Image: yes
//! 002 Post One → blog/post-1/index.html
//!
//! Baked 2 pages (1 root page skipped)
//! ```
//!
//! A skipped run prints a single line:
//!
//! ```text
//! Skipped: shell document site/wwwroot/index.html does not exist
//! ```
//!
//! # Architecture
//!
//! `format_*` functions return `Vec<String>` and do no I/O; `print_*`
//! wrappers write them to stdout.

use crate::pipeline::{BakeOutcome, BakeReport, BakedPage};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Written path relative to wwwroot, with `/` separators.
fn relative_output(report: &BakeReport, page: &BakedPage) -> String {
    page.path
        .strip_prefix(&report.wwwroot)
        .unwrap_or(page.path.as_path())
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Format a completed or skipped run.
pub fn format_bake_output(outcome: &BakeOutcome) -> Vec<String> {
    match outcome {
        BakeOutcome::Skipped(reason) => vec![format!("Skipped: {reason}")],
        BakeOutcome::Baked(report) => format_report(report),
    }
}

fn format_report(report: &BakeReport) -> Vec<String> {
    let mut lines = vec![format!(
        "Base URL: {} ({})",
        report.base_url, report.configuration
    )];

    for (i, page) in report.pages.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}",
            format_index(i + 1),
            page.title,
            relative_output(report, page)
        ));
        if page.has_image {
            lines.push("    Image: yes".to_string());
        }
    }

    lines.push(String::new());
    let mut summary = format!("Baked {}", plural(report.pages.len(), "page"));
    if report.skipped_root > 0 {
        summary.push_str(&format!(
            " ({} skipped)",
            plural(report.skipped_root, "root page")
        ));
    }
    lines.push(summary);
    lines
}

pub fn print_bake_output(outcome: &BakeOutcome) {
    for line in format_bake_output(outcome) {
        println!("{}", line);
    }
}
