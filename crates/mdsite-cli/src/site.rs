//! Site generation: templating, base path rewriting and directory mirroring.
//!
//! The content directory is mirrored into the output directory. Markdown
//! files become `.html` pages rendered through the template; every other
//! file is copied unchanged. A page that fails to convert is reported and
//! skipped, and the build carries on with the rest.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::config::SiteConfig;

pub const TITLE_PLACEHOLDER: &str = "{{ Title }}";
pub const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// A page that could not be generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    pub path: PathBuf,
    pub message: String,
}

/// Outcome of a build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Pages written.
    pub pages: usize,
    /// Files copied verbatim, from both the static and content directories.
    pub assets: usize,
    pub failures: Vec<PageFailure>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn merge(&mut self, other: BuildReport) {
        self.pages += other.pages;
        self.assets += other.assets;
        self.failures.extend(other.failures);
    }
}

/// Substitute every `{{ Title }}` and `{{ Content }}` in `template`.
pub fn fill_template(template: &str, title: &str, content: &str) -> String {
    template
        .replace(TITLE_PLACEHOLDER, title)
        .replace(CONTENT_PLACEHOLDER, content)
}

/// Make sure a base path starts and ends with `/`.
pub fn normalize_base_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    }
}

/// Point root-relative `href="/` and `src="/` attributes at `base_path`.
pub fn rewrite_base_path(html: &str, base_path: &str) -> String {
    let base = normalize_base_path(base_path);
    if base == "/" {
        return html.to_string();
    }
    html.replace("href=\"/", &format!("href=\"{base}"))
        .replace("src=\"/", &format!("src=\"{base}"))
}

/// Render one markdown document into a full page.
pub fn generate_page(
    markdown: &str,
    template: &str,
    base_path: &str,
) -> mdsite_core::Result<String> {
    let title = mdsite_core::extract_title(markdown)?;
    let content = mdsite_core::markdown_to_html(markdown)?;
    let page = fill_template(template, title, &content);
    Ok(rewrite_base_path(&page, base_path))
}

/// Copy `src` into `dst` recursively, returning the number of files copied.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> io::Result<usize> {
    fs::create_dir_all(dst)?;
    let mut copied = 0;

    for entry in sorted_entries(src)? {
        let from = entry.path();
        let to = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copied += copy_dir_recursive(&from, &to)?;
        } else {
            log::info!("copy {} -> {}", from.display(), to.display());
            fs::copy(&from, &to)?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Mirror `content_dir` into `dest_dir`, rendering `.md` files as pages.
///
/// I/O errors while walking or writing abort the walk; conversion failures
/// and unreadable markdown files are recorded in the report instead.
pub fn generate_pages_recursive(
    content_dir: &Path,
    template: &str,
    dest_dir: &Path,
    base_path: &str,
) -> io::Result<BuildReport> {
    fs::create_dir_all(dest_dir)?;
    let mut report = BuildReport::default();

    for entry in sorted_entries(content_dir)? {
        let from = entry.path();
        let to = dest_dir.join(entry.file_name());

        if entry.file_type()?.is_dir() {
            report.merge(generate_pages_recursive(&from, template, &to, base_path)?);
            continue;
        }

        if !is_markdown(&from) {
            log::info!("copy {} -> {}", from.display(), to.display());
            fs::copy(&from, &to)?;
            report.assets += 1;
            continue;
        }

        let page_path = to.with_extension("html");
        let page = fs::read_to_string(&from)
            .map_err(|e| e.to_string())
            .and_then(|markdown| {
                generate_page(&markdown, template, base_path).map_err(|e| e.to_string())
            });

        match page {
            Ok(html) => {
                log::info!("page {} -> {}", from.display(), page_path.display());
                fs::write(&page_path, html)?;
                report.pages += 1;
            }
            Err(message) => {
                log::error!("{}: {}", from.display(), message);
                report.failures.push(PageFailure {
                    path: from,
                    message,
                });
            }
        }
    }

    Ok(report)
}

/// Run a full build: wipe the output, copy static files, then generate pages.
pub fn build_site(config: &SiteConfig) -> anyhow::Result<BuildReport> {
    let template = fs::read_to_string(&config.template)
        .with_context(|| format!("failed to read template {}", config.template.display()))?;

    let output = &config.output_dir;
    if output.exists() {
        log::debug!("removing {}", output.display());
        fs::remove_dir_all(output)
            .with_context(|| format!("failed to clear {}", output.display()))?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("failed to create {}", output.display()))?;

    let mut report = BuildReport::default();

    if config.static_dir.is_dir() {
        report.assets += copy_dir_recursive(&config.static_dir, output).with_context(|| {
            format!("failed to copy static files from {}", config.static_dir.display())
        })?;
    } else {
        log::debug!("no static directory at {}", config.static_dir.display());
    }

    report.merge(
        generate_pages_recursive(&config.content_dir, &template, output, &config.base_path)
            .with_context(|| {
                format!("failed to generate pages from {}", config.content_dir.display())
            })?,
    );

    Ok(report)
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md")
}

fn sorted_entries(dir: &Path) -> io::Result<Vec<fs::DirEntry>> {
    let mut entries = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.file_name());
    Ok(entries)
}
