//! Build manifests from a saved archive search page.
//!
//! Download links on the page are `onclick` handlers of the form
//! `fjs_Link_download('/some/path/file.pdf', ...)`. Each result `<li>` also
//! carries its title in `<span class="titulo_conteudo"><a onclick="mudapagina_link(...)">`.

use anyhow::{Context, Result};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use super::ManifestEntry;

fn cached(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| {
        Regex::new(pattern).unwrap_or_else(|e| unreachable!("static pattern is valid: {e}"))
    })
}

fn download_call() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"fjs_Link_download\('([^']+\.pdf)'")
}

fn list_item() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"(?is)<li\b[^>]*>(.*?)</li>")
}

fn title_anchor() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(
        &RE,
        concat!(
            r#"(?is)<span\b[^>]*class\s*=\s*"[^"]*\btitulo_conteudo\b[^"]*"[^>]*>\s*"#,
            r#"<a\b[^>]*onclick\s*=\s*"[^"]*mudapagina_link[^"]*"[^>]*>(.*?)</a>"#,
        ),
    )
}

fn markup_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    cached(&RE, r"<[^>]*>")
}

/// Visible text of an HTML fragment: tags dropped, common entities decoded, trimmed.
fn text_content(fragment: &str) -> String {
    markup_tag()
        .replace_all(fragment, "")
        .replace("&nbsp;", "\u{a0}")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}

/// Returns every quoted `.pdf` path passed to `fjs_Link_download`, in page order.
pub fn extract_pdf_paths(html: &str) -> Vec<String> {
    download_call()
        .captures_iter(html)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Pairs each result title with every PDF link in the same `<li>`.
///
/// Items without a title or without links are ignored. A repeated
/// `(title, link)` pair is kept once; a title seen again with a different
/// link becomes `"<title> - N"` (N counting from 2).
pub fn extract_pdf_items(html: &str) -> Vec<ManifestEntry> {
    let mut items = Vec::new();
    let mut seen_pairs = HashSet::new();
    let mut title_count: HashMap<String, usize> = HashMap::new();

    for item in list_item().captures_iter(html).filter_map(|c| c.get(1)) {
        let item = item.as_str();
        let Some(anchor) = title_anchor().captures(item).and_then(|c| c.get(1)) else {
            continue;
        };
        let raw_title = text_content(anchor.as_str());

        for link in download_call().captures_iter(item).filter_map(|c| c.get(1)) {
            let link = link.as_str();
            if !seen_pairs.insert(format!("{raw_title}::{link}")) {
                continue;
            }
            let count = title_count.entry(raw_title.clone()).or_insert(0);
            *count += 1;
            let title = if *count > 1 {
                format!("{raw_title} - {count}")
            } else {
                raw_title.clone()
            };
            items.push(ManifestEntry {
                title,
                link: link.to_string(),
            });
        }
    }
    items
}

fn ensure_parent(dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating manifest directory {}", parent.display()))?;
    }
    Ok(())
}

/// Writes `paths` as a plain-text manifest, one per line.
pub fn write_text_manifest(paths: &[String], dest: &Path) -> Result<()> {
    ensure_parent(dest)?;
    fs::write(dest, paths.join("\n"))
        .with_context(|| format!("writing manifest {}", dest.display()))?;
    Ok(())
}

/// Writes `entries` as a pretty-printed JSON manifest.
pub fn write_json_manifest(entries: &[ManifestEntry], dest: &Path) -> Result<()> {
    ensure_parent(dest)?;
    let json = serde_json::to_string_pretty(entries).context("serializing manifest")?;
    fs::write(dest, json).with_context(|| format!("writing manifest {}", dest.display()))?;
    Ok(())
}
