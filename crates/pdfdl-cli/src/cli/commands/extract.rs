//! `pdfdl extract <html>` – build a manifest from a saved search page.

use anyhow::{Context, Result};
use pdfdl_core::manifest;
use std::fs;
use std::path::Path;

pub fn run_extract(html: &Path, dest: &Path, json: bool) -> Result<()> {
    let page = fs::read_to_string(html)
        .with_context(|| format!("reading {}", html.display()))?;

    if json {
        let items = manifest::extract_pdf_items(&page);
        if items.is_empty() {
            println!("No PDF items found in {}.", html.display());
            return Ok(());
        }
        manifest::write_json_manifest(&items, dest)?;
        println!("Saved {} PDF item(s) to {}", items.len(), dest.display());
        return Ok(());
    }

    let paths = manifest::extract_pdf_paths(&page);
    if paths.is_empty() {
        println!("No PDF paths found in {}.", html.display());
        return Ok(());
    }
    manifest::write_text_manifest(&paths, dest)?;
    println!("Saved {} PDF path(s) to {}", paths.len(), dest.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfdl_core::config::FetchConfig;

    const PAGE: &str = r#"<li>
        <span class="titulo_conteudo"><a onclick="mudapagina_link('1')">Report: Q1/2024</a></span>
        <a onclick="fjs_Link_download('/x/9.pdf')">PDF</a>
    </li>"#;

    #[test]
    fn json_extract_writes_readable_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let html = dir.path().join("page.html");
        fs::write(&html, PAGE).unwrap();
        let dest = dir.path().join("txt").join("pdf_links.json");

        run_extract(&html, &dest, true).unwrap();

        let cfg = FetchConfig {
            base_url: "http://example.test/base".to_string(),
            ..FetchConfig::default()
        };
        let tasks = manifest::read_json_manifest(&dest, &cfg).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].local_filename, "Report_ Q1_2024.pdf");
        assert_eq!(tasks[0].remote_url, "http://example.test/base/x/9.pdf");
    }

    #[test]
    fn text_extract_writes_path_list() {
        let dir = tempfile::tempdir().unwrap();
        let html = dir.path().join("page.html");
        fs::write(&html, PAGE).unwrap();
        let dest = dir.path().join("pdf_paths.txt");

        run_extract(&html, &dest, false).unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "/x/9.pdf");
    }
}
