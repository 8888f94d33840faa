use crate::extract::{extract_file, ExtractionResult};
use crate::page_range::{parse_page_set_limited, PageSet};
use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

/// Upper bound on pages a single request may select
pub const MAX_SELECTED_PAGES: usize = 100_000;

pub struct SelectOptions {
    pub output: Option<PathBuf>,
    pub force: bool,
    pub json: bool,
}

/// Turn user input into a non-empty page set, with messages fit to show as-is
pub fn validate_selection(input: &str) -> Result<PageSet> {
    let input = input.trim();
    if input.is_empty() {
        bail!("Please enter page ranges.");
    }

    let pages = match parse_page_set_limited(input, MAX_SELECTED_PAGES) {
        Ok(pages) => pages,
        Err(e) => bail!("Invalid page format:\n{}", e),
    };

    if pages.is_empty() {
        bail!("No valid page numbers found.");
    }

    Ok(pages)
}

/// `<dir>/<stem>_trimmed.<ext>` next to the input
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let name = match input.extension() {
        Some(ext) => format!("{}_trimmed.{}", stem, ext.to_string_lossy()),
        None => format!("{}_trimmed", stem),
    };
    input.with_file_name(name)
}

pub fn run<P: AsRef<Path>>(input: P, pages: &str, options: &SelectOptions) -> Result<()> {
    let input = input.as_ref();
    let result = select(input, pages, options)?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.message);
    }

    if !result.success {
        bail!("No output written");
    }

    Ok(())
}

pub fn select(input: &Path, pages: &str, options: &SelectOptions) -> Result<ExtractionResult> {
    let page_set = validate_selection(pages)?;

    let output = options
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(input));

    if output.exists() && !options.force {
        bail!(
            "File already exists: {} (use --force to overwrite)",
            output.display()
        );
    }

    let result = extract_file(input, &page_set, &output);
    if result.success {
        log::info!("saved {} to {}", page_set, output.display());
    }
    Ok(result)
}
