use crate::page_range::{format_page_list, PageNumber, PageSet};
use crate::pdf::PdfDocument;
use serde::Serialize;
use std::path::Path;

pub const NO_VALID_PAGES: &str = "No valid pages to include in the output PDF.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// None of the requested pages exist in the source
    EmptySelection,
    /// The source could not be read or the output could not be written
    DocumentIo,
}

/// Outcome of one extraction. Failures are reported here rather than as `Err`
/// so callers always get the included/skipped split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    pub success: bool,
    pub included_pages: Vec<PageNumber>,
    pub skipped_pages: Vec<PageNumber>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
}

impl ExtractionResult {
    fn document_error(err: anyhow::Error) -> Self {
        log::warn!("extraction failed: {:#}", err);
        ExtractionResult {
            success: false,
            included_pages: Vec::new(),
            skipped_pages: Vec::new(),
            message: format!("Error processing PDF: {:#}", err),
            failure: Some(FailureKind::DocumentIo),
        }
    }
}

/// Split `pages` into those within `1..=page_count` and the rest, keeping order
pub fn partition_pages(pages: &PageSet, page_count: u32) -> (Vec<PageNumber>, Vec<PageNumber>) {
    pages
        .iter()
        .partition(|&p| (1..=i64::from(page_count)).contains(&p))
}

/// Write the pages of `source` listed in `pages` to `destination`.
///
/// Requested pages past the end of the document (or below 1) are skipped and
/// reported. When nothing is left to copy the destination is not touched.
/// An existing file at `destination` is replaced.
pub fn extract<Q: AsRef<Path>>(
    source: &PdfDocument,
    pages: &PageSet,
    destination: Q,
) -> ExtractionResult {
    let destination = destination.as_ref();
    let page_count = source.page_count();
    let (included, skipped) = partition_pages(pages, page_count);

    if included.is_empty() {
        log::info!(
            "none of {} requested page(s) exist in {} ({} pages)",
            pages.len(),
            source.path().display(),
            page_count
        );
        return ExtractionResult {
            success: false,
            included_pages: Vec::new(),
            skipped_pages: pages.as_slice().to_vec(),
            message: NO_VALID_PAGES.to_string(),
            failure: Some(FailureKind::EmptySelection),
        };
    }

    // Everything in `included` lies in 1..=page_count, so it fits in a u32
    let physical: Vec<u32> = included.iter().map(|&p| p as u32).collect();

    let written = source
        .copy_pages(&physical)
        .and_then(|mut doc| PdfDocument::save(&mut doc, destination));
    if let Err(err) = written {
        return ExtractionResult::document_error(err);
    }

    let mut message = format!("Successfully created PDF with {} pages", included.len());
    if !skipped.is_empty() {
        log::warn!(
            "skipped page(s) {} not in {}",
            format_page_list(&skipped),
            source.path().display()
        );
        message.push_str(&format!(
            "\n\nSkipped invalid pages: {} (PDF has {} pages)",
            format_page_list(&skipped),
            page_count
        ));
    }

    ExtractionResult {
        success: true,
        included_pages: included,
        skipped_pages: skipped,
        message,
        failure: None,
    }
}

/// Open the PDF at `source` and extract `pages` from it into `destination`.
/// A source that cannot be opened is reported like any other document error.
pub fn extract_file<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    pages: &PageSet,
    destination: Q,
) -> ExtractionResult {
    match PdfDocument::open(source) {
        Ok(doc) => extract(&doc, pages, destination),
        Err(err) => ExtractionResult::document_error(err),
    }
}
