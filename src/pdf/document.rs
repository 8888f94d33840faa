use anyhow::{bail, Context, Result};
use lopdf::{Document, Object};
use std::collections::BTreeSet;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Read-only handle on a source PDF
pub struct PdfDocument {
    doc: Document,
    path: PathBuf,
}

impl PdfDocument {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let doc = Document::load(path)
            .with_context(|| format!("Failed to open PDF: {}", path.display()))?;
        log::debug!("opened {} ({} pages)", path.display(), doc.get_pages().len());
        Ok(PdfDocument {
            doc,
            path: path.to_path_buf(),
        })
    }

    #[cfg(test)]
    pub fn from_document(doc: Document, path: impl Into<PathBuf>) -> Self {
        PdfDocument {
            doc,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    pub fn title(&self) -> Option<String> {
        self.info_string(b"Title")
    }

    pub fn author(&self) -> Option<String> {
        self.info_string(b"Author")
    }

    fn info_string(&self, key: &[u8]) -> Option<String> {
        let info_ref = match self.doc.trailer.get(b"Info") {
            Ok(Object::Reference(r)) => *r,
            _ => return None,
        };
        let dict = self.doc.get_dictionary(info_ref).ok()?;
        match dict.get(key) {
            Ok(Object::String(bytes, _)) => decode_pdf_string(bytes),
            _ => None,
        }
    }

    /// Build a new document holding only `pages` (1-indexed, in source order).
    ///
    /// Every other page is removed from the page tree and objects left
    /// unreferenced are pruned. Streams are not re-encoded.
    pub fn copy_pages(&self, pages: &[u32]) -> Result<Document> {
        let total = self.page_count();

        for &page in pages {
            if page == 0 || page > total {
                bail!("Page {} is out of range (1-{})", page, total);
            }
        }

        let keep: BTreeSet<u32> = pages.iter().copied().collect();
        let to_delete: Vec<u32> = (1..=total).filter(|p| !keep.contains(p)).collect();

        let mut new_doc = self.doc.clone();
        if !to_delete.is_empty() {
            new_doc.delete_pages(&to_delete);
            let pruned = new_doc.prune_objects();
            log::debug!(
                "dropped {} page(s), pruned {} object(s)",
                to_delete.len(),
                pruned.len()
            );
        }

        let kept = new_doc.get_pages().len();
        if kept != keep.len() {
            bail!(
                "Page tree of {} is inconsistent: expected {} page(s) after copy, found {}",
                self.path.display(),
                keep.len(),
                kept
            );
        }

        Ok(new_doc)
    }

    /// Write `doc` to `path`, replacing whatever is there.
    ///
    /// The bytes go to a temporary file next to the destination which is then
    /// renamed into place, so the destination is either the old file or the
    /// complete new one. A symlink at `path` is written through to its target,
    /// and an existing file keeps its permissions.
    pub fn save<P: AsRef<Path>>(doc: &mut Document, path: P) -> Result<()> {
        let path = path.as_ref();
        let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = new_temp_file(dir)
            .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;

        if let Ok(existing) = fs::metadata(&target) {
            tmp.as_file()
                .set_permissions(existing.permissions())
                .with_context(|| format!("Failed to save PDF: {}", path.display()))?;
        }

        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            doc.save_to(&mut writer)
                .with_context(|| format!("Failed to save PDF: {}", path.display()))?;
            writer
                .flush()
                .with_context(|| format!("Failed to save PDF: {}", path.display()))?;
        }

        tmp.persist(&target)
            .with_context(|| format!("Failed to save PDF: {}", path.display()))?;
        log::info!("wrote {}", target.display());
        Ok(())
    }
}

/// Temporary file whose mode matches a freshly created file (0666 less umask)
#[cfg(unix)]
fn new_temp_file(dir: &Path) -> std::io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    tempfile::Builder::new()
        .permissions(fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn new_temp_file(dir: &Path) -> std::io::Result<NamedTempFile> {
    NamedTempFile::new_in(dir)
}

fn decode_pdf_string(bytes: &[u8]) -> Option<String> {
    if let Some(utf16) = bytes.strip_prefix(&[0xFE_u8, 0xFF]) {
        let units: Vec<u16> = utf16
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16(&units).ok()
    } else {
        // PDFDocEncoding, close enough to Latin-1 for display
        Some(bytes.iter().map(|&b| b as char).collect())
    }
}
