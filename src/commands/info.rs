use crate::commands::select::default_output_path;
use crate::pdf::PdfDocument;
use anyhow::Result;
use std::path::Path;

pub fn run<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let doc = PdfDocument::open(path)?;

    println!("File: {}", path.display());
    println!("Total pages: {}", doc.page_count());

    if let Some(title) = doc.title() {
        println!("Title: {}", title);
    }
    if let Some(author) = doc.author() {
        println!("Author: {}", author);
    }

    println!("Default output: {}", default_output_path(path).display());

    Ok(())
}
