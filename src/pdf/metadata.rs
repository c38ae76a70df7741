//! Page counting for rendered and merged PDFs

use std::path::Path;

use lopdf::{Document, Object};

use crate::error::{Error, Result};

/// Read the `Count` of the root `Pages` node.
///
/// This covers the whole page tree, including nested `Pages` nodes.
fn root_page_count(doc: &Document) -> Result<usize> {
    let catalog = doc.catalog()?;

    let pages_id = catalog
        .get(b"Pages")
        .and_then(Object::as_reference)
        .map_err(|_| Error::General("Catalog has no Pages reference".to_string()))?;

    let count = doc
        .get_dictionary(pages_id)?
        .get(b"Count")
        .and_then(Object::as_i64)
        .map_err(|_| Error::General("Pages node has no integer Count".to_string()))?;

    usize::try_from(count).map_err(|_| Error::General(format!("Negative page count: {}", count)))
}

/// Count the number of pages in a PDF file
///
/// # Errors
///
/// [`Error::FileNotFound`] for a missing file, [`Error::EmptyPdf`] when the
/// page tree is empty.
pub fn count_pages(path: &Path) -> Result<usize> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let doc = Document::load(path)?;
    let page_count = root_page_count(&doc)?;

    if page_count == 0 {
        return Err(Error::EmptyPdf(path.to_path_buf()));
    }

    Ok(page_count)
}
