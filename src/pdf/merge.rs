//! PDF merging functionality using lopdf

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::debug;

use crate::error::{Error, Result};

/// Page attributes a page may inherit from its ancestors in the page tree
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Options for merging PDFs
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Input PDF file paths in the order they should be merged
    pub input_paths: Vec<PathBuf>,
    /// Output PDF file path
    pub output_path: PathBuf,
}

/// Merge multiple PDF files into a single PDF
///
/// Based on the lopdf merge example:
/// https://github.com/J-F-Liu/lopdf/blob/main/examples/merge.rs
///
/// Every page of every input is kept, in input order. The output file is
/// only touched once the merged document has been fully serialized, so a
/// failed merge never leaves a partial file behind.
///
/// # Example
///
/// ```no_run
/// use slides2pdf::pdf::{MergeOptions, merge_pdfs};
/// use std::path::PathBuf;
///
/// let options = MergeOptions {
///     input_paths: vec![
///         PathBuf::from("page01.pdf"),
///         PathBuf::from("page02.pdf"),
///     ],
///     output_path: PathBuf::from("slides.pdf"),
/// };
///
/// merge_pdfs(&options).expect("Failed to merge");
/// ```
pub fn merge_pdfs(options: &MergeOptions) -> Result<()> {
    if options.input_paths.is_empty() {
        return Err(Error::General("No input files provided".to_string()));
    }

    // Validate all input files exist
    for path in &options.input_paths {
        if !path.exists() {
            return Err(Error::FileNotFound(path.clone()));
        }
    }

    // Load all documents
    let mut documents: Vec<Document> = Vec::new();
    for path in &options.input_paths {
        let doc = Document::load(path)?;

        if doc.get_pages().is_empty() {
            return Err(Error::EmptyPdf(path.clone()));
        }

        debug!(input = %path.display(), pages = doc.get_pages().len(), "loaded PDF");
        documents.push(doc);
    }

    let mut max_id = 1;
    let mut page_ids: Vec<ObjectId> = Vec::new();
    let mut objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

    for mut doc in documents {
        // Renumber objects in this document to avoid conflicts
        doc.renumber_objects_with(max_id);
        max_id = doc.max_id + 1;

        let pages: Vec<ObjectId> = doc.get_pages().into_values().collect();

        // Pages are re-parented under a single flat node below, so anything
        // they inherited from intermediate nodes has to move onto the page.
        for &page_id in &pages {
            inherit_page_attributes(&mut doc, page_id);
        }

        page_ids.extend(pages);
        objects.extend(doc.objects);
    }

    let mut merged_doc = Document::with_version("1.5");

    // Add all collected objects first, then bump max_id past them so that
    // new_object_id() cannot collide with an imported object
    merged_doc.objects.extend(objects);
    merged_doc.max_id = max_id - 1;

    let pages_id = merged_doc.new_object_id();

    let kids: Vec<Object> = page_ids
        .iter()
        .map(|&id| Object::Reference(id))
        .collect();

    let mut pages_object = Dictionary::new();
    pages_object.set("Type", Object::Name(b"Pages".to_vec()));
    pages_object.set("Count", Object::Integer(page_ids.len() as i64));
    pages_object.set("Kids", Object::Array(kids));

    let catalog_id = merged_doc.new_object_id();
    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));

    merged_doc.objects.insert(catalog_id, Object::Dictionary(catalog));
    merged_doc.objects.insert(pages_id, Object::Dictionary(pages_object));
    merged_doc.trailer.set("Root", Object::Reference(catalog_id));

    for &page_id in &page_ids {
        if let Ok(Object::Dictionary(dict)) = merged_doc.get_object_mut(page_id) {
            dict.set("Parent", Object::Reference(pages_id));
        }
    }

    merged_doc.compress();

    let mut buffer: Vec<u8> = Vec::new();
    merged_doc
        .save_to(&mut buffer)
        .map_err(|e| Error::General(format!("Failed to serialize merged PDF: {}", e)))?;

    fs::write(&options.output_path, buffer).map_err(|e| Error::OutputWrite {
        path: options.output_path.clone(),
        detail: e.to_string(),
    })?;

    debug!(output = %options.output_path.display(), pages = page_ids.len(), "wrote merged PDF");
    Ok(())
}

/// Copy inheritable attributes from the page's ancestors onto the page itself
fn inherit_page_attributes(doc: &mut Document, page_id: ObjectId) {
    let mut inherited: Vec<(&[u8], Object)> = Vec::new();

    let mut parent = parent_of(doc, page_id);
    // Bounded walk; malformed files can contain Parent cycles.
    let mut depth = 0;
    while let Some(node_id) = parent {
        if depth > 64 {
            break;
        }
        depth += 1;

        if let Ok(Object::Dictionary(node)) = doc.get_object(node_id) {
            for key in INHERITABLE {
                let already = inherited.iter().any(|(k, _)| *k == key);
                if !already {
                    if let Ok(value) = node.get(key) {
                        inherited.push((key, value.clone()));
                    }
                }
            }
        }
        parent = parent_of(doc, node_id);
    }

    if let Ok(Object::Dictionary(page)) = doc.get_object_mut(page_id) {
        for (key, value) in inherited {
            if !page.has(key) {
                page.set(key, value);
            }
        }
    }
}

fn parent_of(doc: &Document, id: ObjectId) -> Option<ObjectId> {
    match doc.get_object(id) {
        Ok(Object::Dictionary(dict)) => match dict.get(b"Parent") {
            Ok(Object::Reference(parent_id)) => Some(*parent_id),
            _ => None,
        },
        _ => None,
    }
}
