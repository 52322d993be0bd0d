//! lopdf-based form backend.
//!
//! Implements [`FormBackend`] using the [lopdf](https://crates.io/crates/lopdf)
//! crate for PDF document parsing and writing. This is the default backend
//! for formkit.

use formkit_core::{
    ExtractResult, FieldAssignment, FormError, FormOptions, PageRect, PageWidgets, RawField, Size,
    TextAnnotation,
};
use lopdf::{Dictionary, Object, ObjectId};

use crate::backend::FormBackend;
use crate::error::BackendError;
use crate::field_walk::{collect_page_widgets, collect_raw_fields};
use crate::writer;

/// Longest /Parent chain followed when resolving inherited page attributes.
const MAX_PAGE_TREE_DEPTH: usize = 64;

/// A parsed PDF document backed by lopdf.
#[derive(Clone)]
pub struct LopdfDocument {
    /// The underlying lopdf document.
    inner: lopdf::Document,
    /// Cached ordered list of page ObjectIds (indexed by 0-based page number).
    page_ids: Vec<ObjectId>,
}

impl LopdfDocument {
    /// Access the underlying lopdf document.
    pub fn inner(&self) -> &lopdf::Document {
        &self.inner
    }

    /// Object id of a 1-based page.
    pub(crate) fn page_id(&self, page: usize) -> Result<ObjectId, BackendError> {
        if page == 0 || page > self.page_ids.len() {
            return Err(BackendError::Core(FormError::PageOutOfRange {
                page,
                page_count: self.page_ids.len(),
            }));
        }
        Ok(self.page_ids[page - 1])
    }
}

impl std::fmt::Debug for LopdfDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LopdfDocument")
            .field("page_count", &self.page_ids.len())
            .finish_non_exhaustive()
    }
}

/// The lopdf-based form backend.
///
/// # Example
///
/// ```ignore
/// use formkit_parse::{FormBackend, LopdfBackend, extract_catalog};
///
/// let doc = LopdfBackend::open(pdf_bytes)?;
/// let catalog = extract_catalog::<LopdfBackend>(&doc, &FormOptions::default())?;
/// ```
pub struct LopdfBackend;

/// Follow an indirect reference, returning the object itself otherwise.
pub(crate) fn resolve_object<'a>(doc: &'a lopdf::Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

/// Look up `key` in `dict` and resolve it if it is a reference.
pub(crate) fn resolved_entry<'a>(
    doc: &'a lopdf::Document,
    dict: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Object> {
    dict.get(key).ok().map(|obj| resolve_object(doc, obj))
}

/// Convert a lopdf numeric object (Integer or Real) to f64.
pub(crate) fn object_to_f64(obj: &Object) -> Result<f64, BackendError> {
    match obj {
        Object::Integer(i) => Ok(*i as f64),
        Object::Real(f) => Ok(f64::from(*f)),
        _ => Err(BackendError::Parse(format!("expected number, got {obj:?}"))),
    }
}

/// Extract a [`PageRect`] from a lopdf array of 4 numbers `[x0, y0, x1, y1]`.
pub(crate) fn rect_from_array(array: &[Object]) -> Result<PageRect, BackendError> {
    if array.len() != 4 {
        return Err(BackendError::Parse(format!(
            "expected 4-element array for rectangle, got {}",
            array.len()
        )));
    }
    let x0 = object_to_f64(&array[0])?;
    let y0 = object_to_f64(&array[1])?;
    let x1 = object_to_f64(&array[2])?;
    let y1 = object_to_f64(&array[3])?;
    Ok(PageRect::new(x0, y0, x1, y1))
}

/// Look up a key in the page dictionary, walking up the page tree
/// (via /Parent) if the key is not found on the page itself.
///
/// Returns `None` if the key is not found anywhere in the tree, and an error
/// if the /Parent chain is longer than [`MAX_PAGE_TREE_DEPTH`].
fn resolve_inherited<'a>(
    doc: &'a lopdf::Document,
    page_id: ObjectId,
    key: &[u8],
) -> Result<Option<&'a Object>, BackendError> {
    let mut current_id = page_id;
    for _ in 0..=MAX_PAGE_TREE_DEPTH {
        let dict = doc
            .get_object(current_id)
            .and_then(|o| o.as_dict())
            .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))?;

        if let Ok(value) = dict.get(key) {
            return Ok(Some(resolve_object(doc, value)));
        }

        match dict.get(b"Parent") {
            Ok(parent_obj) => {
                current_id = parent_obj
                    .as_reference()
                    .map_err(|e| BackendError::Parse(format!("invalid /Parent reference: {e}")))?;
            }
            Err(_) => return Ok(None),
        }
    }
    Err(BackendError::Parse(format!(
        "page tree deeper than {MAX_PAGE_TREE_DEPTH} levels (circular /Parent?)"
    )))
}

/// Object id of the document catalog.
pub(crate) fn catalog_id(doc: &lopdf::Document) -> Result<ObjectId, BackendError> {
    doc.trailer
        .get(b"Root")
        .and_then(|o| o.as_reference())
        .map_err(|e| BackendError::Parse(format!("missing /Root reference: {e}")))
}

/// The document's `/AcroForm` dictionary, if any.
pub(crate) fn acroform_dict(doc: &lopdf::Document) -> Option<&Dictionary> {
    let catalog = doc.get_object(catalog_id(doc).ok()?).ok()?.as_dict().ok()?;
    resolved_entry(doc, catalog, b"AcroForm")?.as_dict().ok()
}

/// The `/Fields` array of the AcroForm, if any.
pub(crate) fn acroform_fields(doc: &lopdf::Document) -> Option<&Vec<Object>> {
    let acroform = acroform_dict(doc)?;
    resolved_entry(doc, acroform, b"Fields")?.as_array().ok()
}

impl FormBackend for LopdfBackend {
    type Document = LopdfDocument;
    type Error = BackendError;

    fn open(bytes: &[u8]) -> Result<Self::Document, Self::Error> {
        let inner = lopdf::Document::load_mem(bytes)
            .map_err(|e| BackendError::Parse(format!("failed to parse PDF: {e}")))?;

        if inner.is_encrypted() {
            return Err(BackendError::Parse(
                "encrypted documents are not supported".to_string(),
            ));
        }

        // get_pages returns BTreeMap<u32, ObjectId> with 1-based keys
        let page_ids: Vec<ObjectId> = inner.get_pages().values().copied().collect();
        tracing::debug!(pages = page_ids.len(), "opened PDF");

        Ok(LopdfDocument { inner, page_ids })
    }

    fn page_count(doc: &Self::Document) -> usize {
        doc.page_ids.len()
    }

    fn page_size(doc: &Self::Document, page: usize) -> Result<Size, Self::Error> {
        let page_id = doc.page_id(page)?;
        let obj = resolve_inherited(&doc.inner, page_id, b"MediaBox")?
            .ok_or_else(|| BackendError::Parse("MediaBox not found on page or ancestors".into()))?;
        let array = obj
            .as_array()
            .map_err(|e| BackendError::Parse(format!("MediaBox is not an array: {e}")))?;
        let rect = rect_from_array(array)?;
        Ok(Size::new(rect.width(), rect.height()))
    }

    fn has_form_fields(doc: &Self::Document) -> bool {
        acroform_fields(&doc.inner).is_some_and(|fields| !fields.is_empty())
    }

    fn raw_fields(
        doc: &Self::Document,
        options: &FormOptions,
    ) -> Result<ExtractResult<Vec<RawField>>, Self::Error> {
        Ok(collect_raw_fields(&doc.inner, options))
    }

    fn page_widgets(
        doc: &Self::Document,
        options: &FormOptions,
    ) -> Result<ExtractResult<Vec<PageWidgets>>, Self::Error> {
        collect_page_widgets(&doc.inner, &doc.page_ids, options)
    }

    fn write_page_values(
        doc: &mut Self::Document,
        page: usize,
        assignments: &[FieldAssignment],
        options: &FormOptions,
    ) -> Result<(), Self::Error> {
        let page_id = doc.page_id(page)?;
        writer::write_page_values(&mut doc.inner, page_id, assignments, options)
    }

    fn set_need_appearances(doc: &mut Self::Document) -> Result<(), Self::Error> {
        writer::set_need_appearances(&mut doc.inner)
    }

    fn add_text_annotation(
        doc: &mut Self::Document,
        annotation: &TextAnnotation,
    ) -> Result<(), Self::Error> {
        let page_id = doc.page_id(annotation.page)?;
        writer::add_free_text(&mut doc.inner, page_id, annotation)
    }

    fn save(doc: &mut Self::Document) -> Result<Vec<u8>, Self::Error> {
        let mut buf = Vec::new();
        doc.inner
            .save_to(&mut buf)
            .map_err(|e| BackendError::Parse(format!("failed to write PDF: {e}")))?;
        Ok(buf)
    }
}

/// Build a one-page-per-entry PDF whose pages carry the given extra entries.
#[cfg(test)]
pub(crate) fn create_test_pdf(pages: Vec<Dictionary>, acroform: Option<Dictionary>) -> Vec<u8> {
    use lopdf::{Document, dictionary};

    let mut doc = Document::with_version("1.5");
    let pages_id: ObjectId = doc.new_object_id();

    let mut page_ids: Vec<Object> = Vec::new();
    for mut extra in pages {
        extra.set("Type", "Page");
        extra.set("Parent", pages_id);
        if !extra.has(b"MediaBox") {
            let media_box: Vec<Object> = vec![0.into(), 0.into(), 612.into(), 792.into()];
            extra.set("MediaBox", media_box);
        }
        page_ids.push(doc.add_object(extra).into());
    }
    let count = page_ids.len() as i64;

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids,
            "Count" => count,
        }),
    );

    let mut catalog = dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    };
    if let Some(acroform) = acroform {
        catalog.set("AcroForm", acroform);
    }
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("failed to save test PDF");
    buf
}
