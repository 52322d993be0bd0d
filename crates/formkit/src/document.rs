//! Top-level form document type.

use std::fmt;

use formkit_core::{
    ExtractResult, FieldCatalog, FieldValueEntry, FormError, FormOptions, PopulateIssue,
    RegionBatch, Size, TextAnnotation, plan_population, plan_text_annotations,
};
use formkit_parse::{FormBackend, LopdfBackend, LopdfDocument, apply_population, extract_catalog};

/// Why a value batch could not be written.
#[derive(Debug, Clone, PartialEq)]
pub enum PopulateError {
    /// The batch failed validation. Nothing was written.
    Rejected(Vec<PopulateIssue>),
    /// The document could not be read or written.
    Pdf(FormError),
}

impl fmt::Display for PopulateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PopulateError::Rejected(issues) => {
                write!(f, "value batch rejected with {} issue(s)", issues.len())
            }
            PopulateError::Pdf(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for PopulateError {}

impl From<FormError> for PopulateError {
    fn from(err: FormError) -> Self {
        PopulateError::Pdf(err)
    }
}

/// A PDF opened for form work.
///
/// The source is never modified: [`FormDocument::populate`] and
/// [`FormDocument::annotate`] work on a private copy and return the bytes of
/// the new document.
///
/// # Example
///
/// ```ignore
/// use formkit::FormDocument;
///
/// let doc = FormDocument::open_file("form.pdf", None)?;
/// for field in doc.field_catalog()?.value.iter() {
///     println!("{} on page {}", field.id(), field.page());
/// }
/// ```
pub struct FormDocument {
    doc: LopdfDocument,
    options: FormOptions,
}

impl fmt::Debug for FormDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormDocument")
            .field("doc", &self.doc)
            .field("options", &self.options)
            .finish()
    }
}

impl FormDocument {
    /// Open a PDF document from bytes.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::ResourceLimitExceeded`] if the input is larger
    /// than `max_input_bytes`, and [`FormError::ParseError`] if the bytes are
    /// not a readable, unencrypted PDF.
    pub fn open(bytes: &[u8], options: Option<FormOptions>) -> Result<Self, FormError> {
        let options = options.unwrap_or_default();
        if let Some(max_bytes) = options.max_input_bytes {
            if bytes.len() > max_bytes {
                return Err(FormError::ResourceLimitExceeded {
                    limit_name: "max_input_bytes".to_string(),
                    limit_value: max_bytes,
                    actual_value: bytes.len(),
                });
            }
        }
        let doc = LopdfBackend::open(bytes).map_err(FormError::from)?;
        Ok(Self { doc, options })
    }

    /// Open a PDF document from a file path.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::IoError`] if the file cannot be read, and any
    /// error of [`FormDocument::open`].
    #[cfg(feature = "std")]
    pub fn open_file(
        path: impl AsRef<std::path::Path>,
        options: Option<FormOptions>,
    ) -> Result<Self, FormError> {
        let bytes = std::fs::read(path.as_ref()).map_err(|e| FormError::IoError(e.to_string()))?;
        Self::open(&bytes, options)
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        LopdfBackend::page_count(&self.doc)
    }

    /// MediaBox width and height of a 1-based page.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::PageOutOfRange`] for a missing page.
    pub fn page_size(&self, page: usize) -> Result<Size, FormError> {
        LopdfBackend::page_size(&self.doc, page).map_err(FormError::from)
    }

    /// Whether the document has interactive form fields.
    pub fn has_form_fields(&self) -> bool {
        LopdfBackend::has_form_fields(&self.doc)
    }

    /// Extract the ordered field catalog.
    ///
    /// Fields that cannot be located or classified cleanly are reported in
    /// the result's warnings.
    ///
    /// # Errors
    ///
    /// Returns an error only when the form structure itself is unreadable.
    pub fn field_catalog(&self) -> Result<ExtractResult<FieldCatalog>, FormError> {
        extract_catalog::<LopdfBackend>(&self.doc, &self.options).map_err(FormError::from)
    }

    /// Validate a value batch against the catalog and write it into a copy
    /// of the document.
    ///
    /// The batch is all-or-nothing: any invalid entry rejects the whole
    /// batch before anything is written. Entries without a value are checked
    /// for id and page only.
    ///
    /// # Errors
    ///
    /// Returns [`PopulateError::Rejected`] with every issue found, or
    /// [`PopulateError::Pdf`] if the document cannot be written.
    pub fn populate(&self, entries: &[FieldValueEntry]) -> Result<Vec<u8>, PopulateError> {
        let catalog = self.field_catalog()?.value;
        let plan = plan_population(&catalog, entries).map_err(PopulateError::Rejected)?;

        let mut doc = self.doc.clone();
        apply_population::<LopdfBackend>(&mut doc, &plan, &self.options)
            .map_err(FormError::from)?;
        let bytes = LopdfBackend::save(&mut doc).map_err(FormError::from)?;
        Ok(bytes)
    }

    /// Convert a region batch's entry text into page-space annotations.
    ///
    /// # Errors
    ///
    /// Returns an error when a definition with text names a page the
    /// document or the batch's image list lacks.
    pub fn plan_annotations(&self, batch: &RegionBatch) -> Result<Vec<TextAnnotation>, FormError> {
        plan_text_annotations(batch, self.page_count(), |page| {
            LopdfBackend::page_size(&self.doc, page).ok()
        })
    }

    /// Add free-text annotations to a copy of the document.
    ///
    /// # Errors
    ///
    /// Returns an error if an annotation names a missing page or the
    /// document cannot be written.
    pub fn annotate(&self, annotations: &[TextAnnotation]) -> Result<Vec<u8>, FormError> {
        let mut doc = self.doc.clone();
        for annotation in annotations {
            LopdfBackend::add_text_annotation(&mut doc, annotation)?;
        }
        tracing::info!(annotations = annotations.len(), "added text annotations");
        Ok(LopdfBackend::save(&mut doc)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{Document, Object, dictionary};

    fn blank_pdf(pages: usize) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let mut kids: Vec<Object> = Vec::new();
        for _ in 0..pages {
            let page = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            });
            kids.push(page.into());
        }
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => pages as i64,
            }),
        );
        let catalog = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog);
        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn open_respects_input_limit() {
        let bytes = blank_pdf(1);
        let options = FormOptions {
            max_input_bytes: Some(10),
            ..FormOptions::default()
        };
        let err = FormDocument::open(&bytes, Some(options)).unwrap_err();
        assert!(matches!(
            err,
            FormError::ResourceLimitExceeded { limit_value: 10, .. }
        ));
    }

    #[test]
    fn blank_document_has_no_fields() {
        let doc = FormDocument::open(&blank_pdf(2), None).unwrap();
        assert_eq!(doc.page_count(), 2);
        assert!(!doc.has_form_fields());
        let catalog = doc.field_catalog().unwrap();
        assert!(catalog.value.is_empty());
        assert!(catalog.is_clean());
    }

    #[test]
    fn populate_rejects_unknown_field() {
        let doc = FormDocument::open(&blank_pdf(1), None).unwrap();
        let entries = vec![FieldValueEntry {
            field_id: "missing".to_string(),
            page: 1,
            value: Some("x".to_string()),
        }];
        let err = doc.populate(&entries).unwrap_err();
        assert_eq!(
            err,
            PopulateError::Rejected(vec![PopulateIssue::InvalidFieldReference {
                field_id: "missing".to_string()
            }])
        );
    }

    #[test]
    fn page_size_out_of_range() {
        let doc = FormDocument::open(&blank_pdf(1), None).unwrap();
        assert_eq!(doc.page_size(1).unwrap(), Size::new(612.0, 792.0));
        assert!(matches!(
            doc.page_size(3),
            Err(FormError::PageOutOfRange { page: 3, page_count: 1 })
        ));
    }
}
