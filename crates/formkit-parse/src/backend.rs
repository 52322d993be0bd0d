//! Form backend trait.
//!
//! Defines the [`FormBackend`] trait that abstracts the PDF operations the
//! form pipeline needs: reading the field hierarchy and page annotations,
//! writing field values, and adding text annotations. The generic
//! [`extract_catalog`] and [`apply_population`] drive any backend through the
//! backend-independent algorithms in `formkit-core`.

use formkit_core::{
    ExtractResult, FieldAssignment, FieldCatalog, FormError, FormOptions, PageWidgets,
    PopulationPlan, RawField, Size, TextAnnotation, assemble_catalog, build_field_tree,
    locate_fields,
};

/// Trait abstracting PDF form operations.
///
/// Pages are addressed by 1-based page number throughout, matching the
/// numbering used in field catalogs and value batches.
///
/// # Associated Types
///
/// - `Document`: The parsed PDF document representation.
/// - `Error`: Backend-specific error type, convertible to [`FormError`].
///
/// # Usage
///
/// ```ignore
/// let doc = MyBackend::open(pdf_bytes)?;
/// let catalog = extract_catalog::<MyBackend>(&doc, &FormOptions::default())?;
/// ```
pub trait FormBackend {
    /// The parsed PDF document type.
    type Document;

    /// Backend-specific error type, convertible to [`FormError`].
    type Error: std::error::Error + Into<FormError>;

    /// Parse PDF bytes into a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes do not represent a readable PDF document.
    fn open(bytes: &[u8]) -> Result<Self::Document, Self::Error>;

    /// Return the number of pages in the document.
    fn page_count(doc: &Self::Document) -> usize;

    /// Width and height of a page's MediaBox.
    ///
    /// # Errors
    ///
    /// Returns an error if the page does not exist or has no usable MediaBox.
    fn page_size(doc: &Self::Document, page: usize) -> Result<Size, Self::Error>;

    /// Whether the document's AcroForm lists at least one field.
    fn has_form_fields(doc: &Self::Document) -> bool;

    /// Flatten the AcroForm field hierarchy into named nodes, in document
    /// order, each carrying its qualified id.
    ///
    /// # Errors
    ///
    /// Returns an error only for structural failures; malformed individual
    /// nodes are skipped with a warning.
    fn raw_fields(
        doc: &Self::Document,
        options: &FormOptions,
    ) -> Result<ExtractResult<Vec<RawField>>, Self::Error>;

    /// Read every page's annotations in page order.
    ///
    /// # Errors
    ///
    /// Returns an error only for structural failures; unreadable individual
    /// annotations are skipped with a warning.
    fn page_widgets(
        doc: &Self::Document,
        options: &FormOptions,
    ) -> Result<ExtractResult<Vec<PageWidgets>>, Self::Error>;

    /// Write validated values into the fields whose widgets are on `page`.
    ///
    /// # Errors
    ///
    /// Returns an error if the page does not exist or cannot be modified.
    fn write_page_values(
        doc: &mut Self::Document,
        page: usize,
        assignments: &[FieldAssignment],
        options: &FormOptions,
    ) -> Result<(), Self::Error>;

    /// Ask viewers to regenerate field appearances from the stored values.
    ///
    /// # Errors
    ///
    /// Returns an error if the document catalog cannot be modified.
    fn set_need_appearances(doc: &mut Self::Document) -> Result<(), Self::Error>;

    /// Append a free-text annotation to a page.
    ///
    /// # Errors
    ///
    /// Returns an error if the page does not exist or cannot be modified.
    fn add_text_annotation(
        doc: &mut Self::Document,
        annotation: &TextAnnotation,
    ) -> Result<(), Self::Error>;

    /// Serialize the document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    fn save(doc: &mut Self::Document) -> Result<Vec<u8>, Self::Error>;
}

/// Build the field catalog of a document.
///
/// Warnings from every stage (traversal, classification, location) are
/// returned together, in that order.
///
/// # Errors
///
/// Propagates structural failures from the backend.
pub fn extract_catalog<B: FormBackend>(
    doc: &B::Document,
    options: &FormOptions,
) -> Result<ExtractResult<FieldCatalog>, B::Error> {
    let fields = B::raw_fields(doc, options)?;
    let widgets = B::page_widgets(doc, options)?;

    let mut warnings = fields.warnings;
    warnings.extend(widgets.warnings);

    let tree = build_field_tree(fields.value);
    warnings.extend(tree.warnings);

    let catalog = assemble_catalog(locate_fields(tree.value, &widgets.value));
    warnings.extend(catalog.warnings);

    tracing::debug!(
        fields = catalog.value.len(),
        warnings = warnings.len(),
        "extracted field catalog"
    );
    Ok(ExtractResult::with_warnings(catalog.value, warnings))
}

/// Write a validated plan into a document: one batch per page, then the
/// appearance regeneration flag.
///
/// # Errors
///
/// Propagates backend write failures.
pub fn apply_population<B: FormBackend>(
    doc: &mut B::Document,
    plan: &PopulationPlan,
    options: &FormOptions,
) -> Result<(), B::Error> {
    for (page, assignments) in &plan.pages {
        B::write_page_values(doc, *page, assignments, options)?;
    }
    B::set_need_appearances(doc)?;
    tracing::info!(values = plan.len(), pages = plan.pages.len(), "populated form fields");
    Ok(())
}
