//! formkit: extract, validate and fill PDF interactive form fields.
//!
//! This is the public API facade crate for formkit. It re-exports types from
//! formkit-core and uses formkit-parse for PDF reading and writing.
//!
//! # Architecture
//!
//! - **formkit-core**: Backend-independent field model and algorithms
//! - **formkit-parse**: AcroForm traversal and form writing on top of lopdf
//! - **formkit** (this crate): [`FormDocument`] and the JSON formats

mod document;
pub mod json;

pub use document::{FormDocument, PopulateError};
pub use formkit_core;
pub use formkit_core::{
    BBox, EntryText, ExtractResult, ExtractWarning, ExtractWarningCode, FieldCatalog, FieldRecord,
    FieldRegion, FieldValueEntry, FormError, FormOptions, PageImage, PageRect, PopulateIssue,
    RegionBatch, RegionIssue, RegionReport, RegionValidationOptions, Size, TextAnnotation,
    validate_regions,
};
pub use formkit_parse;
