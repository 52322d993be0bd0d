//! formkit-core: Backend-independent data types and algorithms.
//!
//! This crate provides the form field model (field records, geometry in page
//! and pixel space) and the pure algorithms that operate on it: field tree
//! classification, annotation binding, catalog ordering, region validation,
//! value-batch validation, coordinate conversion and text overlay planning.
//! It never touches a PDF file directly; `formkit-parse` feeds it.

pub mod annotate;
pub mod catalog;
pub mod coords;
pub mod error;
pub mod field_tree;
pub mod form_field;
pub mod geometry;
pub mod locator;
pub mod regions;
pub mod values;

pub use annotate::{TextAnnotation, plan_text_annotations};
pub use catalog::{FieldCatalog, assemble_catalog};
pub use coords::CoordinateTransform;
pub use error::{ExtractResult, ExtractWarning, ExtractWarningCode, FormError, FormOptions};
pub use field_tree::{FieldTree, LeafKind, RawField, UnlocatedField, build_field_tree};
pub use form_field::{
    CheckboxField, ChoiceField, ChoiceOption, FieldRecord, FieldType, OFF_STATE, RadioGroupField,
    RadioOption, RawChoiceOption, TextField, UnknownField,
};
pub use geometry::{BBox, PageRect, Size};
pub use locator::{LeafLocation, LocatedFields, PageWidgets, WidgetAnnotation, locate_fields};
pub use regions::{
    EntryText, FieldRegion, PageImage, RegionBatch, RegionIssue, RegionReport, RegionRef,
    RegionRole, RegionValidationOptions, validate_regions,
};
pub use values::{
    AssignmentKind, FieldAssignment, FieldValueEntry, PopulateIssue, PopulationPlan,
    ValueConstraint, plan_population,
};
