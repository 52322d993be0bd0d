//! JSON reading and writing for the field catalog, value batches and region
//! batches.

use std::path::Path;

use formkit_core::{FieldCatalog, FieldValueEntry, FormError, RegionBatch};
use serde::de::DeserializeOwned;

fn parse<T: DeserializeOwned>(json: &str, what: &str) -> Result<T, FormError> {
    serde_json::from_str(json).map_err(|e| FormError::InvalidInput(format!("{what}: {e}")))
}

fn read<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T, FormError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| FormError::IoError(format!("{}: {e}", path.display())))?;
    parse(&text, what)
}

/// Serialize the catalog as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns [`FormError::Other`] if serialization fails.
pub fn catalog_to_json(catalog: &FieldCatalog) -> Result<String, FormError> {
    serde_json::to_string_pretty(catalog.fields())
        .map_err(|e| FormError::Other(format!("failed to serialize catalog: {e}")))
}

/// Parse a value batch: an array of `{field_id, page, value}`.
///
/// # Errors
///
/// Returns [`FormError::InvalidInput`] for malformed JSON.
pub fn parse_value_batch(json: &str) -> Result<Vec<FieldValueEntry>, FormError> {
    parse(json, "invalid value batch")
}

/// Parse a region batch: `{form_fields: [...], pages: [...]}`.
///
/// # Errors
///
/// Returns [`FormError::InvalidInput`] for malformed JSON.
pub fn parse_region_batch(json: &str) -> Result<RegionBatch, FormError> {
    parse(json, "invalid region batch")
}

/// Read a value batch from a file.
///
/// # Errors
///
/// Returns [`FormError::IoError`] if the file cannot be read and
/// [`FormError::InvalidInput`] for malformed JSON.
pub fn read_value_batch(path: impl AsRef<Path>) -> Result<Vec<FieldValueEntry>, FormError> {
    read(path.as_ref(), "invalid value batch")
}

/// Read a region batch from a file.
///
/// # Errors
///
/// Returns [`FormError::IoError`] if the file cannot be read and
/// [`FormError::InvalidInput`] for malformed JSON.
pub fn read_region_batch(path: impl AsRef<Path>) -> Result<RegionBatch, FormError> {
    read(path.as_ref(), "invalid region batch")
}

/// Write the catalog JSON to a file.
///
/// # Errors
///
/// Returns [`FormError::IoError`] if the file cannot be written.
pub fn write_catalog(path: impl AsRef<Path>, catalog: &FieldCatalog) -> Result<(), FormError> {
    let path = path.as_ref();
    let json = catalog_to_json(catalog)?;
    std::fs::write(path, json).map_err(|e| FormError::IoError(format!("{}: {e}", path.display())))
}
