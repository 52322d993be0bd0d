use std::path::Path;

use formkit::{FormDocument, FormError, RegionBatch};

/// Open a PDF file with user-friendly error messages.
///
/// Returns `Err(1)` with a message printed to stderr if the file is not found
/// or cannot be parsed as a valid PDF.
pub fn open_form(file: &Path) -> Result<FormDocument, i32> {
    if !file.exists() {
        eprintln!("Error: file not found: {}", file.display());
        return Err(1);
    }

    FormDocument::open_file(file, None).map_err(|e| {
        eprintln!("Error: failed to open PDF: {e}");
        1
    })
}

/// Read a region batch, printing the failure to stderr.
pub fn read_regions(path: &Path) -> Result<RegionBatch, i32> {
    formkit::json::read_region_batch(path).map_err(report)
}

/// Write output bytes, printing the failure to stderr.
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<(), i32> {
    std::fs::write(path, bytes).map_err(|e| {
        eprintln!("Error: failed to write {}: {e}", path.display());
        1
    })
}

/// Print an error to stderr and return the exit code.
pub fn report(err: FormError) -> i32 {
    eprintln!("Error: {err}");
    1
}
