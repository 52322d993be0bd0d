use std::path::Path;

use formkit::{RegionValidationOptions, validate_regions};

use crate::shared::read_regions;

pub fn run(fields: &Path, max_diagnostics: usize, default_font_size: f64) -> Result<(), i32> {
    let batch = read_regions(fields)?;
    let options = RegionValidationOptions {
        max_diagnostics,
        default_font_size,
    };

    let report = validate_regions(&batch, &options);
    for line in report.lines() {
        println!("{line}");
    }

    if report.is_valid() { Ok(()) } else { Err(1) }
}
