use std::path::Path;

use crate::shared::{open_form, report};

pub fn run(file: &Path, output: &Path) -> Result<(), i32> {
    let doc = open_form(file)?;
    let catalog = doc.field_catalog().map_err(report)?;

    for warning in &catalog.warnings {
        eprintln!("Warning: {warning}");
    }

    formkit::json::write_catalog(output, &catalog.value).map_err(report)?;
    println!(
        "Exported {} fields to {}",
        catalog.value.len(),
        output.display()
    );
    Ok(())
}
