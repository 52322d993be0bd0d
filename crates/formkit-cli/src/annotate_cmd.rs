use std::path::Path;

use crate::shared::{open_form, read_regions, report, write_output};

pub fn run(file: &Path, fields: &Path, output: &Path) -> Result<(), i32> {
    let batch = read_regions(fields)?;
    let doc = open_form(file)?;

    let annotations = doc.plan_annotations(&batch).map_err(report)?;
    let bytes = doc.annotate(&annotations).map_err(report)?;
    write_output(output, &bytes)?;

    println!(
        "Successfully populated PDF form and saved to {}",
        output.display()
    );
    println!("Added {} text annotations", annotations.len());
    Ok(())
}
