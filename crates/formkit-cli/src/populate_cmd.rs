use std::path::Path;

use formkit::PopulateError;

use crate::shared::{open_form, report, write_output};

pub fn run(file: &Path, values: &Path, output: &Path) -> Result<(), i32> {
    let entries = formkit::json::read_value_batch(values).map_err(report)?;
    let doc = open_form(file)?;

    let bytes = match doc.populate(&entries) {
        Ok(bytes) => bytes,
        Err(PopulateError::Rejected(issues)) => {
            for issue in &issues {
                println!("{issue}");
            }
            return Err(1);
        }
        Err(PopulateError::Pdf(err)) => return Err(report(err)),
    };

    write_output(output, &bytes)?;
    println!(
        "SUCCESS: Populated {} fields and saved to {}",
        entries.iter().filter(|e| e.value.is_some()).count(),
        output.display()
    );
    Ok(())
}
