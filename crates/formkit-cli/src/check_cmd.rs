use std::path::Path;

use crate::shared::open_form;

pub fn run(file: &Path) -> Result<(), i32> {
    let doc = open_form(file)?;
    if doc.has_form_fields() {
        println!("This PDF contains interactive form fields");
    } else {
        println!(
            "This PDF lacks interactive form fields; manual identification of data entry locations is required"
        );
    }
    Ok(())
}
