//! Integration tests for the `annotate` subcommand.

mod common;

use common::{blank_pdf, cmd, temp_file};
use predicates::prelude::*;
use serde_json::json;

fn regions(page_image: bool) -> tempfile::NamedTempFile {
    let mut body = json!({
        "form_fields": [
            {
                "description": "Name",
                "page_number": 1,
                "label_bounding_box": [100, 100, 300, 140],
                "entry_bounding_box": [320, 100, 900, 140],
                "entry_text": {"text": "Ada", "font_size": 12, "font_color": "0000ff"}
            },
            {
                "description": "Notes",
                "page_number": 1,
                "label_bounding_box": [100, 200, 300, 240],
                "entry_bounding_box": [320, 200, 900, 240]
            }
        ]
    });
    if page_image {
        body["pages"] = json!([{"page_number": 1, "image_width": 1224, "image_height": 1584}]);
    }
    temp_file(body.to_string().as_bytes(), ".json")
}

#[test]
fn adds_one_annotation_per_text_entry() {
    let pdf = temp_file(&blank_pdf(), ".pdf");
    let fields = regions(true);
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("annotated.pdf");

    cmd()
        .args([
            "annotate",
            pdf.path().to_str().unwrap(),
            fields.path().to_str().unwrap(),
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 1 text annotations"));

    let doc = lopdf::Document::load_mem(&std::fs::read(&out).unwrap()).unwrap();
    let free_text = doc
        .objects
        .values()
        .filter_map(|o| o.as_dict().ok())
        .filter(|d| {
            d.get(b"Subtype")
                .ok()
                .and_then(|s| s.as_name().ok())
                .is_some_and(|s| s == b"FreeText")
        })
        .count();
    assert_eq!(free_text, 1);
}

#[test]
fn missing_page_image_fails() {
    let pdf = temp_file(&blank_pdf(), ".pdf");
    let fields = regions(false);
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("annotated.pdf");

    cmd()
        .args([
            "annotate",
            pdf.path().to_str().unwrap(),
            fields.path().to_str().unwrap(),
            out.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no image dimensions given for page 1"));

    assert!(!out.exists());
}
