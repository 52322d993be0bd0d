//! Fixtures shared by the CLI integration tests.

#![allow(dead_code)]

use std::io::Write;

use assert_cmd::Command;
use lopdf::{Dictionary, Document, Object, dictionary};
use tempfile::NamedTempFile;

pub fn cmd() -> Command {
    Command::cargo_bin("formkit").unwrap()
}

/// Write bytes to a temp file with the given suffix.
pub fn temp_file(bytes: &[u8], suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

fn build(annots: Vec<Dictionary>, with_form: bool) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let page_id = doc.new_object_id();

    let annot_ids: Vec<Object> = annots
        .into_iter()
        .map(|a| doc.add_object(a).into())
        .collect();

    doc.objects.insert(
        page_id,
        Object::Dictionary(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Annots" => annot_ids.clone(),
        }),
    );
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::from(page_id)],
            "Count" => 1i64,
        }),
    );

    let mut catalog = dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    };
    if with_form {
        catalog.set("AcroForm", dictionary! { "Fields" => annot_ids });
    }
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// One page with a `name` text field and an `agree` checkbox.
pub fn form_pdf() -> Vec<u8> {
    let mut normal = Dictionary::new();
    normal.set("Yes", Object::Null);
    normal.set("Off", Object::Null);

    build(
        vec![
            dictionary! {
                "Type" => "Annot",
                "Subtype" => "Widget",
                "T" => Object::string_literal("name"),
                "FT" => "Tx",
                "Rect" => vec![50.into(), 700.into(), 250.into(), 720.into()],
            },
            dictionary! {
                "Type" => "Annot",
                "Subtype" => "Widget",
                "T" => Object::string_literal("agree"),
                "FT" => "Btn",
                "Rect" => vec![50.into(), 650.into(), 60.into(), 660.into()],
                "AP" => dictionary! { "N" => normal },
                "AS" => "Off",
            },
        ],
        true,
    )
}

/// One empty page and no form.
pub fn blank_pdf() -> Vec<u8> {
    build(Vec::new(), false)
}
