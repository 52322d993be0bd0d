//! Shared PDF fixtures for the formkit integration tests.

#![allow(dead_code)]

use lopdf::{Dictionary, Document, Object, ObjectId, dictionary};

fn rect(x0: i64, y0: i64, x1: i64, y1: i64) -> Object {
    Object::Array(vec![x0.into(), y0.into(), x1.into(), y1.into()])
}

fn states(names: &[&str]) -> Object {
    let mut normal = Dictionary::new();
    for name in names {
        normal.set(*name, Object::Null);
    }
    Object::Dictionary(dictionary! { "N" => normal })
}

fn widget(extra: Dictionary) -> Dictionary {
    let mut dict = dictionary! {
        "Type" => "Annot",
        "Subtype" => "Widget",
    };
    for (key, value) in extra.iter() {
        dict.set(key.clone(), value.clone());
    }
    dict
}

fn finish(mut doc: Document, pages_id: ObjectId, page_ids: &[ObjectId], acroform: Option<ObjectId>) -> Vec<u8> {
    let kids: Vec<Object> = page_ids.iter().map(|id| Object::from(*id)).collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_ids.len() as i64,
        }),
    );
    let mut catalog = dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    };
    if let Some(id) = acroform {
        catalog.set("AcroForm", id);
    }
    let catalog_id = doc.add_object(catalog);
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("failed to save fixture");
    buf
}

fn page(pages_id: ObjectId, annots: Vec<Object>) -> Object {
    Object::Dictionary(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        "Annots" => annots,
    })
}

/// A PDF with `pages` empty letter-size pages and no form.
pub fn blank_pdf(pages: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut page_ids = Vec::new();
    for _ in 0..pages {
        let id = doc.new_object_id();
        doc.objects.insert(id, page(pages_id, Vec::new()));
        page_ids.push(id);
    }
    finish(doc, pages_id, &page_ids, None)
}

/// A two-page application form.
///
/// Page 1: `applicant.name` and `applicant.email` text fields under a
/// nameless-widget parent, an `agree` checkbox and a `country` choice.
/// Page 2: a `color` radio group with `Red` and `Blue`.
pub fn application_form() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let page1 = doc.new_object_id();
    let page2 = doc.new_object_id();
    let applicant = doc.new_object_id();
    let color = doc.new_object_id();

    let name = doc.add_object(widget(dictionary! {
        "T" => Object::string_literal("name"),
        "FT" => "Tx",
        "Parent" => applicant,
        "Rect" => rect(50, 700, 250, 720),
    }));
    let email = doc.add_object(widget(dictionary! {
        "T" => Object::string_literal("email"),
        "FT" => "Tx",
        "Parent" => applicant,
        "Rect" => rect(50, 660, 250, 680),
    }));
    doc.objects.insert(
        applicant,
        Object::Dictionary(dictionary! {
            "T" => Object::string_literal("applicant"),
            "Kids" => vec![Object::from(name), Object::from(email)],
        }),
    );

    let agree = doc.add_object(widget(dictionary! {
        "T" => Object::string_literal("agree"),
        "FT" => "Btn",
        "Rect" => rect(50, 600, 60, 610),
        "AP" => states(&["Yes", "Off"]),
        "AS" => "Off",
    }));

    let country = doc.add_object(widget(dictionary! {
        "T" => Object::string_literal("country"),
        "FT" => "Ch",
        "Rect" => rect(300, 700, 400, 720),
        "Opt" => vec![
            Object::Array(vec![
                Object::string_literal("US"),
                Object::string_literal("United States"),
            ]),
            Object::Array(vec![
                Object::string_literal("UK"),
                Object::string_literal("United Kingdom"),
            ]),
        ],
    }));

    let red = doc.add_object(widget(dictionary! {
        "Parent" => color,
        "Rect" => rect(50, 700, 60, 710),
        "AP" => states(&["Red", "Off"]),
        "AS" => "Off",
    }));
    let blue = doc.add_object(widget(dictionary! {
        "Parent" => color,
        "Rect" => rect(100, 700, 110, 710),
        "AP" => states(&["Blue", "Off"]),
        "AS" => "Off",
    }));
    doc.objects.insert(
        color,
        Object::Dictionary(dictionary! {
            "T" => Object::string_literal("color"),
            "FT" => "Btn",
            "Kids" => vec![Object::from(red), Object::from(blue)],
        }),
    );

    doc.objects.insert(
        page1,
        page(
            pages_id,
            vec![name.into(), email.into(), agree.into(), country.into()],
        ),
    );
    doc.objects.insert(page2, page(pages_id, vec![red.into(), blue.into()]));

    let acroform = doc.add_object(dictionary! {
        "Fields" => vec![
            Object::from(applicant),
            Object::from(agree),
            Object::from(country),
            Object::from(color),
        ],
    });
    finish(doc, pages_id, &[page1, page2], Some(acroform))
}
