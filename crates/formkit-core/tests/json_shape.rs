//! JSON shape tests for the external formats.

#![cfg(feature = "serde")]

use formkit_core::*;
use serde_json::json;

fn rect() -> PageRect {
    PageRect::new(50.0, 700.0, 200.0, 720.0)
}

#[test]
fn test_text_record_shape() {
    let record = FieldRecord::Text(TextField {
        id: "applicant.name".to_string(),
        page: 1,
        rect: rect(),
    });
    assert_eq!(
        serde_json::to_value(&record).unwrap(),
        json!({
            "field_id": "applicant.name",
            "page": 1,
            "type": "text",
            "rect": [50.0, 700.0, 200.0, 720.0],
        })
    );
}

#[test]
fn test_checkbox_record_shape() {
    let record = FieldRecord::Checkbox(CheckboxField {
        id: "agree".to_string(),
        page: 2,
        rect: rect(),
        checked_value: "Yes".to_string(),
        unchecked_value: "Off".to_string(),
    });
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["type"], "checkbox");
    assert_eq!(value["checked_value"], "Yes");
    assert_eq!(value["unchecked_value"], "Off");
}

#[test]
fn test_radio_group_has_no_top_level_rect() {
    let record = FieldRecord::RadioGroup(RadioGroupField {
        id: "color".to_string(),
        page: 1,
        options: vec![RadioOption {
            value: "Red".to_string(),
            rect: rect(),
        }],
    });
    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["type"], "radio_group");
    assert!(value.get("rect").is_none());
    assert_eq!(
        value["radio_options"],
        json!([{ "value": "Red", "rect": [50.0, 700.0, 200.0, 720.0] }])
    );
}

#[test]
fn test_choice_and_unknown_shapes() {
    let choice = FieldRecord::Choice(ChoiceField {
        id: "country".to_string(),
        page: 1,
        rect: rect(),
        options: vec![ChoiceOption {
            value: "FR".to_string(),
            text: "France".to_string(),
        }],
    });
    assert_eq!(
        serde_json::to_value(&choice).unwrap()["choice_options"],
        json!([{ "value": "FR", "text": "France" }])
    );

    let unknown = FieldRecord::Unknown(UnknownField {
        id: "sig".to_string(),
        page: 3,
        rect: rect(),
        raw_type: Some("Sig".to_string()),
    });
    assert_eq!(serde_json::to_value(&unknown).unwrap()["type"], "unknown (Sig)");
}

#[test]
fn test_region_batch_parses_optional_parts() {
    let batch: RegionBatch = serde_json::from_value(json!({
        "form_fields": [
            {
                "description": "Name",
                "page_number": 1,
                "label_bounding_box": [10, 10, 50, 30],
                "entry_bounding_box": [60, 10, 150, 30],
                "entry_text": { "text": "Ada", "font_size": 12 }
            },
            {
                "description": "Date",
                "page_number": 1,
                "label_bounding_box": [10, 40, 50, 60],
                "entry_bounding_box": [60, 40, 150, 60]
            }
        ],
        "pages": [{ "page_number": 1, "image_width": 1700, "image_height": 2200 }]
    }))
    .unwrap();

    assert_eq!(batch.form_fields.len(), 2);
    let entry_text = batch.form_fields[0].entry_text.as_ref().unwrap();
    assert_eq!(entry_text.text.as_deref(), Some("Ada"));
    assert_eq!(entry_text.font_size, Some(12.0));
    assert_eq!(entry_text.font, None);
    assert!(batch.form_fields[1].entry_text.is_none());
    assert_eq!(batch.form_fields[0].entry_bounding_box, BBox::new(60.0, 10.0, 150.0, 30.0));
    assert_eq!(batch.page_image(1).map(|p| p.image_width), Some(1700.0));
}

#[test]
fn test_region_batch_without_pages() {
    let batch: RegionBatch = serde_json::from_value(json!({ "form_fields": [] })).unwrap();
    assert!(batch.pages.is_empty());
}

#[test]
fn test_value_entry_value_is_optional() {
    let entries: Vec<FieldValueEntry> = serde_json::from_value(json!([
        { "field_id": "name", "page": 1, "value": "Ada" },
        { "field_id": "agree", "page": 1 }
    ]))
    .unwrap();
    assert_eq!(entries[0].value.as_deref(), Some("Ada"));
    assert_eq!(entries[1].value, None);
}
