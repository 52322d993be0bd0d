//! Form writing: field values, the appearance regeneration flag and
//! free-text annotations.
//!
//! No appearance streams are generated. Values are stored in `/V` (and the
//! widget `/AS` for buttons) and viewers are asked to redraw via
//! `/NeedAppearances`.

use std::collections::HashSet;

use formkit_core::{AssignmentKind, FieldAssignment, FormOptions, OFF_STATE, TextAnnotation};
use lopdf::{Dictionary, Object, ObjectId, dictionary};

use crate::error::BackendError;
use crate::field_walk::{appearance_states, qualified_name};
use crate::lopdf_backend::{catalog_id, resolved_entry};
use crate::pdf_string::encode_pdf_string;

/// A pending change to one object's dictionary.
struct Edit {
    target: ObjectId,
    key: &'static [u8],
    value: Object,
}

fn dict_mut(doc: &mut lopdf::Document, id: ObjectId) -> Result<&mut Dictionary, BackendError> {
    doc.get_object_mut(id)
        .and_then(|o| o.as_dict_mut())
        .map_err(|e| BackendError::Parse(format!("object {} {} is not writable: {e}", id.0, id.1)))
}

fn value_object(assignment: &FieldAssignment) -> Object {
    match assignment.kind {
        AssignmentKind::Checkbox | AssignmentKind::RadioGroup => {
            Object::Name(assignment.value.as_bytes().to_vec())
        }
        AssignmentKind::Text | AssignmentKind::Choice | AssignmentKind::Unknown => {
            encode_pdf_string(&assignment.value)
        }
    }
}

/// The `/AS` a button widget should show for `value`.
fn appearance_for(doc: &lopdf::Document, widget: &Dictionary, value: &str) -> Option<Object> {
    let states = appearance_states(doc, widget)?;
    let state = if states.iter().any(|s| s == value) {
        value
    } else {
        OFF_STATE
    };
    Some(Object::Name(state.as_bytes().to_vec()))
}

/// Collect the edits for one page without mutating the document.
fn plan_page_edits(
    doc: &lopdf::Document,
    page_id: ObjectId,
    assignments: &[FieldAssignment],
    max_depth: usize,
) -> Result<Vec<Edit>, BackendError> {
    let page_dict = doc
        .get_object(page_id)
        .and_then(|o| o.as_dict())
        .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))?;
    let annots = resolved_entry(doc, page_dict, b"Annots")
        .and_then(|o| o.as_array().ok())
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut edits = Vec::new();
    let mut written_fields: HashSet<ObjectId> = HashSet::new();
    let mut matched: HashSet<&str> = HashSet::new();

    for entry in annots {
        let Object::Reference(annot_id) = entry else {
            continue;
        };
        let Ok(annot) = doc.get_object(*annot_id).and_then(|o| o.as_dict()) else {
            continue;
        };
        let Some(name) = qualified_name(doc, annot, max_depth) else {
            continue;
        };
        let Some(assignment) = assignments.iter().rfind(|a| a.field_id == name) else {
            continue;
        };
        matched.insert(assignment.field_id.as_str());

        // The field dictionary is the widget itself when it carries /T,
        // otherwise its parent.
        let field_id = if annot.has(b"T") {
            *annot_id
        } else {
            match annot.get(b"Parent").and_then(|o| o.as_reference()) {
                Ok(id) => id,
                Err(_) => continue,
            }
        };
        if !written_fields.insert(field_id) {
            continue;
        }

        edits.push(Edit {
            target: field_id,
            key: b"V",
            value: value_object(assignment),
        });

        match assignment.kind {
            AssignmentKind::Checkbox => {
                if let Some(state) = appearance_for(doc, annot, &assignment.value) {
                    edits.push(Edit {
                        target: *annot_id,
                        key: b"AS",
                        value: state,
                    });
                }
            }
            AssignmentKind::RadioGroup => {
                // Every kid of the group, wherever it is drawn.
                let field = doc
                    .get_object(field_id)
                    .and_then(|o| o.as_dict())
                    .map_err(|e| BackendError::Parse(format!("invalid radio group: {e}")))?;
                let kids = resolved_entry(doc, field, b"Kids")
                    .and_then(|o| o.as_array().ok())
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                for kid in kids {
                    let Object::Reference(kid_id) = kid else {
                        continue;
                    };
                    let Ok(kid_dict) = doc.get_object(*kid_id).and_then(|o| o.as_dict()) else {
                        continue;
                    };
                    if let Some(state) = appearance_for(doc, kid_dict, &assignment.value) {
                        edits.push(Edit {
                            target: *kid_id,
                            key: b"AS",
                            value: state,
                        });
                    }
                }
            }
            AssignmentKind::Text | AssignmentKind::Choice | AssignmentKind::Unknown => {}
        }
    }

    for assignment in assignments {
        if !matched.contains(assignment.field_id.as_str()) {
            tracing::warn!(field = %assignment.field_id, "no widget for field on page; value not written");
        }
    }

    Ok(edits)
}

/// Write the values of fields whose widgets are on `page_id`.
pub(crate) fn write_page_values(
    doc: &mut lopdf::Document,
    page_id: ObjectId,
    assignments: &[FieldAssignment],
    options: &FormOptions,
) -> Result<(), BackendError> {
    let edits = plan_page_edits(doc, page_id, assignments, options.max_tree_depth)?;
    tracing::debug!(edits = edits.len(), "writing page values");
    for edit in edits {
        dict_mut(doc, edit.target)?.set(edit.key, edit.value);
    }
    Ok(())
}

/// Set `/NeedAppearances true` on the AcroForm, creating it if absent.
pub(crate) fn set_need_appearances(doc: &mut lopdf::Document) -> Result<(), BackendError> {
    let root_id = catalog_id(doc)?;
    let acroform = doc
        .get_object(root_id)
        .and_then(|o| o.as_dict())
        .map_err(|e| BackendError::Parse(format!("failed to get catalog: {e}")))?
        .get(b"AcroForm")
        .ok()
        .cloned();

    match acroform {
        Some(Object::Reference(id)) => {
            dict_mut(doc, id)?.set("NeedAppearances", true);
        }
        Some(Object::Dictionary(mut inline)) => {
            inline.set("NeedAppearances", true);
            dict_mut(doc, root_id)?.set("AcroForm", inline);
        }
        _ => {
            let fields: Vec<Object> = Vec::new();
            let id = doc.add_object(dictionary! {
                "Fields" => fields,
                "NeedAppearances" => true,
            });
            dict_mut(doc, root_id)?.set("AcroForm", id);
        }
    }
    Ok(())
}

fn real(v: f64) -> Object {
    Object::Real(v as f32)
}

/// Append a FreeText annotation to the page's `/Annots`.
pub(crate) fn add_free_text(
    doc: &mut lopdf::Document,
    page_id: ObjectId,
    annotation: &TextAnnotation,
) -> Result<(), BackendError> {
    let rect = annotation.rect;
    let [r, g, b] = annotation.rgb();
    let default_appearance = format!(
        "/Helv {} Tf {r:.3} {g:.3} {b:.3} rg",
        annotation.font_size
    );
    let default_style = format!(
        "font: {}pt {}; color: #{}",
        annotation.font_size, annotation.font, annotation.font_color
    );

    let annot_id = doc.add_object(dictionary! {
        "Type" => "Annot",
        "Subtype" => "FreeText",
        "Rect" => vec![
            real(rect.left()),
            real(rect.bottom()),
            real(rect.right()),
            real(rect.top()),
        ],
        "Contents" => encode_pdf_string(&annotation.text),
        "DA" => Object::string_literal(default_appearance),
        "DS" => Object::string_literal(default_style),
        "F" => 4i64,
        "Border" => vec![Object::Integer(0), Object::Integer(0), Object::Integer(0)],
        "P" => page_id,
    });

    let annots = doc
        .get_object(page_id)
        .and_then(|o| o.as_dict())
        .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))?
        .get(b"Annots")
        .ok()
        .cloned();

    match annots {
        Some(Object::Reference(array_id)) => {
            doc.get_object_mut(array_id)
                .and_then(|o| o.as_array_mut())
                .map_err(|e| BackendError::Parse(format!("/Annots is not an array: {e}")))?
                .push(annot_id.into());
        }
        Some(Object::Array(mut list)) => {
            list.push(annot_id.into());
            dict_mut(doc, page_id)?.set("Annots", list);
        }
        _ => {
            dict_mut(doc, page_id)?.set("Annots", vec![Object::from(annot_id)]);
        }
    }
    Ok(())
}
