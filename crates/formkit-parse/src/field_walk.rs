//! AcroForm field hierarchy and page annotation reading.
//!
//! Field nodes are named top-down: a node's qualified id is its ancestors'
//! `/T` names joined with `.`. Annotations are named bottom-up by following
//! `/Parent` links, which yields the same id for a field and its widgets.

use std::collections::HashSet;

use formkit_core::{
    ExtractResult, ExtractWarning, ExtractWarningCode, FieldType, FormOptions, PageWidgets,
    RawChoiceOption, RawField, WidgetAnnotation,
};
use lopdf::{Dictionary, Object, ObjectId};

use crate::error::BackendError;
use crate::lopdf_backend::{acroform_fields, rect_from_array, resolve_object, resolved_entry};
use crate::pdf_string::object_text;

/// The node's own non-empty `/T` name.
fn partial_name(doc: &lopdf::Document, dict: &Dictionary) -> Option<String> {
    resolved_entry(doc, dict, b"T")
        .and_then(object_text)
        .filter(|name| !name.is_empty())
}

/// Rebuild a qualified id by walking `/Parent` links upward.
///
/// Returns `None` when no node on the chain has a name, or when the chain is
/// longer than `max_depth`.
pub(crate) fn qualified_name(
    doc: &lopdf::Document,
    dict: &Dictionary,
    max_depth: usize,
) -> Option<String> {
    let mut parts = Vec::new();
    let mut current = Some(dict);
    let mut depth = 0;

    while let Some(node) = current {
        if depth > max_depth {
            tracing::debug!(max_depth, "parent chain too deep, annotation left unnamed");
            return None;
        }
        if let Some(name) = partial_name(doc, node) {
            parts.push(name);
        }
        current = match node.get(b"Parent") {
            Ok(Object::Reference(id)) => doc.get_object(*id).and_then(|o| o.as_dict()).ok(),
            _ => None,
        };
        depth += 1;
    }

    if parts.is_empty() {
        return None;
    }
    parts.reverse();
    Some(parts.join("."))
}

/// Keys of the normal appearance dictionary (`/AP /N`), in file order.
///
/// Returns `None` when there is no appearance dictionary or `/N` is a
/// single stream rather than a dictionary of states.
pub(crate) fn appearance_states(doc: &lopdf::Document, dict: &Dictionary) -> Option<Vec<String>> {
    let ap = resolved_entry(doc, dict, b"AP")?.as_dict().ok()?;
    let normal = resolved_entry(doc, ap, b"N")?.as_dict().ok()?;
    Some(
        normal
            .iter()
            .map(|(key, _)| String::from_utf8_lossy(key).into_owned())
            .collect(),
    )
}

/// Read a choice field's `/Opt` array.
fn choice_options(doc: &lopdf::Document, dict: &Dictionary) -> Vec<RawChoiceOption> {
    let Some(opt) = resolved_entry(doc, dict, b"Opt").and_then(|o| o.as_array().ok()) else {
        return Vec::new();
    };

    opt.iter()
        .filter_map(|item| match resolve_object(doc, item) {
            Object::Array(pair) => {
                let export = pair.first().map(|o| resolve_object(doc, o)).and_then(object_text)?;
                match pair.get(1).map(|o| resolve_object(doc, o)).and_then(object_text) {
                    Some(display) => Some(RawChoiceOption::Pair { export, display }),
                    None => Some(RawChoiceOption::Value(export)),
                }
            }
            other => object_text(other).map(RawChoiceOption::Value),
        })
        .collect()
}

struct FieldWalk<'a> {
    doc: &'a lopdf::Document,
    max_depth: usize,
    visited: HashSet<ObjectId>,
    fields: Vec<RawField>,
    warnings: Vec<ExtractWarning>,
}

impl FieldWalk<'_> {
    fn malformed(&mut self, description: String) {
        tracing::debug!(%description, "skipping malformed field node");
        self.warnings.push(ExtractWarning::new(
            ExtractWarningCode::MalformedObject,
            description,
        ));
    }

    /// Visit one field node and, recursively, its named kids.
    ///
    /// Kids without a `/T` are widget annotations of this node and are not
    /// visited. A button node with any kids is reported as a container so
    /// that its widgets can form a radio group.
    fn walk(
        &mut self,
        field_id: ObjectId,
        parent_name: Option<&str>,
        inherited_ft: Option<&str>,
        depth: usize,
    ) {
        if depth >= self.max_depth {
            self.malformed(format!(
                "field tree deeper than {} levels at object {} {}; subtree skipped",
                self.max_depth, field_id.0, field_id.1
            ));
            return;
        }
        if !self.visited.insert(field_id) {
            self.malformed(format!(
                "field object {} {} is reachable more than once; skipped",
                field_id.0, field_id.1
            ));
            return;
        }

        let doc = self.doc;
        let Ok(dict) = doc.get_object(field_id).and_then(|o| o.as_dict()) else {
            self.malformed(format!(
                "field object {} {} is not a dictionary",
                field_id.0, field_id.1
            ));
            return;
        };

        let full_name = match (parent_name, partial_name(doc, dict)) {
            (Some(parent), Some(name)) => format!("{parent}.{name}"),
            (Some(parent), None) => parent.to_string(),
            (None, Some(name)) => name,
            (None, None) => String::new(),
        };

        let field_type = match dict.get(b"FT") {
            Ok(Object::Name(name)) => Some(String::from_utf8_lossy(name).into_owned()),
            _ => inherited_ft.map(str::to_string),
        };

        let kids: Vec<&Object> = resolved_entry(doc, dict, b"Kids")
            .and_then(|o| o.as_array().ok())
            .map(|arr| arr.iter().collect())
            .unwrap_or_default();
        let child_fields: Vec<ObjectId> = kids
            .iter()
            .filter_map(|kid| match kid {
                Object::Reference(id) => Some(*id),
                _ => None,
            })
            .filter(|id| {
                doc.get_object(*id)
                    .and_then(|o| o.as_dict())
                    .is_ok_and(|d| partial_name(doc, d).is_some())
            })
            .collect();

        let is_button = field_type.as_deref().and_then(FieldType::from_pdf_name)
            == Some(FieldType::Button);
        let has_kids = !child_fields.is_empty() || (is_button && !kids.is_empty());

        if full_name.is_empty() {
            tracing::debug!(object = ?field_id, "unnamed root field skipped");
        } else {
            self.fields.push(RawField {
                id: full_name.clone(),
                field_type: field_type.clone(),
                has_kids,
                appearance_states: appearance_states(doc, dict).unwrap_or_default(),
                choice_options: choice_options(doc, dict),
            });
        }

        for kid_id in child_fields {
            self.walk(
                kid_id,
                Some(&full_name).filter(|n| !n.is_empty()).map(String::as_str),
                field_type.as_deref(),
                depth + 1,
            );
        }
    }
}

/// Flatten the AcroForm `/Fields` forest into named nodes, parents first.
pub(crate) fn collect_raw_fields(
    doc: &lopdf::Document,
    options: &FormOptions,
) -> ExtractResult<Vec<RawField>> {
    let Some(roots) = acroform_fields(doc) else {
        return ExtractResult::ok(Vec::new());
    };

    let mut walk = FieldWalk {
        doc,
        max_depth: options.max_tree_depth,
        visited: HashSet::new(),
        fields: Vec::new(),
        warnings: Vec::new(),
    };
    for root in roots {
        match root {
            Object::Reference(id) => walk.walk(*id, None, None, 0),
            _ => walk.malformed("/Fields entry is not an indirect reference".to_string()),
        }
    }

    ExtractResult::with_warnings(walk.fields, walk.warnings)
}

/// Read every page's `/Annots` array into widget descriptions.
///
/// Annotations whose `/Subtype` is present and is not `Widget` are left out.
pub(crate) fn collect_page_widgets(
    doc: &lopdf::Document,
    page_ids: &[ObjectId],
    options: &FormOptions,
) -> Result<ExtractResult<Vec<PageWidgets>>, BackendError> {
    let mut pages = Vec::with_capacity(page_ids.len());
    let mut warnings = Vec::new();

    for (index, page_id) in page_ids.iter().enumerate() {
        let page = index + 1;
        let page_dict = doc
            .get_object(*page_id)
            .and_then(|o| o.as_dict())
            .map_err(|e| BackendError::Parse(format!("failed to get page dictionary: {e}")))?;

        let annots = resolved_entry(doc, page_dict, b"Annots")
            .and_then(|o| o.as_array().ok())
            .map(Vec::as_slice)
            .unwrap_or_default();

        let mut widgets = Vec::new();
        for entry in annots {
            let Ok(annot) = resolve_object(doc, entry).as_dict() else {
                warnings.push(
                    ExtractWarning::new(
                        ExtractWarningCode::MalformedObject,
                        "annotation is not a dictionary",
                    )
                    .on_page(page),
                );
                continue;
            };
            if let Ok(Object::Name(subtype)) = annot.get(b"Subtype") {
                if subtype.as_slice() != b"Widget" {
                    continue;
                }
            }

            widgets.push(WidgetAnnotation {
                field_id: qualified_name(doc, annot, options.max_tree_depth),
                rect: resolved_entry(doc, annot, b"Rect")
                    .and_then(|o| o.as_array().ok())
                    .and_then(|arr| rect_from_array(arr).ok()),
                appearance_states: appearance_states(doc, annot),
            });
        }

        pages.push(PageWidgets { page, widgets });
    }

    Ok(ExtractResult::with_warnings(pages, warnings))
}
