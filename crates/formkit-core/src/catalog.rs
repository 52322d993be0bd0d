//! Field catalog assembly.
//!
//! Merges located leaves and radio groups into one list in visual reading
//! order: page, then top-to-bottom, then left-to-right.

use std::cmp::Ordering;

use crate::error::{ExtractResult, ExtractWarning, ExtractWarningCode};
use crate::form_field::FieldRecord;
use crate::locator::LocatedFields;

/// The ordered set of fields a document exposes.
///
/// Field ids are unique within a catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldCatalog {
    fields: Vec<FieldRecord>,
}

impl FieldCatalog {
    /// Wrap records that are already in catalog order.
    pub fn from_records(fields: Vec<FieldRecord>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldRecord] {
        &self.fields
    }

    pub fn get(&self, field_id: &str) -> Option<&FieldRecord> {
        self.fields.iter().find(|f| f.id() == field_id)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldRecord> {
        self.fields.iter()
    }
}

impl<'a> IntoIterator for &'a FieldCatalog {
    type Item = &'a FieldRecord;
    type IntoIter = std::slice::Iter<'a, FieldRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Build the catalog from located fields.
///
/// Leaves that never matched an annotation are dropped, each with a
/// [`ExtractWarningCode::LocationIndeterminate`] warning.
pub fn assemble_catalog(located: LocatedFields) -> ExtractResult<FieldCatalog> {
    let LocatedFields {
        tree,
        locations,
        radio_groups,
    } = located;

    let mut warnings = Vec::new();
    let mut records = Vec::with_capacity(locations.len() + radio_groups.len());

    for (leaf, location) in tree.into_leaves().into_iter().zip(locations) {
        match location {
            Some(loc) => records.push(leaf.locate(loc.page, loc.rect)),
            None => warnings.push(ExtractWarning::for_field(
                ExtractWarningCode::LocationIndeterminate,
                leaf.id.clone(),
                format!(
                    "Unable to determine location for field id: {}, ignoring",
                    leaf.id
                ),
            )),
        }
    }
    records.extend(radio_groups.into_iter().map(FieldRecord::RadioGroup));

    records.sort_by(reading_order);

    ExtractResult::with_warnings(FieldCatalog::from_records(records), warnings)
}

/// Compare by `(page, -top, left)` of each record's primary rect.
fn reading_order(a: &FieldRecord, b: &FieldRecord) -> Ordering {
    let key = |r: &FieldRecord| {
        let (top, left) = r
            .primary_rect()
            .map(|rect| (rect.top(), rect.left()))
            .unwrap_or((0.0, 0.0));
        (r.page(), -top, left)
    };
    let (pa, ta, la) = key(a);
    let (pb, tb, lb) = key(b);
    pa.cmp(&pb)
        .then_with(|| ta.total_cmp(&tb))
        .then_with(|| la.total_cmp(&lb))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_tree::{RawField, build_field_tree};
    use crate::geometry::PageRect;
    use crate::locator::{PageWidgets, WidgetAnnotation, locate_fields};

    fn text(id: &str) -> RawField {
        RawField {
            id: id.to_string(),
            field_type: Some("Tx".to_string()),
            ..RawField::default()
        }
    }

    fn widget(id: &str, rect: [f64; 4]) -> WidgetAnnotation {
        WidgetAnnotation {
            field_id: Some(id.to_string()),
            rect: Some(PageRect::from(rect)),
            appearance_states: None,
        }
    }

    fn ids(catalog: &FieldCatalog) -> Vec<&str> {
        catalog.iter().map(|f| f.id()).collect()
    }

    #[test]
    fn sorts_by_page_then_top_then_left() {
        let tree = build_field_tree(vec![
            text("bottom_left"),
            text("top_right"),
            text("top_left"),
            text("page_two"),
        ])
        .value;
        let pages = vec![
            PageWidgets {
                page: 1,
                widgets: vec![
                    widget("bottom_left", [10.0, 100.0, 50.0, 120.0]),
                    widget("top_right", [300.0, 700.0, 400.0, 720.0]),
                    widget("top_left", [10.0, 700.0, 100.0, 720.0]),
                ],
            },
            PageWidgets {
                page: 2,
                widgets: vec![widget("page_two", [10.0, 750.0, 100.0, 770.0])],
            },
        ];
        let result = assemble_catalog(locate_fields(tree, &pages));
        assert!(result.is_clean());
        assert_eq!(
            ids(&result.value),
            vec!["top_left", "top_right", "bottom_left", "page_two"]
        );
    }

    #[test]
    fn unlocated_leaf_is_dropped_with_warning() {
        let tree = build_field_tree(vec![text("located"), text("orphan")]).value;
        let pages = vec![PageWidgets {
            page: 1,
            widgets: vec![widget("located", [0.0, 0.0, 10.0, 10.0])],
        }];
        let result = assemble_catalog(locate_fields(tree, &pages));
        assert_eq!(ids(&result.value), vec!["located"]);
        assert_eq!(result.warnings.len(), 1);
        let warning = &result.warnings[0];
        assert_eq!(warning.code, ExtractWarningCode::LocationIndeterminate);
        assert_eq!(warning.field_id.as_deref(), Some("orphan"));
        assert!(warning.description.contains("orphan"));
    }

    #[test]
    fn radio_group_sorts_by_first_option() {
        let tree = build_field_tree(vec![
            text("name"),
            RawField {
                id: "choice".to_string(),
                field_type: Some("Btn".to_string()),
                has_kids: true,
                ..RawField::default()
            },
        ])
        .value;
        let radio = |rect: [f64; 4], value: &str| WidgetAnnotation {
            field_id: Some("choice".to_string()),
            rect: Some(PageRect::from(rect)),
            appearance_states: Some(vec![value.to_string(), "Off".to_string()]),
        };
        let pages = vec![PageWidgets {
            page: 1,
            widgets: vec![
                widget("name", [10.0, 600.0, 100.0, 620.0]),
                radio([10.0, 700.0, 20.0, 710.0], "A"),
                radio([10.0, 100.0, 20.0, 110.0], "B"),
            ],
        }];
        let catalog = assemble_catalog(locate_fields(tree, &pages)).value;
        assert_eq!(ids(&catalog), vec!["choice", "name"]);
        assert_eq!(catalog.get("choice").map(|f| f.type_label()).as_deref(), Some("radio_group"));
    }

    #[test]
    fn assembly_is_deterministic() {
        let build = || {
            let tree = build_field_tree(vec![text("a"), text("b"), text("c")]).value;
            let pages = vec![PageWidgets {
                page: 1,
                widgets: vec![
                    widget("c", [10.0, 10.0, 20.0, 20.0]),
                    widget("a", [10.0, 10.0, 20.0, 20.0]),
                    widget("b", [5.0, 10.0, 20.0, 20.0]),
                ],
            }];
            assemble_catalog(locate_fields(tree, &pages)).value
        };
        let first = build();
        assert_eq!(first, build());
        assert_eq!(ids(&first), vec!["b", "a", "c"]);
    }
}
