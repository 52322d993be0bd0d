//! Binding of widget annotations to field tree entries.
//!
//! Leaf fields get their page and rectangle from the first widget whose
//! qualified id matches. Radio-group candidates collect one option per
//! widget that has exactly one non-`Off` appearance state.

use crate::field_tree::FieldTree;
use crate::form_field::{OFF_STATE, RadioGroupField, RadioOption};
use crate::geometry::PageRect;

/// A page annotation as seen by the locator.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WidgetAnnotation {
    /// Qualified id rebuilt from the annotation's `/Parent` chain, if any
    /// node on the chain has a `/T` entry.
    pub field_id: Option<String>,
    /// The annotation's `/Rect`, if present and well formed.
    pub rect: Option<PageRect>,
    /// Keys of the annotation's `/AP /N` dictionary; `None` when the
    /// annotation has no normal appearance dictionary.
    pub appearance_states: Option<Vec<String>>,
}

/// All annotations of one page, in `/Annots` order.
#[derive(Debug, Clone, PartialEq)]
pub struct PageWidgets {
    /// 1-based page number.
    pub page: usize,
    pub widgets: Vec<WidgetAnnotation>,
}

/// Resolved location of a leaf field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafLocation {
    pub page: usize,
    pub rect: PageRect,
}

/// Result of binding annotations to the field tree.
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedFields {
    /// The tree that was located.
    pub tree: FieldTree,
    /// Location per leaf, parallel to [`FieldTree::leaves`].
    pub locations: Vec<Option<LeafLocation>>,
    /// Radio groups in order of their first widget.
    pub radio_groups: Vec<RadioGroupField>,
}

/// Walk every page's annotations and bind them to the field tree.
///
/// Pages must be supplied in ascending page order for radio options to keep
/// document encounter order.
pub fn locate_fields(tree: FieldTree, pages: &[PageWidgets]) -> LocatedFields {
    let mut locations: Vec<Option<LeafLocation>> = vec![None; tree.leaves().len()];
    let mut radio_groups: Vec<RadioGroupField> = Vec::new();

    for page in pages {
        for widget in &page.widgets {
            let Some(field_id) = widget.field_id.as_ref() else {
                continue;
            };

            if let Some(idx) = tree.leaf_index(field_id) {
                if locations[idx].is_some() {
                    continue;
                }
                if let Some(rect) = widget.rect {
                    locations[idx] = Some(LeafLocation {
                        page: page.page,
                        rect,
                    });
                }
            } else if tree.is_radio_candidate(field_id) {
                let Some(option) = radio_option(widget) else {
                    tracing::debug!(field = %field_id, page = page.page, "ambiguous radio widget excluded");
                    continue;
                };
                match radio_groups.iter_mut().find(|g| &g.id == field_id) {
                    Some(group) => group.options.push(option),
                    None => radio_groups.push(RadioGroupField {
                        id: field_id.clone(),
                        page: page.page,
                        options: vec![option],
                    }),
                }
            }
        }
    }

    LocatedFields {
        tree,
        locations,
        radio_groups,
    }
}

/// The option a radio widget contributes, or `None` if it is ambiguous.
fn radio_option(widget: &WidgetAnnotation) -> Option<RadioOption> {
    let states = widget.appearance_states.as_ref()?;
    let mut active = states.iter().filter(|s| s.as_str() != OFF_STATE);
    let value = active.next()?;
    if active.next().is_some() {
        return None;
    }
    Some(RadioOption {
        value: value.clone(),
        rect: widget.rect?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field_tree::{RawField, build_field_tree};

    fn tree() -> FieldTree {
        build_field_tree(vec![
            RawField {
                id: "name".to_string(),
                field_type: Some("Tx".to_string()),
                ..RawField::default()
            },
            RawField {
                id: "color".to_string(),
                field_type: Some("Btn".to_string()),
                has_kids: true,
                ..RawField::default()
            },
        ])
        .value
    }

    fn widget(id: &str, rect: [f64; 4], states: Option<&[&str]>) -> WidgetAnnotation {
        WidgetAnnotation {
            field_id: Some(id.to_string()),
            rect: Some(PageRect::from(rect)),
            appearance_states: states.map(|s| s.iter().map(|v| v.to_string()).collect()),
        }
    }

    #[test]
    fn leaf_is_located_by_first_match() {
        let pages = vec![
            PageWidgets {
                page: 1,
                widgets: vec![widget("name", [10.0, 10.0, 100.0, 30.0], None)],
            },
            PageWidgets {
                page: 2,
                widgets: vec![widget("name", [0.0, 0.0, 1.0, 1.0], None)],
            },
        ];
        let located = locate_fields(tree(), &pages);
        let loc = located.locations[0].unwrap();
        assert_eq!(loc.page, 1);
        assert_eq!(loc.rect, PageRect::new(10.0, 10.0, 100.0, 30.0));
    }

    #[test]
    fn radio_widgets_accumulate_in_encounter_order() {
        let pages = vec![
            PageWidgets {
                page: 1,
                widgets: vec![
                    widget("color", [10.0, 700.0, 20.0, 710.0], Some(&["Red", "Off"])),
                    widget("color", [30.0, 700.0, 40.0, 710.0], Some(&["Off", "Green"])),
                ],
            },
            PageWidgets {
                page: 2,
                widgets: vec![widget("color", [10.0, 500.0, 20.0, 510.0], Some(&["Blue"]))],
            },
        ];
        let located = locate_fields(tree(), &pages);
        assert_eq!(located.radio_groups.len(), 1);
        let group = &located.radio_groups[0];
        assert_eq!(group.page, 1);
        let values: Vec<&str> = group.options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["Red", "Green", "Blue"]);
    }

    #[test]
    fn ambiguous_radio_widgets_are_skipped() {
        let pages = vec![PageWidgets {
            page: 1,
            widgets: vec![
                widget("color", [0.0, 0.0, 1.0, 1.0], Some(&["Off"])),
                widget("color", [0.0, 0.0, 1.0, 1.0], Some(&["A", "B", "Off"])),
                widget("color", [0.0, 0.0, 1.0, 1.0], None),
                widget("color", [5.0, 5.0, 6.0, 6.0], Some(&["C", "Off"])),
            ],
        }];
        let located = locate_fields(tree(), &pages);
        let group = &located.radio_groups[0];
        assert_eq!(group.options.len(), 1);
        assert_eq!(group.options[0].value, "C");
    }

    #[test]
    fn unmatched_and_anonymous_annotations_are_ignored() {
        let pages = vec![PageWidgets {
            page: 1,
            widgets: vec![
                WidgetAnnotation::default(),
                widget("other", [0.0, 0.0, 1.0, 1.0], None),
            ],
        }];
        let located = locate_fields(tree(), &pages);
        assert!(located.locations[0].is_none());
        assert!(located.radio_groups.is_empty());
    }

    #[test]
    fn widget_without_rect_does_not_locate_leaf() {
        let pages = vec![PageWidgets {
            page: 1,
            widgets: vec![
                WidgetAnnotation {
                    field_id: Some("name".to_string()),
                    rect: None,
                    appearance_states: None,
                },
                widget("name", [1.0, 2.0, 3.0, 4.0], None),
            ],
        }];
        let located = locate_fields(tree(), &pages);
        assert_eq!(
            located.locations[0].map(|l| l.rect),
            Some(PageRect::new(1.0, 2.0, 3.0, 4.0))
        );
    }
}
