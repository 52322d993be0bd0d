//! Classification of the AcroForm field hierarchy.
//!
//! A backend flattens the `/Fields` forest into [`RawField`]s (one per named
//! node, carrying its qualified id). [`build_field_tree`] turns those into
//! typed leaves that still lack a location, plus the names of button
//! containers that may turn out to be radio groups.

use std::collections::{HashMap, HashSet};

use crate::error::{ExtractResult, ExtractWarning, ExtractWarningCode};
use crate::form_field::{
    CheckboxField, ChoiceField, ChoiceOption, FieldRecord, FieldType, OFF_STATE, RawChoiceOption,
    TextField, UnknownField,
};
use crate::geometry::PageRect;

/// A named node of the field hierarchy, as read from the document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawField {
    /// Qualified dotted id (ancestor `/T` names, outermost first).
    pub id: String,
    /// Raw `/FT` name, inherited from ancestors when absent.
    pub field_type: Option<String>,
    /// Whether the node has a non-empty `/Kids` array.
    pub has_kids: bool,
    /// Keys of the node's normal appearance dictionary (`/AP /N`).
    pub appearance_states: Vec<String>,
    /// Entries of the node's `/Opt` array.
    pub choice_options: Vec<RawChoiceOption>,
}

/// Kind-specific data of a leaf field whose location is not yet known.
#[derive(Debug, Clone, PartialEq)]
pub enum LeafKind {
    Text,
    Checkbox {
        checked_value: String,
        unchecked_value: String,
    },
    Choice {
        options: Vec<ChoiceOption>,
    },
    Unknown {
        raw_type: Option<String>,
    },
}

/// A typed leaf field awaiting its page and rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct UnlocatedField {
    pub id: String,
    pub kind: LeafKind,
}

impl UnlocatedField {
    /// Attach a location, producing a catalog record.
    pub fn locate(self, page: usize, rect: PageRect) -> FieldRecord {
        let id = self.id;
        match self.kind {
            LeafKind::Text => FieldRecord::Text(TextField { id, page, rect }),
            LeafKind::Checkbox {
                checked_value,
                unchecked_value,
            } => FieldRecord::Checkbox(CheckboxField {
                id,
                page,
                rect,
                checked_value,
                unchecked_value,
            }),
            LeafKind::Choice { options } => FieldRecord::Choice(ChoiceField {
                id,
                page,
                rect,
                options,
            }),
            LeafKind::Unknown { raw_type } => FieldRecord::Unknown(UnknownField {
                id,
                page,
                rect,
                raw_type,
            }),
        }
    }
}

/// Output of the field tree walk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldTree {
    leaves: Vec<UnlocatedField>,
    index: HashMap<String, usize>,
    radio_candidates: HashSet<String>,
}

impl FieldTree {
    /// Leaves in document order.
    pub fn leaves(&self) -> &[UnlocatedField] {
        &self.leaves
    }

    /// Position of a leaf in [`leaves`](FieldTree::leaves), by qualified id.
    pub fn leaf_index(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn is_radio_candidate(&self, id: &str) -> bool {
        self.radio_candidates.contains(id)
    }

    pub(crate) fn into_leaves(self) -> Vec<UnlocatedField> {
        self.leaves
    }
}

/// Classify raw field nodes into unlocated leaves and radio candidates.
///
/// Nodes with kids are containers: button containers become radio-group
/// candidates, all others are skipped. Nodes without kids are classified by
/// `/FT`. When the same qualified id appears twice, the first node wins.
pub fn build_field_tree(fields: Vec<RawField>) -> ExtractResult<FieldTree> {
    let mut tree = FieldTree::default();
    let mut warnings = Vec::new();

    for raw in fields {
        let field_type = raw.field_type.as_deref().and_then(FieldType::from_pdf_name);

        if raw.has_kids {
            if field_type == Some(FieldType::Button) {
                tree.radio_candidates.insert(raw.id);
            }
            continue;
        }

        if tree.index.contains_key(&raw.id) || tree.radio_candidates.contains(&raw.id) {
            continue;
        }

        let kind = match field_type {
            Some(FieldType::Text) => LeafKind::Text,
            Some(FieldType::Button) => {
                let (checked_value, unchecked_value, warning) =
                    checkbox_values(&raw.id, &raw.appearance_states);
                warnings.extend(warning);
                LeafKind::Checkbox {
                    checked_value,
                    unchecked_value,
                }
            }
            Some(FieldType::Choice) => LeafKind::Choice {
                options: ChoiceOption::normalize(&raw.choice_options),
            },
            Some(FieldType::Signature) | None => LeafKind::Unknown {
                raw_type: raw.field_type.clone(),
            },
        };

        tree.index.insert(raw.id.clone(), tree.leaves.len());
        tree.leaves.push(UnlocatedField { id: raw.id, kind });
    }

    ExtractResult::with_warnings(tree, warnings)
}

/// Decide a toggle's checked and unchecked values from its appearance states.
fn checkbox_values(id: &str, states: &[String]) -> (String, String, Option<ExtractWarning>) {
    if let [first, second] = states {
        if first == OFF_STATE {
            return (second.clone(), first.clone(), None);
        }
        if second == OFF_STATE {
            return (first.clone(), second.clone(), None);
        }
        let warning = ExtractWarning::for_field(
            ExtractWarningCode::AmbiguousCheckboxStates,
            id,
            format!(
                "Unexpected state values for checkbox `{id}`. Its checked and unchecked values \
                 may not be correct; if you're trying to check it, visually verify the results."
            ),
        );
        return (first.clone(), second.clone(), Some(warning));
    }

    let checked = states
        .iter()
        .find(|s| s.as_str() != OFF_STATE)
        .cloned()
        .unwrap_or_else(|| "Yes".to_string());
    let warning = ExtractWarning::for_field(
        ExtractWarningCode::AmbiguousCheckboxStates,
        id,
        format!(
            "Checkbox `{id}` has {} appearance states; assuming checked value `{checked}` \
             and unchecked value `{OFF_STATE}`",
            states.len()
        ),
    );
    (checked, OFF_STATE.to_string(), Some(warning))
}
