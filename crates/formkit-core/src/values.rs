//! Pre-validation of field value batches.
//!
//! [`plan_population`] checks every entry of a batch against a freshly
//! extracted [`FieldCatalog`] and, only when the whole batch is valid,
//! returns a [`PopulationPlan`] grouping the writes by page. Nothing is
//! written here; a backend applies the plan.

use std::collections::BTreeMap;
use std::fmt;

use crate::catalog::FieldCatalog;
use crate::form_field::FieldRecord;

/// One requested assignment, as read from a value batch.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldValueEntry {
    pub field_id: String,
    /// 1-based page the caller believes the field is on.
    pub page: usize,
    /// Entries without a value are checked for id and page only.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub value: Option<String>,
}

/// The set of values a constrained field accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueConstraint {
    Checkbox { checked: String, unchecked: String },
    RadioGroup { values: Vec<String> },
    Choice { values: Vec<String> },
}

/// A reason a value batch was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum PopulateIssue {
    /// The id does not name a field in the catalog.
    InvalidFieldReference { field_id: String },
    /// The submitted page differs from the field's catalog page.
    PageMismatch {
        field_id: String,
        got: usize,
        expected: usize,
    },
    /// The value is not one the field accepts.
    InvalidFieldValue {
        field_id: String,
        value: String,
        constraint: ValueConstraint,
    },
}

fn quoted_list(values: &[String]) -> String {
    let items: Vec<String> = values.iter().map(|v| format!("\"{v}\"")).collect();
    format!("[{}]", items.join(", "))
}

impl fmt::Display for PopulateIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PopulateIssue::InvalidFieldReference { field_id } => {
                write!(f, "ERROR: `{field_id}` is not a valid field ID")
            }
            PopulateIssue::PageMismatch {
                field_id,
                got,
                expected,
            } => write!(
                f,
                "ERROR: Incorrect page number for `{field_id}` (got {got}, expected {expected})"
            ),
            PopulateIssue::InvalidFieldValue {
                field_id,
                value,
                constraint,
            } => match constraint {
                ValueConstraint::Checkbox { checked, unchecked } => write!(
                    f,
                    "ERROR: Invalid value \"{value}\" for checkbox field \"{field_id}\". \
                     The checked value is \"{checked}\" and the unchecked value is \"{unchecked}\""
                ),
                ValueConstraint::RadioGroup { values } => write!(
                    f,
                    "ERROR: Invalid value \"{value}\" for radio group field \"{field_id}\". \
                     Valid values are: {}",
                    quoted_list(values)
                ),
                ValueConstraint::Choice { values } => write!(
                    f,
                    "ERROR: Invalid value \"{value}\" for choice field \"{field_id}\". \
                     Valid values are: {}",
                    quoted_list(values)
                ),
            },
        }
    }
}

/// How a value must be written into the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentKind {
    /// Free text, written as a text string.
    Text,
    /// A single toggle; the value is an appearance state name.
    Checkbox,
    /// A radio group; the value selects one of the kids' appearance states.
    RadioGroup,
    /// A choice field; the value is an export value.
    Choice,
    /// A field of unsupported type; written as text.
    Unknown,
}

/// A validated write.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldAssignment {
    pub field_id: String,
    pub value: String,
    pub kind: AssignmentKind,
}

/// Validated writes grouped by 1-based page number.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopulationPlan {
    pub pages: BTreeMap<usize, Vec<FieldAssignment>>,
}

impl PopulationPlan {
    /// Total number of assignments across all pages.
    pub fn len(&self) -> usize {
        self.pages.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.values().all(Vec::is_empty)
    }
}

/// Validate a value batch against the catalog.
///
/// Every entry is checked, so the error lists one issue per offending entry
/// in batch order. When an entry's id or page is wrong its value is not
/// checked.
pub fn plan_population(
    catalog: &FieldCatalog,
    entries: &[FieldValueEntry],
) -> Result<PopulationPlan, Vec<PopulateIssue>> {
    let mut issues = Vec::new();
    let mut plan = PopulationPlan::default();

    for entry in entries {
        let Some(record) = catalog.get(&entry.field_id) else {
            issues.push(PopulateIssue::InvalidFieldReference {
                field_id: entry.field_id.clone(),
            });
            continue;
        };
        if entry.page != record.page() {
            issues.push(PopulateIssue::PageMismatch {
                field_id: entry.field_id.clone(),
                got: entry.page,
                expected: record.page(),
            });
            continue;
        }
        let Some(value) = entry.value.as_ref() else {
            continue;
        };
        if let Some(issue) = check_value(record, value) {
            issues.push(issue);
            continue;
        }
        let assignment = FieldAssignment {
            field_id: entry.field_id.clone(),
            value: value.clone(),
            kind: assignment_kind(record),
        };
        // A later entry for the same field replaces the earlier value.
        let page = plan.pages.entry(entry.page).or_default();
        match page.iter_mut().find(|a| a.field_id == assignment.field_id) {
            Some(existing) => *existing = assignment,
            None => page.push(assignment),
        }
    }

    if issues.is_empty() {
        Ok(plan)
    } else {
        Err(issues)
    }
}

fn assignment_kind(record: &FieldRecord) -> AssignmentKind {
    match record {
        FieldRecord::Text(_) => AssignmentKind::Text,
        FieldRecord::Checkbox(_) => AssignmentKind::Checkbox,
        FieldRecord::RadioGroup(_) => AssignmentKind::RadioGroup,
        FieldRecord::Choice(_) => AssignmentKind::Choice,
        FieldRecord::Unknown(_) => AssignmentKind::Unknown,
    }
}

fn check_value(record: &FieldRecord, value: &str) -> Option<PopulateIssue> {
    let constraint = match record {
        FieldRecord::Checkbox(f) => {
            if value == f.checked_value || value == f.unchecked_value {
                return None;
            }
            ValueConstraint::Checkbox {
                checked: f.checked_value.clone(),
                unchecked: f.unchecked_value.clone(),
            }
        }
        FieldRecord::RadioGroup(f) => {
            if f.options.iter().any(|o| o.value == value) {
                return None;
            }
            ValueConstraint::RadioGroup {
                values: f.options.iter().map(|o| o.value.clone()).collect(),
            }
        }
        FieldRecord::Choice(f) => {
            if f.options.iter().any(|o| o.value == value) {
                return None;
            }
            ValueConstraint::Choice {
                values: f.options.iter().map(|o| o.value.clone()).collect(),
            }
        }
        FieldRecord::Text(_) | FieldRecord::Unknown(_) => return None,
    };
    Some(PopulateIssue::InvalidFieldValue {
        field_id: record.id().to_string(),
        value: value.to_string(),
        constraint,
    })
}
