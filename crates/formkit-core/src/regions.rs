//! Geometric validation of hand-authored field regions.
//!
//! A [`RegionBatch`] describes, per field, a label box and an entry box in
//! pixel space of a rendered page image. [`validate_regions`] reports boxes
//! that overlap and entry boxes too short for their declared font size.
//!
//! Overlap detection compares every pair of boxes on the same page, which is
//! quadratic in the number of boxes. Batches hold tens to low hundreds of
//! fields, so this is acceptable.

use std::fmt;

use crate::geometry::BBox;

/// Text that will be written into an entry box.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EntryText {
    pub text: Option<String>,
    pub font_size: Option<f64>,
    pub font: Option<String>,
    /// Hex RGB colour such as `"000000"`.
    pub font_color: Option<String>,
}

/// One field of a region batch.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldRegion {
    pub description: String,
    /// 1-based page number.
    pub page_number: usize,
    pub label_bounding_box: BBox,
    pub entry_bounding_box: BBox,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub entry_text: Option<EntryText>,
}

/// Pixel dimensions of the image a page's regions were authored against.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageImage {
    pub page_number: usize,
    pub image_width: f64,
    pub image_height: f64,
}

/// A batch of field region definitions.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegionBatch {
    pub form_fields: Vec<FieldRegion>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub pages: Vec<PageImage>,
}

impl RegionBatch {
    /// Image dimensions recorded for a page, if any.
    pub fn page_image(&self, page_number: usize) -> Option<&PageImage> {
        self.pages.iter().find(|p| p.page_number == page_number)
    }
}

/// Options for [`validate_regions`].
#[derive(Debug, Clone)]
pub struct RegionValidationOptions {
    /// Number of issues after which validation stops (default: 20).
    pub max_diagnostics: usize,
    /// Font size assumed when `entry_text` has none (default: 14).
    pub default_font_size: f64,
}

impl Default for RegionValidationOptions {
    fn default() -> Self {
        Self {
            max_diagnostics: 20,
            default_font_size: 14.0,
        }
    }
}

/// Which of a field's two boxes a region is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionRole {
    Label,
    Entry,
}

impl fmt::Display for RegionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionRole::Label => write!(f, "label"),
            RegionRole::Entry => write!(f, "entry"),
        }
    }
}

/// A box taking part in an overlap, with the field it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionRef {
    pub description: String,
    pub role: RegionRole,
    pub bbox: BBox,
}

/// A problem found in a region batch.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionIssue {
    /// A field's own label and entry boxes overlap.
    LabelEntryOverlap {
        description: String,
        label: BBox,
        entry: BBox,
    },
    /// Boxes belonging to two different fields overlap.
    CrossFieldOverlap { first: RegionRef, second: RegionRef },
    /// An entry box is shorter than the font size of its text.
    EntryTooSmall {
        description: String,
        height: f64,
        font_size: f64,
    },
}

impl fmt::Display for RegionIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionIssue::LabelEntryOverlap {
                description,
                label,
                entry,
            } => write!(
                f,
                "FAILURE: overlap between label and entry regions for `{description}` ({label}, {entry})"
            ),
            RegionIssue::CrossFieldOverlap { first, second } => write!(
                f,
                "FAILURE: overlap between {} region for `{}` ({}) and {} region for `{}` ({})",
                first.role, first.description, first.bbox, second.role, second.description, second.bbox
            ),
            RegionIssue::EntryTooSmall {
                description,
                height,
                font_size,
            } => write!(
                f,
                "FAILURE: entry region height ({height}) for `{description}` is insufficient for \
                 text content (font size: {font_size}). Increase region height or reduce font size."
            ),
        }
    }
}

/// Outcome of validating a region batch.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionReport {
    /// Number of fields in the batch.
    pub field_count: usize,
    /// Issues in discovery order.
    pub issues: Vec<RegionIssue>,
    /// Validation stopped early because the diagnostic cap was reached.
    pub truncated: bool,
}

impl RegionReport {
    /// Returns `true` when no issue was found.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Render the report as diagnostic lines.
    ///
    /// The first line summarizes the field count. A `SUCCESS:` line closes
    /// the report only when there are no issues.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.issues.len() + 2);
        lines.push(format!("Loaded {} fields", self.field_count));
        lines.extend(self.issues.iter().map(ToString::to_string));
        if self.truncated {
            lines.push("Stopping validation; correct region definitions and retry".to_string());
        } else if self.is_valid() {
            lines.push("SUCCESS: All region definitions are valid".to_string());
        }
        lines
    }
}

struct Region<'a> {
    bbox: BBox,
    role: RegionRole,
    field_index: usize,
    field: &'a FieldRegion,
}

impl Region<'_> {
    fn to_ref(&self) -> RegionRef {
        RegionRef {
            description: self.field.description.clone(),
            role: self.role,
            bbox: self.bbox,
        }
    }
}

/// Validate a batch of field regions.
///
/// Regions on different pages never collide. Boxes that only touch do not
/// overlap. The text-fit check applies only to fields with `entry_text`.
pub fn validate_regions(batch: &RegionBatch, options: &RegionValidationOptions) -> RegionReport {
    let regions: Vec<Region<'_>> = batch
        .form_fields
        .iter()
        .enumerate()
        .flat_map(|(field_index, field)| {
            [
                Region {
                    bbox: field.label_bounding_box,
                    role: RegionRole::Label,
                    field_index,
                    field,
                },
                Region {
                    bbox: field.entry_bounding_box,
                    role: RegionRole::Entry,
                    field_index,
                    field,
                },
            ]
        })
        .collect();

    let mut report = RegionReport {
        field_count: batch.form_fields.len(),
        issues: Vec::new(),
        truncated: false,
    };

    for (i, first) in regions.iter().enumerate() {
        for second in &regions[i + 1..] {
            if first.field.page_number != second.field.page_number
                || !first.bbox.overlaps(&second.bbox)
            {
                continue;
            }
            let issue = if first.field_index == second.field_index {
                RegionIssue::LabelEntryOverlap {
                    description: first.field.description.clone(),
                    label: first.field.label_bounding_box,
                    entry: first.field.entry_bounding_box,
                }
            } else {
                RegionIssue::CrossFieldOverlap {
                    first: first.to_ref(),
                    second: second.to_ref(),
                }
            };
            if push_capped(&mut report, issue, options.max_diagnostics) {
                return report;
            }
        }

        if first.role == RegionRole::Entry {
            if let Some(entry_text) = first.field.entry_text.as_ref() {
                let font_size = entry_text.font_size.unwrap_or(options.default_font_size);
                let height = first.bbox.height();
                if height < font_size {
                    let issue = RegionIssue::EntryTooSmall {
                        description: first.field.description.clone(),
                        height,
                        font_size,
                    };
                    if push_capped(&mut report, issue, options.max_diagnostics) {
                        return report;
                    }
                }
            }
        }
    }

    report
}

/// Record an issue; returns `true` once the cap is reached.
fn push_capped(report: &mut RegionReport, issue: RegionIssue, cap: usize) -> bool {
    report.issues.push(issue);
    if report.issues.len() >= cap {
        report.truncated = true;
    }
    report.truncated
}
