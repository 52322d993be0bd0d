//! PDF form field types for AcroForm extraction.
//!
//! Provides [`FieldType`] for the raw `/FT` tag and [`FieldRecord`], the
//! closed set of located field kinds that make up a field catalog.

use crate::geometry::PageRect;

/// Name of the appearance state that means "not selected".
pub const OFF_STATE: &str = "Off";

/// The type of a PDF form field.
///
/// Corresponds to the `/FT` entry in a field dictionary (PDF 1.7 Table 220).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldType {
    /// Text field (`/FT /Tx`).
    Text,
    /// Button field (`/FT /Btn`): checkbox, radio button or push button.
    Button,
    /// Choice field (`/FT /Ch`): dropdown or list box.
    Choice,
    /// Signature field (`/FT /Sig`).
    Signature,
}

impl FieldType {
    /// Parse a field type from its PDF name string.
    ///
    /// Returns `None` if the string is not a recognized field type.
    pub fn from_pdf_name(name: &str) -> Option<Self> {
        match name {
            "Tx" => Some(Self::Text),
            "Btn" => Some(Self::Button),
            "Ch" => Some(Self::Choice),
            "Sig" => Some(Self::Signature),
            _ => None,
        }
    }

    /// Return the PDF name string for this field type.
    pub fn as_pdf_name(&self) -> &'static str {
        match self {
            Self::Text => "Tx",
            Self::Button => "Btn",
            Self::Choice => "Ch",
            Self::Signature => "Sig",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "Text"),
            Self::Button => write!(f, "Button"),
            Self::Choice => write!(f, "Choice"),
            Self::Signature => write!(f, "Signature"),
        }
    }
}

/// One entry of a choice field's `/Opt` array, as stored in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawChoiceOption {
    /// A bare string: export value and display text are the same.
    Value(String),
    /// An `[export display]` pair.
    Pair { export: String, display: String },
}

/// A selectable option of a choice field.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChoiceOption {
    /// Export value written into `/V` when selected.
    pub value: String,
    /// Text shown to the user.
    pub text: String,
}

impl ChoiceOption {
    /// Normalize raw `/Opt` entries into `(value, text)` pairs.
    ///
    /// This is the single place where the two `/Opt` shapes are reconciled;
    /// everything downstream only sees [`ChoiceOption`].
    pub fn normalize(raw: &[RawChoiceOption]) -> Vec<ChoiceOption> {
        raw.iter()
            .map(|opt| match opt {
                RawChoiceOption::Value(v) => ChoiceOption {
                    value: v.clone(),
                    text: v.clone(),
                },
                RawChoiceOption::Pair { export, display } => ChoiceOption {
                    value: export.clone(),
                    text: display.clone(),
                },
            })
            .collect()
    }
}

/// One widget of a radio group: the value it selects and where it is drawn.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RadioOption {
    pub value: String,
    pub rect: PageRect,
}

/// A free-text field.
#[derive(Debug, Clone, PartialEq)]
pub struct TextField {
    pub id: String,
    pub page: usize,
    pub rect: PageRect,
}

/// A two-state toggle.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckboxField {
    pub id: String,
    pub page: usize,
    pub rect: PageRect,
    pub checked_value: String,
    pub unchecked_value: String,
}

/// A set of mutually exclusive widgets sharing one qualified id.
///
/// `options` keeps encounter order (page order, then `/Annots` order) and
/// always holds at least one entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RadioGroupField {
    pub id: String,
    pub page: usize,
    pub options: Vec<RadioOption>,
}

/// A dropdown or list box.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceField {
    pub id: String,
    pub page: usize,
    pub rect: PageRect,
    pub options: Vec<ChoiceOption>,
}

/// A field whose `/FT` is missing or not one of the supported kinds.
#[derive(Debug, Clone, PartialEq)]
pub struct UnknownField {
    pub id: String,
    pub page: usize,
    pub rect: PageRect,
    /// The raw `/FT` name, kept for diagnostics.
    pub raw_type: Option<String>,
}

/// A located form field, as listed in the field catalog.
///
/// `page` is 1-based and every rectangle is in page space.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldRecord {
    Text(TextField),
    Checkbox(CheckboxField),
    RadioGroup(RadioGroupField),
    Choice(ChoiceField),
    Unknown(UnknownField),
}

impl FieldRecord {
    /// Qualified dotted id of the field.
    pub fn id(&self) -> &str {
        match self {
            FieldRecord::Text(f) => &f.id,
            FieldRecord::Checkbox(f) => &f.id,
            FieldRecord::RadioGroup(f) => &f.id,
            FieldRecord::Choice(f) => &f.id,
            FieldRecord::Unknown(f) => &f.id,
        }
    }

    /// 1-based page number the field is drawn on.
    pub fn page(&self) -> usize {
        match self {
            FieldRecord::Text(f) => f.page,
            FieldRecord::Checkbox(f) => f.page,
            FieldRecord::RadioGroup(f) => f.page,
            FieldRecord::Choice(f) => f.page,
            FieldRecord::Unknown(f) => f.page,
        }
    }

    /// The rectangle used for reading-order sorting.
    ///
    /// Simple fields use their own rect; radio groups use their first option.
    pub fn primary_rect(&self) -> Option<&PageRect> {
        match self {
            FieldRecord::Text(f) => Some(&f.rect),
            FieldRecord::Checkbox(f) => Some(&f.rect),
            FieldRecord::RadioGroup(f) => f.options.first().map(|o| &o.rect),
            FieldRecord::Choice(f) => Some(&f.rect),
            FieldRecord::Unknown(f) => Some(&f.rect),
        }
    }

    /// The `type` tag used in catalog JSON.
    pub fn type_label(&self) -> String {
        match self {
            FieldRecord::Text(_) => "text".to_string(),
            FieldRecord::Checkbox(_) => "checkbox".to_string(),
            FieldRecord::RadioGroup(_) => "radio_group".to_string(),
            FieldRecord::Choice(_) => "choice".to_string(),
            FieldRecord::Unknown(f) => {
                format!("unknown ({})", f.raw_type.as_deref().unwrap_or("none"))
            }
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for FieldRecord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("field_id", self.id())?;
        map.serialize_entry("page", &self.page())?;
        map.serialize_entry("type", &self.type_label())?;
        match self {
            FieldRecord::Text(f) => {
                map.serialize_entry("rect", &f.rect)?;
            }
            FieldRecord::Checkbox(f) => {
                map.serialize_entry("rect", &f.rect)?;
                map.serialize_entry("checked_value", &f.checked_value)?;
                map.serialize_entry("unchecked_value", &f.unchecked_value)?;
            }
            FieldRecord::RadioGroup(f) => {
                map.serialize_entry("radio_options", &f.options)?;
            }
            FieldRecord::Choice(f) => {
                map.serialize_entry("rect", &f.rect)?;
                map.serialize_entry("choice_options", &f.options)?;
            }
            FieldRecord::Unknown(f) => {
                map.serialize_entry("rect", &f.rect)?;
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> PageRect {
        PageRect::new(50.0, 700.0, 200.0, 720.0)
    }

    #[test]
    fn field_type_from_pdf_name() {
        assert_eq!(FieldType::from_pdf_name("Tx"), Some(FieldType::Text));
        assert_eq!(FieldType::from_pdf_name("Btn"), Some(FieldType::Button));
        assert_eq!(FieldType::from_pdf_name("Ch"), Some(FieldType::Choice));
        assert_eq!(FieldType::from_pdf_name("Sig"), Some(FieldType::Signature));
        assert_eq!(FieldType::from_pdf_name("Unknown"), None);
    }

    #[test]
    fn field_type_as_pdf_name() {
        assert_eq!(FieldType::Text.as_pdf_name(), "Tx");
        assert_eq!(FieldType::Button.as_pdf_name(), "Btn");
        assert_eq!(FieldType::Choice.as_pdf_name(), "Ch");
        assert_eq!(FieldType::Signature.as_pdf_name(), "Sig");
    }

    #[test]
    fn normalize_mixed_choice_options() {
        let raw = vec![
            RawChoiceOption::Value("US".to_string()),
            RawChoiceOption::Pair {
                export: "UK".to_string(),
                display: "United Kingdom".to_string(),
            },
        ];
        let options = ChoiceOption::normalize(&raw);
        assert_eq!(
            options,
            vec![
                ChoiceOption {
                    value: "US".to_string(),
                    text: "US".to_string()
                },
                ChoiceOption {
                    value: "UK".to_string(),
                    text: "United Kingdom".to_string()
                },
            ]
        );
    }

    #[test]
    fn type_labels() {
        let text = FieldRecord::Text(TextField {
            id: "name".to_string(),
            page: 1,
            rect: rect(),
        });
        assert_eq!(text.type_label(), "text");

        let unknown = FieldRecord::Unknown(UnknownField {
            id: "sig".to_string(),
            page: 2,
            rect: rect(),
            raw_type: Some("Sig".to_string()),
        });
        assert_eq!(unknown.type_label(), "unknown (Sig)");

        let untyped = FieldRecord::Unknown(UnknownField {
            id: "x".to_string(),
            page: 1,
            rect: rect(),
            raw_type: None,
        });
        assert_eq!(untyped.type_label(), "unknown (none)");
    }

    #[test]
    fn radio_group_primary_rect_is_first_option() {
        let first = PageRect::new(10.0, 10.0, 20.0, 20.0);
        let group = FieldRecord::RadioGroup(RadioGroupField {
            id: "color".to_string(),
            page: 1,
            options: vec![
                RadioOption {
                    value: "Red".to_string(),
                    rect: first,
                },
                RadioOption {
                    value: "Blue".to_string(),
                    rect: rect(),
                },
            ],
        });
        assert_eq!(group.primary_rect(), Some(&first));
        assert_eq!(group.id(), "color");
        assert_eq!(group.page(), 1);
    }
}
