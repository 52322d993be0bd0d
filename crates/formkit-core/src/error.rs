//! Error and warning types for formkit.
//!
//! Provides [`FormError`] for fatal errors that stop processing,
//! [`ExtractWarning`] for non-fatal issues that allow best-effort continuation,
//! [`ExtractResult`] for pairing a value with collected warnings, and
//! [`FormOptions`] for configuring resource limits.

use std::fmt;

/// Fatal error types for form processing.
#[derive(Debug, Clone, PartialEq)]
pub enum FormError {
    /// Error parsing PDF structure or syntax.
    ParseError(String),
    /// I/O error reading or writing a file.
    IoError(String),
    /// A JSON input file does not match its expected shape.
    InvalidInput(String),
    /// A 1-based page number is outside the document.
    PageOutOfRange {
        /// The requested page number.
        page: usize,
        /// Number of pages in the document.
        page_count: usize,
    },
    /// A size used for coordinate conversion is zero, negative, or not finite.
    InvalidDimensions(String),
    /// A configured resource limit was exceeded.
    ResourceLimitExceeded {
        /// Name of the limit that was exceeded (e.g., "max_input_bytes").
        limit_name: String,
        /// The configured limit value.
        limit_value: usize,
        /// The actual value that exceeded the limit.
        actual_value: usize,
    },
    /// Any other error not covered by specific variants.
    Other(String),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::ParseError(msg) => write!(f, "parse error: {msg}"),
            FormError::IoError(msg) => write!(f, "I/O error: {msg}"),
            FormError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            FormError::PageOutOfRange { page, page_count } => write!(
                f,
                "page {page} is out of range (document has {page_count} pages)"
            ),
            FormError::InvalidDimensions(msg) => write!(f, "invalid dimensions: {msg}"),
            FormError::ResourceLimitExceeded {
                limit_name,
                limit_value,
                actual_value,
            } => write!(
                f,
                "resource limit exceeded: {limit_name} (limit: {limit_value}, actual: {actual_value})"
            ),
            FormError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for FormError {}

impl From<std::io::Error> for FormError {
    fn from(err: std::io::Error) -> Self {
        FormError::IoError(err.to_string())
    }
}

/// Machine-readable code for categorizing extraction warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExtractWarningCode {
    /// A field definition has no widget annotation, so its page and
    /// rectangle are unknown. The field is left out of the catalog.
    LocationIndeterminate,
    /// A two-state toggle has no literal `Off` state; checked and unchecked
    /// values were assigned by position.
    AmbiguousCheckboxStates,
    /// A PDF object is malformed or has unexpected structure.
    MalformedObject,
}

impl ExtractWarningCode {
    /// Returns the string tag for this warning code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractWarningCode::LocationIndeterminate => "LOCATION_INDETERMINATE",
            ExtractWarningCode::AmbiguousCheckboxStates => "AMBIGUOUS_CHECKBOX_STATES",
            ExtractWarningCode::MalformedObject => "MALFORMED_OBJECT",
        }
    }
}

impl fmt::Display for ExtractWarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-fatal warning encountered while building the field catalog.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtractWarning {
    /// Machine-readable warning code.
    pub code: ExtractWarningCode,
    /// Human-readable description of the warning.
    pub description: String,
    /// Qualified id of the field concerned, if any.
    pub field_id: Option<String>,
    /// 1-based page number where the warning occurred, if applicable.
    pub page: Option<usize>,
}

impl ExtractWarning {
    /// Create a warning with a specific code and description.
    pub fn new(code: ExtractWarningCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            field_id: None,
            page: None,
        }
    }

    /// Create a warning attached to a field.
    pub fn for_field(
        code: ExtractWarningCode,
        field_id: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            code,
            description: description.into(),
            field_id: Some(field_id.into()),
            page: None,
        }
    }

    /// Set the page context, returning the modified warning (builder pattern).
    pub fn on_page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }
}

impl fmt::Display for ExtractWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.description)?;
        if let Some(page) = self.page {
            write!(f, " (page {page})")?;
        }
        Ok(())
    }
}

/// Result wrapper that pairs a value with collected warnings.
///
/// Used when extraction can partially succeed with non-fatal issues.
#[derive(Debug, Clone)]
pub struct ExtractResult<T> {
    /// The extracted value.
    pub value: T,
    /// Warnings collected during extraction.
    pub warnings: Vec<ExtractWarning>,
}

impl<T> ExtractResult<T> {
    /// Create a result with no warnings.
    pub fn ok(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Create a result with warnings.
    pub fn with_warnings(value: T, warnings: Vec<ExtractWarning>) -> Self {
        Self { value, warnings }
    }

    /// Returns true if there are no warnings.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Transform the value while preserving warnings.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ExtractResult<U> {
        ExtractResult {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}

/// Options controlling document loading and traversal limits.
#[derive(Debug, Clone)]
pub struct FormOptions {
    /// Maximum depth followed along `/Kids` and `/Parent` links (default: 64).
    ///
    /// Bounds traversal of malformed documents whose field graph is cyclic.
    pub max_tree_depth: usize,
    /// Maximum input PDF file size in bytes (default: None = no limit).
    pub max_input_bytes: Option<usize>,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            max_tree_depth: 64,
            max_input_bytes: None,
        }
    }
}
