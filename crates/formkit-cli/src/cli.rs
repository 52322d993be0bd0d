use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Inspect, validate and fill PDF form fields.
#[derive(Debug, Parser)]
#[command(name = "formkit", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Report whether a PDF has interactive form fields
    Check {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Export the ordered field catalog as JSON
    Fields {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Where to write the catalog JSON
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },

    /// Check hand-authored field regions for overlaps and undersized entries
    ValidateRegions {
        /// Path to the region batch JSON
        #[arg(value_name = "FIELDS_JSON")]
        fields: PathBuf,

        /// Stop after this many failures
        #[arg(long, default_value_t = 20)]
        max_diagnostics: usize,

        /// Font size assumed when an entry omits one
        #[arg(long, default_value_t = 14.0)]
        default_font_size: f64,
    },

    /// Write a batch of values into a form's fields
    Populate {
        /// Path to the PDF form
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Path to the value batch JSON
        #[arg(value_name = "VALUES_JSON")]
        values: PathBuf,

        /// Where to write the filled PDF
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },

    /// Overlay entry text as free-text annotations on a PDF without a form
    Annotate {
        /// Path to the PDF file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Path to the region batch JSON
        #[arg(value_name = "FIELDS_JSON")]
        fields: PathBuf,

        /// Where to write the annotated PDF
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
    },
}
