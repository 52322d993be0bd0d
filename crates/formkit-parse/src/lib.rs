//! formkit-parse: PDF backend for form field extraction and filling.
//!
//! This crate reads the AcroForm field hierarchy and page widgets out of a
//! PDF and writes values and annotations back. The backend-independent
//! algorithms live in formkit-core; [`FormBackend`] is the seam between the
//! two and [`LopdfBackend`] is the default implementation.

pub mod backend;
pub mod error;
mod field_walk;
pub mod lopdf_backend;
pub mod pdf_string;
mod writer;

pub use backend::{FormBackend, apply_population, extract_catalog};
pub use error::BackendError;
pub use formkit_core;
pub use lopdf_backend::{LopdfBackend, LopdfDocument};
pub use pdf_string::{decode_pdf_string, encode_pdf_string};
