//! Clausewise PDF Text Extraction
//!
//! Turns uploaded PDF bytes into the plain text handed to the analyzer.
//! Pages are read in ascending order; within a page, runs of whitespace
//! collapse to a single space and every page ends with a newline.
//!
//! # Examples
//!
//! ```no_run
//! use clausewise_domain::traits::TextExtractor;
//! use clausewise_pdf::PdfTextExtractor;
//!
//! # fn example(bytes: &[u8]) -> Result<(), clausewise_pdf::PdfError> {
//! let text = PdfTextExtractor::new().extract_text(bytes)?;
//! println!("{} characters", text.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod error;
mod extractor;

pub use error::PdfError;
pub use extractor::{ExtractedPages, PageText, PdfTextExtractor};
