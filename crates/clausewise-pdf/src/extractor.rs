//! Page-by-page text extraction backed by lopdf

use crate::PdfError;
use clausewise_domain::traits::TextExtractor;
use lopdf::Document;
use tracing::{debug, warn};

/// Text of a single page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// One-based page number
    pub number: u32,

    /// Page text with whitespace collapsed
    pub text: String,
}

/// All pages of a document, in page order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPages {
    /// Pages in ascending order
    pub pages: Vec<PageText>,
}

impl ExtractedPages {
    /// Number of pages read
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Concatenate the pages, each followed by a newline
    pub fn joined(&self) -> String {
        let mut text = String::new();
        for page in &self.pages {
            text.push_str(&page.text);
            text.push('\n');
        }
        text
    }
}

/// Extracts text from PDF documents
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    /// Create a new extractor
    pub fn new() -> Self {
        Self
    }

    /// Read every page of the document
    ///
    /// # Errors
    ///
    /// Fails on the first page that cannot be read; nothing partial is
    /// returned.
    pub fn extract_pages(&self, bytes: &[u8]) -> Result<ExtractedPages, PdfError> {
        let mut doc = Document::load_mem(bytes).map_err(PdfError::from_load)?;

        // Documents restricted only by an owner password open with an empty user password
        if doc.is_encrypted() {
            doc.decrypt("").map_err(|e| {
                warn!("Encrypted document could not be opened: {}", e);
                PdfError::Encrypted
            })?;
        }

        // get_pages is keyed by page number, so iteration is already ordered
        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        debug!("Extracting text from {} page(s)", page_numbers.len());

        let mut pages = Vec::with_capacity(page_numbers.len());
        for number in page_numbers {
            let raw = doc.extract_text(&[number]).map_err(|e| {
                warn!("Text extraction failed on page {}: {}", number, e);
                PdfError::Extraction {
                    page: number,
                    reason: e.to_string(),
                }
            })?;
            pages.push(PageText {
                number,
                text: collapse_whitespace(&raw),
            });
        }

        Ok(ExtractedPages { pages })
    }
}

impl TextExtractor for PdfTextExtractor {
    type Error = PdfError;

    fn extract_text(&self, bytes: &[u8]) -> Result<String, Self::Error> {
        Ok(self.extract_pages(bytes)?.joined())
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{content::Content, content::Operation, Dictionary, Object, Stream};

    fn name(value: &str) -> Object {
        Object::Name(value.as_bytes().to_vec())
    }

    fn create_test_pdf(page_texts: &[&str]) -> Vec<u8> {
        to_bytes(build_test_document(page_texts))
    }

    fn to_bytes(mut doc: Document) -> Vec<u8> {
        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    // Build a document whose pages each draw one line of text
    fn build_test_document(page_texts: &[&str]) -> Document {
        let mut doc = Document::with_version("1.7");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", name("Font")),
            ("Subtype", name("Type1")),
            ("BaseFont", name("Helvetica")),
            ("Encoding", name("WinAnsiEncoding")),
        ]));
        let fonts = Dictionary::from_iter(vec![("F1", Object::Reference(font_id))]);
        let resources = Dictionary::from_iter(vec![("Font", Object::Dictionary(fonts))]);
        let resources_id = doc.add_object(resources);

        let mut page_ids = Vec::new();
        for text in page_texts {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec![name("F1"), Object::Integer(12)]),
                    Operation::new("Td", vec![Object::Integer(72), Object::Integer(720)]),
                    Operation::new(
                        "Tj",
                        vec![Object::String(
                            text.as_bytes().to_vec(),
                            lopdf::StringFormat::Literal,
                        )],
                    ),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(Dictionary::new(), content.encode().unwrap()));

            let page = Dictionary::from_iter(vec![
                ("Type", name("Page")),
                ("Parent", Object::Reference(pages_id)),
                (
                    "MediaBox",
                    Object::Array(vec![
                        Object::Integer(0),
                        Object::Integer(0),
                        Object::Integer(612),
                        Object::Integer(792),
                    ]),
                ),
                ("Contents", Object::Reference(content_id)),
                ("Resources", Object::Reference(resources_id)),
            ]);
            page_ids.push(doc.add_object(page));
        }

        let pages = Dictionary::from_iter(vec![
            ("Type", name("Pages")),
            ("Count", Object::Integer(page_ids.len() as i64)),
            (
                "Kids",
                Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
            ),
        ]);
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog = Dictionary::from_iter(vec![
            ("Type", name("Catalog")),
            ("Pages", Object::Reference(pages_id)),
        ]);
        let catalog_id = doc.add_object(catalog);
        doc.trailer.set("Root", Object::Reference(catalog_id));
        doc
    }

    #[test]
    fn test_pages_in_order_with_trailing_newlines() {
        let pdf = create_test_pdf(&["First page text", "Second page text"]);
        let extracted = PdfTextExtractor::new().extract_pages(&pdf).unwrap();

        assert_eq!(extracted.page_count(), 2);
        assert_eq!(extracted.pages[0].number, 1);
        assert_eq!(extracted.pages[1].number, 2);
        assert!(extracted.pages[0].text.contains("First page text"));
        assert!(extracted.pages[1].text.contains("Second page text"));

        let joined = PdfTextExtractor::new().extract_text(&pdf).unwrap();
        assert_eq!(joined.matches('\n').count(), 2);
        assert!(joined.ends_with('\n'));
        let first = joined.find("First page").unwrap();
        let second = joined.find("Second page").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_page_text_has_no_inner_newlines() {
        let pdf = create_test_pdf(&["Rent is due"]);
        let extracted = PdfTextExtractor::new().extract_pages(&pdf).unwrap();
        let text = &extracted.pages[0].text;
        assert!(!text.contains('\n'));
        assert!(!text.contains("  "));
    }

    #[test]
    fn test_empty_bytes_are_invalid() {
        let result = PdfTextExtractor::new().extract_text(b"");
        assert!(matches!(result, Err(PdfError::InvalidPdf(_))));
    }

    #[test]
    fn test_garbage_bytes_are_invalid() {
        let result = PdfTextExtractor::new().extract_text(b"this is not a pdf");
        assert!(result.is_err());
    }

    #[test]
    fn test_password_protected_document_is_encrypted() {
        let mut doc = build_test_document(&["Confidential terms"]);
        let encrypt_id = doc.add_object(Dictionary::from_iter(vec![
            ("Filter", name("Standard")),
            ("V", Object::Integer(4)),
            ("R", Object::Integer(4)),
            ("Length", Object::Integer(128)),
            ("P", Object::Integer(-4)),
        ]));
        doc.trailer.set("Encrypt", Object::Reference(encrypt_id));

        let result = PdfTextExtractor::new().extract_text(&to_bytes(doc));
        assert!(matches!(result, Err(PdfError::Encrypted)));
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a \n\n b\t c  "), "a b c");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn test_joined_empty_document() {
        assert_eq!(ExtractedPages::default().joined(), "");
    }
}
