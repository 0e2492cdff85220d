//! Text extraction from document blobs

use crate::input::file_detector::FileType;
use pulldown_cmark::{Event as MdEvent, Parser, Tag};
use quick_xml::events::Event as XmlEvent;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use thiserror::Error;

/// Why a document produced no text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionFailure {
    #[error("the PDF has no extractable text layer (image-based or scanned)")]
    ImageBasedPdf,

    #[error("the file is password protected or encrypted")]
    Protected,

    #[error("the file appears to be corrupted: {0}")]
    Corrupted(String),

    #[error("unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("the document contains no text")]
    Empty,
}

impl ExtractionFailure {
    /// What the user can do about it
    pub fn hint(&self) -> &'static str {
        match self {
            ExtractionFailure::ImageBasedPdf => {
                "Run the document through OCR first, or export it as DOCX or a text-based PDF."
            }
            ExtractionFailure::Protected => "Remove the password protection and try again.",
            ExtractionFailure::Corrupted(_) => "Export a fresh copy of the document and try again.",
            ExtractionFailure::UnsupportedFormat(_) => "Use a PDF, DOCX, TXT or Markdown file.",
            ExtractionFailure::Empty => "Check that the file is the document you meant to analyze.",
        }
    }
}

type Extraction = std::result::Result<String, ExtractionFailure>;

pub trait TextExtractor {
    fn extract(&self, blob: &[u8]) -> Extraction;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, blob: &[u8]) -> Extraction {
        let header = &blob[..blob.len().min(1024)];
        if !contains(header, b"%PDF-") {
            return Err(ExtractionFailure::Corrupted("missing PDF header".to_string()));
        }

        // pdf-extract panics on some malformed inputs
        let result = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(blob));

        match result {
            Ok(Ok(text)) if text.trim().is_empty() => Err(ExtractionFailure::ImageBasedPdf),
            Ok(Ok(text)) => Ok(text),
            Ok(Err(_)) | Err(_) if contains(blob, b"/Encrypt") => Err(ExtractionFailure::Protected),
            Ok(Err(e)) => Err(ExtractionFailure::Corrupted(e.to_string())),
            Err(_) => Err(ExtractionFailure::Corrupted("unreadable PDF structure".to_string())),
        }
    }
}

/// Office Open XML word-processing documents: the text runs of `word/document.xml`
pub struct DocxExtractor;

const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0];

impl TextExtractor for DocxExtractor {
    fn extract(&self, blob: &[u8]) -> Extraction {
        // encrypted Office files are OLE containers rather than ZIP archives
        if blob.starts_with(OLE_MAGIC) {
            return Err(ExtractionFailure::Protected);
        }

        let mut archive = zip::ZipArchive::new(Cursor::new(blob))
            .map_err(|e| ExtractionFailure::Corrupted(e.to_string()))?;

        let mut xml = String::new();
        match archive.by_name("word/document.xml") {
            Ok(mut entry) => {
                entry
                    .read_to_string(&mut xml)
                    .map_err(|e| ExtractionFailure::Corrupted(e.to_string()))?;
            }
            Err(zip::result::ZipError::UnsupportedArchive(msg)) if msg == zip::result::ZipError::PASSWORD_REQUIRED => {
                return Err(ExtractionFailure::Protected);
            }
            Err(e) => return Err(ExtractionFailure::Corrupted(e.to_string())),
        }

        let text = document_xml_to_text(&xml)?;
        non_empty(text)
    }
}

fn document_xml_to_text(xml: &str) -> Extraction {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event() {
            Ok(XmlEvent::Start(e)) if e.name().as_ref() == b"w:t" => in_run_text = true,
            Ok(XmlEvent::End(e)) => match e.name().as_ref() {
                b"w:t" => in_run_text = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Ok(XmlEvent::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => text.push('\t'),
                b"w:br" | b"w:cr" => text.push('\n'),
                _ => {}
            },
            Ok(XmlEvent::Text(e)) if in_run_text => {
                let unescaped = e
                    .unescape()
                    .map_err(|e| ExtractionFailure::Corrupted(e.to_string()))?;
                text.push_str(&unescaped);
            }
            Ok(XmlEvent::Eof) => break,
            Err(e) => return Err(ExtractionFailure::Corrupted(e.to_string())),
            _ => {}
        }
    }

    Ok(text)
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, blob: &[u8]) -> Extraction {
        let text = decode_utf8(blob)?;
        non_empty(text)
    }
}

/// Markdown rendered down to its visible text, one block per line
pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, blob: &[u8]) -> Extraction {
        let markdown = decode_utf8(blob)?;
        let mut text = String::new();

        for event in Parser::new(&markdown) {
            match event {
                MdEvent::Text(t) | MdEvent::Code(t) => text.push_str(&t),
                MdEvent::SoftBreak | MdEvent::HardBreak => text.push('\n'),
                MdEvent::End(Tag::Paragraph | Tag::Heading(..) | Tag::Item | Tag::CodeBlock(_)) => {
                    text.push('\n')
                }
                _ => {}
            }
        }

        let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        non_empty(lines.join("\n"))
    }
}

fn decode_utf8(blob: &[u8]) -> Extraction {
    let text = std::str::from_utf8(blob)
        .map_err(|_| ExtractionFailure::Corrupted("the file is not valid UTF-8 text".to_string()))?;
    Ok(text.trim_start_matches('\u{feff}').to_string())
}

fn non_empty(text: String) -> Extraction {
    if text.trim().is_empty() {
        Err(ExtractionFailure::Empty)
    } else {
        Ok(text)
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

/// Extract text, reporting why nothing could be read
pub fn extract_detailed(blob: &[u8], mime_type: &str) -> Extraction {
    match FileType::from_mime(mime_type) {
        FileType::Pdf => PdfExtractor.extract(blob),
        FileType::Docx => DocxExtractor.extract(blob),
        FileType::Text => PlainTextExtractor.extract(blob),
        FileType::Markdown => MarkdownExtractor.extract(blob),
        FileType::Unknown => Err(ExtractionFailure::UnsupportedFormat(mime_type.to_string())),
    }
}

/// Extract text; any failure yields an empty string
pub fn extract(blob: &[u8], mime_type: &str) -> String {
    match extract_detailed(blob, mime_type) {
        Ok(text) => text,
        Err(failure) => {
            log::warn!("Text extraction failed for {}: {}", mime_type, failure);
            String::new()
        }
    }
}
