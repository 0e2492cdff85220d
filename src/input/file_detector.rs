//! File type detection

use std::path::Path;

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_TEXT: &str = "text/plain";
pub const MIME_MARKDOWN: &str = "text/markdown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Docx,
    Text,
    Markdown,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "docx" => FileType::Docx,
            "txt" | "text" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(FileType::Unknown)
    }

    pub fn from_mime(mime_type: &str) -> Self {
        let essence = mime_type.split(';').next().unwrap_or_default().trim();
        match essence.to_lowercase().as_str() {
            MIME_PDF => FileType::Pdf,
            MIME_DOCX => FileType::Docx,
            MIME_TEXT => FileType::Text,
            MIME_MARKDOWN | "text/x-markdown" => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }

    pub fn mime_type(&self) -> Option<&'static str> {
        match self {
            FileType::Pdf => Some(MIME_PDF),
            FileType::Docx => Some(MIME_DOCX),
            FileType::Text => Some(MIME_TEXT),
            FileType::Markdown => Some(MIME_MARKDOWN),
            FileType::Unknown => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_detection() {
        assert_eq!(FileType::from_path(Path::new("resume.PDF")), FileType::Pdf);
        assert_eq!(FileType::from_path(Path::new("cv.docx")), FileType::Docx);
        assert_eq!(FileType::from_path(Path::new("notes.md")), FileType::Markdown);
        assert_eq!(FileType::from_path(Path::new("job")), FileType::Unknown);
        assert_eq!(FileType::from_path(Path::new("resume.doc")), FileType::Unknown);
    }

    #[test]
    fn test_mime_mapping() {
        for file_type in [FileType::Pdf, FileType::Docx, FileType::Text, FileType::Markdown] {
            let mime = file_type.mime_type().unwrap();
            assert_eq!(FileType::from_mime(mime), file_type);
        }
        assert_eq!(FileType::from_mime("text/plain; charset=utf-8"), FileType::Text);
        assert_eq!(FileType::from_mime("image/png"), FileType::Unknown);
        assert_eq!(FileType::Unknown.mime_type(), None);
    }
}
