//! Uploaded files and the upload filter

use std::io;
use std::path::Path;

/// File type of an accepted upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    /// Portable Document Format
    Pdf,
    /// Legacy Word document
    Doc,
    /// Word document
    Docx,
}

impl UploadKind {
    /// Detect the kind from a file name, case-insensitively
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(UploadKind::Pdf),
            "doc" => Some(UploadKind::Doc),
            "docx" => Some(UploadKind::Docx),
            _ => None,
        }
    }
}

/// Whether the upload filter accepts a file name
pub fn is_accepted_upload(name: &str) -> bool {
    UploadKind::from_file_name(name).is_some()
}

/// A file selected for analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedDocument {
    /// Display name of the file
    pub file_name: String,

    /// File contents
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    /// Create an upload from a name and its contents
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Read an upload from disk, named after the last path component
    pub fn read(path: &Path) -> io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(file_name, bytes))
    }

    /// Detected file type
    pub fn kind(&self) -> Option<UploadKind> {
        UploadKind::from_file_name(&self.file_name)
    }

    /// Size in bytes
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Size for display, e.g. `1.50 MB`
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.size() as f64 / 1024.0 / 1024.0)
    }
}
