use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::Error;

/// Scalar value of a form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    Bool(bool),
    Int(i64),
}

impl fmt::Display for FormValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormValue::Text(text) => f.write_str(text),
            FormValue::Bool(value) => write!(f, "{}", value),
            FormValue::Int(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Text(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        FormValue::Text(value)
    }
}

impl From<bool> for FormValue {
    fn from(value: bool) -> Self {
        FormValue::Bool(value)
    }
}

impl From<u32> for FormValue {
    fn from(value: u32) -> Self {
        FormValue::Int(i64::from(value))
    }
}

impl From<i64> for FormValue {
    fn from(value: i64) -> Self {
        FormValue::Int(value)
    }
}

/// A file to upload, either on disk or already in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputFile {
    Path(PathBuf),
    Memory { file_name: String, bytes: Vec<u8> },
}

impl InputFile {
    pub fn path<P: AsRef<Path>>(path: P) -> Self {
        InputFile::Path(path.as_ref().to_path_buf())
    }

    pub fn memory<S: Into<String>>(file_name: S, bytes: Vec<u8>) -> Self {
        InputFile::Memory {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Name sent as the multipart filename
    pub fn file_name(&self) -> String {
        match self {
            InputFile::Path(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "file".to_string()),
            InputFile::Memory { file_name, .. } => file_name.clone(),
        }
    }

    /// Load the whole file content
    pub fn read(&self) -> Result<Vec<u8>, Error> {
        match self {
            InputFile::Path(path) => std::fs::read(path).map_err(|source| Error::File {
                path: path.clone(),
                source,
            }),
            InputFile::Memory { bytes, .. } => Ok(bytes.clone()),
        }
    }

    /// Read the file into an attachment under the given multipart field
    pub fn to_attachment(&self, field: &str) -> Result<Attachment, Error> {
        Ok(Attachment {
            field: field.to_string(),
            file_name: self.file_name(),
            bytes: self.read()?,
        })
    }
}

impl From<&Path> for InputFile {
    fn from(path: &Path) -> Self {
        InputFile::path(path)
    }
}

impl From<PathBuf> for InputFile {
    fn from(path: PathBuf) -> Self {
        InputFile::Path(path)
    }
}

/// Named binary part of a multipart request
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub field: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("field", &self.field)
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// One Bot API call: method name, form fields in insertion order, and
/// any files to upload with it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub method: String,
    pub fields: Vec<(String, FormValue)>,
    pub attachments: Vec<Attachment>,
}

impl OutboundRequest {
    pub fn new<S: Into<String>>(method: S) -> Self {
        OutboundRequest {
            method: method.into(),
            fields: Vec::new(),
            attachments: Vec::new(),
        }
    }

    /// Append a form field
    pub fn field<K: Into<String>, V: Into<FormValue>>(mut self, key: K, value: V) -> Self {
        self.fields.push((key.into(), value.into()));
        self
    }

    /// Append a form field only when a value is present
    pub fn optional_field<K: Into<String>, V: Into<FormValue>>(
        self,
        key: K,
        value: Option<V>,
    ) -> Self {
        match value {
            Some(value) => self.field(key, value),
            None => self,
        }
    }

    /// Append a file part
    pub fn attach(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Look up a form field by key
    pub fn get(&self, key: &str) -> Option<&FormValue> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    /// Look up a file part by field name
    pub fn attachment(&self, field: &str) -> Option<&Attachment> {
        self.attachments.iter().find(|a| a.field == field)
    }

    /// Fields rendered to strings, ready for url-encoding
    pub fn form_pairs(&self) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.clone(), value.to_string()))
            .collect()
    }

    pub fn is_multipart(&self) -> bool {
        !self.attachments.is_empty()
    }
}

/// Kind of media sent by the shared file-sending path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Document,
    Photo,
    Video,
}

impl MediaKind {
    /// Multipart field carrying the file
    pub fn field_name(self) -> &'static str {
        match self {
            MediaKind::Document => "document",
            MediaKind::Photo => "photo",
            MediaKind::Video => "video",
        }
    }

    /// Bot API method the file is posted to
    pub fn api_method(self) -> &'static str {
        match self {
            MediaKind::Document => "sendDocument",
            MediaKind::Photo => "sendPhoto",
            MediaKind::Video => "sendVideo",
        }
    }
}

impl FromStr for MediaKind {
    type Err = Error;

    fn from_str(selector: &str) -> Result<Self, Self::Err> {
        match selector {
            "document" => Ok(MediaKind::Document),
            "photo" => Ok(MediaKind::Photo),
            "video" => Ok(MediaKind::Video),
            other => Err(Error::UnsupportedMethod(other.to_string())),
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}
