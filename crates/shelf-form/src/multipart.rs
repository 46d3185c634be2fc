use bytes::{Bytes, BytesMut};

use crate::map::FormMap;

const CRLF: &[u8] = b"\r\n";

/// A file attached to a multipart form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormFile {
    pub field_name: String,
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl FormFile {
    /// A file posted as the `file` field with type `application/octet-stream`.
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            field_name: "file".into(),
            file_name: file_name.into(),
            content_type: "application/octet-stream".into(),
            data: data.into(),
        }
    }

    pub fn with_field_name(mut self, name: impl Into<String>) -> Self {
        self.field_name = name.into();
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }
}

#[derive(Clone, Debug)]
enum Part {
    Text { name: String, value: String },
    File(FormFile),
}

/// Builder for a `multipart/form-data` body.
#[derive(Clone, Debug)]
pub struct MultipartForm {
    boundary: String,
    parts: Vec<Part>,
}

impl MultipartForm {
    /// Empty form with a random boundary.
    pub fn new() -> Self {
        Self::with_boundary(format!("----------{}", uuid::Uuid::now_v7().simple()))
    }

    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            parts: Vec::new(),
        }
    }

    /// One text part per map entry, then `file` if given. A `File` entry in
    /// the map is dropped when a file is attached, since the upload replaces
    /// whatever the flattened object carried under that name.
    pub fn from_form_map(map: &FormMap, file: Option<FormFile>) -> Self {
        let mut form = Self::new();
        for (name, value) in map.iter() {
            if file.is_some() && name == "File" {
                continue;
            }
            form = form.text(name, value);
        }
        match file {
            Some(file) => form.file(file),
            None => form,
        }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(Part::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn file(mut self, file: FormFile) -> Self {
        self.parts.push(Part::File(file));
        self
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Value for the `Content-Type` header.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Encode the body.
    pub fn finish(&self) -> Bytes {
        let mut buf = BytesMut::new();
        for part in &self.parts {
            buf.extend_from_slice(b"--");
            buf.extend_from_slice(self.boundary.as_bytes());
            buf.extend_from_slice(CRLF);
            match part {
                Part::Text { name, value } => {
                    let header = format!(
                        "Content-Disposition: form-data; name=\"{}\"",
                        escape_quoted(name)
                    );
                    buf.extend_from_slice(header.as_bytes());
                    buf.extend_from_slice(CRLF);
                    buf.extend_from_slice(CRLF);
                    buf.extend_from_slice(value.as_bytes());
                }
                Part::File(file) => {
                    let header = format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"",
                        escape_quoted(&file.field_name),
                        escape_quoted(&file.file_name)
                    );
                    buf.extend_from_slice(header.as_bytes());
                    buf.extend_from_slice(CRLF);
                    buf.extend_from_slice(format!("Content-Type: {}", file.content_type).as_bytes());
                    buf.extend_from_slice(CRLF);
                    buf.extend_from_slice(CRLF);
                    buf.extend_from_slice(&file.data);
                }
            }
            buf.extend_from_slice(CRLF);
        }
        buf.extend_from_slice(b"--");
        buf.extend_from_slice(self.boundary.as_bytes());
        buf.extend_from_slice(b"--");
        buf.extend_from_slice(CRLF);
        buf.freeze()
    }
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

// Quoted header parameters cannot carry raw quotes or line breaks.
fn escape_quoted(s: &str) -> String {
    s.replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
