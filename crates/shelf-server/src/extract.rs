use async_trait::async_trait;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::{Form, Json};
use serde_json::Value;

use shelf_types::{Book, BookId, NewBook};

use crate::error::{ServerError, ServerResult};

/// Book fields bound from a request body.
///
/// Accepts `application/json`, `application/x-www-form-urlencoded`, and
/// `multipart/form-data`, all bound the same way: keys `Id` and `Name` match
/// case-insensitively, the first occurrence of a key wins, and anything else
/// in the body is ignored, as are uploaded files. Both fields are kept as
/// posted; `Id` is only parsed when an edit asks for it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookForm {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl BookForm {
    /// Bind from raw text fields.
    pub fn from_fields<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut form = Self::default();
        for (key, value) in fields {
            if key.eq_ignore_ascii_case("id") {
                form.id.get_or_insert(value);
            } else if key.eq_ignore_ascii_case("name") {
                form.name.get_or_insert(value);
            }
        }
        form
    }

    /// Bind from a JSON object's top-level members. Strings are taken as-is,
    /// `null` as empty text, anything else as its JSON text.
    pub fn from_json(value: Value) -> ServerResult<Self> {
        let Value::Object(members) = value else {
            return Err(ServerError::BadRequest("expected a JSON object".into()));
        };
        Ok(Self::from_fields(members.into_iter().map(|(key, value)| {
            let text = match value {
                Value::String(s) => s,
                Value::Null => String::new(),
                other => other.to_string(),
            };
            (key, text)
        })))
    }

    /// The posted id, if present and numeric.
    pub fn book_id(&self) -> Option<BookId> {
        self.id.as_deref().and_then(|raw| raw.parse().ok())
    }

    /// Creation input. Only `Name` is bound; a posted `Id` is never read.
    pub fn to_new_book(&self) -> ServerResult<NewBook> {
        Ok(NewBook::new(self.name.as_deref().unwrap_or_default())?)
    }

    /// Full book for an edit. Fails with `NotFound` unless a numeric `Id` was
    /// posted.
    pub fn to_book(&self) -> ServerResult<Book> {
        let id = self
            .book_id()
            .ok_or_else(|| ServerError::NotFound("no book id in request body".into()))?;
        Ok(Book::new(id, self.name.as_deref().unwrap_or_default())?)
    }
}

// Extractor rejections keep a payload-too-large status; everything else is a
// bad request.
fn rejected(status: StatusCode, message: String) -> ServerError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ServerError::PayloadTooLarge(message)
    } else {
        ServerError::BadRequest(message)
    }
}

#[async_trait]
impl<S> FromRequest<S> for BookForm
where
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        if content_type.starts_with("application/json") {
            let Json(value) = Json::<Value>::from_request(req, state)
                .await
                .map_err(|e| rejected(e.status(), e.body_text()))?;
            Self::from_json(value)
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| rejected(e.status(), e.body_text()))?;
            Ok(Self::from_fields(fields))
        } else if content_type.starts_with("multipart/form-data") {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| rejected(e.status(), e.body_text()))?;
            let mut fields = Vec::new();
            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(|e| rejected(e.status(), e.body_text()))?
            {
                if field.file_name().is_some() {
                    continue;
                }
                let Some(name) = field.name().map(str::to_owned) else {
                    continue;
                };
                let value = field
                    .text()
                    .await
                    .map_err(|e| rejected(e.status(), e.body_text()))?;
                fields.push((name, value));
            }
            Ok(Self::from_fields(fields))
        } else {
            Err(ServerError::UnsupportedMediaType(content_type))
        }
    }
}
