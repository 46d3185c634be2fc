use std::convert::Infallible;

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tower::util::ServiceExt;

use shelf_form::{to_form_map, FormFile, MultipartForm};

use crate::error::{TestkitError, TestkitResult};

const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
const JSON: &str = "application/json; charset=utf-8";

/// A fully buffered response.
#[derive(Clone, Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json<T: DeserializeOwned>(&self) -> TestkitResult<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Fail with `UnexpectedStatus` unless the status is `expected`.
    pub fn expect_status(self, expected: StatusCode) -> TestkitResult<Self> {
        if self.status == expected {
            Ok(self)
        } else {
            Err(TestkitError::UnexpectedStatus {
                expected,
                actual: self.status,
                body: self.text(),
            })
        }
    }
}

/// Client bound to a [`TestServer`](crate::TestServer)'s router.
#[derive(Clone)]
pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Send a request and buffer the whole response.
    pub async fn send(&self, request: Request<Body>) -> TestkitResult<TestResponse> {
        tracing::debug!(method = %request.method(), uri = %request.uri(), "test request");
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|never: Infallible| -> TestkitError { match never {} })?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| TestkitError::Http(e.to_string()))?;
        Ok(TestResponse {
            status,
            headers,
            body,
        })
    }

    pub async fn get(&self, url: &str) -> TestkitResult<TestResponse> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(url)
            .body(Body::empty())
            .map_err(|e| TestkitError::Http(e.to_string()))?;
        self.send(request).await
    }

    /// GET `url`, require 200, and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> TestkitResult<T> {
        self.get(url).await?.expect_status(StatusCode::OK)?.json()
    }

    /// Like [`get_json`](Self::get_json), but a 404 yields `None`.
    pub async fn try_get_json<T: DeserializeOwned>(&self, url: &str) -> TestkitResult<Option<T>> {
        let response = self.get(url).await?;
        if response.status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        response.expect_status(StatusCode::OK)?.json().map(Some)
    }

    /// POST `content` serialized as JSON.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        content: &T,
    ) -> TestkitResult<TestResponse> {
        let body = serde_json::to_vec(content)?;
        self.post(url, JSON, Body::from(body)).await
    }

    /// POST `content` as JSON, require 200, and decode the response.
    pub async fn post_json_for<T, R>(&self, url: &str, content: &T) -> TestkitResult<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.post_json(url, content)
            .await?
            .expect_status(StatusCode::OK)?
            .json()
    }

    /// POST `content` flattened into url-encoded form fields.
    pub async fn post_form<T: Serialize + ?Sized>(
        &self,
        url: &str,
        content: &T,
    ) -> TestkitResult<TestResponse> {
        self.post_form_with_file(url, content, None).await
    }

    /// POST `content` as form fields. With a file the body is multipart and
    /// carries the upload alongside the fields; without one it is
    /// url-encoded.
    pub async fn post_form_with_file<T: Serialize + ?Sized>(
        &self,
        url: &str,
        content: &T,
        file: Option<FormFile>,
    ) -> TestkitResult<TestResponse> {
        let fields = to_form_map(content)?;
        match file {
            Some(file) => {
                let form = MultipartForm::from_form_map(&fields, Some(file));
                let content_type = form.content_type();
                self.post(url, &content_type, Body::from(form.finish())).await
            }
            None => {
                self.post(url, FORM_URLENCODED, Body::from(fields.to_urlencoded()))
                    .await
            }
        }
    }

    async fn post(&self, url: &str, content_type: &str, body: Body) -> TestkitResult<TestResponse> {
        let request = Request::builder()
            .method(Method::POST)
            .uri(url)
            .header(header::CONTENT_TYPE, content_type)
            .body(body)
            .map_err(|e| TestkitError::Http(e.to_string()))?;
        self.send(request).await
    }
}

impl std::fmt::Debug for TestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestClient").finish_non_exhaustive()
    }
}
