//! HTTP server for the Shelf book catalogue.
//!
//! Serves a `Books` resource over an in-memory store:
//!
//! | Method | Path                    | Result                          |
//! |--------|-------------------------|---------------------------------|
//! | GET    | `/Books`, `/Books/Index`| all books                       |
//! | GET    | `/Books/Details/:id`    | one book, 404 if unknown        |
//! | POST   | `/Books/Create`         | created book (binds `Name`)     |
//! | POST   | `/Books/Edit/:id`       | updated book (binds `Id, Name`) |
//!
//! POST bodies may be JSON, url-encoded, or multipart form data.

pub mod config;
pub mod error;
pub mod extract;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ErrorBody, ServerError, ServerResult};
pub use extract::BookForm;
pub use router::build_router;
pub use server::ShelfServer;
pub use state::AppState;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use axum::Router;
    use tower::util::ServiceExt;

    use shelf_form::{to_form_map, FormFile, MultipartForm};
    use shelf_store::{seed, BookStore, InMemoryBookStore};
    use shelf_types::{Book, BookId};

    fn app() -> (Router, Arc<InMemoryBookStore>) {
        let store = Arc::new(InMemoryBookStore::new());
        seed(store.as_ref()).unwrap();
        let router = build_router(AppState::new(store.clone()), &ServerConfig::default());
        (router, store)
    }

    async fn get(app: &Router, uri: &str) -> Response {
        app.clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post(app: &Router, uri: &str, content_type: &str, body: impl Into<Body>) -> Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, content_type)
                    .body(body.into())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn index_lists_seeded_books() {
        let (app, _) = app();
        for uri in ["/Books", "/Books/Index"] {
            let response = get(&app, uri).await;
            assert_eq!(response.status(), StatusCode::OK);
            let books: Vec<Book> = json(response).await;
            assert_eq!(books.len(), 23);
            assert_eq!(books[0].id, BookId::new(1));
        }
    }

    #[tokio::test]
    async fn details_returns_book() {
        let (app, _) = app();
        let response = get(&app, "/Books/Details/5").await;
        assert_eq!(response.status(), StatusCode::OK);
        let book: Book = json(response).await;
        assert_eq!(book.name, "eBook - Chemistry 2016");
    }

    #[tokio::test]
    async fn details_not_found_cases() {
        let (app, _) = app();
        for uri in ["/Books/Details", "/Books/Details/999", "/Books/Details/abc"] {
            let response = get(&app, uri).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        }
        let body: ErrorBody = json(get(&app, "/Books/Details/999").await).await;
        assert_eq!(body.error, "not_found");
    }

    #[tokio::test]
    async fn create_from_json_ignores_id() {
        let (app, store) = app();
        let response = post(
            &app,
            "/Books/Create",
            "application/json",
            r#"{"Id":3,"Name":"A Brief History of the Universe"}"#,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let book: Book = json(response).await;
        assert_eq!(book.id, BookId::new(24));
        assert_eq!(store.len(), 24);
        assert_eq!(store.get(BookId::new(3)).unwrap().name, "eBook - Chemical Engineering 2016");
    }

    #[tokio::test]
    async fn create_never_parses_posted_id() {
        let (app, store) = app();
        let attempts = [
            ("application/x-www-form-urlencoded", "Id=&Name=Optics"),
            ("application/x-www-form-urlencoded", "Id=abc&Name=Optics"),
            ("application/json", r#"{"Id":"abc","Name":"Optics"}"#),
            ("application/json", r#"{"Id":null,"Name":"Optics"}"#),
        ];
        for (content_type, body) in attempts {
            let response = post(&app, "/Books/Create", content_type, body).await;
            assert_eq!(response.status(), StatusCode::OK, "{body}");
        }
        let form = MultipartForm::new().text("Id", "abc").text("Name", "Optics");
        let content_type = form.content_type();
        let response = post(&app, "/Books/Create", &content_type, form.finish()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(store.len(), 28);
    }

    #[tokio::test]
    async fn create_from_flattened_struct_with_null_id() {
        #[derive(serde::Serialize)]
        #[serde(rename_all = "PascalCase")]
        struct Draft {
            id: Option<i32>,
            name: &'static str,
        }
        let (app, store) = app();
        let form = to_form_map(&Draft { id: None, name: "Optics" }).unwrap();
        assert_eq!(form.to_urlencoded(), "Id=&Name=Optics");
        let response = post(
            &app,
            "/Books/Create",
            "application/x-www-form-urlencoded",
            form.to_urlencoded(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(store.get(BookId::new(24)).unwrap().name, "Optics");
    }

    #[tokio::test]
    async fn urlencoded_keys_bind_like_multipart() {
        let (app, store) = app();
        let response = post(
            &app,
            "/Books/Edit/1",
            "application/x-www-form-urlencoded",
            "ID=1&NAME=Renamed",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(store.get(BookId::new(1)).unwrap().name, "Renamed");

        let response = post(
            &app,
            "/Books/Create",
            "application/x-www-form-urlencoded",
            "Name=First&Name=Second",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let book: Book = json(response).await;
        assert_eq!(book.name, "First");
    }

    #[tokio::test]
    async fn create_from_urlencoded_form() {
        let (app, store) = app();
        let form = to_form_map(&serde_json::json!({"Name": "Optics & Waves"})).unwrap();
        let response = post(
            &app,
            "/Books/Create",
            "application/x-www-form-urlencoded",
            form.to_urlencoded(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(store.get(BookId::new(24)).unwrap().name, "Optics & Waves");
    }

    #[tokio::test]
    async fn create_from_multipart_with_file() {
        let (app, store) = app();
        let form = MultipartForm::new()
            .text("Name", "Thermodynamics")
            .file(FormFile::new("cover.bin", vec![0u8, 1, 2, 3]));
        let content_type = form.content_type();
        let response = post(&app, "/Books/Create", &content_type, form.finish()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(store.get(BookId::new(24)).unwrap().name, "Thermodynamics");
    }

    #[tokio::test]
    async fn create_rejects_blank_name() {
        let (app, store) = app();
        let response = post(&app, "/Books/Create", "application/json", r#"{"Name":"  "}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let response = post(&app, "/Books/Create", "application/json", "{}").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(store.len(), 23);
    }

    #[tokio::test]
    async fn create_rejects_malformed_json() {
        let (app, _) = app();
        let response = post(&app, "/Books/Create", "application/json", "{not json").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_rejects_unknown_media_type() {
        let (app, _) = app();
        let response = post(&app, "/Books/Create", "text/plain", "Name=x").await;
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn create_requires_post() {
        let (app, _) = app();
        let response = get(&app, "/Books/Create").await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn edit_updates_book() {
        let (app, store) = app();
        let response = post(
            &app,
            "/Books/Edit/2",
            "application/x-www-form-urlencoded",
            "Id=2&Name=Genetics%202017",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let book: Book = json(response).await;
        assert_eq!(book, Book::new(BookId::new(2), "Genetics 2017").unwrap());
        assert_eq!(store.get(BookId::new(2)).unwrap().name, "Genetics 2017");
    }

    #[tokio::test]
    async fn edit_with_mismatched_id_is_not_found() {
        let (app, store) = app();
        let response = post(&app, "/Books/Edit/2", "application/json", r#"{"Id":3,"Name":"X"}"#).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let response = post(&app, "/Books/Edit/2", "application/json", r#"{"Name":"X"}"#).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let response = post(&app, "/Books/Edit/2", "application/x-www-form-urlencoded", "Id=two&Name=X").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(store.get(BookId::new(3)).unwrap().name, "eBook - Chemical Engineering 2016");
    }

    #[tokio::test]
    async fn edit_unknown_book_is_not_found() {
        let (app, store) = app();
        let response = post(&app, "/Books/Edit/77", "application/json", r#"{"Id":77,"Name":"X"}"#).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(store.len(), 23);
    }

    #[tokio::test]
    async fn edit_rejects_blank_name() {
        let (app, _) = app();
        let response = post(&app, "/Books/Edit/1", "application/json", r#"{"Id":1,"Name":""}"#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn body_limit_applies() {
        let store = Arc::new(InMemoryBookStore::new());
        let config = ServerConfig {
            max_body_bytes: 16,
            ..ServerConfig::default()
        };
        let app = build_router(AppState::new(store.clone()), &config);
        let body = format!(r#"{{"Name":"{}"}}"#, "x".repeat(64));
        let response = post(&app, "/Books/Create", "application/json", body).await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body: ErrorBody = json(response).await;
        assert_eq!(body.error, "payload_too_large");
        assert!(store.is_empty());
    }
}
