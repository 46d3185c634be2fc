use axum::extract::{Path, State};
use axum::response::Json;

use shelf_types::{Book, BookId};

use crate::error::{ServerError, ServerResult};
use crate::extract::BookForm;
use crate::state::AppState;

/// `GET /Books` -- every book, ordered by id.
pub async fn list_books(State(state): State<AppState>) -> Json<Vec<Book>> {
    let books = state.store.list();
    tracing::debug!(count = books.len(), "listing books");
    Json(books)
}

/// `GET /Books/Details/:id`. A missing or non-numeric id is treated like an
/// unknown one.
pub async fn book_details(
    State(state): State<AppState>,
    id: Option<Path<String>>,
) -> ServerResult<Json<Book>> {
    let id = parse_route_id(id.as_ref().map(|Path(raw)| raw.as_str()))?;
    let book = state
        .store
        .get(id)
        .ok_or_else(|| ServerError::NotFound(format!("book {id}")))?;
    tracing::debug!(%id, "book details");
    Ok(Json(book))
}

/// `POST /Books/Create` -- binds `Name` only.
pub async fn create_book(
    State(state): State<AppState>,
    form: BookForm,
) -> ServerResult<Json<Book>> {
    let new_book = form.to_new_book()?;
    let book = state.store.insert(new_book)?;
    tracing::info!(id = %book.id, name = %book.name, "book created");
    Ok(Json(book))
}

/// `POST /Books/Edit/:id` -- binds `Id` and `Name`. The route id must match
/// the posted id.
pub async fn edit_book(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    form: BookForm,
) -> ServerResult<Json<Book>> {
    let id = parse_route_id(Some(&raw_id))?;
    if form.book_id() != Some(id) {
        return Err(ServerError::NotFound(format!(
            "route id {id} does not match posted id"
        )));
    }
    let book = form.to_book()?;
    let book = state.store.update(book)?;
    tracing::info!(id = %book.id, name = %book.name, "book updated");
    Ok(Json(book))
}

fn parse_route_id(raw: Option<&str>) -> ServerResult<BookId> {
    let raw = raw.ok_or_else(|| ServerError::NotFound("no book id in route".into()))?;
    raw.parse()
        .map_err(|_| ServerError::NotFound(format!("book {raw:?}")))
}
