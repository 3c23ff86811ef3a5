//! Book endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult, ErrorResponse},
    models::book::{Book, BookFilter, BookPayload, BookQuery, BookShort},
    AppState,
};

use super::ApiResponse;

#[derive(Debug, Serialize, ToSchema)]
pub struct BookIdData {
    #[serde(rename = "bookId")]
    pub book_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookListData {
    pub books: Vec<BookShort>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookData {
    pub book: Book,
}

/// Turn a body that could not be read as a payload into a fail envelope
fn read_payload(
    payload: Result<Json<BookPayload>, JsonRejection>,
    context: &str,
) -> AppResult<BookPayload> {
    payload
        .map(|Json(payload)| payload)
        .map_err(|rejection| AppError::BadRequest(format!("{} {}", context, rejection.body_text())))
}

/// Add a book to the shelf
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookPayload,
    responses(
        (status = 201, description = "Book created; data holds the new bookId", body = BookIdData),
        (status = 400, description = "Missing field or readPage above pageCount", body = ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<BookIdData>>)> {
    let payload = read_payload(payload, "Gagal menambahkan buku.")?;
    let book_id = state.services.books.create(payload)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some("Buku berhasil ditambahkan"),
            Some(BookIdData { book_id }),
        )),
    ))
}

/// List books, optionally filtered
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(BookQuery),
    responses(
        (status = 200, description = "Matching books as id/name/publisher", body = BookListData)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Json<ApiResponse<BookListData>>> {
    let books = state
        .services
        .books
        .list(BookFilter::from(query))?
        .collect();

    Ok(Json(ApiResponse::data(BookListData { books })))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = BookData),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<BookData>>> {
    let book = state.services.books.get(&id)?;
    Ok(Json(ApiResponse::data(BookData { book })))
}

/// Update an existing book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    request_body = BookPayload,
    responses(
        (status = 200, description = "Book updated"),
        (status = 400, description = "Missing field or readPage above pageCount", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> AppResult<Json<ApiResponse<()>>> {
    // An unknown id is reported even when the body is unreadable
    let payload = match read_payload(payload, "Gagal memperbarui buku.") {
        Ok(payload) => payload,
        Err(err) => {
            state.services.books.get(&id).map_err(|_| {
                AppError::NotFound("Gagal memperbarui buku. Id tidak ditemukan".to_string())
            })?;
            return Err(err);
        }
    };

    state.services.books.update(&id, payload)?;
    Ok(Json(ApiResponse::message("Buku berhasil diperbarui")))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.services.books.delete(&id)?;
    Ok(Json(ApiResponse::message("Buku berhasil dihapus")))
}
