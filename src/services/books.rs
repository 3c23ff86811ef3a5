//! Book lifecycle service

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    config::BooksConfig,
    error::{AppError, AppResult},
    models::book::{
        validate_payload, Book, BookFilter, BookPayload, BookShort, READ_PAGE_EXCEEDS_PAGE_COUNT,
    },
    repository::BookStore,
};

const CREATE_FAILED: &str = "Gagal menambahkan buku.";
const UPDATE_FAILED: &str = "Gagal memperbarui buku.";

#[derive(Clone)]
pub struct BookService {
    store: Arc<dyn BookStore>,
    partial_updates: bool,
}

impl BookService {
    pub fn new(store: Arc<dyn BookStore>, config: &BooksConfig) -> Self {
        Self {
            store,
            partial_updates: config.partial_updates,
        }
    }

    /// Validate and store a new book, returning its generated id
    pub fn create(&self, payload: BookPayload) -> AppResult<String> {
        let errors = validate_payload(&payload, false);
        if !errors.is_empty() {
            tracing::debug!("Rejected new book: {:?}", errors);
            return Err(AppError::Validation(format!(
                "{} {}",
                CREATE_FAILED,
                errors.join(", ")
            )));
        }

        let id = Uuid::new_v4().to_string();
        let book = Book::from_payload(id.clone(), &payload, Utc::now())
            .ok_or_else(|| AppError::Internal("validated payload is incomplete".to_string()))?;
        self.store.insert(book)?;

        tracing::info!("Book created: id={}", id);
        Ok(id)
    }

    /// Books matching every filter criterion, in insertion order.
    ///
    /// The sequence is computed lazily over a snapshot taken at call time.
    pub fn list(&self, filter: BookFilter) -> AppResult<impl Iterator<Item = BookShort>> {
        let books = self.store.snapshot()?;
        Ok(books
            .into_iter()
            .filter(move |book| filter.matches(book))
            .map(|book| book.to_short()))
    }

    /// Number of books on the shelf
    pub fn count(&self) -> AppResult<usize> {
        Ok(self.store.snapshot()?.len())
    }

    pub fn get(&self, id: &str) -> AppResult<Book> {
        self.store
            .find(id)?
            .ok_or_else(|| AppError::NotFound("Buku tidak ditemukan".to_string()))
    }

    /// Merge a payload into an existing book.
    ///
    /// Unknown ids fail before the payload is looked at.
    pub fn update(&self, id: &str, payload: BookPayload) -> AppResult<Book> {
        let errors = validate_payload(&payload, self.partial_updates);
        let now = Utc::now();

        let updated = self
            .store
            .modify(id, &mut |book: &mut Book| {
                if !errors.is_empty() {
                    return Err(AppError::Validation(format!(
                        "{} {}",
                        UPDATE_FAILED,
                        errors.join(", ")
                    )));
                }

                book.apply(&payload, now);

                // Only reachable with partial payloads
                if book.read_page > book.page_count {
                    return Err(AppError::Validation(format!(
                        "{} {}",
                        UPDATE_FAILED, READ_PAGE_EXCEEDS_PAGE_COUNT
                    )));
                }
                Ok(())
            })
            .map_err(|e| {
                tracing::debug!("Rejected update of book {}: {}", id, e);
                e
            })?
            .ok_or_else(|| {
                AppError::NotFound(format!("{} Id tidak ditemukan", UPDATE_FAILED))
            })?;

        tracing::info!("Book updated: id={}", id);
        Ok(updated)
    }

    pub fn delete(&self, id: &str) -> AppResult<()> {
        self.store
            .remove(id)?
            .ok_or_else(|| AppError::NotFound("Buku gagal dihapus. Id tidak ditemukan".to_string()))?;

        tracing::info!("Book deleted: id={}", id);
        Ok(())
    }
}
