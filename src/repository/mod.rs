//! Repository layer for book storage

pub mod books;

pub use books::InMemoryBookStore;

use crate::{error::AppResult, models::Book};

/// Storage backend for book records.
///
/// Implementations keep insertion order and must run each mutating call
/// as one indivisible step with respect to concurrent callers.
pub trait BookStore: Send + Sync {
    /// Append a record. Fails with `Conflict` if the id is already taken.
    fn insert(&self, book: Book) -> AppResult<()>;

    /// Copy of every record, in insertion order
    fn snapshot(&self) -> AppResult<Vec<Book>>;

    fn find(&self, id: &str) -> AppResult<Option<Book>>;

    /// Run `apply` against a draft of the record and store the draft if it
    /// returns `Ok`. Returns `Ok(None)` without calling `apply` when the id
    /// is unknown; on error the stored record is left untouched.
    fn modify(
        &self,
        id: &str,
        apply: &mut dyn FnMut(&mut Book) -> AppResult<()>,
    ) -> AppResult<Option<Book>>;

    /// Remove a record, returning it if it existed
    fn remove(&self, id: &str) -> AppResult<Option<Book>>;
}
