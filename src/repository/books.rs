//! In-memory book store

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::BookStore;
use crate::{
    error::{AppError, AppResult},
    models::Book,
};

/// Book store backed by a `Vec` behind a single lock.
///
/// Lookups are linear scans. Contents live for the lifetime of the value.
#[derive(Default)]
pub struct InMemoryBookStore {
    books: RwLock<Vec<Book>>,
}

impl InMemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, Vec<Book>>> {
        self.books
            .read()
            .map_err(|_| AppError::Internal("book store lock poisoned".to_string()))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, Vec<Book>>> {
        self.books
            .write()
            .map_err(|_| AppError::Internal("book store lock poisoned".to_string()))
    }
}

impl BookStore for InMemoryBookStore {
    fn insert(&self, book: Book) -> AppResult<()> {
        let mut books = self.write()?;
        if books.iter().any(|b| b.id == book.id) {
            return Err(AppError::Conflict(format!("Book {} already exists", book.id)));
        }
        books.push(book);
        Ok(())
    }

    fn snapshot(&self) -> AppResult<Vec<Book>> {
        Ok(self.read()?.clone())
    }

    fn find(&self, id: &str) -> AppResult<Option<Book>> {
        Ok(self.read()?.iter().find(|b| b.id == id).cloned())
    }

    fn modify(
        &self,
        id: &str,
        apply: &mut dyn FnMut(&mut Book) -> AppResult<()>,
    ) -> AppResult<Option<Book>> {
        let mut books = self.write()?;
        let Some(stored) = books.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };

        let mut draft = stored.clone();
        apply(&mut draft)?;
        *stored = draft.clone();
        Ok(Some(draft))
    }

    fn remove(&self, id: &str) -> AppResult<Option<Book>> {
        let mut books = self.write()?;
        Ok(books
            .iter()
            .position(|b| b.id == id)
            .map(|index| books.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn book(id: &str, name: &str) -> Book {
        let now = Utc::now();
        Book {
            id: id.to_string(),
            name: name.to_string(),
            year: 2020,
            author: "A".into(),
            summary: "S".into(),
            publisher: "P".into(),
            page_count: 10,
            read_page: 0,
            reading: false,
            finished: false,
            inserted_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_insert_keeps_order() {
        let store = InMemoryBookStore::new();
        store.insert(book("1", "first")).unwrap();
        store.insert(book("2", "second")).unwrap();
        store.insert(book("3", "third")).unwrap();

        let ids: Vec<_> = store.snapshot().unwrap().into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_insert_duplicate_id() {
        let store = InMemoryBookStore::new();
        store.insert(book("1", "first")).unwrap();
        let err = store.insert(book("1", "again")).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(store.snapshot().unwrap().len(), 1);
    }

    #[test]
    fn test_find() {
        let store = InMemoryBookStore::new();
        store.insert(book("1", "first")).unwrap();
        assert_eq!(store.find("1").unwrap().map(|b| b.name), Some("first".to_string()));
        assert!(store.find("missing").unwrap().is_none());
    }

    #[test]
    fn test_modify_applies_draft() {
        let store = InMemoryBookStore::new();
        store.insert(book("1", "first")).unwrap();

        let updated = store
            .modify("1", &mut |b: &mut Book| {
                b.name = "renamed".into();
                Ok(())
            })
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "renamed");
        assert_eq!(store.find("1").unwrap().unwrap().name, "renamed");
    }

    #[test]
    fn test_modify_unknown_id_skips_closure() {
        let store = InMemoryBookStore::new();
        let mut called = false;
        let result = store
            .modify("missing", &mut |_: &mut Book| {
                called = true;
                Ok(())
            })
            .unwrap();
        assert!(result.is_none());
        assert!(!called);
    }

    #[test]
    fn test_modify_error_leaves_record_untouched() {
        let store = InMemoryBookStore::new();
        store.insert(book("1", "first")).unwrap();

        let err = store
            .modify("1", &mut |b: &mut Book| {
                b.name = "half-written".into();
                Err(AppError::Validation("nope".into()))
            })
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.find("1").unwrap().unwrap().name, "first");
    }

    #[test]
    fn test_remove() {
        let store = InMemoryBookStore::new();
        store.insert(book("1", "first")).unwrap();
        store.insert(book("2", "second")).unwrap();

        assert_eq!(store.remove("1").unwrap().map(|b| b.id), Some("1".to_string()));
        assert!(store.remove("1").unwrap().is_none());
        assert_eq!(store.snapshot().unwrap().len(), 1);
    }
}
