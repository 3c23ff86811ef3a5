//! Book model, request payloads and validation rules

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Message appended when the last read page lies past the end of the book
pub const READ_PAGE_EXCEEDS_PAGE_COUNT: &str = "readPage tidak boleh lebih besar dari pageCount";

/// Stored book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub name: String,
    pub year: i32,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    pub page_count: i64,
    pub read_page: i64,
    pub reading: bool,
    /// Derived: `pageCount == readPage`
    pub finished: bool,
    pub inserted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Short book representation for lists
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct BookShort {
    pub id: String,
    pub name: String,
    pub publisher: String,
}

/// Create / update book request.
///
/// Every field is optional at the wire level so that missing keys can be
/// reported by [`validate_payload`] instead of failing deserialization.
/// Unknown keys (`finished`, `id`, timestamps) are ignored.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    #[validate(length(min = 1, message = "Mohon isi nama buku"))]
    pub name: Option<String>,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    #[validate(range(min = 0, message = "pageCount tidak boleh negatif"))]
    pub page_count: Option<i64>,
    #[validate(range(min = 0, message = "readPage tidak boleh negatif"))]
    pub read_page: Option<i64>,
    pub reading: Option<bool>,
}

impl BookPayload {
    /// Labels of required fields that are absent, in declaration order
    fn missing_fields(&self) -> impl Iterator<Item = &'static str> {
        [
            ("nama", self.name.is_some()),
            ("tahun", self.year.is_some()),
            ("penulis", self.author.is_some()),
            ("ringkasan", self.summary.is_some()),
            ("penerbit", self.publisher.is_some()),
            ("pageCount", self.page_count.is_some()),
            ("readPage", self.read_page.is_some()),
            ("reading", self.reading.is_some()),
        ]
        .into_iter()
        .filter(|(_, present)| !present)
        .map(|(label, _)| label)
    }
}

/// Check a payload and return every rule it breaks.
///
/// With `is_edit` set, absent fields are not reported. Presence is strict:
/// `0` and `false` count as supplied values. An empty `name` is rejected.
pub fn validate_payload(payload: &BookPayload, is_edit: bool) -> Vec<String> {
    let mut errors: Vec<String> = Vec::new();

    if !is_edit {
        errors.extend(payload.missing_fields().map(|label| format!("Mohon isi {} buku", label)));
    }

    if let Err(invalid) = payload.validate() {
        let mut fields: Vec<_> = invalid.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        for (field, field_errors) in fields {
            for error in field_errors.iter() {
                errors.push(match &error.message {
                    Some(message) => message.to_string(),
                    None => format!("{} tidak valid", field),
                });
            }
        }
    }

    if let (Some(read_page), Some(page_count)) = (payload.read_page, payload.page_count) {
        if read_page > page_count {
            errors.push(READ_PAGE_EXCEEDS_PAGE_COUNT.to_string());
        }
    }

    errors
}

impl Book {
    /// Build a new record from a payload that passed validation.
    ///
    /// Returns `None` if any required field is still absent.
    pub fn from_payload(id: String, payload: &BookPayload, now: DateTime<Utc>) -> Option<Self> {
        let page_count = payload.page_count?;
        let read_page = payload.read_page?;
        Some(Self {
            id,
            name: payload.name.clone()?,
            year: payload.year?,
            author: payload.author.clone()?,
            summary: payload.summary.clone()?,
            publisher: payload.publisher.clone()?,
            page_count,
            read_page,
            reading: payload.reading?,
            finished: page_count == read_page,
            inserted_at: now,
            updated_at: now,
        })
    }

    /// Merge payload fields over this record.
    ///
    /// Absent fields keep their value. `id` and `inserted_at` never change;
    /// `updated_at` never moves backwards.
    pub fn apply(&mut self, payload: &BookPayload, now: DateTime<Utc>) {
        macro_rules! merge_field {
            ($($field:ident),*) => {
                $(
                    if let Some(ref value) = payload.$field {
                        self.$field = value.clone();
                    }
                )*
            };
        }

        merge_field!(name, year, author, summary, publisher, page_count, read_page, reading);

        self.finished = self.page_count == self.read_page;
        self.updated_at = now.max(self.updated_at);
    }

    pub fn to_short(&self) -> BookShort {
        BookShort {
            id: self.id.clone(),
            name: self.name.clone(),
            publisher: self.publisher.clone(),
        }
    }
}

/// Query parameters for listing books
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct BookQuery {
    /// Case-insensitive substring of the book name
    pub name: Option<String>,
    /// `1` for books being read, any other value for the rest
    pub reading: Option<String>,
    /// `1` for finished books, any other value for the rest
    pub finished: Option<String>,
}

/// Conjunctive filter applied when listing books
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookFilter {
    /// Lowercased name fragment
    pub name: Option<String>,
    pub reading: Option<bool>,
    pub finished: Option<bool>,
}

impl BookFilter {
    pub fn matches(&self, book: &Book) -> bool {
        if let Some(ref name) = self.name {
            if !book.name.to_lowercase().contains(name) {
                return false;
            }
        }
        if self.reading.is_some_and(|reading| book.reading != reading) {
            return false;
        }
        if self.finished.is_some_and(|finished| book.finished != finished) {
            return false;
        }
        true
    }
}

impl From<BookQuery> for BookFilter {
    fn from(query: BookQuery) -> Self {
        Self {
            name: query.name.filter(|n| !n.is_empty()).map(|n| n.to_lowercase()),
            reading: query.reading.map(|r| r == "1"),
            finished: query.finished.map(|f| f == "1"),
        }
    }
}
