use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::info;

use crate::error::StoreError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Author {
    pub id: i32,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Book {
    pub id: i32,
    pub name: String,
    /// Not checked against the known authors.
    pub author_id: i32,
}

static SEED_AUTHORS: &[(i32, &str)] = &[
    (1, "J. K. Rowling"),
    (2, "J. R. R. Tolkien"),
    (3, "Brent Weeks"),
];

static SEED_BOOKS: &[(i32, &str, i32)] = &[
    (1, "Harry Potter and the Chamber of Secrets", 1),
    (2, "Harry Potter and the Prisoner of Azkaban", 1),
    (3, "Harry Potter and the Goblet of Fire", 1),
    (4, "The Fellowship of the Ring", 2),
    (5, "The Two Towers", 2),
    (6, "The Return of the King", 2),
    (7, "The Way of Shadows", 3),
    (8, "Beyond the Shadows", 3),
];

/// The id of the record appended after `len` existing ones.
fn next_id(len: usize) -> Option<i32> {
    i32::try_from(len).ok()?.checked_add(1)
}

#[derive(Default)]
struct Records {
    authors: Vec<Author>,
    books: Vec<Book>,
}

/// The authors and books known to the running process.
///
/// Cloning is cheap and every clone sees the same records. Both sequences only
/// ever grow, and new ids are derived from their current length, so ids stay
/// unique only as long as nothing is ever removed.
#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<Mutex<Records>>,
}

impl Store {
    /// A store holding the catalogue the server starts with.
    pub fn seeded() -> Self {
        let records = Records {
            authors: SEED_AUTHORS
                .iter()
                .map(|&(id, name)| Author {
                    id,
                    name: name.into(),
                })
                .collect(),
            books: SEED_BOOKS
                .iter()
                .map(|&(id, name, author_id)| Book {
                    id,
                    name: name.into(),
                    author_id,
                })
                .collect(),
        };
        Self {
            inner: Arc::new(Mutex::new(records)),
        }
    }

    // Records are plain data, a panic elsewhere cannot leave them half-written.
    fn records(&self) -> MutexGuard<'_, Records> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn authors(&self) -> Vec<Author> {
        self.records().authors.clone()
    }

    pub fn books(&self) -> Vec<Book> {
        self.records().books.clone()
    }

    pub fn author(&self, id: i32) -> Option<Author> {
        self.records()
            .authors
            .iter()
            .find(|author| author.id == id)
            .cloned()
    }

    pub fn book(&self, id: i32) -> Option<Book> {
        self.records().books.iter().find(|book| book.id == id).cloned()
    }

    pub fn books_by_author(&self, author_id: i32) -> Vec<Book> {
        self.records()
            .books
            .iter()
            .filter(|book| book.author_id == author_id)
            .cloned()
            .collect()
    }

    /// Looks up several authors in one pass. Every requested id gets an entry,
    /// `None` if no author has that id.
    pub fn authors_with_ids(&self, ids: &[i32]) -> HashMap<i32, Option<Author>> {
        let mut found: HashMap<i32, Option<Author>> = ids.iter().map(|&id| (id, None)).collect();
        for author in &self.records().authors {
            if let Some(slot) = found.get_mut(&author.id) {
                slot.get_or_insert_with(|| author.clone());
            }
        }
        found
    }

    /// Groups the books of several authors in one pass. Every requested id gets
    /// an entry, empty if the author has no books.
    pub fn books_by_authors(&self, ids: &[i32]) -> HashMap<i32, Vec<Book>> {
        let mut found: HashMap<i32, Vec<Book>> =
            ids.iter().map(|&id| (id, Vec::new())).collect();
        for book in &self.records().books {
            if let Some(books) = found.get_mut(&book.author_id) {
                books.push(book.clone());
            }
        }
        found
    }

    /// Fails only once every positive `Int` id is taken.
    pub fn add_author(&self, name: String) -> Result<Author, StoreError> {
        let mut records = self.records();
        let id = next_id(records.authors.len()).ok_or(StoreError::IdsExhausted("authors"))?;
        let author = Author { id, name };
        info!(id = author.id, name = %author.name, "Adding author");
        records.authors.push(author.clone());
        Ok(author)
    }

    /// Fails only once every positive `Int` id is taken.
    pub fn add_book(&self, name: String, author_id: i32) -> Result<Book, StoreError> {
        let mut records = self.records();
        let id = next_id(records.books.len()).ok_or(StoreError::IdsExhausted("books"))?;
        let book = Book {
            id,
            name,
            author_id,
        };
        info!(id = book.id, name = %book.name, author_id, "Adding book");
        records.books.push(book.clone());
        Ok(book)
    }
}
