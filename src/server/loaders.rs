use std::collections::HashMap;

use async_graphql::Context;
use tracing::debug;

use crate::datamodel::Store;

use super::dataloader::{BatchLoader, DataLoader};
use super::schema::{Author, Book};

pub trait Loaders {
    fn load_author(&self, id: i32) -> impl Future<Output = Option<Author>> + Send;
    fn load_books(&self, author_id: i32) -> impl Future<Output = Vec<Book>> + Send;
    /// Forgets everything loaded so far in this request.
    fn invalidate_loaders(&self);
}

impl Loaders for Context<'_> {
    async fn load_author(&self, id: i32) -> Option<Author> {
        self.data_unchecked::<DataLoader<LoadAuthors>>()
            .load(id)
            .await
    }

    async fn load_books(&self, author_id: i32) -> Vec<Book> {
        self.data_unchecked::<DataLoader<LoadBooks>>()
            .load(author_id)
            .await
    }

    fn invalidate_loaders(&self) {
        self.data_unchecked::<DataLoader<LoadAuthors>>().clear();
        self.data_unchecked::<DataLoader<LoadBooks>>().clear();
    }
}

/// Authors keyed by their id.
pub struct LoadAuthors {
    store: Store,
}

impl LoadAuthors {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

impl BatchLoader for LoadAuthors {
    type K = i32;
    type V = Option<Author>;

    fn load_batch(
        &mut self,
        keys: Vec<Self::K>,
    ) -> impl Future<Output = HashMap<Self::K, Self::V>> + Send + 'static {
        let store = self.store.clone();
        async move {
            debug!(?keys, "resolving authors");

            store
                .authors_with_ids(&keys)
                .into_iter()
                .map(|(id, author)| (id, author.map(Author::from)))
                .collect()
        }
    }
}

/// Books keyed by the id of the author they point at.
pub struct LoadBooks {
    store: Store,
}

impl LoadBooks {
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

impl BatchLoader for LoadBooks {
    type K = i32;
    type V = Vec<Book>;

    fn load_batch(
        &mut self,
        keys: Vec<Self::K>,
    ) -> impl Future<Output = HashMap<Self::K, Self::V>> + Send + 'static {
        let store = self.store.clone();
        async move {
            debug!(?keys, "resolving books by author");

            store
                .books_by_authors(&keys)
                .into_iter()
                .map(|(id, books)| (id, books.into_iter().map(Book::from).collect()))
                .collect()
        }
    }
}
