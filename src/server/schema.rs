use async_graphql::{ComplexObject, Context, Object, SimpleObject};

use crate::datamodel::{self, Store};

use super::loaders::Loaders;

/// this represents book by an author
#[derive(SimpleObject, Clone, Debug)]
#[graphql(name = "books", complex)]
pub struct Book {
    pub id: i32,
    pub name: String,
    pub author_id: i32,
}

#[ComplexObject]
impl Book {
    async fn author(&self, ctx: &Context<'_>) -> Option<Author> {
        ctx.load_author(self.author_id).await
    }
}

impl From<datamodel::Book> for Book {
    fn from(book: datamodel::Book) -> Self {
        Self {
            id: book.id,
            name: book.name,
            author_id: book.author_id,
        }
    }
}

/// this represents author of a book
#[derive(SimpleObject, Clone, Debug)]
#[graphql(name = "author", complex)]
pub struct Author {
    pub id: i32,
    pub name: String,
}

#[ComplexObject]
impl Author {
    async fn books(&self, ctx: &Context<'_>) -> Option<Vec<Option<Book>>> {
        nullable_list(ctx.load_books(self.id).await)
    }
}

impl From<datamodel::Author> for Author {
    fn from(author: datamodel::Author) -> Self {
        Self {
            id: author.id,
            name: author.name,
        }
    }
}

// The published schema declares lists as `[T]`, nullable at both levels.
fn nullable_list<T>(items: impl IntoIterator<Item = impl Into<T>>) -> Option<Vec<Option<T>>> {
    Some(items.into_iter().map(|item| Some(item.into())).collect())
}

fn store<'a>(ctx: &'a Context<'_>) -> &'a Store {
    ctx.data_unchecked::<Store>()
}

pub struct QueryRoot;

/// root query
#[Object(name = "Query")]
impl QueryRoot {
    /// a single book
    async fn book(&self, ctx: &Context<'_>, id: Option<i32>) -> Option<Book> {
        store(ctx).book(id?).map(Book::from)
    }

    /// list of all books
    async fn books(&self, ctx: &Context<'_>) -> Option<Vec<Option<Book>>> {
        nullable_list(store(ctx).books())
    }

    /// a single author
    async fn author(&self, ctx: &Context<'_>, id: Option<i32>) -> Option<Author> {
        store(ctx).author(id?).map(Author::from)
    }

    /// list of all authors
    async fn authors(&self, ctx: &Context<'_>) -> Option<Vec<Option<Author>>> {
        nullable_list(store(ctx).authors())
    }
}

pub struct MutationRoot;

/// root mutation
#[Object(name = "mutation")]
impl MutationRoot {
    /// add a book
    async fn add_book(
        &self,
        ctx: &Context<'_>,
        name: String,
        author_id: i32,
    ) -> async_graphql::Result<Option<Book>> {
        let book = store(ctx).add_book(name, author_id)?;
        ctx.invalidate_loaders();
        Ok(Some(book.into()))
    }

    /// add an author
    async fn add_author(
        &self,
        ctx: &Context<'_>,
        name: String,
    ) -> async_graphql::Result<Option<Author>> {
        let author = store(ctx).add_author(name)?;
        ctx.invalidate_loaders();
        Ok(Some(author.into()))
    }
}
