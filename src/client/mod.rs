use cynic::http::ReqwestExt;
use cynic::serde;
use reqwest::Url;

pub struct Client {
    client: reqwest::Client,
    url: Url,
}

impl Client {
    pub fn new(url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    /// Sends a query or mutation operation.
    pub async fn run<Op, Input>(&self, op: cynic::Operation<Op, Input>) -> cynic::GraphQlResponse<Op>
    where
        Input: serde::Serialize,
        Op: serde::de::DeserializeOwned + 'static,
    {
        self.client
            .post(self.url.clone())
            .run_graphql(op)
            .await
            .unwrap()
    }
}

#[cynic::schema("library")]
mod schema {}

#[derive(cynic::QueryFragment, Debug, PartialEq)]
#[cynic(graphql_type = "author")]
pub struct AuthorSummary {
    pub id: i32,
    pub name: String,
}

#[derive(cynic::QueryFragment, Debug, PartialEq)]
#[cynic(graphql_type = "books")]
pub struct BookSummary {
    pub id: i32,
    pub name: String,
    pub author_id: i32,
}

#[derive(cynic::QueryFragment, Debug, PartialEq)]
#[cynic(graphql_type = "author")]
pub struct AuthorWithBooks {
    pub id: i32,
    pub name: String,
    pub books: Option<Vec<Option<BookSummary>>>,
}

#[derive(cynic::QueryFragment, Debug, PartialEq)]
#[cynic(graphql_type = "books")]
pub struct BookWithAuthor {
    pub id: i32,
    pub name: String,
    pub author_id: i32,
    pub author: Option<AuthorSummary>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query")]
pub struct Catalogue {
    pub authors: Option<Vec<Option<AuthorWithBooks>>>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query")]
pub struct BookList {
    pub books: Option<Vec<Option<BookWithAuthor>>>,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct LookupVariables {
    pub id: Option<i32>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query", variables = "LookupVariables")]
pub struct BookLookup {
    #[arguments(id: $id)]
    pub book: Option<BookWithAuthor>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query", variables = "LookupVariables")]
pub struct AuthorLookup {
    #[arguments(id: $id)]
    pub author: Option<AuthorWithBooks>,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct AddAuthorVariables {
    pub name: String,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "mutation", variables = "AddAuthorVariables")]
pub struct AddAuthor {
    #[arguments(name: $name)]
    pub add_author: Option<AuthorSummary>,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct AddBookVariables {
    pub name: String,
    pub author_id: i32,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "mutation", variables = "AddBookVariables")]
pub struct AddBook {
    #[arguments(name: $name, authorId: $author_id)]
    pub add_book: Option<BookWithAuthor>,
}
