use async_graphql::http::GraphiQLSource;
use async_graphql::{EmptySubscription, Request, Response, Schema};
use async_graphql_axum::rejection::GraphQLRejection;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::response::{Html, IntoResponse};
use axum::routing::get;

use crate::datamodel::Store;

mod dataloader;
mod loaders;
mod schema;

use dataloader::DataLoader;
use loaders::{LoadAuthors, LoadBooks};
use schema::{MutationRoot, QueryRoot};

/// Where the GraphQL endpoint and the GraphiQL page are mounted.
pub const ENDPOINT: &str = "/graphql";

type LibrarySchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// The executable schema together with the store its resolvers read from.
#[derive(Clone)]
pub struct Library {
    schema: LibrarySchema,
    store: Store,
}

impl Library {
    pub fn new(store: Store) -> Self {
        let schema = Schema::build(QueryRoot, MutationRoot, EmptySubscription)
            .data(store.clone())
            .finish();
        Self { schema, store }
    }

    /// Executes one request with a fresh set of relation loaders.
    pub async fn execute(&self, req: Request) -> Response {
        let load_authors = DataLoader::new(LoadAuthors::new(self.store.clone()));
        let load_books = DataLoader::new(LoadBooks::new(self.store.clone()));
        let req = req.data(load_authors.clone()).data(load_books.clone());

        let execute = self.schema.execute(req);
        load_books.wrap(load_authors.wrap(execute)).await
    }

    pub fn sdl(&self) -> String {
        self.schema.sdl()
    }
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(ENDPOINT).finish())
}

fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::ACCEPT)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| value.contains("text/html"))
}

/// Browsers get GraphiQL, every other client gets the query in the URL executed.
#[axum::debug_handler]
async fn graphql_get(
    State(library): State<Library>,
    headers: HeaderMap,
    req: Result<GraphQLRequest, GraphQLRejection>,
) -> axum::response::Response {
    if accepts_html(&headers) {
        return graphiql().await.into_response();
    }
    match req {
        Ok(req) => GraphQLResponse::from(library.execute(req.into_inner()).await).into_response(),
        Err(rejection) => rejection.into_response(),
    }
}

#[axum::debug_handler]
async fn graphql_handler(State(library): State<Library>, req: GraphQLRequest) -> GraphQLResponse {
    library.execute(req.into_inner()).await.into()
}

pub fn make_app(store: Store) -> Router {
    Router::new()
        .route(ENDPOINT, get(graphql_get).post(graphql_handler))
        .with_state(Library::new(store))
}
