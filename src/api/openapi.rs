//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, books, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library Catalog API",
        version = "0.1.0",
        description = "REST API for a library catalog: authors, books and their associations",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Authors
        authors::list_authors,
        authors::get_author,
        authors::list_author_books,
        authors::add_author,
        authors::edit_author,
        authors::delete_author,
        authors::bulk_import_authors,
        // Books
        books::list_books,
        books::get_book,
        books::list_book_authors,
        books::add_book,
        books::edit_book,
        books::delete_book,
    ),
    components(
        schemas(
            crate::models::Author,
            crate::models::AuthorDetail,
            crate::models::Book,
            crate::models::BookDetail,
            crate::models::AuthorBook,
            crate::api::Message,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "authors", description = "Author management"),
        (name = "books", description = "Book management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
