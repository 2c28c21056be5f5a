pub mod models;
pub mod openapi;
pub mod providers;
pub mod routes;
pub mod service;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use bookshelf_kernel::{settings::BookSettings, InitCtx, Module};

use crate::utils;
use providers::{Clock, IdGenerator, RandomIdGenerator, SystemClock};
use service::BookService;

/// Books module: an in-memory collection served under `/books`
pub struct BooksModule {
    service: Arc<BookService>,
}

impl BooksModule {
    pub fn new(settings: &BookSettings) -> Self {
        Self::with_providers(
            Arc::new(RandomIdGenerator::new(settings.id_length)),
            Arc::new(SystemClock),
        )
    }

    /// Build the module with explicit id and time sources
    pub fn with_providers(ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self {
            service: Arc::new(BookService::new(ids, clock)),
        }
    }

    pub fn service(&self) -> Arc<BookService> {
        Arc::clone(&self.service)
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            prefix = %utils::log_prefix(self.name()),
            environment = ?ctx.settings.environment,
            id_length = ctx.settings.books.id_length,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.service())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(openapi::fragment())
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        // Records live only in memory and are dropped with the process.
        let discarded = self.service.count().await;
        tracing::info!(module = self.name(), discarded, "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(settings: &BookSettings) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(settings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_fragment_lists_all_operations() {
        let module = BooksModule::new(&BookSettings::default());
        let spec = module.openapi().unwrap();

        for method in ["get", "post"] {
            assert!(spec["paths"]["/books"][method].is_object());
        }
        for method in ["get", "put", "delete"] {
            assert!(spec["paths"]["/books/{bookId}"][method].is_object());
        }
        assert!(spec["components"]["schemas"]["Book"].is_object());
    }

    #[tokio::test]
    async fn routes_share_the_module_store() {
        use axum::{
            body::Body,
            http::{header, Method, Request, StatusCode},
        };
        use tower::ServiceExt;

        let module = BooksModule::new(&BookSettings::default());
        let request = Request::builder()
            .method(Method::POST)
            .uri("/books")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name":"Grit","pageCount":10,"readPage":1}"#))
            .unwrap();

        let response = module.routes().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(module.service().count().await, 1);
    }
}
