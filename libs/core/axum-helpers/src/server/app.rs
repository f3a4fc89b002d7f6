use super::shutdown::{ShutdownCoordinator, coordinated_shutdown};
use crate::errors::handlers::{not_found, panic_response};
use crate::http::{create_permissive_cors_layer, security_headers, strict_transport_security};
use axum::{Router, middleware};
use core_config::Environment;
use core_config::server::ServerConfig;
use std::io;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Interactive API explorer.
pub const SWAGGER_UI_PATH: &str = "/api-docs";
/// Generated OpenAPI document.
pub const OPENAPI_JSON_PATH: &str = "/openapi.json";

/// Wraps the API routes with documentation and the cross-cutting layers.
///
/// This sets up:
/// - Swagger UI at [`SWAGGER_UI_PATH`], document at [`OPENAPI_JSON_PATH`]
/// - API routes nested under `/api`
/// - JSON 404 fallback
/// - A panic boundary answering `500 INTERNAL_ERROR`
/// - Tracing, security headers (HSTS in production), permissive CORS, compression
///
/// Health endpoints are merged by the app with [`health_router`](super::health_router).
///
/// # Example
/// ```ignore
/// let api_routes = Router::new().nest("/products", domain_products::router(service));
/// let router = create_router::<ApiDoc>(api_routes, &Environment::Production);
/// ```
pub fn create_router<T>(apis: Router, environment: &Environment) -> Router
where
    T: OpenApi + 'static,
{
    let router = Router::new()
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, T::openapi()))
        .nest("/api", apis)
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers));

    let router = if environment.use_https() {
        router.layer(middleware::from_fn(strict_transport_security))
    } else {
        router
    };

    router
        .layer(create_permissive_cors_layer())
        .layer(CompressionLayer::new())
}

/// Serve `router` until SIGINT/SIGTERM, then run `cleanup` within `shutdown_timeout`.
///
/// In-flight requests are drained before the function returns.
///
/// # Example
/// ```ignore
/// let cleanup = async move {
///     db.close().await.ok();
/// };
///
/// create_production_app(router, &config, Duration::from_secs(30), cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let (coordinator, mut shutdown_rx) = ShutdownCoordinator::new();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let cleanup_handle = tokio::spawn(async move {
        // Sender dropped also counts as shutdown
        let _ = shutdown_rx.recv().await;

        info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(_) => info!("Cleanup completed successfully"),
            Err(_) => {
                tracing::warn!(
                    "Cleanup exceeded timeout of {:?}, forcing shutdown",
                    shutdown_timeout
                );
            }
        }
    });

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(coordinated_shutdown(coordinator))
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    cleanup_handle.await.ok();

    serve_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
        routing::get,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[derive(OpenApi)]
    #[openapi(info(title = "test"))]
    struct EmptyDoc;

    fn apis() -> Router {
        Router::new()
            .route("/ok", get(|| async { "ok" }))
            .route(
                "/boom",
                get(|| async {
                    if true {
                        panic!("handler blew up");
                    }
                    "unreachable"
                }),
            )
    }

    async fn send(router: Router, uri: &str) -> axum::response::Response {
        router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_routes_are_nested_under_api() {
        let router = create_router::<EmptyDoc>(apis(), &Environment::Development);
        let response = send(router, "/api/ok").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_returns_json_404() {
        let router = create_router::<EmptyDoc>(apis(), &Environment::Development);
        let response = send(router, "/nope").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_panic_becomes_internal_error_envelope() {
        let router = create_router::<EmptyDoc>(apis(), &Environment::Development);
        let response = send(router, "/api/boom").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "INTERNAL_ERROR");
        assert_eq!(body["message"], "Internal Server Error.");
        assert_eq!(body["code"], 1005);
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let router = create_router::<EmptyDoc>(apis(), &Environment::Development);
        let response = send(router, OPENAPI_JSON_PATH).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_hsts_only_in_production() {
        let dev = send(create_router::<EmptyDoc>(apis(), &Environment::Development), "/api/ok").await;
        assert!(dev.headers().get(header::STRICT_TRANSPORT_SECURITY).is_none());

        let prod = send(create_router::<EmptyDoc>(apis(), &Environment::Production), "/api/ok").await;
        assert!(prod.headers().get(header::STRICT_TRANSPORT_SECURITY).is_some());
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let router = create_router::<EmptyDoc>(apis(), &Environment::Development);
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/ok")
                    .header(header::ORIGIN, "https://shop.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }
}
