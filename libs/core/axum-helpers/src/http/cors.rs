use tower_http::cors::CorsLayer;

/// CORS layer that allows any origin, method and header.
///
/// Browser clients of the catalogue API are not known in advance, so every
/// origin is accepted. Credentials are not allowed with a wildcard origin.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}
