use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    IdPath, ParsedQuery, ValidatedJson,
    errors::responses::{
        BadRequestIdResponse, BadRequestQueryResponse, BadRequestResponse,
        BadRequestValidationResponse, InternalServerErrorResponse, NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::entity;
use crate::error::{ProductError, ProductResult};
use crate::models::{Product, SearchQuery, SortQuery, UpdateQuery};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// Public path the product router is mounted at; used for `Location` headers.
pub const PRODUCTS_PATH: &str = "/api/products";

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        get_product,
        search_products,
        total_count,
        products_by_category,
        sort_products,
        create_product,
        update_product_by_query,
        update_product,
        delete_product,
        delete_all_products,
    ),
    components(
        schemas(Product),
        responses(
            NotFoundResponse,
            BadRequestResponse,
            BadRequestIdResponse,
            BadRequestQueryResponse,
            BadRequestValidationResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = entity::Model::TAG, description = "Product catalogue endpoints")
    )
)]
pub struct ApiDoc;

/// Create the product router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/",
            get(list_products)
                .post(create_product)
                .put(update_product_by_query)
                .delete(delete_all_products),
        )
        .route("/search", get(search_products))
        .route("/total-count", get(total_count))
        .route("/category/{category}", get(products_by_category))
        .route("/sort", get(sort_products))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = entity::Model::TAG,
    responses(
        (status = 200, description = "All products, possibly empty", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> Json<Vec<Product>> {
    Json(service.list_products().await)
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> ProductResult<Json<Product>> {
    service
        .get_product(id)
        .await
        .map(Json)
        .ok_or(ProductError::NotFound(id))
}

/// Search products by name substring
#[utoipa::path(
    get,
    path = "/search",
    tag = entity::Model::TAG,
    params(SearchQuery),
    responses(
        (status = 200, description = "Products whose name contains the fragment", body = Vec<Product>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ParsedQuery(query): ParsedQuery<SearchQuery>,
) -> Json<Vec<Product>> {
    Json(service.search_products(&query.name).await)
}

/// Count all products
#[utoipa::path(
    get,
    path = "/total-count",
    tag = entity::Model::TAG,
    responses(
        (status = 200, description = "Number of products", body = u64),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn total_count<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> Json<u64> {
    Json(service.total_count().await)
}

/// List products in a category
#[utoipa::path(
    get,
    path = "/category/{category}",
    tag = entity::Model::TAG,
    params(
        ("category" = String, Path, description = "Exact category name")
    ),
    responses(
        (status = 200, description = "Products in the category", body = Vec<Product>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn products_by_category<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(category): Path<String>,
) -> ProductResult<Json<Vec<Product>>> {
    let products = service.products_by_category(&category).await;
    if products.is_empty() {
        return Err(ProductError::CategoryEmpty(category));
    }
    Ok(Json(products))
}

/// List products ordered by a field
#[utoipa::path(
    get,
    path = "/sort",
    tag = entity::Model::TAG,
    params(SortQuery),
    responses(
        (status = 200, description = "Products in the requested order", body = Vec<Product>),
        (status = 400, response = BadRequestQueryResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn sort_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ParsedQuery(query): ParsedQuery<SortQuery>,
) -> Json<Vec<Product>> {
    Json(
        service
            .sorted_products(query.field(), query.direction())
            .await,
    )
}

/// Create a new product
///
/// Responds 201 even when the store write failed; the body then echoes the
/// submitted product.
#[utoipa::path(
    post,
    path = "",
    tag = entity::Model::TAG,
    request_body = Product,
    responses(
        (status = 201, description = "Product created", body = Product,
            headers(("Location" = String, description = "URL of the new product"))),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<Product>,
) -> impl IntoResponse {
    let product = service.add_product(input.clone()).await.unwrap_or(input);

    let location = format!("{}/{}", PRODUCTS_PATH, product.id);
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(product),
    )
}

async fn apply_update<R: ProductRepository>(
    service: &ProductService<R>,
    requested: i32,
    product: Product,
) -> ProductResult<StatusCode> {
    if product.id != requested {
        return Err(ProductError::IdMismatch {
            requested,
            body: product.id,
        });
    }

    service.update_product(requested, product).await;
    Ok(StatusCode::NO_CONTENT)
}

/// Update a product identified by the `id` query parameter
#[utoipa::path(
    put,
    path = "",
    tag = entity::Model::TAG,
    params(UpdateQuery),
    request_body = Product,
    responses(
        (status = 204, description = "Product updated, or no product had this id"),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product_by_query<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ParsedQuery(query): ParsedQuery<UpdateQuery>,
    ValidatedJson(product): ValidatedJson<Product>,
) -> ProductResult<StatusCode> {
    let requested = query
        .id
        .ok_or_else(|| ProductError::Validation("Query parameter 'id' is required".to_string()))?;
    apply_update(&service, requested, product).await
}

/// Update a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = Product,
    responses(
        (status = 204, description = "Product updated, or no product had this id"),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
    ValidatedJson(product): ValidatedJson<Product>,
) -> ProductResult<StatusCode> {
    apply_update(&service, id, product).await
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product deleted, or no product had this id"),
        (status = 400, response = BadRequestIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    IdPath(id): IdPath,
) -> StatusCode {
    service.delete_product(id).await;
    StatusCode::NO_CONTENT
}

/// Delete every product
#[utoipa::path(
    delete,
    path = "",
    tag = entity::Model::TAG,
    responses(
        (status = 204, description = "All products deleted"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_all_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> StatusCode {
    service.delete_all_products().await;
    StatusCode::NO_CONTENT
}
