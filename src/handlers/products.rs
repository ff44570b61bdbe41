use std::str::FromStr;

use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::catalog::{ProductFilter, ProductInput, RawProductFilter, SizeStock};
use crate::domain::pagination::PageRequest;
use crate::errors::AppError;
use crate::handlers::session::Session;
use crate::presenter::{CategoryResponse, PageResponse, ProductDetail, ProductListing};
use crate::Catalog;

// ── Request DTOs ─────────────────────────────────────────────────────────────

/// Shop filters, all optional and passed through as raw strings.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub category: Option<String>,
    pub size: Option<String>,
    #[serde(alias = "min_price")]
    pub min_price: Option<String>,
    #[serde(alias = "max_price")]
    pub max_price: Option<String>,
    pub sort: Option<String>,
    pub featured: Option<String>,
    pub page: Option<String>,
}

impl ProductQuery {
    fn filter(&self) -> ProductFilter {
        ProductFilter::from_raw(RawProductFilter {
            category: self.category.as_deref(),
            size: self.size.as_deref(),
            min_price: self.min_price.as_deref(),
            max_price: self.max_price.as_deref(),
            featured: self.featured.as_deref(),
            sort: self.sort.as_deref(),
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SizeRequest {
    pub size: String,
    #[serde(default)]
    pub stock: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Decimal price as a string to avoid floating-point issues, e.g. "35000"
    pub price: String,
    #[serde(default)]
    pub stock: i32,
    pub category_id: Option<Uuid>,
    /// Image URLs returned by the upload widget.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<SizeRequest>,
    #[serde(default)]
    pub featured: bool,
    /// Whether the product accepts a custom name/number ("flocage").
    #[serde(default)]
    pub customizable: bool,
}

impl TryFrom<ProductRequest> for ProductInput {
    type Error = AppError;

    fn try_from(req: ProductRequest) -> Result<Self, Self::Error> {
        let price = BigDecimal::from_str(req.price.trim())
            .map_err(|_| AppError::BadRequest("InvalidPrice"))?;
        Ok(ProductInput {
            name: req.name,
            description: req.description,
            price,
            stock: req.stock,
            category_id: req.category_id,
            images: req
                .images
                .into_iter()
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty())
                .collect(),
            sizes: req
                .sizes
                .into_iter()
                .map(|s| SizeStock {
                    size: s.size,
                    stock: s.stock,
                })
                .collect(),
            featured: req.featured,
            customizable: req.customizable,
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CategoryRequest {
    pub name: String,
    pub image: Option<String>,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /products
///
/// Filtered, sorted and paginated catalog listing (10 per page).
#[utoipa::path(
    get,
    path = "/products",
    params(
        ("category" = Option<String>, Query, description = "Exact category name"),
        ("size" = Option<String>, Query, description = "Only products offering this size"),
        ("minPrice" = Option<String>, Query, description = "Inclusive lower price bound"),
        ("maxPrice" = Option<String>, Query, description = "Inclusive upper price bound"),
        ("sort" = Option<String>, Query, description = "newest (default), oldest, price_asc, price_desc"),
        ("featured" = Option<String>, Query, description = "true/false"),
        ("page" = Option<String>, Query, description = "Page number (1-based, default 1)"),
    ),
    responses(
        (status = 200, description = "Paginated product listing", body = PageResponse<ProductListing>),
        (status = 500, description = "Internal server error"),
    ),
    tag = "catalog"
)]
pub async fn list_products(
    catalog: web::Data<Catalog>,
    query: web::Query<ProductQuery>,
) -> Result<HttpResponse, AppError> {
    let query = query.into_inner();
    let filter = query.filter();
    let page = PageRequest::from_param(query.page.as_deref());

    let result = web::block(move || catalog.list_products(&filter, page)).await??;

    Ok(HttpResponse::Ok().json(PageResponse::from_page(result, ProductListing::from)))
}

/// GET /products/{id}
#[utoipa::path(
    get,
    path = "/products/{id}",
    params(("id" = Uuid, Path, description = "Product UUID")),
    responses(
        (status = 200, description = "Product found", body = ProductDetail),
        (status = 404, description = "Product not found"),
    ),
    tag = "catalog"
)]
pub async fn get_product(
    catalog: web::Data<Catalog>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let product = web::block(move || catalog.get_product(id)).await??;
    Ok(HttpResponse::Ok().json(ProductDetail::from(product)))
}

/// POST /products
#[utoipa::path(
    post,
    path = "/products",
    request_body = ProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductDetail),
        (status = 400, description = "Invalid product"),
        (status = 401, description = "Admin session required"),
    ),
    tag = "catalog"
)]
pub async fn create_product(
    catalog: web::Data<Catalog>,
    session: Session,
    body: web::Json<ProductRequest>,
) -> Result<HttpResponse, AppError> {
    let input = ProductInput::try_from(body.into_inner())?;
    let product = web::block(move || catalog.create_product(session.email(), input)).await??;
    Ok(HttpResponse::Created().json(ProductDetail::from(product)))
}

/// PUT /products/{id}
///
/// Replaces every field and the full list of size variants.
#[utoipa::path(
    put,
    path = "/products/{id}",
    params(("id" = Uuid, Path, description = "Product UUID")),
    request_body = ProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductDetail),
        (status = 400, description = "Invalid product"),
        (status = 401, description = "Admin session required"),
        (status = 404, description = "Product not found"),
    ),
    tag = "catalog"
)]
pub async fn update_product(
    catalog: web::Data<Catalog>,
    session: Session,
    path: web::Path<Uuid>,
    body: web::Json<ProductRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let input = ProductInput::try_from(body.into_inner())?;
    let product =
        web::block(move || catalog.update_product(session.email(), id, input)).await??;
    Ok(HttpResponse::Ok().json(ProductDetail::from(product)))
}

/// GET /categories
#[utoipa::path(
    get,
    path = "/categories",
    responses((status = 200, description = "All categories by name", body = Vec<CategoryResponse>)),
    tag = "catalog"
)]
pub async fn list_categories(catalog: web::Data<Catalog>) -> Result<HttpResponse, AppError> {
    let categories = web::block(move || catalog.list_categories()).await??;
    let body: Vec<CategoryResponse> = categories.into_iter().map(CategoryResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /categories
#[utoipa::path(
    post,
    path = "/categories",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Missing or duplicate name"),
        (status = 401, description = "Admin session required"),
    ),
    tag = "catalog"
)]
pub async fn create_category(
    catalog: web::Data<Catalog>,
    session: Session,
    body: web::Json<CategoryRequest>,
) -> Result<HttpResponse, AppError> {
    let CategoryRequest { name, image } = body.into_inner();
    let category =
        web::block(move || catalog.create_category(session.email(), &name, image)).await??;
    Ok(HttpResponse::Created().json(CategoryResponse::from(category)))
}
