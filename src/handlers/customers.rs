use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::domain::pagination::PageRequest;
use crate::errors::AppError;
use crate::handlers::session::Session;
use crate::presenter::{CustomerListing, PageResponse};
use crate::Customers;

#[derive(Debug, Deserialize)]
pub struct CustomerSearchParams {
    /// Matched case-insensitively against name and email.
    pub q: Option<String>,
    pub page: Option<String>,
}

/// GET /customers
///
/// Back-office customer directory with lifetime value and VIP flag.
#[utoipa::path(
    get,
    path = "/customers",
    params(
        ("q" = Option<String>, Query, description = "Name or email fragment"),
        ("page" = Option<String>, Query, description = "Page number (1-based, default 1)"),
    ),
    responses(
        (status = 200, description = "Matching customers, newest first", body = PageResponse<CustomerListing>),
        (status = 401, description = "Admin session required"),
    ),
    tag = "customers"
)]
pub async fn search_customers(
    customers: web::Data<Customers>,
    session: Session,
    query: web::Query<CustomerSearchParams>,
) -> Result<HttpResponse, AppError> {
    let CustomerSearchParams { q, page } = query.into_inner();
    let page = PageRequest::from_param(page.as_deref());
    let result =
        web::block(move || customers.search(session.email(), q.as_deref(), page)).await??;
    Ok(HttpResponse::Ok().json(PageResponse::from_page(result, CustomerListing::from)))
}
