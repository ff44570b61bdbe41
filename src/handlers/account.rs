use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::pagination::PageRequest;
use crate::errors::AppError;
use crate::handlers::session::Session;
use crate::presenter::{OrderResponse, PageResponse};
use crate::Orders;

#[derive(Debug, Deserialize)]
pub struct AccountOrdersParams {
    pub page: Option<String>,
}

/// GET /account/orders
///
/// The signed-in customer's own orders, newest first.
#[utoipa::path(
    get,
    path = "/account/orders",
    params(("page" = Option<String>, Query, description = "Page number (1-based, default 1)")),
    responses(
        (status = 200, description = "The customer's orders", body = PageResponse<OrderResponse>),
        (status = 401, description = "No session"),
    ),
    tag = "account"
)]
pub async fn my_orders(
    orders: web::Data<Orders>,
    session: Session,
    query: web::Query<AccountOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let page = PageRequest::from_param(query.page.as_deref());
    let result = web::block(move || orders.my_orders(session.email(), page)).await??;
    Ok(HttpResponse::Ok().json(PageResponse::from_page(result, OrderResponse::from)))
}

/// GET /account/orders/{id}
#[utoipa::path(
    get,
    path = "/account/orders/{id}",
    params(("id" = Uuid, Path, description = "Order UUID")),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 401, description = "No session"),
        (status = 404, description = "Order not found or owned by someone else"),
    ),
    tag = "account"
)]
pub async fn my_order(
    orders: web::Data<Orders>,
    session: Session,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let order = web::block(move || orders.my_order(session.email(), order_id)).await??;
    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}
