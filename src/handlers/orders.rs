use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::Deserialize;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{CheckoutInput, CustomerDetails, OrderLineInput};
use crate::domain::pagination::PageRequest;
use crate::errors::AppError;
use crate::handlers::session::Session;
use crate::presenter::{OrderResponse, PageResponse};
use crate::Orders;

// ── Request DTOs ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderLineRequest {
    pub product_id: Uuid,
    pub quantity: i32,
    /// Decimal price as a string to avoid floating-point issues, e.g. "55000"
    pub unit_price: String,
    pub size: Option<String>,
    /// Flocage name printed on the shirt.
    pub custom_name: Option<String>,
    /// Flocage number printed on the shirt.
    pub custom_number: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ShippingRequest {
    pub name: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub items: Vec<CreateOrderLineRequest>,
    pub subtotal: String,
    pub total: String,
    pub shipping: ShippingRequest,
    pub payment_method: String,
}

fn parse_amount(raw: &str, reason: &'static str) -> Result<BigDecimal, AppError> {
    BigDecimal::from_str(raw.trim()).map_err(|_| AppError::BadRequest(reason))
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl TryFrom<CreateOrderRequest> for CheckoutInput {
    type Error = AppError;

    fn try_from(req: CreateOrderRequest) -> Result<Self, Self::Error> {
        if req.items.is_empty() {
            return Err(DomainError::MissingItems.into());
        }
        let items = req
            .items
            .into_iter()
            .map(|l| {
                Ok(OrderLineInput {
                    product_id: l.product_id,
                    quantity: l.quantity,
                    unit_price: parse_amount(&l.unit_price, "InvalidPrice")?,
                    size: blank_to_none(l.size),
                    custom_name: blank_to_none(l.custom_name),
                    custom_number: blank_to_none(l.custom_number),
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(CheckoutInput {
            items,
            subtotal: parse_amount(&req.subtotal, "InvalidAmount")?,
            total: parse_amount(&req.total, "InvalidAmount")?,
            customer: CustomerDetails {
                name: req.shipping.name.trim().to_string(),
                phone: req.shipping.phone.trim().to_string(),
                address: req.shipping.address.trim().to_string(),
            },
            payment_method: req.payment_method.trim().to_string(),
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListOrdersParams {
    /// PENDING, PAID, SHIPPED, DELIVERED or CANCELLED.
    pub status: Option<String>,
    /// Page number (1-based). Defaults to 1.
    pub page: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: String,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Checkout. Creates the order and its items in a single database
/// transaction. Guests are allowed; a session links the order to its user.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created successfully", body = OrderResponse),
        (status = 400, description = "Invalid cart, e.g. MissingItems"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    orders: web::Data<Orders>,
    session: Session,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let checkout = CheckoutInput::try_from(body.into_inner())?;

    let order = web::block(move || orders.place_order(session.email(), checkout)).await??;

    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

/// GET /orders/{id}
///
/// Returns the order together with its items.
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 401, description = "Admin session required"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    orders: web::Data<Orders>,
    session: Session,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let order = web::block(move || orders.get_order(session.email(), order_id)).await??;
    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// GET /orders
///
/// Back-office listing, newest first, 10 per page.
#[utoipa::path(
    get,
    path = "/orders",
    params(
        ("status" = Option<String>, Query, description = "Only orders in this status"),
        ("page" = Option<String>, Query, description = "Page number (1-based, default 1)"),
    ),
    responses(
        (status = 200, description = "Paginated list of orders", body = PageResponse<OrderResponse>),
        (status = 400, description = "Unknown status"),
        (status = 401, description = "Admin session required"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    orders: web::Data<Orders>,
    session: Session,
    query: web::Query<ListOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let ListOrdersParams { status, page } = query.into_inner();
    let page = PageRequest::from_param(page.as_deref());

    let result =
        web::block(move || orders.list_orders(session.email(), status.as_deref(), page)).await??;

    Ok(HttpResponse::Ok().json(PageResponse::from_page(result, OrderResponse::from)))
}

/// PATCH /orders/{id}/status
///
/// Moves an order along PENDING → PAID → SHIPPED → DELIVERED, or cancels
/// it while still PENDING or PAID.
#[utoipa::path(
    patch,
    path = "/orders/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = OrderResponse),
        (status = 400, description = "Unknown status or InvalidTransition"),
        (status = 401, description = "Admin session required"),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn update_status(
    orders: web::Data<Orders>,
    session: Session,
    path: web::Path<Uuid>,
    body: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let UpdateStatusRequest { status } = body.into_inner();
    let order =
        web::block(move || orders.change_status(session.email(), order_id, &status)).await??;
    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}
