//! Display records for the shop and back-office pages.
//!
//! Amounts are exposed twice: as a plain number for client-side maths and as
//! a French-formatted string (`55 000 FCFA`) ready to print.

use bigdecimal::{BigDecimal, RoundingMode, ToPrimitive};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::catalog::{Category, ProductView, SizeStock};
use crate::domain::customer::{is_vip, CustomerRecord};
use crate::domain::order::{OrderItemView, OrderStatus, OrderView};
use crate::domain::pagination::Page;

pub const CURRENCY_SUFFIX: &str = "FCFA";
pub const DEFAULT_CATEGORY: &str = "Sans catégorie";
pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder.png";

pub fn to_number(amount: &BigDecimal) -> f64 {
    amount.to_f64().unwrap_or_default()
}

/// Rounds half away from zero to whole units and groups thousands with spaces.
pub fn format_currency(amount: &BigDecimal) -> String {
    let units = amount
        .with_scale_round(0, RoundingMode::HalfUp)
        .to_i128()
        .unwrap_or_default();
    let digits = units.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    let sign = if units < 0 { "-" } else { "" };
    format!("{sign}{grouped} {CURRENCY_SUFFIX}")
}

pub fn status_label(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "En attente",
        OrderStatus::Paid => "Payée",
        OrderStatus::Shipped => "Expédiée",
        OrderStatus::Delivered => "Livrée",
        OrderStatus::Cancelled => "Annulée",
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl<T> PageResponse<T> {
    pub fn from_page<S>(page: Page<S>, present: impl FnMut(S) -> T) -> Self {
        let page = page.map(present);
        Self {
            items: page.items,
            total: page.total,
            page: page.page,
            page_size: page.page_size,
            total_pages: page.total_pages,
        }
    }
}

// ── Catalog ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListing {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
    pub price_display: String,
    pub category: String,
    pub image: String,
    pub featured: bool,
    pub customizable: bool,
    pub in_stock: bool,
}

impl From<ProductView> for ProductListing {
    fn from(p: ProductView) -> Self {
        let in_stock = p.stock > 0 || p.sizes.iter().any(|s| s.stock > 0);
        Self {
            id: p.id,
            price: to_number(&p.price),
            price_display: format_currency(&p.price),
            category: p.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            image: p
                .images
                .into_iter()
                .next()
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            name: p.name,
            featured: p.featured,
            customizable: p.customizable,
            in_stock,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SizeResponse {
    pub size: String,
    pub stock: i32,
}

impl From<SizeStock> for SizeResponse {
    fn from(s: SizeStock) -> Self {
        Self {
            size: s.size,
            stock: s.stock,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDetail {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub price_display: String,
    pub stock: i32,
    pub category: String,
    pub images: Vec<String>,
    pub sizes: Vec<SizeResponse>,
    pub featured: bool,
    pub customizable: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ProductView> for ProductDetail {
    fn from(p: ProductView) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            price: to_number(&p.price),
            price_display: format_currency(&p.price),
            stock: p.stock,
            category: p.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            images: p.images,
            sizes: p.sizes.into_iter().map(SizeResponse::from).collect(),
            featured: p.featured,
            customizable: p.customizable,
            created_at: p.created_at.to_rfc3339(),
            updated_at: p.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub image: Option<String>,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            image: c.image,
        }
    }
}

// ── Orders ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: f64,
    pub unit_price_display: String,
    pub size: Option<String>,
    pub custom_name: Option<String>,
    pub custom_number: Option<String>,
}

impl From<OrderItemView> for OrderItemResponse {
    fn from(i: OrderItemView) -> Self {
        Self {
            id: i.id,
            product_id: i.product_id,
            quantity: i.quantity,
            unit_price: to_number(&i.unit_price),
            unit_price_display: format_currency(&i.unit_price),
            size: i.size,
            custom_name: i.custom_name,
            custom_number: i.custom_number,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub subtotal: f64,
    pub total: f64,
    pub total_display: String,
    pub payment_method: String,
    pub status: String,
    pub status_label: String,
    pub item_count: i64,
    pub created_at: String,
    pub items: Vec<OrderItemResponse>,
}

impl From<OrderView> for OrderResponse {
    fn from(o: OrderView) -> Self {
        Self {
            id: o.id,
            user_id: o.user_id,
            customer_name: o.customer.name,
            customer_phone: o.customer.phone,
            customer_address: o.customer.address,
            subtotal: to_number(&o.subtotal),
            total: to_number(&o.total),
            total_display: format_currency(&o.total),
            payment_method: o.payment_method,
            status: o.status.as_str().to_string(),
            status_label: status_label(o.status).to_string(),
            item_count: o.items.iter().map(|i| i64::from(i.quantity)).sum(),
            created_at: o.created_at.to_rfc3339(),
            items: o.items.into_iter().map(OrderItemResponse::from).collect(),
        }
    }
}

// ── Customers ────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerListing {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub order_count: usize,
    pub total_spent: f64,
    pub total_spent_display: String,
    pub vip: bool,
    pub created_at: String,
}

impl From<CustomerRecord> for CustomerListing {
    fn from(c: CustomerRecord) -> Self {
        let lifetime = c.lifetime_value();
        Self {
            order_count: c.order_count(),
            total_spent: to_number(&lifetime),
            total_spent_display: format_currency(&lifetime),
            vip: is_vip(&lifetime),
            id: c.user.id,
            name: c.user.name,
            email: c.user.email,
            phone: c.user.phone,
            created_at: c.user.created_at.to_rfc3339(),
        }
    }
}
