use std::fmt;
use std::str::FromStr;

use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;
use super::limits::{
    check_amount, check_len, CUSTOM_NAME_MAX, CUSTOM_NUMBER_MAX, NAME_MAX, PAYMENT_METHOD_MAX,
    PHONE_MAX, SIZE_MAX,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Paid,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Paid => "PAID",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    /// PENDING → PAID → SHIPPED → DELIVERED, with CANCELLED reachable from
    /// PENDING or PAID. DELIVERED and CANCELLED are terminal.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Paid)
                | (Pending, Cancelled)
                | (Paid, Shipped)
                | (Paid, Cancelled)
                | (Shipped, Delivered)
        )
    }

    pub fn transition_to(self, next: OrderStatus) -> Result<OrderStatus, DomainError> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(DomainError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or(DomainError::InvalidInput("UnknownStatus"))
    }
}

#[derive(Debug, Clone)]
pub struct OrderLineInput {
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub size: Option<String>,
    pub custom_name: Option<String>,
    pub custom_number: Option<String>,
}

impl OrderLineInput {
    pub fn line_total(&self) -> BigDecimal {
        &self.unit_price * BigDecimal::from(self.quantity)
    }
}

/// Customer snapshot captured at checkout, independent of later profile edits.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerDetails {
    pub name: String,
    pub phone: String,
    pub address: String,
}

/// Cart as submitted by the checkout page.
#[derive(Debug, Clone)]
pub struct CheckoutInput {
    pub items: Vec<OrderLineInput>,
    pub subtotal: BigDecimal,
    pub total: BigDecimal,
    pub customer: CustomerDetails,
    pub payment_method: String,
}

impl CheckoutInput {
    /// Checks the cart is internally consistent. Prices are the snapshot the
    /// customer saw; they are not compared against the live catalog.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.items.is_empty() {
            return Err(DomainError::MissingItems);
        }
        let blank = |s: &str| s.trim().is_empty();
        if blank(&self.customer.name)
            || blank(&self.customer.phone)
            || blank(&self.customer.address)
            || blank(&self.payment_method)
        {
            return Err(DomainError::InvalidInput("MissingCustomerField"));
        }
        if self.items.iter().any(|item| item.quantity < 1) {
            return Err(DomainError::InvalidInput("InvalidQuantity"));
        }
        if self.items.iter().any(|item| item.unit_price < BigDecimal::zero()) {
            return Err(DomainError::InvalidInput("NegativePrice"));
        }
        check_len(&self.customer.name, NAME_MAX)?;
        check_len(&self.customer.phone, PHONE_MAX)?;
        check_len(&self.payment_method, PAYMENT_METHOD_MAX)?;
        for item in &self.items {
            check_amount(&item.unit_price)?;
            let optional = [
                (&item.size, SIZE_MAX),
                (&item.custom_name, CUSTOM_NAME_MAX),
                (&item.custom_number, CUSTOM_NUMBER_MAX),
            ];
            for (value, max) in optional {
                if let Some(value) = value {
                    check_len(value, max)?;
                }
            }
        }
        check_amount(&self.subtotal)?;
        check_amount(&self.total)?;
        let computed: BigDecimal = self.items.iter().map(OrderLineInput::line_total).sum();
        if computed != self.subtotal {
            return Err(DomainError::InvalidInput("SubtotalMismatch"));
        }
        if self.total < self.subtotal {
            return Err(DomainError::InvalidInput("TotalBelowSubtotal"));
        }
        Ok(())
    }
}

/// A validated order ready to be written.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: Option<Uuid>,
    pub customer: CustomerDetails,
    pub subtotal: BigDecimal,
    pub total: BigDecimal,
    pub payment_method: String,
    pub items: Vec<OrderLineInput>,
}

#[derive(Debug, Clone)]
pub struct OrderItemView {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub size: Option<String>,
    pub custom_name: Option<String>,
    pub custom_number: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub customer: CustomerDetails,
    pub subtotal: BigDecimal,
    pub total: BigDecimal,
    pub payment_method: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItemView>,
}
