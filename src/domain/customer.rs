use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Lifetime spend a customer must exceed to be flagged VIP.
pub const VIP_THRESHOLD: i64 = 150_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }

    /// Anything that is not ADMIN carries user privileges only.
    pub fn from_db(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("ADMIN") {
            Role::Admin
        } else {
            Role::User
        }
    }
}

#[derive(Debug, Clone)]
pub struct UserView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A customer together with the totals of every order they placed.
#[derive(Debug, Clone)]
pub struct CustomerRecord {
    pub user: UserView,
    pub order_totals: Vec<BigDecimal>,
}

impl CustomerRecord {
    pub fn lifetime_value(&self) -> BigDecimal {
        self.order_totals.iter().sum()
    }

    pub fn order_count(&self) -> usize {
        self.order_totals.len()
    }
}

pub fn is_vip(lifetime_value: &BigDecimal) -> bool {
    *lifetime_value > BigDecimal::from(VIP_THRESHOLD)
}
