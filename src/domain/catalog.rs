use std::collections::HashSet;
use std::str::FromStr;

use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;
use super::limits::{check_amount, check_len, NAME_MAX, SIZE_MAX};

/// Ordering applied to a product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    PriceAsc,
    PriceDesc,
}

impl SortKey {
    /// Unknown keys fall back to newest-first.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("oldest") => SortKey::Oldest,
            Some("price_asc") => SortKey::PriceAsc,
            Some("price_desc") => SortKey::PriceDesc,
            _ => SortKey::Newest,
        }
    }
}

/// Typed set of catalog predicates. Every `Some` field narrows the result;
/// all supplied predicates must hold at once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub size: Option<String>,
    pub min_price: Option<BigDecimal>,
    pub max_price: Option<BigDecimal>,
    pub featured: Option<bool>,
    pub sort: SortKey,
}

/// Raw query-string values as they arrive from the shop pages.
#[derive(Debug, Clone, Default)]
pub struct RawProductFilter<'a> {
    pub category: Option<&'a str>,
    pub size: Option<&'a str>,
    pub min_price: Option<&'a str>,
    pub max_price: Option<&'a str>,
    pub featured: Option<&'a str>,
    pub sort: Option<&'a str>,
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_price(raw: Option<&str>) -> Option<BigDecimal> {
    non_blank(raw).and_then(|s| BigDecimal::from_str(s).ok())
}

fn parse_flag(raw: Option<&str>) -> Option<bool> {
    match non_blank(raw)? {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

impl ProductFilter {
    /// Blank values and unparseable bounds are treated as absent.
    pub fn from_raw(raw: RawProductFilter<'_>) -> Self {
        Self {
            category: non_blank(raw.category).map(str::to_owned),
            size: non_blank(raw.size).map(str::to_owned),
            min_price: parse_price(raw.min_price),
            max_price: parse_price(raw.max_price),
            featured: parse_flag(raw.featured),
            sort: SortKey::parse(raw.sort),
        }
    }

    /// In-memory form of the predicate the repository pushes down to SQL.
    pub fn matches(&self, product: &ProductView) -> bool {
        if let Some(category) = &self.category {
            if product.category.as_ref() != Some(category) {
                return false;
            }
        }
        if let Some(size) = &self.size {
            if !product.sizes.iter().any(|s| &s.size == size) {
                return false;
            }
        }
        if let Some(min) = &self.min_price {
            if &product.price < min {
                return false;
            }
        }
        if let Some(max) = &self.max_price {
            if &product.price > max {
                return false;
            }
        }
        if let Some(featured) = self.featured {
            if product.featured != featured {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SizeStock {
    pub size: String,
    pub stock: i32,
}

#[derive(Debug, Clone)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub stock: i32,
    pub category: Option<String>,
    pub images: Vec<String>,
    pub sizes: Vec<SizeStock>,
    pub featured: bool,
    pub customizable: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields an admin supplies when creating or replacing a product.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: BigDecimal,
    pub stock: i32,
    pub category_id: Option<Uuid>,
    pub images: Vec<String>,
    pub sizes: Vec<SizeStock>,
    pub featured: bool,
    pub customizable: bool,
}

impl ProductInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidInput("MissingName"));
        }
        if self.price < BigDecimal::zero() {
            return Err(DomainError::InvalidInput("NegativePrice"));
        }
        check_amount(&self.price)?;
        check_len(self.name.trim(), NAME_MAX)?;
        if self.stock < 0 || self.sizes.iter().any(|s| s.stock < 0) {
            return Err(DomainError::InvalidInput("NegativeStock"));
        }
        let mut seen = HashSet::new();
        for size in &self.sizes {
            let label = size.size.trim();
            if label.is_empty() || !seen.insert(label) {
                return Err(DomainError::InvalidInput("InvalidSizes"));
            }
            check_len(label, SIZE_MAX)?;
        }
        Ok(())
    }
}
