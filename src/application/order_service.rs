use std::collections::HashSet;

use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{CheckoutInput, NewOrder, OrderStatus, OrderView};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::ports::{OrderRepository, ProductRepository, UserRepository};

use super::access::{require_admin, require_user, resolve_user};

pub struct OrderService<O, P, U> {
    orders: O,
    products: P,
    users: U,
}

impl<O, P, U> OrderService<O, P, U>
where
    O: OrderRepository,
    P: ProductRepository,
    U: UserRepository,
{
    pub fn new(orders: O, products: P, users: U) -> Self {
        Self {
            orders,
            products,
            users,
        }
    }

    /// Validates the cart and writes the order with its items. The submitted
    /// total is stored as-is; no stock is reserved or decremented.
    pub fn place_order(
        &self,
        identity: Option<&str>,
        checkout: CheckoutInput,
    ) -> Result<OrderView, DomainError> {
        if let Err(e) = checkout.validate() {
            log::warn!("Rejected checkout: {}", e);
            return Err(e);
        }

        let wanted: HashSet<Uuid> = checkout.items.iter().map(|i| i.product_id).collect();
        let wanted: Vec<Uuid> = wanted.into_iter().collect();
        let found = self.products.existing_ids(&wanted)?;
        if found.len() != wanted.len() {
            return Err(DomainError::InvalidInput("UnknownProduct"));
        }

        let owner = resolve_user(&self.users, identity)?;
        if identity.is_some() && owner.is_none() {
            log::warn!("Session email has no matching user, recording a guest order");
        }

        let order = self.orders.create(NewOrder {
            user_id: owner.map(|u| u.id),
            customer: checkout.customer,
            subtotal: checkout.subtotal,
            total: checkout.total,
            payment_method: checkout.payment_method,
            items: checkout.items,
        })?;
        log::info!(
            "Created order {} with {} item(s), total {}",
            order.id,
            order.items.len(),
            order.total
        );
        Ok(order)
    }

    pub fn get_order(&self, identity: Option<&str>, id: Uuid) -> Result<OrderView, DomainError> {
        require_admin(&self.users, identity)?;
        self.orders.find_by_id(id)?.ok_or(DomainError::NotFound)
    }

    /// `status` is the raw query value; blank means every status.
    pub fn list_orders(
        &self,
        identity: Option<&str>,
        status: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<OrderView>, DomainError> {
        require_admin(&self.users, identity)?;
        let status = match status.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Some(raw.parse::<OrderStatus>()?),
            None => None,
        };
        self.orders.list(status, page)
    }

    pub fn change_status(
        &self,
        identity: Option<&str>,
        id: Uuid,
        next: &str,
    ) -> Result<OrderView, DomainError> {
        require_admin(&self.users, identity)?;
        let next: OrderStatus = next.parse()?;
        let order = self.orders.find_by_id(id)?.ok_or(DomainError::NotFound)?;
        let current = order.status;
        if let Err(e) = current.transition_to(next) {
            log::warn!("Rejected status change on order {}: {}", id, e);
            return Err(e);
        }
        if !self.orders.update_status(id, current, next)? {
            return Err(DomainError::InvalidInput("StatusChanged"));
        }
        log::info!("Order {} moved from {} to {}", id, current, next);
        Ok(OrderView {
            status: next,
            ..order
        })
    }

    pub fn my_orders(
        &self,
        identity: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<OrderView>, DomainError> {
        let user = require_user(&self.users, identity)?;
        self.orders.list_for_user(user.id, page)
    }

    /// Orders owned by someone else are reported as missing.
    pub fn my_order(&self, identity: Option<&str>, id: Uuid) -> Result<OrderView, DomainError> {
        let user = require_user(&self.users, identity)?;
        match self.orders.find_by_id(id)? {
            Some(order) if order.user_id == Some(user.id) => Ok(order),
            _ => Err(DomainError::NotFound),
        }
    }
}
