use uuid::Uuid;

use super::catalog::{Category, ProductFilter, ProductInput, ProductView};
use super::customer::{CustomerRecord, UserView};
use super::errors::DomainError;
use super::order::{NewOrder, OrderStatus, OrderView};
use super::pagination::{Page, PageRequest};

pub trait ProductRepository: Send + Sync + 'static {
    fn list(&self, filter: &ProductFilter, page: PageRequest) -> Result<Page<ProductView>, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<ProductView>, DomainError>;
    /// Returns which of `ids` exist in the catalog.
    fn existing_ids(&self, ids: &[Uuid]) -> Result<Vec<Uuid>, DomainError>;
    fn create(&self, input: ProductInput) -> Result<ProductView, DomainError>;
    fn update(&self, id: Uuid, input: ProductInput) -> Result<Option<ProductView>, DomainError>;
    fn find_category(&self, id: Uuid) -> Result<Option<Category>, DomainError>;
    fn list_categories(&self) -> Result<Vec<Category>, DomainError>;
    fn create_category(&self, name: &str, image: Option<String>) -> Result<Category, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    fn create(&self, order: NewOrder) -> Result<OrderView, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError>;
    /// Newest first, each order with its items in cart order.
    fn list(&self, status: Option<OrderStatus>, page: PageRequest) -> Result<Page<OrderView>, DomainError>;
    fn list_for_user(&self, user_id: Uuid, page: PageRequest) -> Result<Page<OrderView>, DomainError>;
    /// Moves the order to `to` only if it is still in `from`. Returns whether a row changed.
    fn update_status(&self, id: Uuid, from: OrderStatus, to: OrderStatus) -> Result<bool, DomainError>;
}

pub trait UserRepository: Send + Sync + 'static {
    fn find_by_email(&self, email: &str) -> Result<Option<UserView>, DomainError>;
    /// Customers whose name or email contains `query`, ignoring case.
    fn search_customers(&self, query: &str, page: PageRequest) -> Result<Page<CustomerRecord>, DomainError>;
}
