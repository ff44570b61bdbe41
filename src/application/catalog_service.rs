use uuid::Uuid;

use crate::domain::catalog::{Category, ProductFilter, ProductInput, ProductView};
use crate::domain::errors::DomainError;
use crate::domain::limits::{check_len, CATEGORY_NAME_MAX};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::ports::{ProductRepository, UserRepository};

use super::access::require_admin;

pub struct CatalogService<P, U> {
    products: P,
    users: U,
}

impl<P: ProductRepository, U: UserRepository> CatalogService<P, U> {
    pub fn new(products: P, users: U) -> Self {
        Self { products, users }
    }

    pub fn list_products(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
    ) -> Result<Page<ProductView>, DomainError> {
        self.products.list(filter, page)
    }

    pub fn get_product(&self, id: Uuid) -> Result<ProductView, DomainError> {
        self.products.find_by_id(id)?.ok_or(DomainError::NotFound)
    }

    pub fn create_product(
        &self,
        identity: Option<&str>,
        input: ProductInput,
    ) -> Result<ProductView, DomainError> {
        require_admin(&self.users, identity)?;
        self.check_product(&input)?;
        let product = self.products.create(input)?;
        log::info!("Created product {} ({})", product.id, product.name);
        Ok(product)
    }

    pub fn update_product(
        &self,
        identity: Option<&str>,
        id: Uuid,
        input: ProductInput,
    ) -> Result<ProductView, DomainError> {
        require_admin(&self.users, identity)?;
        self.check_product(&input)?;
        self.products.update(id, input)?.ok_or(DomainError::NotFound)
    }

    pub fn list_categories(&self) -> Result<Vec<Category>, DomainError> {
        self.products.list_categories()
    }

    pub fn create_category(
        &self,
        identity: Option<&str>,
        name: &str,
        image: Option<String>,
    ) -> Result<Category, DomainError> {
        require_admin(&self.users, identity)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidInput("MissingName"));
        }
        check_len(name, CATEGORY_NAME_MAX)?;
        self.products.create_category(name, image)
    }

    fn check_product(&self, input: &ProductInput) -> Result<(), DomainError> {
        input.validate()?;
        if let Some(category_id) = input.category_id {
            if self.products.find_category(category_id)?.is_none() {
                return Err(DomainError::InvalidInput("UnknownCategory"));
            }
        }
        Ok(())
    }
}
