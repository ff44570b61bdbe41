use crate::domain::customer::CustomerRecord;
use crate::domain::errors::DomainError;
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::ports::UserRepository;

use super::access::require_admin;

pub struct CustomerService<U> {
    users: U,
}

impl<U: UserRepository> CustomerService<U> {
    pub fn new(users: U) -> Self {
        Self { users }
    }

    /// A blank query lists every customer.
    pub fn search(
        &self,
        identity: Option<&str>,
        query: Option<&str>,
        page: PageRequest,
    ) -> Result<Page<CustomerRecord>, DomainError> {
        require_admin(&self.users, identity)?;
        self.users
            .search_customers(query.map(str::trim).unwrap_or_default(), page)
    }
}
