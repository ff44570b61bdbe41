pub mod access;
pub mod catalog_service;
pub mod customer_service;
pub mod order_service;

#[cfg(test)]
pub(crate) mod fakes;
