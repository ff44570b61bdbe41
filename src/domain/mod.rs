pub mod catalog;
pub mod customer;
pub mod errors;
pub mod limits;
pub mod order;
pub mod pagination;
pub mod ports;
