pub mod customer;
pub mod order;
pub mod project;
pub mod project_leader;
pub mod service;
pub mod summary;
