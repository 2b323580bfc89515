pub mod catalog;
pub mod customers;
pub mod project_leaders;
pub mod projects;

pub use catalog::CatalogService;
pub use customers::CustomerService;
pub use project_leaders::ProjectLeaderService;
pub use projects::ProjectService;
