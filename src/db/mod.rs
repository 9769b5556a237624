mod repository;
mod schema;
mod store;

pub use repository::Repository;
pub use store::UrlStore;
