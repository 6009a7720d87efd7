pub mod http;
pub mod repository;

pub use http::{Entity, HttpRepository};
pub use repository::{Repositories, ResourceItems, ResourcePage, ResourceRepository};
