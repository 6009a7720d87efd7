pub mod client;
pub mod error;
pub mod types;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use error::FetchError;
pub use types::{Character, Episode, Location, PageEnvelope, PageInfo, ResourceKind};
