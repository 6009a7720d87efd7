//! HTTP-backed repositories.
//!
//! One generic implementation, instantiated once per entity type. The entity
//! type decides the sub-path and how a decoded page is tagged.

use std::marker::PhantomData;

use async_trait::async_trait;
use log::debug;
use serde::de::DeserializeOwned;

use crate::api::{ApiClient, Character, Episode, FetchError, Location, PageEnvelope, ResourceKind};

use super::repository::{ResourceItems, ResourcePage, ResourceRepository};

/// An entity type that can be listed through the API.
pub trait Entity: DeserializeOwned + Send + Sync + 'static {
    const KIND: ResourceKind;

    fn into_items(results: Vec<Self>) -> ResourceItems;
}

impl Entity for Character {
    const KIND: ResourceKind = ResourceKind::Characters;

    fn into_items(results: Vec<Self>) -> ResourceItems {
        ResourceItems::Characters(results)
    }
}

impl Entity for Episode {
    const KIND: ResourceKind = ResourceKind::Episodes;

    fn into_items(results: Vec<Self>) -> ResourceItems {
        ResourceItems::Episodes(results)
    }
}

impl Entity for Location {
    const KIND: ResourceKind = ResourceKind::Locations;

    fn into_items(results: Vec<Self>) -> ResourceItems {
        ResourceItems::Locations(results)
    }
}

pub struct HttpRepository<T> {
    client: ApiClient,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> HttpRepository<T> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }
}

/// Decodes a list response body into a tagged page.
pub fn decode_page<T: Entity>(body: &[u8]) -> Result<ResourcePage, FetchError> {
    let envelope: PageEnvelope<T> = serde_json::from_slice(body)?;
    Ok(ResourcePage {
        info: envelope.info,
        items: T::into_items(envelope.results),
    })
}

#[async_trait]
impl<T: Entity> ResourceRepository for HttpRepository<T> {
    fn kind(&self) -> ResourceKind {
        T::KIND
    }

    async fn fetch_page(
        &self,
        page: Option<u32>,
        name: Option<&str>,
    ) -> Result<ResourcePage, FetchError> {
        let name = name.map(str::trim).filter(|n| !n.is_empty());
        let query = [
            ("page", page.map(|p| p.to_string())),
            ("name", name.map(str::to_string)),
        ];

        let body = self.client.get(T::KIND.path(), &query).await?;
        let page = decode_page::<T>(&body)?;
        debug!(
            "Decoded {} page: {} items, {} total",
            T::KIND.label(),
            page.items.len(),
            page.info.count
        );
        Ok(page)
    }
}
