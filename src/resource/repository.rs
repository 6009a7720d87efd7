use std::sync::Arc;

use async_trait::async_trait;

use crate::api::{ApiClient, Character, Episode, FetchError, Location, PageInfo, ResourceKind};

use super::http::HttpRepository;

/// The items of one page, tagged with the resource they belong to.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceItems {
    Characters(Vec<Character>),
    Episodes(Vec<Episode>),
    Locations(Vec<Location>),
}

impl ResourceItems {
    /// An empty page for `kind`.
    pub fn empty(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Characters => ResourceItems::Characters(Vec::new()),
            ResourceKind::Episodes => ResourceItems::Episodes(Vec::new()),
            ResourceKind::Locations => ResourceItems::Locations(Vec::new()),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceItems::Characters(_) => ResourceKind::Characters,
            ResourceItems::Episodes(_) => ResourceKind::Episodes,
            ResourceItems::Locations(_) => ResourceKind::Locations,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ResourceItems::Characters(v) => v.len(),
            ResourceItems::Episodes(v) => v.len(),
            ResourceItems::Locations(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One decoded page: pagination info plus its items.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourcePage {
    pub info: PageInfo,
    pub items: ResourceItems,
}

impl ResourcePage {
    pub fn empty(kind: ResourceKind) -> Self {
        Self {
            info: PageInfo::empty(),
            items: ResourceItems::empty(kind),
        }
    }
}

/// Read access to one resource kind.
///
/// Implementations hold no per-call state, so the controller may issue and
/// abandon overlapping calls freely.
#[async_trait]
pub trait ResourceRepository: Send + Sync {
    /// Which resource this repository serves.
    fn kind(&self) -> ResourceKind;

    /// Fetches one page, optionally filtered by name.
    ///
    /// `page = None` lets the API pick its first page. An empty or absent
    /// `name` means "no filter".
    async fn fetch_page(
        &self,
        page: Option<u32>,
        name: Option<&str>,
    ) -> Result<ResourcePage, FetchError>;
}

/// One repository per resource kind, selected by the controller.
#[derive(Clone)]
pub struct Repositories {
    characters: Arc<dyn ResourceRepository>,
    episodes: Arc<dyn ResourceRepository>,
    locations: Arc<dyn ResourceRepository>,
}

impl Repositories {
    pub fn new(
        characters: Arc<dyn ResourceRepository>,
        episodes: Arc<dyn ResourceRepository>,
        locations: Arc<dyn ResourceRepository>,
    ) -> Self {
        Self {
            characters,
            episodes,
            locations,
        }
    }

    /// Wires the three HTTP repositories over a shared client.
    pub fn http(client: ApiClient) -> Self {
        Self::new(
            Arc::new(HttpRepository::<Character>::new(client.clone())),
            Arc::new(HttpRepository::<Episode>::new(client.clone())),
            Arc::new(HttpRepository::<Location>::new(client)),
        )
    }

    pub fn get(&self, kind: ResourceKind) -> Arc<dyn ResourceRepository> {
        match kind {
            ResourceKind::Characters => self.characters.clone(),
            ResourceKind::Episodes => self.episodes.clone(),
            ResourceKind::Locations => self.locations.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_items_match_kind() {
        for kind in ResourceKind::ALL {
            let items = ResourceItems::empty(kind);
            assert_eq!(items.kind(), kind);
            assert!(items.is_empty());
        }
    }

    #[test]
    fn test_http_registry_selects_by_kind() {
        let repos = Repositories::http(ApiClient::new("http://localhost:1", None));
        for kind in ResourceKind::ALL {
            assert_eq!(repos.get(kind).kind(), kind);
        }
    }
}
