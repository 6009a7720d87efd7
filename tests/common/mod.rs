//! Shared fixtures for controller and repository tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rickdex::api::{Character, Episode, FetchError, Location, PageInfo, ResourceKind};
use rickdex::resource::{Repositories, ResourceItems, ResourcePage, ResourceRepository};

/// One recorded `fetch_page` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub kind: ResourceKind,
    pub page: Option<u32>,
    pub name: Option<String>,
}

pub type CallLog = Arc<Mutex<Vec<Call>>>;

type Responder =
    dyn Fn(Option<u32>, Option<&str>) -> (Duration, Result<ResourcePage, FetchError>) + Send + Sync;

/// A repository that answers from a closure after a (virtual) delay and
/// records every call it receives.
pub struct FakeRepository {
    kind: ResourceKind,
    calls: CallLog,
    responder: Box<Responder>,
}

impl FakeRepository {
    pub fn new<F>(kind: ResourceKind, calls: CallLog, responder: F) -> Self
    where
        F: Fn(Option<u32>, Option<&str>) -> (Duration, Result<ResourcePage, FetchError>)
            + Send
            + Sync
            + 'static,
    {
        Self {
            kind,
            calls,
            responder: Box::new(responder),
        }
    }

    /// Answers every page of a `pages`-page listing after `delay`.
    pub fn paged(kind: ResourceKind, calls: CallLog, pages: u32, delay: Duration) -> Self {
        Self::new(kind, calls, move |page, _| {
            let page = page.unwrap_or(1);
            (delay, Ok(page_of(kind, page, pages)))
        })
    }
}

#[async_trait]
impl ResourceRepository for FakeRepository {
    fn kind(&self) -> ResourceKind {
        self.kind
    }

    async fn fetch_page(
        &self,
        page: Option<u32>,
        name: Option<&str>,
    ) -> Result<ResourcePage, FetchError> {
        self.calls.lock().unwrap().push(Call {
            kind: self.kind,
            page,
            name: name.map(str::to_string),
        });
        let (delay, result) = (self.responder)(page, name);
        tokio::time::sleep(delay).await;
        result
    }
}

/// Builds a registry of three paged fakes sharing one call log.
pub fn paged_repositories(pages: u32, delay: Duration) -> (Repositories, CallLog) {
    let calls = CallLog::default();
    let repos = Repositories::new(
        Arc::new(FakeRepository::paged(ResourceKind::Characters, calls.clone(), pages, delay)),
        Arc::new(FakeRepository::paged(ResourceKind::Episodes, calls.clone(), pages, delay)),
        Arc::new(FakeRepository::paged(ResourceKind::Locations, calls.clone(), pages, delay)),
    );
    (repos, calls)
}

pub fn calls(log: &CallLog) -> Vec<Call> {
    log.lock().unwrap().clone()
}

pub fn info(page: u32, pages: u32) -> PageInfo {
    PageInfo {
        count: pages * 20,
        pages,
        next: (page < pages).then(|| format!("https://example.test/api?page={}", page + 1)),
        prev: (page > 1).then(|| format!("https://example.test/api?page={}", page - 1)),
    }
}

/// Page `page` of `kind`: two items whose ids encode the page (`page*100+1`, `page*100+2`).
pub fn page_of(kind: ResourceKind, page: u32, pages: u32) -> ResourcePage {
    let ids = [page * 100 + 1, page * 100 + 2];
    let items = match kind {
        ResourceKind::Characters => ResourceItems::Characters(
            ids.iter()
                .map(|&id| Character {
                    id,
                    name: format!("Character {id}"),
                    status: "Alive".to_string(),
                    species: "Human".to_string(),
                    image: String::new(),
                    episodes: Vec::new(),
                })
                .collect(),
        ),
        ResourceKind::Episodes => ResourceItems::Episodes(
            ids.iter()
                .map(|&id| Episode {
                    id,
                    name: format!("Episode {id}"),
                    air_date: "December 2, 2013".to_string(),
                    code: "S01E01".to_string(),
                })
                .collect(),
        ),
        ResourceKind::Locations => ResourceItems::Locations(
            ids.iter()
                .map(|&id| Location {
                    id,
                    name: format!("Location {id}"),
                    location_type: "Planet".to_string(),
                    dimension: "unknown".to_string(),
                    residents: Vec::new(),
                })
                .collect(),
        ),
    };
    ResourcePage {
        info: info(page, pages),
        items,
    }
}

/// JSON body of a character page as the API sends it.
pub fn character_page_json(ids: &[u32], next: Option<&str>, prev: Option<&str>) -> serde_json::Value {
    let results: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| {
            serde_json::json!({
                "id": id,
                "name": format!("Character {id}"),
                "status": "Alive",
                "species": "Human",
                "type": "",
                "gender": "Female",
                "image": format!("https://rickandmortyapi.com/api/character/avatar/{id}.jpeg"),
                "episode": ["https://rickandmortyapi.com/api/episode/1"],
                "url": format!("https://rickandmortyapi.com/api/character/{id}"),
                "created": "2017-11-04T18:48:46.250Z"
            })
        })
        .collect();
    serde_json::json!({
        "info": {"count": 826, "pages": 42, "next": next, "prev": prev},
        "results": results
    })
}
