//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::api::{Character, Episode, PageInfo};
use crate::resource::{ResourceItems, ResourcePage};

/// Pagination info for `page` of `pages`, with cursors where neighbours exist.
pub fn info(page: u32, pages: u32) -> PageInfo {
    PageInfo {
        count: pages * 20,
        pages,
        next: (page < pages).then(|| format!("https://example.test/api?page={}", page + 1)),
        prev: (page > 1).then(|| format!("https://example.test/api?page={}", page - 1)),
    }
}

pub fn character(id: u32) -> Character {
    Character {
        id,
        name: format!("Character {id}"),
        status: "Alive".to_string(),
        species: "Human".to_string(),
        image: format!("https://example.test/avatar/{id}.jpeg"),
        episodes: vec!["https://example.test/api/episode/1".to_string()],
    }
}

pub fn episode(id: u32) -> Episode {
    Episode {
        id,
        name: format!("Episode {id}"),
        air_date: "December 2, 2013".to_string(),
        code: format!("S01E{id:02}"),
    }
}

pub fn character_page(ids: &[u32], info: PageInfo) -> ResourcePage {
    ResourcePage {
        info,
        items: ResourceItems::Characters(ids.iter().copied().map(character).collect()),
    }
}

pub fn episode_page(ids: &[u32], info: PageInfo) -> ResourcePage {
    ResourcePage {
        info,
        items: ResourceItems::Episodes(ids.iter().copied().map(episode).collect()),
    }
}

/// A two-item location page as the API would send it.
pub fn location_page_json() -> String {
    r#"{
        "info": {"count": 126, "pages": 7, "next": "https://rickandmortyapi.com/api/location?page=2", "prev": null},
        "results": [
            {"id": 1, "name": "Earth (C-137)", "type": "Planet", "dimension": "Dimension C-137", "residents": ["https://rickandmortyapi.com/api/character/38"], "url": "", "created": ""},
            {"id": 2, "name": "Abadango", "type": "Cluster", "dimension": "unknown", "residents": [], "url": "", "created": ""}
        ]
    }"#
    .to_string()
}
