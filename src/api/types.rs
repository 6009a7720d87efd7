use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// The three browsable resources exposed by the API.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    #[default]
    Characters,
    Episodes,
    Locations,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Characters,
        ResourceKind::Episodes,
        ResourceKind::Locations,
    ];

    /// API sub-path for this resource.
    pub fn path(self) -> &'static str {
        match self {
            ResourceKind::Characters => "character",
            ResourceKind::Episodes => "episode",
            ResourceKind::Locations => "location",
        }
    }

    /// Returns a human-readable label for display
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Characters => "Characters",
            ResourceKind::Episodes => "Episodes",
            ResourceKind::Locations => "Locations",
        }
    }

    /// Cycles to the next resource (wraps around)
    pub fn next(self) -> ResourceKind {
        match self {
            ResourceKind::Characters => ResourceKind::Episodes,
            ResourceKind::Episodes => ResourceKind::Locations,
            ResourceKind::Locations => ResourceKind::Characters,
        }
    }

    /// Cycles to the previous resource (wraps around)
    pub fn prev(self) -> ResourceKind {
        match self {
            ResourceKind::Characters => ResourceKind::Locations,
            ResourceKind::Episodes => ResourceKind::Characters,
            ResourceKind::Locations => ResourceKind::Episodes,
        }
    }
}

/// Pagination metadata shared by every list endpoint.
///
/// `next` and `prev` are opaque cursors. They signal whether an adjacent page
/// exists; the client never parses or builds them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct PageInfo {
    pub count: u32,
    pub pages: u32,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
}

impl PageInfo {
    /// Info for a page that matched nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_prev(&self) -> bool {
        self.prev.is_some()
    }
}

/// Paginated response wrapper: `{ info, results }`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PageEnvelope<T> {
    pub info: PageInfo,
    pub results: Vec<T>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Character {
    pub id: u32,
    pub name: String,
    /// "Alive", "Dead" or "unknown"
    pub status: String,
    pub species: String,
    pub image: String,
    /// Episode references (URLs), kept opaque.
    #[serde(rename = "episode")]
    pub episodes: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    pub id: u32,
    pub name: String,
    pub air_date: String,
    /// Season/episode code, e.g. "S01E01"
    #[serde(rename = "episode")]
    pub code: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub id: u32,
    pub name: String,
    #[serde(rename = "type")]
    pub location_type: String,
    pub dimension: String,
    pub residents: Vec<String>,
}
