//! Venue description model and loader.
//!
//! A venue is described as a flat list of nodes plus an undirected edge list.
//! The description is deliberately dumb: validation and adjacency construction
//! happen in [`crate::graph::Graph::build`].

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Stable string identifier for a venue location.
pub type NodeId = String;

const SAMPLE_VENUE: &str = include_str!("../data/sample_venue.json");

/// Kind of location a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Entry,
    Stage,
    Food,
    Medical,
    Exit,
    /// Pure waypoint; never offered as a landmark.
    Path,
}

impl Category {
    /// Every category in declaration order.
    pub const ALL: [Category; 6] = [
        Category::Entry,
        Category::Stage,
        Category::Food,
        Category::Medical,
        Category::Exit,
        Category::Path,
    ];

    /// Whether nodes of this category are addressable points of interest.
    pub fn is_landmark(self) -> bool {
        !matches!(self, Category::Path)
    }

    /// Lowercase name used in venue files, CLI flags and HTTP payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Entry => "entry",
            Category::Stage => "stage",
            Category::Food => "food",
            Category::Medical => "medical",
            Category::Exit => "exit",
            Category::Path => "path",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or_else(|| Error::UnknownCategory {
                name: s.to_string(),
            })
    }
}

/// A location in the venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub lat: f64,
    pub lng: f64,
    pub category: Category,
}

/// Undirected connection between two nodes as written in a venue description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: NodeId,
    pub to: NodeId,
    /// Walking distance in meters.
    pub distance: f64,
    /// Usable without steps or steep grade.
    #[serde(default = "default_accessible")]
    pub accessible: bool,
    /// Static crowd density / hazard estimate in `[0, 1]`.
    #[serde(default)]
    pub risk_factor: f64,
}

fn default_accessible() -> bool {
    true
}

/// Raw venue description: nodes in stable enumeration order plus edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<EdgeSpec>,
}

impl Venue {
    /// Parse a venue description from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let venue: Venue = serde_json::from_str(text)?;
        debug!(
            nodes = venue.nodes.len(),
            edges = venue.edges.len(),
            "parsed venue description"
        );
        Ok(venue)
    }

    /// The festival venue bundled with the library.
    pub fn sample() -> Result<Self> {
        Self::from_json_str(SAMPLE_VENUE)
    }

    /// Display name, falling back to a generic label.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed venue")
    }
}

/// Load a venue description from a JSON file on disk.
pub fn load_venue(path: &Path) -> Result<Venue> {
    if !path.exists() {
        return Err(Error::VenueNotFound {
            path: path.to_path_buf(),
        });
    }

    info!(path = %path.display(), "loading venue description");
    let text = fs::read_to_string(path)?;
    Venue::from_json_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Exit".parse::<Category>().unwrap(), Category::Exit);
        assert_eq!(" medical ".parse::<Category>().unwrap(), Category::Medical);
        assert!(matches!(
            "toilets".parse::<Category>(),
            Err(Error::UnknownCategory { .. })
        ));
    }

    #[test]
    fn path_is_not_a_landmark() {
        assert!(!Category::Path.is_landmark());
        assert!(Category::Food.is_landmark());
    }

    #[test]
    fn edge_defaults_apply() {
        let venue = Venue::from_json_str(
            r#"{"nodes":[{"id":"a","lat":0,"lng":0,"category":"entry"}],
                "edges":[{"from":"a","to":"a","distance":1.0}]}"#,
        )
        .expect("valid json");
        assert!(venue.edges[0].accessible);
        assert_eq!(venue.edges[0].risk_factor, 0.0);
        assert_eq!(venue.display_name(), "unnamed venue");
    }

    #[test]
    fn sample_venue_parses() {
        let venue = Venue::sample().expect("bundled sample parses");
        assert_eq!(venue.nodes.len(), 10);
        assert_eq!(venue.edges.len(), 10);
        assert_eq!(venue.nodes[0].id, "entry_main");
    }

    #[test]
    fn missing_file_is_reported() {
        let error = load_venue(Path::new("/nonexistent/venue.json")).unwrap_err();
        assert!(matches!(error, Error::VenueNotFound { .. }));
    }
}
