use serde::{Deserialize, Serialize};
use std::fmt;

/// The four fixed operational zones. The id set is closed; only the display
/// name carried by [`ZonalMetadata`] can be changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zonal {
    #[serde(rename = "Zonal Norte")]
    North,
    #[serde(rename = "Zonal Sul")]
    South,
    #[serde(rename = "Zonal Leste")]
    East,
    #[serde(rename = "Zonal Oeste")]
    West,
}

impl Zonal {
    pub const ALL: [Zonal; 4] = [Zonal::North, Zonal::South, Zonal::East, Zonal::West];

    /// Stable identifier used by the storage schema and as the default
    /// display name.
    pub fn id(&self) -> &'static str {
        match self {
            Zonal::North => "Zonal Norte",
            Zonal::South => "Zonal Sul",
            Zonal::East => "Zonal Leste",
            Zonal::West => "Zonal Oeste",
        }
    }

    pub fn from_id(id: &str) -> Option<Zonal> {
        Zonal::ALL.into_iter().find(|z| z.id() == id)
    }
}

impl fmt::Display for Zonal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Per-zone configuration: overridable display name plus optional manager
/// and assistant references. Rows exist for all four zones from first run;
/// they are edited, never deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZonalMetadata {
    pub id: Zonal,
    pub name: String,
    pub manager_id: Option<String>,
    pub assistant_id: Option<String>,
    pub description: Option<String>,
}

impl ZonalMetadata {
    /// The seed rows written on first run: default names, nothing assigned.
    pub fn defaults() -> Vec<ZonalMetadata> {
        Zonal::ALL
            .into_iter()
            .map(|id| ZonalMetadata {
                id,
                name: id.id().to_string(),
                manager_id: None,
                assistant_id: None,
                description: None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zonal_ids_round_trip() {
        for z in Zonal::ALL {
            assert_eq!(Zonal::from_id(z.id()), Some(z));
        }
        assert_eq!(Zonal::from_id("Zonal Central"), None);
    }

    #[test]
    fn defaults_cover_all_zones_with_default_names() {
        let defaults = ZonalMetadata::defaults();
        assert_eq!(defaults.len(), 4);
        for (meta, zonal) in defaults.iter().zip(Zonal::ALL) {
            assert_eq!(meta.id, zonal);
            assert_eq!(meta.name, zonal.id());
            assert!(meta.manager_id.is_none());
        }
    }
}
