use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub type TileId = u8;
pub type VertexId = u8;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Resource {
    Wood,
    Brick,
    Wheat,
    Ore,
    Sheep,
    Desert,
}

impl Resource {
    pub const ALL: [Resource; 6] = [
        Resource::Wood,
        Resource::Brick,
        Resource::Wheat,
        Resource::Ore,
        Resource::Sheep,
        Resource::Desert,
    ];

    /// Single letter drawn on the tile and used in the legend.
    pub fn abbreviation(self) -> char {
        match self {
            Resource::Wood => 'W',
            Resource::Brick => 'B',
            Resource::Wheat => 'G',
            Resource::Ore => 'O',
            Resource::Sheep => 'S',
            Resource::Desert => 'D',
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
pub enum PlayerColor {
    Red,
    Blue,
    Green,
    Yellow,
}

impl PlayerColor {
    pub const ORDERED: [PlayerColor; 4] = [
        PlayerColor::Red,
        PlayerColor::Blue,
        PlayerColor::Green,
        PlayerColor::Yellow,
    ];
}

/// Player number as it appears in state files. Players 1 to 4 have a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub fn color(self) -> Option<PlayerColor> {
        match self.0 {
            1..=4 => Some(PlayerColor::ORDERED[usize::from(self.0) - 1]),
            _ => None,
        }
    }

    pub fn label(self) -> String {
        match self.color() {
            Some(color) => format!("Player {} ({color})", self.0),
            None => format!("Player {}", self.0),
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn resource_parses_lowercase_names() {
        assert_eq!(Resource::from_str("wheat").unwrap(), Resource::Wheat);
        assert_eq!(Resource::Desert.to_string(), "desert");
        let parsed: Resource = serde_json::from_str("\"sheep\"").unwrap();
        assert_eq!(parsed, Resource::Sheep);
    }

    #[test]
    fn abbreviations_are_distinct() {
        let mut letters: Vec<char> = Resource::ALL.iter().map(|r| r.abbreviation()).collect();
        letters.sort_unstable();
        letters.dedup();
        assert_eq!(letters.len(), Resource::ALL.len());
    }

    #[test]
    fn players_one_to_four_have_colors() {
        assert_eq!(PlayerId(1).color(), Some(PlayerColor::Red));
        assert_eq!(PlayerId(4).color(), Some(PlayerColor::Yellow));
        assert_eq!(PlayerId(0).color(), None);
        assert_eq!(PlayerId(5).color(), None);
        assert_eq!(PlayerId(2).label(), "Player 2 (Blue)");
        assert_eq!(PlayerId(7).label(), "Player 7");
    }
}
