use serde::{Deserialize, Serialize};

/// Player-visible state of a single board tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tile {
    /// Not revealed yet.
    Covered,
    /// Covered and carrying a player flag.
    Flagged,
    /// Revealed safe tile with its adjacent-mine count.
    Open(u8),
    /// The revealed mine that ended the game.
    Exploded,
}

impl Tile {
    /// Whether the tile content is still hidden (flags keep the cover on).
    pub const fn is_covered(self) -> bool {
        matches!(self, Tile::Covered | Tile::Flagged)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Tile::Flagged)
    }

    /// Adjacent-mine count, available once the tile is open.
    pub const fn count(self) -> Option<u8> {
        match self {
            Tile::Open(count) => Some(count),
            _ => None,
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Tile::Covered
    }
}
