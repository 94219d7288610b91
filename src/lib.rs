use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::ops::{BitOr, Index};

pub use board::*;
pub use error::*;
pub use generator::*;
pub use tile::*;
pub use types::*;

mod board;
mod error;
mod generator;
mod tile;
mod types;

/// Validated board parameters: a square side and how many mines it hides.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: Axis,
    pub mines: TileCount,
}

impl BoardConfig {
    /// Checks that the side is positive and at least one tile stays safe.
    /// A mine-free board is allowed.
    pub fn new(size: Axis, mines: TileCount) -> Result<BoardConfig> {
        if size == 0 || mines >= square(size) {
            return Err(BoardError::InvalidConfiguration);
        }
        Ok(BoardConfig { size, mines })
    }

    pub const fn beginner() -> BoardConfig {
        BoardConfig { size: 9, mines: 10 }
    }

    pub const fn intermediate() -> BoardConfig {
        BoardConfig {
            size: 16,
            mines: 40,
        }
    }

    /// Square take on the classic expert tier, same mine total.
    pub const fn expert() -> BoardConfig {
        BoardConfig {
            size: 22,
            mines: 99,
        }
    }

    pub const fn total_tiles(&self) -> TileCount {
        square(self.size)
    }
}

/// Whether placing more flags than mines is allowed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagCap {
    /// Any covered tile can be flagged; the remaining counter may go negative.
    Unlimited,
    /// Placing a flag is refused once no flags remain.
    MineCount,
}

impl Default for FlagCap {
    fn default() -> Self {
        FlagCap::Unlimited
    }
}

/// Immutable mine layout plus the adjacency counts fixed at generation time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Minefield {
    mines: Array2<bool>,
    counts: Array2<u8>,
    mine_count: TileCount,
}

impl Minefield {
    /// Builds a layout from a square mine mask. Every tile's adjacent-mine
    /// count is computed here, by bumping the neighbors of each mine once,
    /// and never changes afterwards.
    pub fn from_mine_mask(mines: Array2<bool>) -> Result<Minefield> {
        let (dim_x, dim_y) = mines.dim();
        if dim_x != dim_y || dim_x == 0 || dim_x > usize::from(Axis::MAX) {
            return Err(BoardError::InvalidConfiguration);
        }
        let side = dim_x as Axis;

        let mut counts: Array2<u8> = Array2::default(mines.dim());
        let mut mine_count: TileCount = 0;
        for x in 0..side {
            for y in 0..side {
                if mines[(x, y).grid()] {
                    mine_count += 1;
                    for pos in Neighbors::new((x, y), side) {
                        counts[pos.grid()] += 1;
                    }
                }
            }
        }

        if mine_count >= square(side) {
            return Err(BoardError::InvalidConfiguration);
        }

        Ok(Minefield {
            mines,
            counts,
            mine_count,
        })
    }

    /// Fixed layout from explicit mine coordinates, mostly for replays and
    /// tests. Duplicate coordinates collapse into one mine.
    pub fn from_mine_coords(size: Axis, mine_coords: &[Pos]) -> Result<Minefield> {
        let side = usize::from(size);
        let mut mines: Array2<bool> = Array2::default([side, side]);

        for &pos in mine_coords {
            if pos.0 >= size || pos.1 >= size {
                return Err(BoardError::OutOfBounds);
            }
            mines[pos.grid()] = true;
        }

        Minefield::from_mine_mask(mines)
    }

    /// Bounds check that keeps the coordinates on success.
    pub fn validate(&self, pos: Pos) -> Result<Pos> {
        let side = self.size();
        if pos.0 < side && pos.1 < side {
            Ok(pos)
        } else {
            Err(BoardError::OutOfBounds)
        }
    }

    pub fn size(&self) -> Axis {
        self.mines.dim().0.try_into().expect("side was validated")
    }

    pub fn total_tiles(&self) -> TileCount {
        square(self.size())
    }

    pub fn safe_tiles(&self) -> TileCount {
        self.total_tiles() - self.mine_count
    }

    pub fn mine_count(&self) -> TileCount {
        self.mine_count
    }

    pub fn contains_mine(&self, pos: Pos) -> bool {
        self[pos]
    }

    /// Adjacent-mine count fixed when the layout was built.
    pub fn count_at(&self, pos: Pos) -> u8 {
        self.counts[pos.grid()]
    }

    pub fn iter_neighbors(&self, pos: Pos) -> Neighbors {
        Neighbors::new(pos, self.size())
    }
}

impl Index<Pos> for Minefield {
    type Output = bool;

    fn index(&self, pos: Pos) -> &Self::Output {
        &self.mines[pos.grid()]
    }
}

/// Outcome of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Toggled,
}

impl FlagOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(self) -> bool {
        match self {
            FlagOutcome::NoChange => false,
            FlagOutcome::Toggled => true,
        }
    }
}

/// Outcome of revealing tiles.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Safe,
    Win,
    Boom,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the board
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Safe => true,
            Win => true,
            Boom => true,
        }
    }
}

/// Used to merge outcomes when one call opens several tiles
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            // a hit mine dominates everything else
            (Boom, _) | (_, Boom) => Boom,
            (Win, _) | (_, Win) => Win,
            (Safe, _) | (_, Safe) => Safe,
            (NoChange, NoChange) => NoChange,
        }
    }
}

/// Report of one reveal call: the merged outcome plus every tile whose
/// cover came off, so a display layer can redraw exactly those.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reveal {
    pub outcome: RevealOutcome,
    pub opened: Vec<Pos>,
}

impl Reveal {
    pub(crate) fn no_change() -> Reveal {
        Reveal {
            outcome: RevealOutcome::NoChange,
            opened: Vec::new(),
        }
    }

    pub fn has_update(&self) -> bool {
        self.outcome.has_update()
    }
}
