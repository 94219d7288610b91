use chrono::prelude::*;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardState {
    /// Accepting moves, from construction until a terminal reveal.
    InProgress,
    /// Every safe tile is open.
    Won,
    /// A mine was revealed.
    Lost,
}

impl BoardState {
    /// Indicates the game has ended and no move changes the board anymore
    pub const fn is_final(self) -> bool {
        match self {
            BoardState::InProgress => false,
            BoardState::Won => true,
            BoardState::Lost => true,
        }
    }
}

impl Default for BoardState {
    fn default() -> Self {
        BoardState::InProgress
    }
}

/// One game of Minesweeper from the first reveal to a win or a loss.
///
/// The board owns its minefield and a grid of player-visible tiles; callers
/// refer to tiles by coordinates only. There is no restart: a finished board
/// stays frozen and a new game means constructing a new board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    minefield: Minefield,
    grid: Array2<Tile>,
    open_count: TileCount,
    flag_count: TileCount,
    flag_cap: FlagCap,
    state: BoardState,
    exploded: Option<Pos>,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
}

impl Board {
    /// Fresh board with `mines` tiles mined uniformly at random.
    pub fn new(size: Axis, mines: TileCount) -> Result<Board> {
        use rand::prelude::*;
        let config = BoardConfig::new(size, mines)?;
        Ok(Board::from_config(config, rand::rng().random()))
    }

    /// Like [`Board::new`], but reproducible from the seed.
    pub fn with_seed(size: Axis, mines: TileCount, seed: u64) -> Result<Board> {
        Ok(Board::from_config(BoardConfig::new(size, mines)?, seed))
    }

    /// Generates the minefield for an already-validated configuration.
    pub fn from_config(config: BoardConfig, seed: u64) -> Board {
        Board::from_minefield(UniformGenerator::new(seed).generate(config))
    }

    /// Wraps a prepared layout; every tile starts covered and unflagged.
    pub fn from_minefield(minefield: Minefield) -> Board {
        let side = usize::from(minefield.size());
        Board {
            minefield,
            grid: Array2::default([side, side]),
            open_count: 0,
            flag_count: 0,
            flag_cap: FlagCap::default(),
            state: BoardState::default(),
            exploded: None,
            started_at: None,
            ended_at: None,
        }
    }

    /// Selects the flag-placement policy, default [`FlagCap::Unlimited`].
    pub fn with_flag_cap(mut self, flag_cap: FlagCap) -> Board {
        self.flag_cap = flag_cap;
        self
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_final()
    }

    pub fn size(&self) -> Axis {
        self.minefield.size()
    }

    pub fn total_mines(&self) -> TileCount {
        self.minefield.mine_count()
    }

    /// Mines not yet flagged; negative when over-flagged under
    /// [`FlagCap::Unlimited`].
    pub fn flags_remaining(&self) -> isize {
        (self.minefield.mine_count() as isize) - (self.flag_count as isize)
    }

    pub fn tile_at(&self, pos: Pos) -> Tile {
        self.grid[pos.grid()]
    }

    /// Whether a mine sits at `pos`. Display layers should only consult this
    /// once the game is over.
    pub fn has_mine_at(&self, pos: Pos) -> bool {
        self.minefield.contains_mine(pos)
    }

    /// Adjacent-mine count fixed at generation time.
    pub fn count_at(&self, pos: Pos) -> u8 {
        self.minefield.count_at(pos)
    }

    /// The mine that ended the game, if it ended in a loss.
    pub fn exploded_at(&self) -> Option<Pos> {
        self.exploded
    }

    /// Every tile with its coordinates, for whole-board redraws.
    pub fn tiles(&self) -> impl Iterator<Item = (Pos, Tile)> {
        self.grid
            .indexed_iter()
            .map(|((x, y), &tile)| ((x as Axis, y as Axis), tile))
    }

    /// Seconds since the first reveal, frozen once the game ends. Zero while
    /// no tile was revealed yet.
    pub fn elapsed_secs(&self) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or_else(Utc::now) - started_at)
                .num_seconds()
                .max(0) as u32
        } else {
            0
        }
    }

    /// Uncovers a tile. A mine ends the game in a loss without uncovering
    /// anything else; a zero-count tile floods its whole zero region plus the
    /// numbered border around it. Revealing a flagged tile, an open tile or
    /// any tile after the game ended changes nothing and reports `NoChange`.
    pub fn reveal(&mut self, pos: Pos) -> Result<Reveal> {
        let pos = self.minefield.validate(pos)?;
        if self.state.is_final() {
            return Ok(Reveal::no_change());
        }

        let mut opened = Vec::new();
        let outcome = self.reveal_tile(pos, &mut opened);
        Ok(Reveal { outcome, opened })
    }

    /// Opens every covered, unflagged neighbor of an open tile whose count is
    /// matched by the flags around it. A mis-placed flag makes this hit the
    /// unflagged mine, exactly as a direct reveal would; the walk stops as
    /// soon as the game ends.
    pub fn chord_reveal(&mut self, pos: Pos) -> Result<Reveal> {
        let pos = self.minefield.validate(pos)?;
        if self.state.is_final() {
            return Ok(Reveal::no_change());
        }

        let Tile::Open(count) = self.grid[pos.grid()] else {
            return Ok(Reveal::no_change());
        };
        if count == 0 || count != self.count_flagged_neighbors(pos) {
            return Ok(Reveal::no_change());
        }

        let mut opened = Vec::new();
        let mut outcome = RevealOutcome::NoChange;
        for neighbor in self.minefield.iter_neighbors(pos) {
            outcome = outcome | self.reveal_tile(neighbor, &mut opened);
            if self.state.is_final() {
                break;
            }
        }
        Ok(Reveal { outcome, opened })
    }

    /// Plants a flag on a covered tile or lifts an existing one. Open tiles
    /// cannot be flagged, and nothing changes after the game ended.
    pub fn toggle_flag(&mut self, pos: Pos) -> Result<FlagOutcome> {
        use FlagOutcome::*;

        let pos = self.minefield.validate(pos)?;
        if self.state.is_final() {
            return Ok(NoChange);
        }

        Ok(match self.grid[pos.grid()] {
            Tile::Covered if self.flag_limit_reached() => NoChange,
            Tile::Covered => {
                self.grid[pos.grid()] = Tile::Flagged;
                self.flag_count += 1;
                Toggled
            }
            Tile::Flagged => {
                self.grid[pos.grid()] = Tile::Covered;
                self.flag_count -= 1;
                Toggled
            }
            _ => NoChange,
        })
    }

    fn flag_limit_reached(&self) -> bool {
        matches!(self.flag_cap, FlagCap::MineCount) && self.flags_remaining() <= 0
    }

    fn count_flagged_neighbors(&self, pos: Pos) -> u8 {
        self.minefield
            .iter_neighbors(pos)
            .filter(|&neighbor| self.grid[neighbor.grid()].is_flagged())
            .count() as u8
    }

    /// Opens one tile and runs the cascade when it has no adjacent mines.
    /// Only callable while the game is in progress.
    fn reveal_tile(&mut self, pos: Pos, opened: &mut Vec<Pos>) -> RevealOutcome {
        use RevealOutcome::*;

        match (self.grid[pos.grid()], self.minefield[pos]) {
            (Tile::Covered, true) => {
                self.mark_started();
                self.grid[pos.grid()] = Tile::Exploded;
                self.exploded = Some(pos);
                opened.push(pos);
                self.end_game(false);
                Boom
            }
            (Tile::Covered, false) => {
                let count = self.minefield.count_at(pos);
                self.mark_started();
                self.grid[pos.grid()] = Tile::Open(count);
                self.open_count += 1;
                opened.push(pos);
                log::debug!("opened tile at {:?}, adjacent mines: {}", pos, count);

                if count == 0 {
                    self.flood_from(pos, opened);
                }

                if self.open_count == self.minefield.safe_tiles() {
                    self.end_game(true);
                    Win
                } else {
                    Safe
                }
            }
            _ => NoChange,
        }
    }

    /// Breadth-first cascade over the connected zero-count region around
    /// `start`, which is already open. Tiles enter the visited set at most
    /// once and only zero tiles enqueue their neighbors, so the numbered
    /// border is opened without being expanded. Flagged tiles stay put.
    fn flood_from(&mut self, start: Pos, opened: &mut Vec<Pos>) {
        let mut visited = HashSet::from([start]);
        let mut to_visit: VecDeque<Pos> = self
            .minefield
            .iter_neighbors(start)
            .filter(|&pos| matches!(self.grid[pos.grid()], Tile::Covered))
            .collect();
        log::trace!("cascade from {:?}, first ring: {:?}", start, to_visit);

        while let Some(pos) = to_visit.pop_front() {
            if !visited.insert(pos) {
                continue;
            }
            if !matches!(self.grid[pos.grid()], Tile::Covered) {
                continue;
            }

            // only neighbors of zero tiles get enqueued, and those have no
            // mined neighbor at all
            let count = self.minefield.count_at(pos);
            self.grid[pos.grid()] = Tile::Open(count);
            self.open_count += 1;
            opened.push(pos);
            log::trace!("cascade opened {:?}, adjacent mines: {}", pos, count);

            if count == 0 {
                to_visit.extend(
                    self.minefield
                        .iter_neighbors(pos)
                        .filter(|&next| matches!(self.grid[next.grid()], Tile::Covered))
                        .filter(|next| !visited.contains(next)),
                );
            }
        }
    }

    /// The first actual uncover starts the clock.
    fn mark_started(&mut self) {
        if self.started_at.is_none() {
            let now = Utc::now();
            log::debug!("game started at {}", now);
            self.started_at = Some(now);
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_final() {
            return;
        }

        self.state = if won {
            BoardState::Won
        } else {
            BoardState::Lost
        };
        self.ended_at = Some(Utc::now());
        log::debug!("game ended: {:?}", self.state);
    }
}
