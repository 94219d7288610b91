/// Single coordinate axis, which is also the board side length.
pub type Axis = u8;

/// Count type wide enough for every tile on a maximum-size board.
pub type TileCount = u16;

/// Tile coordinates as `(x, y)`, measured from the top-left corner.
pub type Pos = (Axis, Axis);

/// Conversion into an `ndarray` index.
pub trait GridIndex {
    type Output;

    fn grid(self) -> Self::Output;
}

impl GridIndex for Pos {
    type Output = [usize; 2];

    fn grid(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Number of tiles on a square board with the given side.
pub const fn square(side: Axis) -> TileCount {
    (side as TileCount) * (side as TileCount)
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

fn apply_delta(pos: Pos, delta: (i8, i8), side: Axis) -> Option<Pos> {
    let (x, y) = pos;
    let (dx, dy) = delta;

    let next_x = x.checked_add_signed(dx)?;
    if next_x >= side {
        return None;
    }

    let next_y = y.checked_add_signed(dy)?;
    if next_y >= side {
        return None;
    }

    Some((next_x, next_y))
}

/// Iterator over the up-to-8 king-move neighbors of a tile, in reading
/// order, with off-board positions already filtered out.
#[derive(Clone, Debug)]
pub struct Neighbors {
    center: Pos,
    side: Axis,
    index: u8,
}

impl Neighbors {
    pub(crate) fn new(center: Pos, side: Axis) -> Neighbors {
        Neighbors {
            center,
            side,
            index: 0,
        }
    }
}

impl Iterator for Neighbors {
    type Item = Pos;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let delta = DISPLACEMENTS[usize::from(self.index)];
            self.index += 1;

            let next_item = apply_delta(self.center, delta, self.side);
            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neighbors(center: Pos, side: Axis) -> Vec<Pos> {
        Neighbors::new(center, side).collect()
    }

    #[test]
    fn center_tile_has_eight_neighbors() {
        let found = neighbors((4, 4), 9);
        assert_eq!(found.len(), 8);
        for pos in [(3, 3), (4, 3), (5, 3), (3, 4), (5, 4), (3, 5), (4, 5), (5, 5)] {
            assert!(found.contains(&pos), "missing neighbor {:?}", pos);
        }
    }

    #[test]
    fn corner_tiles_have_three_neighbors() {
        let found = neighbors((0, 0), 9);
        assert_eq!(found.len(), 3);
        assert!(found.contains(&(1, 0)));
        assert!(found.contains(&(0, 1)));
        assert!(found.contains(&(1, 1)));

        assert_eq!(neighbors((8, 8), 9).len(), 3);
        assert_eq!(neighbors((8, 0), 9).len(), 3);
    }

    #[test]
    fn edge_tiles_have_five_neighbors() {
        assert_eq!(neighbors((4, 0), 9).len(), 5);
        assert_eq!(neighbors((0, 4), 9).len(), 5);
        assert_eq!(neighbors((8, 4), 9).len(), 5);
    }

    #[test]
    fn single_tile_board_has_no_neighbors() {
        assert!(neighbors((0, 0), 1).is_empty());
    }

    #[test]
    fn neighbors_never_include_the_center() {
        assert!(!neighbors((1, 1), 3).contains(&(1, 1)));
    }
}
