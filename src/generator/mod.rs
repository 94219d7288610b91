use crate::*;

pub use random::*;

mod random;

/// Strategy that turns a validated configuration into a mine layout.
pub trait MinefieldGenerator {
    fn generate(self, config: BoardConfig) -> Minefield;
}
