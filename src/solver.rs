pub mod backward;
pub mod driver;
pub mod forward;
pub mod intersect;

use crate::board::{Board, Target};
use crate::moves::{Direction, MoveSeq, MoveTable};

/// Empirical depth caps: the balance point where both visited tries fit in
/// memory and an intersection is normally found before either side runs dry.
pub const MAX_FORWARD_DEPTH: usize = 28;
pub const MAX_BACKWARD_DEPTH: usize = 24;
pub const MAX_ROTATE_FORWARD_DEPTH: usize = 24;
pub const MAX_ROTATE_BACKWARD_DEPTH: usize = 20;

/// Immutable inputs shared by both solvers: the start board, the deduplicated
/// target rotations, and the per-position move table. Computed once before
/// the first layer.
#[derive(Debug, Clone)]
pub struct SharedData {
    pub player: Board,
    /// `(rotation id, rotated target)`, rotations equal to an earlier one
    /// dropped. Entry 0 is always the unrotated target.
    pub targets: Vec<(u8, Target)>,
    pub moves: MoveTable,
}

impl SharedData {
    pub fn new(player: Board, target: Target, allow_rotate: bool) -> Self {
        let mut targets = vec![(0, target)];
        if allow_rotate {
            let mut rotated = target;
            for rotation in 1..4 {
                rotated = rotated.rotate_90_cw();
                if targets.iter().all(|(_, seen)| *seen != rotated) {
                    targets.push((rotation, rotated));
                }
            }
        }
        Self {
            player,
            targets,
            moves: MoveTable::new(),
        }
    }

    /// The rotation id whose target the board's center matches, if any.
    pub fn matched_rotation(&self, board: &Board) -> Option<u8> {
        self.targets
            .iter()
            .find(|(_, target)| board.center_matches(target))
            .map(|(rotation, _)| *rotation)
    }

    pub fn target_for(&self, rotation: u8) -> Option<&Target> {
        self.targets
            .iter()
            .find(|(id, _)| *id == rotation)
            .map(|(_, target)| target)
    }
}

/// A BFS node: the board, where its hole is, the direction that produced it
/// (for undo pruning) and the path from the seed. Backward stages also carry
/// which rotation/seed board they descended from.
#[derive(Debug, Clone)]
pub struct Stage {
    pub board: Board,
    pub empty: u8,
    pub last_dir: Option<Direction>,
    pub seq: MoveSeq,
    pub rotation: u8,
    pub seed_empty: u8,
}

impl Stage {
    pub fn seed(board: Board, empty: u8, rotation: u8) -> Self {
        Self {
            board,
            empty,
            last_dir: None,
            seq: MoveSeq::new(),
            rotation,
            seed_empty: empty,
        }
    }
}

/// Outcome of expanding one BFS layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Status {
    /// More layers to go.
    Continue,
    /// A goal board showed up in this layer.
    GoalReached,
    /// Depth cap hit or frontier exhausted without a goal.
    CapReached,
}

/// A verified answer: the move sequence, the rotation of the target it
/// satisfies, and how many distinct boards both searches touched.
#[derive(Debug, Clone)]
pub struct Solution {
    pub moves: MoveSeq,
    pub rotation: u8,
    pub states_visited: usize,
}

impl Solution {
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

#[derive(Debug, Copy, Clone)]
pub struct SearchOptions {
    pub allow_rotate: bool,
    pub max_forward_depth: usize,
    pub max_backward_depth: usize,
}

impl SearchOptions {
    pub fn new(allow_rotate: bool) -> Self {
        if allow_rotate {
            Self {
                allow_rotate,
                max_forward_depth: MAX_ROTATE_FORWARD_DEPTH,
                max_backward_depth: MAX_ROTATE_BACKWARD_DEPTH,
            }
        } else {
            Self {
                allow_rotate,
                max_forward_depth: MAX_FORWARD_DEPTH,
                max_backward_depth: MAX_BACKWARD_DEPTH,
            }
        }
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Solve a puzzle with the two-endpoint search. `None` means no solution
/// within the depth caps, which is a normal outcome, not an error.
pub fn run(player: &Board, target: &Target, options: SearchOptions) -> Option<Solution> {
    warn!("Solving with two-endpoint breadth-first search");
    let data = SharedData::new(*player, *target, options.allow_rotate);
    driver::Driver::new(&data, options).solve()
}

#[cfg(test)]
mod tests {
    use super::{SearchOptions, SharedData};
    use crate::board::{Board, Color, Target, TARGET_SIZE};

    #[test]
    fn rotations_are_deduplicated() {
        use Color::*;
        let uniform = Target::from_cells([Red; TARGET_SIZE]);
        let data = SharedData::new(Board::filled(Red), uniform, true);
        assert_eq!(data.targets.len(), 1);

        let distinct = Target::from_cells([Red, Green, Blue, White, Orange, Yellow, Red, Green, Blue]);
        let data = SharedData::new(Board::filled(Red), distinct, true);
        assert_eq!(data.targets.len(), 4);
        let ids: Vec<_> = data.targets.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, [0, 1, 2, 3]);

        let data = SharedData::new(Board::filled(Red), distinct, false);
        assert_eq!(data.targets.len(), 1);
    }

    #[test]
    fn default_depth_caps() {
        let rotating = SearchOptions::new(true);
        assert_eq!(rotating.max_forward_depth, 24);
        assert_eq!(rotating.max_backward_depth, 20);

        let fixed = SearchOptions::new(false);
        assert_eq!(fixed.max_forward_depth, 28);
        assert_eq!(fixed.max_backward_depth, 24);
    }
}
