use crate::board::{Board, Color, Value128, BOARD_SIZE};
use crate::solver::{SharedData, Stage, Status};
use crate::trie::VisitedTrie;

/// Breadth-first expansion from the final positions back toward the player
/// board. Seeds are every rotation of the target padded with `Unknown` on
/// the outer ring; the `Unknown` cells behave like ordinary tiles, so each
/// backward board stays a wildcard for the ring content.
///
/// There is no goal test here; completion is detected by the driver when
/// the two visited tries intersect.
#[derive(Debug)]
pub struct BackwardSolver<'a> {
    data: &'a SharedData,
    max_depth: usize,
    depth: usize,
    seeded: bool,
    curr: Vec<Stage>,
    next: Vec<Stage>,
    visited: VisitedTrie,
}

impl<'a> BackwardSolver<'a> {
    pub fn new(data: &'a SharedData, max_depth: usize) -> Self {
        Self {
            data,
            max_depth,
            depth: 0,
            seeded: false,
            curr: Vec::new(),
            next: Vec::new(),
            visited: VisitedTrie::new(),
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn visited(&self) -> &VisitedTrie {
        &self.visited
    }

    pub fn done(&self) -> bool {
        self.depth >= self.max_depth || (self.seeded && self.curr.is_empty())
    }

    /// One seed per rotation and possible home of the hole. A target that
    /// fixes the hole itself yields a single seed; otherwise every wildcard
    /// cell of the padded board is a candidate home.
    fn seeds(data: &SharedData) -> Vec<Stage> {
        let mut seeds = Vec::new();
        for &(rotation, ref target) in &data.targets {
            let padded = Board::from_center(target);
            if let Some(empty) = padded.find_empty() {
                seeds.push(Stage::seed(padded, empty, rotation));
                continue;
            }
            for pos in 0..BOARD_SIZE {
                if padded.get(pos) == Color::Unknown {
                    let mut board = padded;
                    board.set(pos, Color::Empty);
                    seeds.push(Stage::seed(board, pos as u8, rotation));
                }
            }
        }
        seeds
    }

    fn seed(&mut self) {
        for stage in Self::seeds(self.data) {
            if self.visited.try_insert(&stage.board) {
                self.curr.push(stage);
            }
        }
        self.seeded = true;
        debug!("backward: {} seed boards", self.curr.len());
    }

    pub fn expand_layer(&mut self) -> Status {
        if !self.seeded {
            self.seed();
        }
        if self.done() {
            return Status::CapReached;
        }

        let curr = std::mem::take(&mut self.curr);
        for stage in &curr {
            for mv in self.data.moves.moves_from(stage.empty) {
                if stage.last_dir.map(|dir| dir.opposite()) == Some(mv.dir) {
                    continue;
                }

                let mut board = stage.board;
                board.swap(stage.empty as usize, mv.pos as usize);
                if !self.visited.try_insert(&board) {
                    continue;
                }

                let mut seq = stage.seq.clone();
                seq.push(mv.dir);
                self.next.push(Stage {
                    board,
                    empty: mv.pos,
                    last_dir: Some(mv.dir),
                    seq,
                    rotation: stage.rotation,
                    seed_empty: stage.seed_empty,
                });
            }
        }
        self.curr = curr;
        self.depth += 1;

        debug!(
            "backward: depth {}, frontier {}, visited {}",
            self.depth,
            self.next.len(),
            self.visited.len()
        );
        Status::Continue
    }

    pub fn rotate_frontier(&mut self) {
        std::mem::swap(&mut self.curr, &mut self.next);
        self.next.clear();
    }

    pub fn find_stage(&self, value: Value128) -> Option<&Stage> {
        self.curr
            .iter()
            .chain(self.next.iter())
            .find(|stage| stage.board.value128() == value)
    }
}

/// Re-run a bounded backward search that stops as soon as `value` is
/// reached, recovering the path of a dropped stage.
pub fn search_board(data: &SharedData, value: Value128, max_depth: usize) -> Option<Stage> {
    let mut solver = BackwardSolver::new(data, max_depth);
    solver.seed();
    if let Some(stage) = solver.curr.iter().find(|stage| stage.board.value128() == value) {
        return Some(stage.clone());
    }
    while !solver.done() {
        let _ = solver.expand_layer();
        if let Some(stage) = solver.next.iter().find(|stage| stage.board.value128() == value) {
            return Some(stage.clone());
        }
        solver.rotate_frontier();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{search_board, BackwardSolver};
    use crate::board::{Board, Color, Target};
    use crate::solver::SharedData;

    fn data_without_rotation() -> SharedData {
        use Color::*;
        let target = Target::from_cells([Red, Green, Blue, Green, White, Orange, Blue, Orange, Yellow]);
        SharedData::new(Board::filled(Red), target, false)
    }

    #[test]
    fn fully_colored_target_seeds_every_ring_cell() {
        let data = data_without_rotation();
        let mut solver = BackwardSolver::new(&data, 10);
        solver.seed();

        // 16 wildcard homes for the hole, one rotation
        assert_eq!(solver.curr.len(), 16);
        assert_eq!(solver.visited().len(), 16);
        for stage in &solver.curr {
            assert_eq!(stage.board.find_empty(), Some(stage.empty));
            assert_eq!(stage.seed_empty, stage.empty);
            assert_eq!(stage.rotation, 0);
        }
    }

    #[test]
    fn target_with_a_hole_seeds_once_per_rotation() {
        use Color::*;
        let target = Target::from_cells([Red, Green, Blue, Green, Empty, Orange, Blue, Orange, Yellow]);
        let data = SharedData::new(Board::filled(Red), target, false);
        let mut solver = BackwardSolver::new(&data, 10);
        solver.seed();

        assert_eq!(solver.curr.len(), 1);
        // the hole sits at the center of the board
        assert_eq!(solver.curr[0].empty, 12);
    }

    #[test]
    fn expansion_moves_wildcards_into_the_center() {
        let data = data_without_rotation();
        let mut solver = BackwardSolver::new(&data, 10);
        let _ = solver.expand_layer();

        assert!(!solver.next.is_empty());
        // a seed with the hole on the ring can pull a center tile out,
        // leaving the hole inside the center
        let center = [6usize, 7, 8, 11, 12, 13, 16, 17, 18];
        assert!(solver
            .next
            .iter()
            .any(|stage| center.contains(&(stage.empty as usize))));
        for stage in &solver.next {
            assert_eq!(stage.seq.len(), 1);
            assert_eq!(stage.board.count_colors()[Color::Unknown as usize], 15);
        }
    }

    #[test]
    fn search_board_finds_a_seed() {
        let data = data_without_rotation();
        let seeds = BackwardSolver::seeds(&data);
        let wanted = seeds[3].board;
        let stage = search_board(&data, wanted.value128(), 10).unwrap();
        assert_eq!(stage.board, wanted);
        assert!(stage.seq.is_empty());
    }
}
