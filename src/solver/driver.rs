use crate::board::Board;
use crate::moves::{apply_move_seq, MoveSeq};
use crate::solver::backward::{self, BackwardSolver};
use crate::solver::forward::{self, ForwardSolver};
use crate::solver::intersect::{find_intersections, SegmentPair};
use crate::solver::{SearchOptions, SharedData, Solution, Stage, Status};

/// When both sides have been running for a while, stop growing whichever
/// visited trie is already twice the size of the other.
const BALANCE_DEPTH: usize = 15;

/// The two-endpoint driver: alternates forward and backward layer
/// expansions, scans the visited tries for an intersection after each
/// round, and splices the first verified overlap into a full answer.
#[derive(Debug, Clone, Copy)]
pub struct Driver<'a> {
    data: &'a SharedData,
    options: SearchOptions,
}

impl<'a> Driver<'a> {
    pub fn new(data: &'a SharedData, options: SearchOptions) -> Self {
        Self { data, options }
    }

    pub fn solve(&self) -> Option<Solution> {
        if let Some(rotation) = self.data.matched_rotation(&self.data.player) {
            return Some(Solution {
                moves: MoveSeq::new(),
                rotation,
                states_visited: 0,
            });
        }
        // a board without a hole cannot move at all
        let _ = self.data.player.find_empty()?;

        let mut fw = ForwardSolver::new(self.data, self.options.max_forward_depth);
        let mut bw = BackwardSolver::new(self.data, self.options.max_backward_depth);
        let mut best: Option<Solution> = None;

        loop {
            let (expand_fw, expand_bw) = Self::plan_round(&fw, &bw);
            if !expand_fw && !expand_bw {
                break;
            }

            let fw_status = if expand_fw {
                fw.expand_layer()
            } else {
                Status::Continue
            };
            let bw_status = if expand_bw {
                bw.expand_layer()
            } else {
                Status::Continue
            };

            let states_visited = fw.visited().len() + bw.visited().len();

            // a direct hit on the forward side is a complete answer by itself
            if fw_status == Status::GoalReached {
                if let Some(goal) = fw.goal() {
                    let candidate = Solution {
                        moves: goal.seq.clone(),
                        rotation: goal.rotation,
                        states_visited,
                    };
                    if self.verify(&candidate.moves, candidate.rotation) {
                        Self::keep_shorter(&mut best, candidate);
                    }
                }
            }

            let pairs = find_intersections(fw.visited(), bw.visited());
            if !pairs.is_empty() {
                info!("found {} overlapping board pairs", pairs.len());
                for pair in &pairs {
                    if let Some(candidate) = self.recover(&fw, &bw, pair, states_visited) {
                        Self::keep_shorter(&mut best, candidate);
                    }
                }
            }

            if best.is_some() {
                break;
            }
            if fw_status == Status::CapReached && bw_status == Status::CapReached {
                break;
            }

            if expand_fw {
                fw.rotate_frontier();
            }
            if expand_bw {
                bw.rotate_frontier();
            }
        }

        if let Some(ref solution) = best {
            info!(
                "solved in {} moves, {} states visited",
                solution.len(),
                solution.states_visited
            );
            debug!("answer: {}", solution.moves);
        }
        best
    }

    fn plan_round(fw: &ForwardSolver, bw: &BackwardSolver) -> (bool, bool) {
        let mut expand_fw = !fw.done();
        let mut expand_bw = !bw.done();
        if expand_fw && expand_bw && fw.depth() > BALANCE_DEPTH {
            let fw_visited = fw.visited().len();
            let bw_visited = bw.visited().len();
            if fw_visited >= bw_visited * 2 {
                expand_fw = false;
            } else if bw_visited >= fw_visited * 2 {
                expand_bw = false;
            }
        }
        (expand_fw, expand_bw)
    }

    /// Turn one overlapping board pair back into a move sequence: find the
    /// stage behind each board (re-searching if its layer was dropped),
    /// splice the two half-paths, and replay the result for verification.
    fn recover(
        &self,
        fw: &ForwardSolver,
        bw: &BackwardSolver,
        pair: &SegmentPair,
        states_visited: usize,
    ) -> Option<Solution> {
        let fw_board = Board::from_row_fingerprints(&pair.forward);
        let bw_board = Board::from_row_fingerprints(&pair.backward);

        let fw_stage = self.recover_forward(fw, &fw_board)?;
        let bw_stage = self.recover_backward(bw, &bw_board)?;

        debug!(
            "splicing {} forward and {} backward moves (rotation {})",
            fw_stage.seq.len(),
            bw_stage.seq.len(),
            bw_stage.rotation
        );

        let moves = splice(&fw_stage.seq, &bw_stage.seq);
        let rotation = bw_stage.rotation;
        if !self.verify(&moves, rotation) {
            warn!("discarding an answer candidate that fails replay");
            return None;
        }
        Some(Solution {
            moves,
            rotation,
            states_visited,
        })
    }

    fn recover_forward(&self, fw: &ForwardSolver, board: &Board) -> Option<Stage> {
        let value = board.value128();
        if let Some(stage) = fw.find_stage(value) {
            return Some(stage.clone());
        }
        forward::search_board(self.data, value, self.options.max_forward_depth)
    }

    fn recover_backward(&self, bw: &BackwardSolver, board: &Board) -> Option<Stage> {
        let value = board.value128();
        if let Some(stage) = bw.find_stage(value) {
            return Some(stage.clone());
        }
        backward::search_board(self.data, value, self.options.max_backward_depth)
    }

    /// Replaying the answer from the player board must land on a board whose
    /// center matches the rotation the backward stage descended from.
    fn verify(&self, moves: &MoveSeq, rotation: u8) -> bool {
        let target = match self.data.target_for(rotation) {
            Some(target) => target,
            None => return false,
        };
        match apply_move_seq(&self.data.player, moves) {
            Some(board) => board.center_matches(target),
            None => false,
        }
    }

    fn keep_shorter(best: &mut Option<Solution>, candidate: Solution) {
        let better = match best {
            Some(current) => candidate.len() < current.len(),
            None => true,
        };
        if better {
            *best = Some(candidate);
        }
    }
}

/// The full answer: the forward half-path, then the backward half-path
/// reversed with every direction inverted.
fn splice(forward: &MoveSeq, backward: &MoveSeq) -> MoveSeq {
    let mut moves = forward.clone();
    for index in (0..backward.len()).rev() {
        moves.push(backward.get(index).opposite());
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::splice;
    use crate::moves::{Direction, MoveSeq};

    #[test]
    fn splice_reverses_and_inverts_the_backward_half() {
        let mut forward = MoveSeq::new();
        forward.push(Direction::Up);
        forward.push(Direction::Left);

        let mut backward = MoveSeq::new();
        backward.push(Direction::Down);
        backward.push(Direction::Right);

        let spliced = splice(&forward, &backward);
        let dirs: Vec<_> = spliced.iter().collect();
        assert_eq!(
            dirs,
            [
                Direction::Up,
                Direction::Left,
                // backward was [Down, Right]: reversed and inverted
                Direction::Left,
                Direction::Up,
            ]
        );
    }

    #[test]
    fn splice_with_empty_backward_is_the_forward_path() {
        let mut forward = MoveSeq::new();
        forward.push(Direction::Down);
        let spliced = splice(&forward, &MoveSeq::new());
        assert_eq!(spliced, forward);
    }
}
