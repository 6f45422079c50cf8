use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Reveal,
    Flag,
    Unflag,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub coords: Coord2,
    pub operation: Operation,
}

impl Action {
    pub const fn new(coords: Coord2, operation: Operation) -> Self {
        Self { coords, operation }
    }

    pub const fn reveal(coords: Coord2) -> Self {
        Self::new(coords, Operation::Reveal)
    }

    pub const fn flag(coords: Coord2) -> Self {
        Self::new(coords, Operation::Flag)
    }

    pub const fn unflag(coords: Coord2) -> Self {
        Self::new(coords, Operation::Unflag)
    }
}

impl Board {
    /// Runs one action. Returns whether the board changed.
    pub fn apply(&mut self, action: Action) -> bool {
        match action.operation {
            Operation::Reveal => self.reveal(action.coords).has_update(),
            Operation::Flag => self.flag(action.coords).has_update(),
            Operation::Unflag => self.unflag(action.coords).has_update(),
        }
    }
}

/// Decides what to do next from the fact relations alone.
///
/// An empty answer means the solver has nothing left to try.
pub trait Solver {
    fn decide(&mut self, facts: &Facts) -> Vec<Action>;
}

impl<F> Solver for F
where
    F: FnMut(&Facts) -> Vec<Action>,
{
    fn decide(&mut self, facts: &Facts) -> Vec<Action> {
        self(facts)
    }
}

/// Never acts. Stands in for a rule engine that has not been written.
#[derive(Copy, Clone, Debug, Default)]
pub struct IdleSolver;

impl Solver for IdleSolver {
    fn decide(&mut self, _facts: &Facts) -> Vec<Action> {
        Vec::new()
    }
}

/// Plays back queued actions, a batch per round. Manual input feeds through this.
#[derive(Clone, Debug)]
pub struct ScriptedSolver {
    queue: VecDeque<Action>,
    batch: usize,
}

impl ScriptedSolver {
    pub fn new() -> Self {
        Self::with_batch(1)
    }

    pub fn with_batch(batch: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            batch: batch.max(1),
        }
    }

    pub fn push(&mut self, action: Action) {
        self.queue.push_back(action);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Default for ScriptedSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<Action> for ScriptedSolver {
    fn extend<T: IntoIterator<Item = Action>>(&mut self, iter: T) {
        self.queue.extend(iter);
    }
}

impl FromIterator<Action> for ScriptedSolver {
    fn from_iter<T: IntoIterator<Item = Action>>(iter: T) -> Self {
        let mut solver = Self::new();
        solver.extend(iter);
        solver
    }
}

impl Solver for ScriptedSolver {
    fn decide(&mut self, _facts: &Facts) -> Vec<Action> {
        let take = self.batch.min(self.queue.len());
        self.queue.drain(..take).collect()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriveResult {
    Won,
    Lost,
    /// The solver stopped answering, made no progress, or ran out of rounds.
    Resigned,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveOutcome {
    pub rounds: usize,
    pub applied: usize,
    pub result: DriveResult,
}

/// Feeds fresh facts to `solver` and applies its answers until the game ends, the solver
/// gives up, a round changes nothing, or `max_rounds` rounds have run.
pub fn drive(board: &mut Board, solver: &mut impl Solver, max_rounds: usize) -> DriveOutcome {
    let mut rounds = 0;
    let mut applied = 0;

    while !board.game_over() && rounds < max_rounds {
        let facts = board.facts();
        let actions = solver.decide(&facts);
        rounds += 1;

        if actions.is_empty() {
            log::debug!("Solver has no actions after {} rounds", rounds);
            break;
        }

        let mut changed = false;
        for action in actions {
            if board.game_over() {
                break;
            }
            log::trace!("Applying {:?}", action);
            changed |= board.apply(action);
            applied += 1;
        }

        if !changed {
            log::debug!("Round {} changed nothing, stopping", rounds);
            break;
        }
    }

    let result = match board.outcome() {
        Outcome::Victory => DriveResult::Won,
        Outcome::Defeat => DriveResult::Lost,
        Outcome::InProgress => DriveResult::Resigned,
    };
    log::debug!("Drive finished: {:?} after {} rounds", result, rounds);

    DriveOutcome {
        rounds,
        applied,
        result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3x5 with mines at two opposite corners.
    fn board() -> Board {
        let layout = MineLayout::from_mine_coords((3, 5), &[(0, 0), (2, 4)]).unwrap();
        Board::from_layout(&layout, BoardConfig::new(0, 0, 0)).unwrap()
    }

    #[test]
    fn idle_solver_resigns_immediately() {
        let mut board = board();
        let before = board.clone();

        let outcome = drive(&mut board, &mut IdleSolver, 100);

        assert_eq!(outcome.result, DriveResult::Resigned);
        assert_eq!(outcome.rounds, 1);
        assert_eq!(outcome.applied, 0);
        assert_eq!(board, before);
    }

    #[test]
    fn scripted_solver_can_win() {
        let mut board = board();
        let mut solver: ScriptedSolver = iter_coords(board.size())
            .filter(|&coords| board.visibility(coords) == Visibility::Hidden)
            .filter(|&coords| !board.value_at(coords).is_mine())
            .map(Action::reveal)
            .collect();
        assert_eq!(solver.len(), 12);

        let outcome = drive(&mut board, &mut solver, 100);

        assert_eq!(outcome.result, DriveResult::Won);
        assert_eq!(outcome.rounds, 12);
        assert!(board.victory());
        assert!(solver.is_empty());
    }

    #[test]
    fn scripted_solver_stops_on_mine() {
        let mut board = board();
        let mut solver = ScriptedSolver::with_batch(3);
        solver.extend([
            Action::flag((2, 4)),
            Action::reveal((0, 0)),
            Action::reveal((0, 4)),
        ]);

        let outcome = drive(&mut board, &mut solver, 100);

        assert_eq!(outcome.result, DriveResult::Lost);
        assert_eq!(outcome.rounds, 1);
        assert_eq!(outcome.applied, 2);
        assert_eq!(board.visibility((0, 4)), Visibility::Hidden);
        assert!(solver.is_empty());
    }

    #[test]
    fn round_budget_is_respected() {
        let mut board = board();
        let mut solver: ScriptedSolver = [Action::reveal((0, 1)), Action::reveal((0, 2))]
            .into_iter()
            .collect();

        let outcome = drive(&mut board, &mut solver, 1);

        assert_eq!(outcome.rounds, 1);
        assert_eq!(outcome.result, DriveResult::Resigned);
        assert_eq!(solver.len(), 1);
    }

    #[test]
    fn closures_are_solvers() {
        let mut board = board();
        let mut solver = |facts: &Facts| -> Vec<Action> {
            facts
                .known
                .iter()
                .flat_map(|cell| facts.neighbors_of((cell.row, cell.col)).collect::<Vec<_>>())
                .filter(|&coords| facts.unrevealed.contains(&coords))
                .filter(|&coords| coords != (0, 0) && coords != (2, 4))
                .map(Action::reveal)
                .collect()
        };

        let outcome = drive(&mut board, &mut solver, 100);

        assert_eq!(outcome.result, DriveResult::Won);
    }

    #[test]
    fn apply_routes_each_operation() {
        let mut board = board();

        assert!(board.apply(Action::flag((0, 4))));
        assert_eq!(board.visibility((0, 4)), Visibility::Flagged);
        assert!(board.apply(Action::unflag((0, 4))));
        assert_eq!(board.visibility((0, 4)), Visibility::Hidden);
        assert!(board.apply(Action::reveal((0, 4))));
        assert!(!board.apply(Action::reveal((0, 4))));
    }
}
