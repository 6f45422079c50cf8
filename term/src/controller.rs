use anyhow::Result;
use sweeper_core::{
    Action, Board, BoardConfig, DriveOutcome, IdleSolver, PointerLayout, ScriptedSolver, drive,
};

use crate::command::Command;

#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    Updated,
    Unchanged,
    Restarted,
    Facts(String),
    Help,
    Quit,
}

/// Turns player commands into board actions. Any action on a finished game starts a new one.
pub struct ManualController {
    config: BoardConfig,
    board: Board,
    pointer: PointerLayout,
}

impl ManualController {
    pub fn new(config: BoardConfig) -> Result<Self> {
        Ok(Self {
            config,
            board: Board::new(config)?,
            pointer: PointerLayout::default(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn reset(&mut self) -> Result<()> {
        self.board = Board::new(self.config)?;
        log::info!("Restarting with seed {:?}", self.board.seed());
        Ok(())
    }

    pub fn handle(&mut self, command: Command) -> Result<Reply> {
        Ok(match command {
            Command::Quit => Reply::Quit,
            Command::Help => Reply::Help,
            Command::Redraw => Reply::Unchanged,
            Command::Facts => Reply::Facts(serde_json::to_string_pretty(&self.board.facts())?),
            Command::Restart => {
                self.reset()?;
                Reply::Restarted
            }
            Command::Act(_) | Command::Click { .. } if self.board.game_over() => {
                self.reset()?;
                Reply::Restarted
            }
            Command::Act(_) | Command::Click { .. } => {
                match command.action(&self.pointer, self.board.size()) {
                    Some(action) if self.board.apply(action) => Reply::Updated,
                    _ => Reply::Unchanged,
                }
            }
        })
    }
}

/// Builds a board and hands it to a controller: the scripted one when actions are given,
/// otherwise the idle placeholder.
pub fn run_solver(
    config: BoardConfig,
    script: Option<Vec<Action>>,
    max_rounds: usize,
) -> Result<(Board, DriveOutcome)> {
    let mut board = Board::new(config)?;
    let outcome = match script {
        Some(actions) => {
            let mut solver: ScriptedSolver = actions.into_iter().collect();
            drive(&mut board, &mut solver, max_rounds)
        }
        None => drive(&mut board, &mut IdleSolver, max_rounds),
    };
    Ok((board, outcome))
}
