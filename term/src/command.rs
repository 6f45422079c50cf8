use std::str::FromStr;

use anyhow::{Context, bail};
use sweeper_core::{Action, Click, Coord, Coord2, PointerLayout};

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    Act(Action),
    Click { x: u32, y: u32, click: Click },
    Facts,
    Restart,
    Redraw,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  r ROW COL           reveal a cell
  f ROW COL           flag a cell
  u ROW COL           unflag a cell
  click X Y [BUTTON]  pixel click, BUTTON is left (default), right or middle
  facts               print the fact relations as JSON
  restart             start over with the same settings
  quit";

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(Self::Redraw);
        };
        let args: Vec<&str> = words.collect();

        let command = match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Self::Act(Action::reveal(coords(&args)?)),
            "f" | "flag" => Self::Act(Action::flag(coords(&args)?)),
            "u" | "unflag" => Self::Act(Action::unflag(coords(&args)?)),
            "click" => {
                let [x, y, rest @ ..] = args.as_slice() else {
                    bail!("click needs X and Y");
                };
                let click = match rest {
                    [] => Click::Left,
                    [button] => parse_click(button)?,
                    _ => bail!("too many arguments to click"),
                };
                Self::Click {
                    x: x.parse().with_context(|| format!("bad x: {x}"))?,
                    y: y.parse().with_context(|| format!("bad y: {y}"))?,
                    click,
                }
            }
            "facts" => Self::Facts,
            "restart" | "new" => Self::Restart,
            "help" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            other => bail!("unknown command: {other}"),
        };
        Ok(command)
    }
}

impl Command {
    /// The board action this command stands for, resolving clicks through `pointer`.
    pub fn action(self, pointer: &PointerLayout, size: Coord2) -> Option<Action> {
        match self {
            Self::Act(action) => Some(action),
            Self::Click { x, y, click } => pointer.action_at(x, y, click, size),
            _ => None,
        }
    }
}

fn parse_click(button: &str) -> anyhow::Result<Click> {
    Ok(match button.to_ascii_lowercase().as_str() {
        "left" | "l" | "1" => Click::Left,
        "middle" | "m" | "2" => Click::Middle,
        "right" | "r" | "3" => Click::Right,
        other => bail!("unknown button: {other}"),
    })
}

fn coords(args: &[&str]) -> anyhow::Result<Coord2> {
    let [row, col] = args else {
        bail!("expected ROW COL");
    };
    let row: Coord = row.parse().with_context(|| format!("bad row: {row}"))?;
    let col: Coord = col.parse().with_context(|| format!("bad col: {col}"))?;
    Ok((row, col))
}

/// Reads a solver script: one command per line, blank lines and `#` comments skipped.
/// Only commands that act on the board are allowed.
pub fn parse_script(text: &str, pointer: &PointerLayout, size: Coord2) -> anyhow::Result<Vec<Action>> {
    let mut actions = Vec::new();
    for (number, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }

        let command: Command = line
            .parse()
            .with_context(|| format!("line {}", number + 1))?;
        match command {
            Command::Act(_) | Command::Click { .. } => {
                if let Some(action) = command.action(pointer, size) {
                    actions.push(action);
                } else {
                    log::warn!("line {}: click outside the grid ignored", number + 1);
                }
            }
            _ => bail!("line {}: `{}` does not act on the board", number + 1, line),
        }
    }
    Ok(actions)
}
