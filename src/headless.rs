use std::io::{self, Write};

use rand::Rng;
use serde::Serialize;
use thiserror::Error;

use crate::game::{GameState, TickEvent};
use crate::input::{Direction, GameInput};
use crate::session::{Session, SessionStatus};

/// Rejected character in a scripted move sequence.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
#[error("invalid move {symbol:?} at position {position}; expected U, D, L or R")]
pub struct MoveParseError {
    pub symbol: char,
    pub position: usize,
}

/// One published state, written as a single JSON line.
#[derive(Debug, Serialize)]
pub struct Frame<'a> {
    pub tick: u64,
    pub event: Option<TickEvent>,
    pub length: usize,
    #[serde(flatten)]
    pub state: &'a GameState,
}

/// Parses a `U`/`D`/`L`/`R` script; whitespace is ignored.
pub fn parse_moves(raw: &str) -> Result<Vec<Direction>, MoveParseError> {
    raw.chars()
        .enumerate()
        .filter(|(_, symbol)| !symbol.is_whitespace())
        .map(|(position, symbol)| {
            Direction::from_move_char(symbol).ok_or(MoveParseError { symbol, position })
        })
        .collect()
}

/// Runs up to `ticks` steps, requesting `moves[i]` before tick `i`, and
/// writes the opening state plus one frame per tick to `out`.
///
/// Stops early when the board fills up.
pub fn run<R: Rng, W: Write>(
    session: &mut Session<R>,
    ticks: u64,
    moves: &[Direction],
    out: &mut W,
) -> io::Result<()> {
    write_frame(out, session, None)?;

    for index in 0..ticks {
        let scripted = usize::try_from(index)
            .ok()
            .and_then(|index| moves.get(index));
        if let Some(&direction) = scripted {
            session.apply_input(GameInput::Direction(direction));
        }

        let event = session.tick();
        write_frame(out, session, event)?;

        if session.status() == SessionStatus::BoardFull {
            log::info!("board full after {} ticks", session.tick_count());
            break;
        }
    }

    out.flush()
}

fn write_frame<R: Rng, W: Write>(
    out: &mut W,
    session: &Session<R>,
    event: Option<TickEvent>,
) -> io::Result<()> {
    let frame = Frame {
        tick: session.tick_count(),
        event,
        length: session.state().snake.len(),
        state: session.state(),
    };

    serde_json::to_writer(&mut *out, &frame)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;
    writeln!(out)
}
