use regex::Regex;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use tracing::warn;

use crate::geometry::{Pixel, Point};

const COMMAND_PATTERN: &str = r"^\s*(click|cell|quit|exit|esc)(?:\s+(-?\d+)\s+(-?\d+))?\s*$";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// A left-button press at a window position.
    Press(Pixel),
    /// A press on the centre of a cell, for players who would rather not count pixels.
    PressCell(Point),
    Quit
}

/// Where the game loop gets its input from. `None` means the input is exhausted.
pub trait EventSource {
    fn next_action(&mut self) -> Option<Action>;
}

/// Reads one command per line: `click X Y`, `cell X Y` or `quit`.
pub struct LineSource<R> {
    input: R,
    pattern: Regex
}

impl LineSource<io::BufReader<io::Stdin>> {
    pub fn stdin() -> Self {
        LineSource::new(io::BufReader::new(io::stdin()))
    }
}

impl<R: BufRead> LineSource<R> {
    pub fn new(input: R) -> Self {
        let pattern = Regex::new(COMMAND_PATTERN).expect("command pattern should compile");
        LineSource{input, pattern}
    }

    fn action_from_string(&self, input: &str) -> Option<Action>{
        let cap = self.pattern.captures(input)?;
        let coordinates = match (cap.get(2), cap.get(3)) {
            (Some(x), Some(y)) => Some((x.as_str(), y.as_str())),
            _ => None
        };
        match (&cap[1], coordinates) {
            ("click", Some((x, y))) => Some(Action::Press(Pixel(x.parse().ok()?, y.parse().ok()?))),
            ("cell", Some((x, y))) => Some(Action::PressCell(Point(x.parse().ok()?, y.parse().ok()?))),
            ("quit", None) | ("exit", None) | ("esc", None) => Some(Action::Quit),
            _ => None
        }
    }
}

impl<R: BufRead> EventSource for LineSource<R> {
    fn next_action(&mut self) -> Option<Action> {
        loop {
            print!("> ");
            if let Err(err) = io::stdout().flush() {
                warn!(%err, "failed to flush the prompt");
            }
            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {},
                Err(err) => {
                    warn!(%err, "failed to read input");
                    return None
                }
            }
            if line.trim().is_empty() {
                continue
            }
            match self.action_from_string(&line) {
                Some(action) => return Some(action),
                None => println!("Must be of the form: click X Y | cell X Y | quit")
            }
        }
    }
}

/// Replays a fixed list of actions.
pub struct ScriptedSource {
    actions: VecDeque<Action>
}

impl ScriptedSource {
    pub fn new<I: IntoIterator<Item = Action>>(actions: I) -> Self {
        ScriptedSource{actions: actions.into_iter().collect()}
    }
}

impl EventSource for ScriptedSource {
    fn next_action(&mut self) -> Option<Action> {
        self.actions.pop_front()
    }
}
