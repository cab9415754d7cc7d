//! Line-based keyboard input.
//!
//! This module owns the text-to-command mapping so the session loop can
//! remain agnostic about concrete key bindings.

use std::io::{BufRead, Write};

use crossterm::style::Stylize;
use game_core::{Direction, InputError, InputSource};

/// Reads answers line by line from `reader`, echoing prompts to `writer`.
pub struct ConsoleInput<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Prints `prompt` and returns the next trimmed line.
    fn read_line(&mut self, prompt: &str) -> Result<String, InputError> {
        // A broken terminal is the same as a closed one.
        write!(self.writer, "{} ", format!("{prompt} >").cyan()).map_err(|_| InputError::Closed)?;
        self.writer.flush().map_err(|_| InputError::Closed)?;

        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) | Err(_) => Err(InputError::Closed),
            Ok(_) => Ok(line.trim().to_string()),
        }
    }

    fn complain(&mut self, text: &str) -> Result<(), InputError> {
        writeln!(self.writer, "{}", text.yellow()).map_err(|_| InputError::Closed)
    }
}

/// `W`/`A`/`S`/`D` (any case) map to a direction, `0` to back.
fn parse_direction(text: &str) -> Option<Option<Direction>> {
    match text.to_ascii_lowercase().as_str() {
        "w" => Some(Some(Direction::Up)),
        "a" => Some(Some(Direction::Left)),
        "s" => Some(Some(Direction::Down)),
        "d" => Some(Some(Direction::Right)),
        "0" => Some(None),
        _ => None,
    }
}

fn parse_yes_no(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

impl<R: BufRead, W: Write> InputSource for ConsoleInput<R, W> {
    fn read_direction(&mut self, prompt: &str) -> Result<Option<Direction>, InputError> {
        loop {
            let line = self.read_line(prompt)?;
            if let Some(direction) = parse_direction(&line) {
                return Ok(direction);
            }
            self.complain("Enter W, A, S or D (0 to go back).")?;
        }
    }

    fn read_choice(&mut self, prompt: &str) -> Result<usize, InputError> {
        loop {
            let line = self.read_line(prompt)?;
            if let Ok(choice) = line.parse() {
                return Ok(choice);
            }
            self.complain("Please enter a number.")?;
        }
    }

    fn read_yes_no(&mut self, prompt: &str) -> Result<bool, InputError> {
        loop {
            let line = self.read_line(&format!("{prompt} (y/n)"))?;
            if let Some(answer) = parse_yes_no(&line) {
                return Ok(answer);
            }
            self.complain("Please answer y or n.")?;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn input(text: &str) -> ConsoleInput<Cursor<Vec<u8>>, Vec<u8>> {
        ConsoleInput::new(Cursor::new(text.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn wasd_and_back() {
        let mut input = input("W\nx\nd\n0\n");
        assert_eq!(input.read_direction("Direction"), Ok(Some(Direction::Up)));
        assert_eq!(input.read_direction("Direction"), Ok(Some(Direction::Right)));
        assert_eq!(input.read_direction("Direction"), Ok(None));
        let echoed = String::from_utf8(input.writer).unwrap();
        assert!(echoed.contains("Enter W, A, S or D"));
    }

    #[test]
    fn non_numbers_are_re_asked() {
        let mut input = input("two\n 2 \n");
        assert_eq!(input.read_choice("Action"), Ok(2));
    }

    #[test]
    fn end_of_input_closes() {
        let mut input = input("maybe\n");
        assert_eq!(input.read_yes_no("Use both hands?"), Err(InputError::Closed));
    }
}
