//! Move-by-move history of a game, serialized as CSV.
//!
//! Each step is one row: the 16 cell values the player saw (row-major,
//! `0` = empty) followed by the label of the move played. The batch runner
//! writes one file per won game.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::{Board, Direction};

/// One recorded step: the board as the player saw it, and the move played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub cells: [u32; 16],
    pub direction: Direction,
}

/// Ordered record of a single game.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameLog {
    steps: Vec<Step>,
}

#[derive(thiserror::Error, Debug)]
pub enum HistoryError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("line {0}: expected 16 cell values and a move label")]
    Shape(usize),
    #[error("line {0}: invalid cell value")]
    Cell(usize),
    #[error("line {0}: unknown move label")]
    Label(usize),
}

impl GameLog {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Record the board as it was when `direction` was chosen.
    pub fn push(&mut self, board: &Board, direction: Direction) {
        self.steps.push(Step {
            cells: board.cells(),
            direction,
        });
    }

    /// Encode the log, one CSV row per step.
    pub fn encode_csv(&self) -> String {
        let mut out = String::new();
        for step in &self.steps {
            for value in step.cells {
                // writes to a String cannot fail
                write!(out, "{},", value).unwrap();
            }
            writeln!(out, "{}", step.direction.label()).unwrap();
        }
        out
    }

    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), HistoryError> {
        fs::write(path, self.encode_csv())?;
        Ok(())
    }

    /// Parse a log previously produced by [`encode_csv`](Self::encode_csv).
    /// Blank lines are skipped; anything else malformed is an error naming
    /// the 1-based line.
    pub fn parse_csv(text: &str) -> Result<GameLog, HistoryError> {
        let mut steps = Vec::new();
        for (idx, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }
            let lineno = idx + 1;
            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() != 17 {
                return Err(HistoryError::Shape(lineno));
            }
            let mut cells = [0u32; 16];
            for (slot, field) in cells.iter_mut().zip(&fields[..16]) {
                *slot = field
                    .trim()
                    .parse()
                    .map_err(|_| HistoryError::Cell(lineno))?;
            }
            let direction =
                Direction::from_label(fields[16].trim()).ok_or(HistoryError::Label(lineno))?;
            steps.push(Step { cells, direction });
        }
        Ok(GameLog { steps })
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<GameLog, HistoryError> {
        let text = fs::read_to_string(path)?;
        Self::parse_csv(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn sample_log() -> GameLog {
        let mut log = GameLog::new();
        let mut cells = [0u32; 16];
        cells[0] = 2;
        cells[5] = 2;
        log.push(&Board::from_cells(cells), Direction::Left);
        cells[0] = 4;
        cells[5] = 0;
        cells[12] = 2;
        log.push(&Board::from_cells(cells), Direction::Down);
        log
    }

    #[test]
    fn round_trip_through_file() {
        let log = sample_log();
        let tmp = NamedTempFile::new().unwrap();
        log.write_to_path(tmp.path()).unwrap();
        let parsed = GameLog::read_from_path(tmp.path()).unwrap();
        assert_eq!(parsed, log);
    }

    #[test]
    fn rows_are_sixteen_cells_then_a_label() {
        let csv = sample_log().encode_csv();
        let first = csv.lines().next().unwrap();
        let fields: Vec<&str> = first.split(',').collect();
        assert_eq!(fields.len(), 17);
        assert_eq!(fields[0], "2");
        assert_eq!(fields[16], "Left");
    }

    #[test]
    fn empty_log_encodes_to_nothing() {
        assert_eq!(GameLog::new().encode_csv(), "");
        assert!(GameLog::parse_csv("").unwrap().is_empty());
    }

    #[test]
    fn malformed_rows_are_rejected() {
        let err = GameLog::parse_csv("1,2,3,Left").unwrap_err();
        assert!(matches!(err, HistoryError::Shape(1)));

        let mut short_row = vec!["2"; 16].join(",");
        short_row.push_str(",Sideways");
        let err = GameLog::parse_csv(&short_row).unwrap_err();
        assert!(matches!(err, HistoryError::Label(1)));

        let mut bad_cell = vec!["2"; 15].join(",");
        bad_cell.push_str(",x,Up");
        let err = GameLog::parse_csv(&bad_cell).unwrap_err();
        assert!(matches!(err, HistoryError::Cell(1)));

        let good = sample_log().encode_csv();
        let mut text = good.clone();
        text.push_str("not,a,row\n");
        let err = GameLog::parse_csv(&text).unwrap_err();
        assert!(matches!(err, HistoryError::Shape(3)));
    }
}
