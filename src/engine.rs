use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in the stable evaluation order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Text label used by the history format.
    pub fn label(self) -> &'static str {
        match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        }
    }

    /// Inverse of [`label`](Self::label).
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Up" => Some(Direction::Up),
            "Down" => Some(Direction::Down),
            "Left" => Some(Direction::Left),
            "Right" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Result of a single shift: whether the board changed, and the points
/// scored by merges (the sum of all newly created tile values).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShiftOutcome {
    pub moved: bool,
    pub points: u32,
}

/// A 4x4 2048 board holding tile values row-major; `0` is an empty cell.
///
/// `Board` is `Copy`, so every assignment is a full deep copy — lookahead
/// code can probe a copy without ever touching the original.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [u32; 16],
}

impl Board {
    /// A constant empty board (all cells empty).
    pub const EMPTY: Board = Board { cells: [0; 16] };

    /// Construct a `Board` from row-major cell values.
    #[inline]
    pub fn from_cells(cells: [u32; 16]) -> Self {
        Board { cells }
    }

    /// Snapshot the cell values, row-major.
    #[inline]
    pub fn cells(&self) -> [u32; 16] {
        self.cells
    }

    /// Value at `(row, col)`, `0` when empty. Indices run 0..4.
    #[inline]
    pub fn cell(&self, row: usize, col: usize) -> u32 {
        self.cells[row * 4 + col]
    }

    /// Slide and merge tiles toward `direction`, mutating in place.
    ///
    /// Returns the points scored and whether anything moved; the board is
    /// left untouched when the move is illegal (`moved == false`).
    ///
    /// ```
    /// use mc_2048::engine::{Board, Direction};
    /// let mut b = Board::from_cells([
    ///     2, 2, 0, 0,
    ///     0, 0, 0, 0,
    ///     0, 0, 0, 0,
    ///     0, 0, 0, 0,
    /// ]);
    /// let out = b.try_shift(Direction::Left);
    /// assert!(out.moved);
    /// assert_eq!(out.points, 4);
    /// assert_eq!(b.cell(0, 0), 4);
    /// ```
    pub fn try_shift(&mut self, direction: Direction) -> ShiftOutcome {
        let mut outcome = ShiftOutcome::default();
        for lane in 0..4 {
            let idx = lane_indices(direction, lane);
            let before = [
                self.cells[idx[0]],
                self.cells[idx[1]],
                self.cells[idx[2]],
                self.cells[idx[3]],
            ];
            let mut line = before;
            outcome.points += collapse_line(&mut line);
            if line != before {
                outcome.moved = true;
                for (k, &cell) in idx.iter().enumerate() {
                    self.cells[cell] = line[k];
                }
            }
        }
        outcome
    }

    /// True if shifting toward `direction` would change the board.
    ///
    /// Probes a copy; the board itself is never mutated.
    #[inline]
    pub fn can_shift(&self, direction: Direction) -> bool {
        let mut probe = *self;
        probe.try_shift(direction).moved
    }

    /// True if no move in any direction changes the board.
    pub fn is_game_over(&self) -> bool {
        for direction in Direction::ALL {
            if self.can_shift(direction) {
                return false;
            }
        }
        true
    }

    /// Place a 2 (90%) or 4 (10%) into a uniformly chosen empty cell.
    ///
    /// Callers must ensure an empty cell exists; spawning onto a full board
    /// is an unreachable state and panics.
    ///
    /// Deterministic example with a seeded RNG:
    /// ```
    /// use mc_2048::engine::Board;
    /// use rand::{rngs::StdRng, SeedableRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let mut b = Board::EMPTY;
    /// b.add_random_tile(&mut rng);
    /// b.add_random_tile(&mut rng);
    /// assert_eq!(b.count_empty(), 14);
    /// ```
    pub fn add_random_tile<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let open: Vec<usize> = (0..16).filter(|&i| self.cells[i] == 0).collect();
        assert!(!open.is_empty(), "no empty cell to spawn a tile into");
        let slot = open[rng.gen_range(0..open.len())];
        self.cells[slot] = if rng.gen_range(0..10) < 9 { 2 } else { 4 };
    }

    /// True if any cell holds exactly `value`.
    pub fn contains(&self, value: u32) -> bool {
        self.cells.iter().any(|&v| v == value)
    }

    /// The highest tile value on the board (`0` for an empty board).
    pub fn highest_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Count the empty cells.
    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 0).count()
    }

    /// True if at least one cell is empty.
    #[inline]
    pub fn has_empty_cell(&self) -> bool {
        self.count_empty() > 0
    }

    /// Sum of all tile values. Shifts preserve this sum.
    pub fn tile_sum(&self) -> u64 {
        self.cells.iter().map(|&v| v as u64).sum()
    }
}

/// Cell indices of one lane (row or column), ordered from the edge the
/// tiles travel toward.
fn lane_indices(direction: Direction, lane: usize) -> [usize; 4] {
    match direction {
        Direction::Left => [4 * lane, 4 * lane + 1, 4 * lane + 2, 4 * lane + 3],
        Direction::Right => [4 * lane + 3, 4 * lane + 2, 4 * lane + 1, 4 * lane],
        Direction::Up => [lane, lane + 4, lane + 8, lane + 12],
        Direction::Down => [lane + 12, lane + 8, lane + 4, lane],
    }
}

fn collapse_line(line: &mut [u32; 4]) -> u32 {
    let mut points = 0;
    for i in 0..4 {
        points += collapse_front(&mut line[i..]);
    }
    points
}

/// Settle the front cell of `slice`: slide the first value over empties and
/// merge it with at most one equal follower. The accumulator merges once
/// per suffix pass, so a result tile never merges twice in one shift.
fn collapse_front(slice: &mut [u32]) -> u32 {
    let mut acc = 0;
    let mut points = 0;
    for cell in slice.iter_mut() {
        let val = *cell;
        if acc != 0 && acc == val {
            *cell = 0;
            acc *= 2;
            points = acc;
            break;
        } else if acc != 0 && val != 0 && acc != val {
            break;
        } else if acc == 0 && val != 0 {
            *cell = 0;
            acc = val;
        }
    }
    slice[0] = acc;
    points
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:?})", self.cells)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..4 {
            writeln!(f, "+----+----+----+----+")?;
            for col in 0..4 {
                let v = self.cell(row, col);
                if v == 0 {
                    write!(f, "|    ")?;
                } else {
                    write!(f, "|{:>4}", v)?;
                }
            }
            writeln!(f, "|")?;
        }
        write!(f, "+----+----+----+----+")
    }
}
