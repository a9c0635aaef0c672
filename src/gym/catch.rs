use std::fmt;

use rand::Rng;

use crate::{
    algo::tabular::Condense,
    env::{Environment, Episodic},
};

/// A single square of a rendered [`Catch`] screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Ball,
    Bat,
}

impl Cell {
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Ball => '*',
            Cell::Bat => '_',
        }
    }
}

/// A full rendering of the [`Catch`] screen, row 0 at the top
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }
}

impl Condense for Grid {
    /// Cells of a row are concatenated; rows are joined by a newline
    fn condense(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.condense())
    }
}

/// Catch the falling ball
///
/// A square grid with a ball that drops one row per step from the top and a bat that slides
/// along the bottom row. Actions move the bat by `-1`, `0` or `1` columns. The episode ends
/// when the ball reaches the bottom row: +1 if the bat is under it, -1 otherwise.
///
/// Intended for use with a [`QLearner`](crate::algo::tabular::q_learner::QLearner)
#[derive(Debug, Clone)]
pub struct Catch {
    width: usize,
    height: usize,
    /// `[row, column]`
    ball: [usize; 2],
    bat: usize,
}

impl Catch {
    /// Initialize a `width` x `width` screen with a randomly placed ball and bat
    ///
    /// **Panics** if `width` is less than 2, since the ball would start on the bottom row
    pub fn new<R: Rng + ?Sized>(width: usize, rng: &mut R) -> Self {
        assert!(width >= 2, "Catch needs a width of at least 2, got {width}");
        let mut env = Self {
            width,
            height: width,
            ball: [0, 0],
            bat: 0,
        };
        env.reset(rng);
        env
    }

    /// Put the ball on the top row at `ball_column` and the bat at `bat_column`
    ///
    /// **Panics** if either column is off the screen
    pub fn place(&mut self, ball_column: usize, bat_column: usize) {
        assert!(
            ball_column < self.width && bat_column < self.width,
            "Columns ({ball_column}, {bat_column}) out of range for width {}",
            self.width
        );
        self.ball = [0, ball_column];
        self.bat = bat_column;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Ball position as `[row, column]`
    pub fn ball(&self) -> [usize; 2] {
        self.ball
    }

    pub fn bat(&self) -> usize {
        self.bat
    }

    /// Whether the ball is still falling
    pub fn is_active(&self) -> bool {
        self.ball[0] < self.height - 1
    }

    fn render(&self) -> Grid {
        let [ball_row, ball_col] = self.ball;
        let rows = (0..self.height)
            .map(|h| {
                (0..self.width)
                    .map(|w| {
                        if h == ball_row && w == ball_col {
                            Cell::Ball
                        } else if h == self.height - 1 && w == self.bat {
                            Cell::Bat
                        } else {
                            Cell::Empty
                        }
                    })
                    .collect()
            })
            .collect();
        Grid { rows }
    }
}

impl Environment for Catch {
    type Action = i32;

    fn actions(&self) -> Vec<Self::Action> {
        vec![-1, 0, 1]
    }

    /// Deltas of any size are accepted; the bat is clamped to the screen
    ///
    /// **Panics** if the episode has already ended
    fn step<R: Rng + ?Sized>(&mut self, action: Self::Action, _rng: &mut R) -> (f64, bool) {
        assert!(self.is_active(), "Episode is over, reset the environment");

        let max_col = (self.width - 1) as i64;
        self.bat = (self.bat as i64 + i64::from(action)).clamp(0, max_col) as usize;
        self.ball[0] += 1;

        if self.ball[0] < self.height - 1 {
            return (0.0, false);
        }
        if self.bat == self.ball[1] {
            (1.0, true)
        } else {
            (-1.0, true)
        }
    }
}

impl Episodic for Catch {
    type Observation = Grid;

    fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.ball = [0, rng.gen_range(0..self.width)];
        self.bat = rng.gen_range(0..self.width);
    }

    fn observe(&self) -> Self::Observation {
        self.render()
    }
}
