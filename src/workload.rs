//! The two things we do with a game: a short game on the original cups,
//! reported as a digest, and a very long game on a million cups, reported as
//! a product.

use std::{
    fmt::{self, Display, Formatter},
    num::ParseIntError,
    str::FromStr,
};

use anyhow::Context;
use thiserror::Error;

use crate::{
    extract::{digest, two_successors},
    game::{CupGame, MoveObserver},
    ring::{Label, Ring},
};

#[derive(Debug, Clone, Error)]
pub enum PartError {
    #[error("Failed to parse part: {0}")]
    Parse(#[from] ParseIntError),

    #[error("{0} is not a part; must be 1 or 2")]
    BadPart(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    One,
    Two,
}

impl Part {
    pub const ALL: [Part; 2] = [Part::One, Part::Two];

    pub fn workload(self) -> Workload {
        match self {
            Part::One => Workload {
                cups: None,
                moves: 100,
                extractor: Extractor::Digest,
            },
            Part::Two => Workload {
                cups: Some(1_000_000),
                moves: 10_000_000,
                extractor: Extractor::Product,
            },
        }
    }
}

impl FromStr for Part {
    type Err = PartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u8 = s.parse()?;

        match value {
            1 => Ok(Part::One),
            2 => Ok(Part::Two),
            value => Err(PartError::BadPart(value)),
        }
    }
}

impl Display for Part {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Part::One => write!(f, "Part One"),
            Part::Two => write!(f, "Part Two"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extractor {
    Digest,
    Product,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Workload {
    /// Extend the ring up to this many cups. If omitted, only the input cups
    /// are used.
    pub cups: Option<usize>,
    pub moves: usize,
    pub extractor: Extractor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    Digest(u64),
    Product { first: Label, second: Label },
}

impl Report {
    pub fn value(&self) -> u64 {
        match *self {
            Report::Digest(digest) => digest,
            Report::Product { first, second } => u64::from(first) * u64::from(second),
        }
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl Workload {
    pub fn with_cups(self, cups: Option<usize>) -> Self {
        Workload {
            cups: cups.or(self.cups),
            ..self
        }
    }

    pub fn with_moves(self, moves: Option<usize>) -> Self {
        Workload {
            moves: moves.unwrap_or(self.moves),
            ..self
        }
    }

    /// Build a ring from the labels, play the game starting from the first
    /// cup, and summarize the result.
    pub fn run(&self, labels: &[Label], observer: impl MoveObserver) -> anyhow::Result<Report> {
        let ring = Ring::build(labels.iter().copied(), self.cups)
            .context("Failed to build the ring of cups")?;

        let first = *labels.first().context("No cups were given")?;
        let mut game = CupGame::new(ring, first).context("Can't play with this ring")?;

        log::debug!(
            "playing {} moves on {} cups, starting from cup {}",
            self.moves,
            game.ring().len(),
            first
        );

        let active = game.run_with(self.moves, observer)?;
        log::debug!(
            "finished after {} moves, with cup {} up next",
            game.moves_played(),
            active
        );

        let ring = game.into_ring();

        match self.extractor {
            Extractor::Digest => {
                let digest = digest(&ring).context("Can't compute a digest of this ring")?;
                Ok(Report::Digest(digest))
            }
            Extractor::Product => {
                let (first, second) = two_successors(&ring);
                log::debug!("cups after {}: {} and {}", ring.anchor(), first, second);
                Ok(Report::Product { first, second })
            }
        }
    }
}
