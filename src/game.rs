use std::{
    fmt::{self, Display, Formatter},
    ops::ControlFlow,
};

use thiserror::Error;

use crate::ring::{Label, Ring};

/// How many cups the crab picks up each move
pub const PICK_UP: usize = 3;

/// The smallest ring on which a move is possible: the active cup plus the
/// cups it picks up.
pub const MIN_CUPS: usize = PICK_UP + 1;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("a game needs at least {} cups, but the ring only has {len}", MIN_CUPS)]
    TooFewCups { len: usize },

    #[error("cup {label} isn't in the ring")]
    NotInRing { label: Label },
}

/// A record of a single move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub active: Label,
    pub picked_up: [Label; PICK_UP],
    pub destination: Label,
}

/// Something that wants to watch a game in progress. It's called after every
/// move, and can stop the game early by returning `Break`.
pub trait MoveObserver {
    fn observe(&mut self, moves_played: usize, mv: &Move, ring: &Ring) -> ControlFlow<()>;
}

impl MoveObserver for () {
    #[inline(always)]
    fn observe(&mut self, _: usize, _: &Move, _: &Ring) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

impl<O: MoveObserver + ?Sized> MoveObserver for &mut O {
    #[inline]
    fn observe(&mut self, moves_played: usize, mv: &Move, ring: &Ring) -> ControlFlow<()> {
        (**self).observe(moves_played, mv, ring)
    }
}

impl<O: MoveObserver> MoveObserver for Option<O> {
    #[inline]
    fn observe(&mut self, moves_played: usize, mv: &Move, ring: &Ring) -> ControlFlow<()> {
        match self {
            Some(observer) => observer.observe(moves_played, mv, ring),
            None => ControlFlow::Continue(()),
        }
    }
}

impl<A: MoveObserver, B: MoveObserver> MoveObserver for (A, B) {
    #[inline]
    fn observe(&mut self, moves_played: usize, mv: &Move, ring: &Ring) -> ControlFlow<()> {
        match self.0.observe(moves_played, mv, ring) {
            ControlFlow::Continue(()) => self.1.observe(moves_played, mv, ring),
            ControlFlow::Break(()) => ControlFlow::Break(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("game interrupted after {completed} of {requested} moves")]
pub struct Interrupted {
    pub completed: usize,
    pub requested: usize,
}

#[derive(Debug, Clone)]
pub struct CupGame {
    ring: Ring,
    active: Label,
    moves_played: usize,
}

impl CupGame {
    pub fn new(ring: Ring, active: Label) -> Result<Self, GameError> {
        if ring.len() < MIN_CUPS {
            Err(GameError::TooFewCups { len: ring.len() })
        } else if !ring.contains(active) {
            Err(GameError::NotInRing { label: active })
        } else {
            Ok(CupGame {
                ring,
                active,
                moves_played: 0,
            })
        }
    }

    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    pub fn into_ring(self) -> Ring {
        self.ring
    }

    pub fn active(&self) -> Label {
        self.active
    }

    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    /// Find where the picked up cups go: the highest label below the active
    /// cup that wasn't picked up, wrapping around to the top if necessary.
    /// With only `MIN_CUPS` cups this comes all the way back around to the
    /// active cup itself.
    fn destination(&self, picked_up: &[Label; PICK_UP]) -> Label {
        let mut candidate = self.active;

        loop {
            candidate = self.ring.below(candidate);

            if !picked_up.contains(&candidate) {
                break candidate;
            }
        }
    }

    /// Play a single move
    #[inline]
    pub fn step(&mut self) -> Move {
        let active = self.active;
        let picked_up = self.ring.splice_out_after(active);
        let destination = self.destination(&picked_up);
        self.ring.splice_in_after(destination, picked_up);

        self.active = self.ring.successor(active);
        self.moves_played += 1;

        Move {
            active,
            picked_up,
            destination,
        }
    }

    /// Play `moves` moves and return the new active cup
    pub fn run(&mut self, moves: usize) -> Label {
        for _ in 0..moves {
            self.step();
        }

        self.active
    }

    /// Play `moves` moves, showing each one to the observer. If the observer
    /// calls for a stop, the game stops right away and reports how far it got;
    /// the ring is left as of the last completed move.
    pub fn run_with(
        &mut self,
        moves: usize,
        mut observer: impl MoveObserver,
    ) -> Result<Label, Interrupted> {
        for completed in 1..=moves {
            let mv = self.step();

            if observer
                .observe(self.moves_played, &mv, &self.ring)
                .is_break()
            {
                return Err(Interrupted {
                    completed,
                    requested: moves,
                });
            }
        }

        Ok(self.active)
    }
}

/// Renders the whole ring starting from the active cup, which is wrapped in
/// parentheses.
impl Display for CupGame {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.ring
            .iter_from(self.active)
            .try_for_each(|cup| match cup == self.active {
                true => write!(f, "({})", cup),
                false => write!(f, " {} ", cup),
            })
    }
}
