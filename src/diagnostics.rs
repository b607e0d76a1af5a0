//! Observers for watching long games. None of these affect the outcome of a
//! game; they exist to get a sense of how a game is progressing, or to stop
//! it early.

use std::{
    collections::HashMap,
    fmt::Display,
    ops::ControlFlow,
    sync::atomic::{AtomicBool, Ordering},
    time::{Duration, Instant},
};

use joinery::JoinableIterator;
use lazy_format::lazy_format;

use crate::{
    extract::two_successor_product,
    game::{Move, MoveObserver},
    ring::Ring,
};

/// Counts how often each two-successor product shows up after a move.
#[derive(Debug, Clone, Default)]
pub struct ProductHistogram {
    counts: HashMap<u64, usize>,
}

impl ProductHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, product: u64) -> usize {
        self.counts.get(&product).copied().unwrap_or(0)
    }

    /// Total number of moves recorded
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// The `n` most frequent products, most frequent first. Ties are broken by
    /// the product itself, so the ordering is stable.
    pub fn most_common(&self, n: usize) -> Vec<(u64, usize)> {
        let mut entries: Vec<(u64, usize)> = self
            .counts
            .iter()
            .map(|(&product, &count)| (product, count))
            .collect();

        entries.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        entries.truncate(n);
        entries
    }

    pub fn summary(&self, n: usize) -> impl Display {
        let top = self.most_common(n);
        let distinct = self.counts.len();
        let total = self.total();

        lazy_format!(
            "{} distinct products over {} moves; most common: {}",
            distinct,
            total,
            top.iter()
                .map(|&(product, count)| lazy_format!("{} (x{})", product, count))
                .join_with(", "),
        )
    }
}

impl MoveObserver for ProductHistogram {
    fn observe(&mut self, _: usize, _: &Move, ring: &Ring) -> ControlFlow<()> {
        *self.counts.entry(two_successor_product(ring)).or_default() += 1;
        ControlFlow::Continue(())
    }
}

/// Periodically logs how long the game has been running, and extrapolates
/// how long the whole thing will take.
#[derive(Debug, Clone)]
pub struct Pace {
    start: Instant,
    interval: usize,
    total: usize,
}

impl Pace {
    pub fn new(interval: usize, total: usize) -> Self {
        Pace {
            start: Instant::now(),
            interval: interval.max(1),
            total,
        }
    }

    /// Estimate the total running time, given how long it took to play
    /// `moves_played` moves.
    pub fn projected(&self, elapsed: Duration, moves_played: usize) -> Duration {
        match moves_played {
            0 => Duration::default(),
            played => {
                let nanos = elapsed.as_nanos() * self.total as u128 / played as u128;
                Duration::from_nanos(nanos as u64)
            }
        }
    }
}

impl MoveObserver for Pace {
    fn observe(&mut self, moves_played: usize, _: &Move, _: &Ring) -> ControlFlow<()> {
        if moves_played % self.interval == 0 {
            let elapsed = self.start.elapsed();

            log::info!(
                "{} of {} moves in {:?}; projected total {:?}",
                moves_played,
                self.total,
                elapsed,
                self.projected(elapsed, moves_played),
            );
        }

        ControlFlow::Continue(())
    }
}

/// Stops a game once the flag is raised. The flag is checked after every move.
#[derive(Debug, Clone, Copy)]
pub struct Cancellation<'a> {
    flag: &'a AtomicBool,
}

impl<'a> Cancellation<'a> {
    pub fn new(flag: &'a AtomicBool) -> Self {
        Cancellation { flag }
    }
}

impl MoveObserver for Cancellation<'_> {
    #[inline]
    fn observe(&mut self, _: usize, _: &Move, _: &Ring) -> ControlFlow<()> {
        match self.flag.load(Ordering::Relaxed) {
            true => ControlFlow::Break(()),
            false => ControlFlow::Continue(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{CupGame, Interrupted};

    fn example_game(target_len: Option<usize>) -> CupGame {
        let ring = Ring::build(vec![3, 8, 9, 1, 2, 5, 4, 6, 7], target_len).unwrap();
        CupGame::new(ring, 3).unwrap()
    }

    #[test]
    fn histogram_counts_every_move() {
        let mut game = example_game(None);
        let mut histogram = ProductHistogram::new();

        game.run_with(100, &mut histogram).unwrap();

        assert_eq!(histogram.total(), 100);
        assert!(histogram.count(two_successor_product(game.ring())) >= 1);
        assert_eq!(histogram.count(0), 0);
    }

    #[test]
    fn histogram_most_common_is_sorted() {
        let mut game = example_game(Some(50));
        let mut histogram = ProductHistogram::new();
        game.run_with(1000, &mut histogram).unwrap();

        let top = histogram.most_common(5);
        assert!(top.len() <= 5);
        assert!(top.windows(2).all(|pair| pair[0].1 >= pair[1].1));
        assert!(histogram.summary(5).to_string().ends_with(&format!(
            "{} (x{})",
            top.last().unwrap().0,
            top.last().unwrap().1
        )));
    }

    #[test]
    fn cancellation_stops_after_the_current_move() {
        let flag = AtomicBool::new(false);
        let mut game = example_game(None);

        assert!(game.run_with(10, Cancellation::new(&flag)).is_ok());

        flag.store(true, Ordering::Relaxed);
        assert_eq!(
            game.run_with(10, Cancellation::new(&flag)),
            Err(Interrupted {
                completed: 1,
                requested: 10
            })
        );
        assert_eq!(game.moves_played(), 11);
    }

    #[test]
    fn pace_extrapolates_linearly() {
        let pace = Pace::new(100, 1000);

        assert_eq!(
            pace.projected(Duration::from_millis(50), 100),
            Duration::from_millis(500)
        );
        assert_eq!(pace.projected(Duration::from_secs(1), 0), Duration::default());

        let mut game = example_game(None);
        assert!(game.run_with(250, pace).is_ok());
    }
}
