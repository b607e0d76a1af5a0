//! The ring of cups. Rather than linked nodes, the ring is a dense array of
//! successors indexed by label, so finding the cup after any other cup (or
//! finding a cup by its label at all) is a single lookup.

use std::{cmp::max, convert::TryFrom, iter};

use bitvec::bitvec;
use thiserror::Error;

/// Cups are labeled with positive integers.
pub type Label = u32;

/// Successor value for a label that isn't in the ring. 0 is never a valid
/// label, so it's free to use as a marker.
const ABSENT: Label = 0;

#[inline]
fn slot(label: Label) -> usize {
    label as usize - 1
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RingError {
    #[error("no cup labels were given")]
    Empty,

    #[error("cup label at index {index} is 0; labels must be positive")]
    ZeroLabel { index: usize },

    #[error("duplicate cup label {label} at index {index}")]
    Duplicate { label: Label, index: usize },

    #[error("{len} cups is too many to label")]
    TooLarge { len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ring {
    /// `next[label - 1]` is the label clockwise of `label`, or ABSENT
    next: Vec<Label>,
    len: usize,
    anchor: Label,
}

impl Ring {
    /// Build a ring from cup labels in clockwise order. If `target_len` is
    /// larger than the highest label, the labels after it (up to and
    /// including `target_len`) are appended in increasing order before the
    /// ring closes back around to the first cup.
    pub fn build(
        labels: impl IntoIterator<Item = Label>,
        target_len: Option<usize>,
    ) -> Result<Self, RingError> {
        let labels: Vec<Label> = labels.into_iter().collect();
        let first = *labels.first().ok_or(RingError::Empty)?;

        if let Some(index) = labels.iter().position(|&label| label == ABSENT) {
            return Err(RingError::ZeroLabel { index });
        }

        let highest = labels.iter().copied().fold(first, max);
        let universe = max(highest as usize, target_len.unwrap_or(0));
        let top = Label::try_from(universe).map_err(|_| RingError::TooLarge { len: universe })?;

        let mut seen = bitvec![0; universe];
        let mut next = vec![ABSENT; universe];
        let mut last = first;

        for (index, &label) in labels.iter().enumerate() {
            if seen[slot(label)] {
                return Err(RingError::Duplicate { label, index });
            }
            seen.set(slot(label), true);

            if index > 0 {
                next[slot(last)] = label;
                last = label;
            }
        }

        for label in highest + 1..=top {
            next[slot(last)] = label;
            last = label;
        }

        next[slot(last)] = first;

        let anchor = labels.iter().copied().fold(first, Ord::min);
        let len = labels.len() + (top - highest) as usize;

        log::debug!(
            "built a ring of {} cups from {} labels, anchored at {}",
            len,
            labels.len(),
            anchor
        );

        Ok(Ring { next, len, anchor })
    }

    /// The number of cups in the ring
    pub fn len(&self) -> usize {
        self.len
    }

    /// The highest label in the ring
    pub fn max_label(&self) -> Label {
        self.next.len() as Label
    }

    /// The lowest label in the ring, which reports are read relative to.
    /// For any ring built from a dense set of labels this is 1.
    pub fn anchor(&self) -> Label {
        self.anchor
    }

    pub fn contains(&self, label: Label) -> bool {
        label != ABSENT
            && self
                .next
                .get(slot(label))
                .map_or(false, |&next| next != ABSENT)
    }

    /// The label clockwise of `label`. Panics if `label` is above
    /// `max_label`.
    #[inline]
    pub fn successor(&self, label: Label) -> Label {
        self.next[slot(label)]
    }

    /// The next lower label in the ring, wrapping around from the lowest
    /// label to the highest.
    #[inline]
    pub fn below(&self, label: Label) -> Label {
        let mut candidate = label;

        loop {
            candidate = match candidate {
                1 => self.max_label(),
                candidate => candidate - 1,
            };

            if self.contains(candidate) {
                break candidate;
            }
        }
    }

    /// Remove the `K` cups clockwise of `label` and return them in order. The
    /// links between the removed cups are left alone, so they can be spliced
    /// back in elsewhere with `splice_in_after`. Until then, the removed cups
    /// aren't reachable from the rest of the ring.
    ///
    /// Panics if the ring doesn't have more than `K` cups.
    #[inline]
    pub fn splice_out_after<const K: usize>(&mut self, label: Label) -> [Label; K] {
        assert!(
            K < self.len,
            "can't remove {} cups from a ring of {}",
            K,
            self.len
        );

        let mut run = [ABSENT; K];
        let mut cup = label;

        for removed in run.iter_mut() {
            cup = self.successor(cup);
            *removed = cup;
        }

        self.next[slot(label)] = self.successor(cup);
        run
    }

    /// Reinsert a run of cups, previously removed with `splice_out_after`,
    /// clockwise of `label`.
    #[inline]
    pub fn splice_in_after<const K: usize>(&mut self, label: Label, run: [Label; K]) {
        if let (Some(&first), Some(&last)) = (run.first(), run.last()) {
            self.next[slot(last)] = self.successor(label);
            self.next[slot(label)] = first;
        }
    }

    /// Iterate over every cup in the ring once, clockwise, starting with
    /// `label`.
    pub fn iter_from(&self, label: Label) -> impl Iterator<Item = Label> + '_ {
        iter::successors(Some(label), move |&cup| Some(self.successor(cup))).take(self.len)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashSet;

    use super::*;

    /// Following successors from every cup visits every cup exactly once
    /// before coming back around.
    pub(crate) fn assert_single_cycle(ring: &Ring) {
        let labels: Vec<Label> = (1..=ring.max_label())
            .filter(|&label| ring.contains(label))
            .collect();
        assert_eq!(labels.len(), ring.len());

        for &start in &labels {
            let mut visited = HashSet::new();
            let mut cup = start;

            for _ in 0..ring.len() {
                assert!(visited.insert(cup), "cup {} visited twice", cup);
                cup = ring.successor(cup);
            }

            assert_eq!(cup, start);
        }
    }

    fn labels(input: &str) -> Vec<Label> {
        input.bytes().map(|b| Label::from(b - b'0')).collect()
    }

    #[test]
    fn build_links_in_order() {
        let ring = Ring::build(labels("389125467"), None).unwrap();

        assert_eq!(ring.len(), 9);
        assert_eq!(ring.max_label(), 9);
        assert_eq!(ring.anchor(), 1);
        assert_eq!(ring.successor(3), 8);
        assert_eq!(ring.successor(7), 3);
        assert_eq!(
            ring.iter_from(1).collect::<Vec<_>>(),
            labels("125467389")
        );
        assert_single_cycle(&ring);
    }

    #[test]
    fn build_extends_past_highest_label() {
        let ring = Ring::build(labels("389125467"), Some(20)).unwrap();

        assert_eq!(ring.len(), 20);
        assert_eq!(ring.successor(7), 10);
        assert_eq!(ring.successor(19), 20);
        assert_eq!(ring.successor(20), 3);
        assert_single_cycle(&ring);
    }

    #[test]
    fn target_smaller_than_input_is_ignored() {
        let ring = Ring::build(labels("389125467"), Some(4)).unwrap();
        assert_eq!(ring.len(), 9);
        assert_single_cycle(&ring);
    }

    #[test]
    fn sparse_labels_leave_gaps() {
        let ring = Ring::build(labels("37596842"), Some(12)).unwrap();

        assert_eq!(ring.len(), 11);
        assert_eq!(ring.anchor(), 2);
        assert!(!ring.contains(1));
        assert_eq!(ring.successor(2), 10);
        assert_eq!(ring.below(2), 12);
        assert_eq!(ring.below(3), 2);
        assert_single_cycle(&ring);
    }

    #[test]
    fn build_rejects_bad_input() {
        assert_eq!(Ring::build(vec![], None), Err(RingError::Empty));
        assert_eq!(
            Ring::build(vec![3, 0, 1], None),
            Err(RingError::ZeroLabel { index: 1 })
        );
        assert_eq!(
            Ring::build(vec![3, 1, 2, 1], None),
            Err(RingError::Duplicate { label: 1, index: 3 })
        );
    }

    #[test]
    fn single_cup_loops_to_itself() {
        let ring = Ring::build(vec![1], None).unwrap();
        assert_eq!(ring.successor(1), 1);
        assert_eq!(ring.below(1), 1);
    }

    #[test]
    fn splice_out_and_back_in() {
        let mut ring = Ring::build(labels("389125467"), None).unwrap();

        let run: [Label; 3] = ring.splice_out_after(3);
        assert_eq!(run, [8, 9, 1]);
        assert_eq!(ring.successor(3), 2);
        assert_eq!(ring.iter_from(3).take(6).collect::<Vec<_>>(), labels("325467"));

        ring.splice_in_after(5, run);
        assert_eq!(
            ring.iter_from(3).collect::<Vec<_>>(),
            labels("325891467")
        );
        assert_single_cycle(&ring);
    }

    #[test]
    fn splice_wraps_around_the_end() {
        let mut ring = Ring::build(labels("389125467"), None).unwrap();

        let run: [Label; 2] = ring.splice_out_after(6);
        assert_eq!(run, [7, 3]);
        assert_eq!(ring.successor(6), 8);

        ring.splice_in_after(6, run);
        assert_eq!(ring, Ring::build(labels("389125467"), None).unwrap());
    }

    #[test]
    #[should_panic]
    fn splice_out_everything_panics() {
        let mut ring = Ring::build(labels("123"), None).unwrap();
        let _: [Label; 3] = ring.splice_out_after(1);
    }
}
