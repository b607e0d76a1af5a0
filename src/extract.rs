//! Summaries of a finished ring, always read clockwise from the anchor cup.

use thiserror::Error;

use crate::ring::{Label, Ring};

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("cup {label} can't be written as a single digit")]
pub struct DigestRangeError {
    pub label: Label,
}

/// Concatenate the labels of every cup after the anchor, in order, as a
/// decimal number. Only works on rings where every label is a single digit.
pub fn digest(ring: &Ring) -> Result<u64, DigestRangeError> {
    ring.iter_from(ring.anchor())
        .skip(1)
        .try_fold(0, |digest, label| match label {
            1..=9 => Ok(digest * 10 + u64::from(label)),
            label => Err(DigestRangeError { label }),
        })
}

/// The two cups immediately after the anchor
pub fn two_successors(ring: &Ring) -> (Label, Label) {
    let first = ring.successor(ring.anchor());
    (first, ring.successor(first))
}

pub fn two_successor_product(ring: &Ring) -> u64 {
    let (first, second) = two_successors(ring);
    u64::from(first) * u64::from(second)
}
