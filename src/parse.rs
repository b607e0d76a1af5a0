use nom::{
    character::complete::{digit1, multispace0},
    IResult, Parser,
};
use nom_supreme::{
    error::ErrorTree,
    final_parser::{final_parser, Location},
    parser_ext::ParserExt,
};

use crate::ring::Label;

/// Cup labels are written as a run of single digits, with no separators
fn parse_labels(input: &str) -> IResult<&str, Vec<Label>, ErrorTree<&str>> {
    digit1
        .map(|digits: &str| digits.bytes().map(|b| Label::from(b - b'0')).collect())
        .context("cup labels")
        .preceded_by(multispace0)
        .terminated(multispace0)
        .parse(input)
}

/// Parse the puzzle input into cup labels, in clockwise order. Checking that
/// the labels make a sensible ring is left to `Ring::build`.
pub fn parse_cups(input: &str) -> Result<Vec<Label>, ErrorTree<Location>> {
    final_parser(parse_labels)(input)
}
