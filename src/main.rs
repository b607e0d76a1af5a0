mod diagnostics;
mod extract;
mod game;
mod parse;
mod ring;
mod workload;

use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Instant,
};

use anyhow::Context;
use lazy_format::lazy_format;
use structopt::StructOpt;

use crate::{
    diagnostics::{Cancellation, Pace, ProductHistogram},
    parse::parse_cups,
    workload::Part,
};

/// Simulate the crab's cup game, and report on where the cups end up.
#[derive(Debug, StructOpt)]
struct Args {
    /// Which part to run: 1 plays 100 moves and reports the cups after cup
    /// 1; 2 plays 10,000,000 moves on 1,000,000 cups and reports the product
    /// of the two cups after cup 1. If omitted, both parts run.
    #[structopt(short, long)]
    pub part: Option<Part>,

    /// Extend the ring to this many cups
    #[structopt(short, long, requires = "part")]
    pub cups: Option<usize>,

    /// Play this many moves
    #[structopt(short, long, requires = "part")]
    pub moves: Option<usize>,

    /// The cup labels, as a string of digits. If omitted, we read them from
    /// the input file.
    #[structopt(short, long, conflicts_with = "input")]
    pub labels: Option<String>,

    /// Count how often each product of the two cups after cup 1 shows up
    #[structopt(long)]
    pub histogram: bool,

    /// Log the projected running time every this many moves
    #[structopt(long)]
    pub pace: Option<usize>,

    /// Enable debug logging
    #[structopt(short, long)]
    pub verbose: bool,

    /// The file from which to read input. If omitted, we read from stdin.
    pub input: Option<PathBuf>,
}

impl Args {
    fn read_input(&self) -> anyhow::Result<String> {
        if let Some(labels) = &self.labels {
            return Ok(labels.clone());
        }

        let mut input = String::new();

        match &self.input {
            Some(path) => {
                let mut file = fs::File::open(path)
                    .with_context(|| format!("Failed to open input file '{}'", path.display()))?;

                file.read_to_string(&mut input).with_context(|| {
                    format!("Failed to read from input file '{}'", path.display())
                })?;
            }
            None => {
                io::stdin()
                    .read_to_string(&mut input)
                    .context("Failed to read input from stdin")?;
            }
        }

        Ok(input)
    }
}

fn main() -> anyhow::Result<()> {
    let args: Args = Args::from_args();

    env_logger::builder()
        .format_module_path(false)
        .format_timestamp_millis()
        .filter_level(match args.verbose {
            true => log::LevelFilter::Debug,
            false => log::LevelFilter::Info,
        })
        .init();

    let input = args.read_input()?;
    let labels = parse_cups(&input).context("Failed to parse cup labels")?;

    let cancelled = Arc::new(AtomicBool::new(false));
    {
        let cancelled = cancelled.clone();
        ctrlc::set_handler(move || cancelled.store(true, Ordering::SeqCst))
            .context("Failed to install the Ctrl-C handler")?;
    }

    let parts = match args.part {
        Some(part) => vec![part],
        None => Part::ALL.to_vec(),
    };

    // Every report is computed before any is printed, so a failure never
    // leaves a partial set of results behind.
    let mut reports = Vec::with_capacity(parts.len());

    for part in parts {
        let workload = part
            .workload()
            .with_cups(args.cups)
            .with_moves(args.moves);

        let mut histogram = args.histogram.then(ProductHistogram::new);
        let pace = args.pace.map(|interval| Pace::new(interval, workload.moves));
        let observer = (Cancellation::new(&cancelled), (pace, &mut histogram));

        let start = Instant::now();
        let report = workload
            .run(&labels, observer)
            .with_context(|| format!("Failed to run {}", part))?;
        let elapsed = start.elapsed();

        if let Some(histogram) = &histogram {
            log::info!("{}: {}", part, histogram.summary(10));
        }

        reports.push(lazy_format!("{}: {} ({:?})", part, report, elapsed));
    }

    for report in reports {
        println!("{}", report);
    }

    Ok(())
}
