//! Command-line interface definitions and argument parsing

use clap::Parser;

/// Render a boxplot of synthetic purchase amounts per customer segment.
///
/// The dataset, chart style, and output path (chart.png) are fixed.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Print pipeline progress and timings
    #[arg(short, long)]
    pub verbose: bool,
}
