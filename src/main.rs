//! segment_boxplot: purchase amount distribution by customer segment
//!
//! Generates the synthetic dataset, renders the boxplot to chart.png in the
//! working directory, and prints the dataset summary.

use anyhow::Result;
use clap::Parser;
use segment_boxplot::{run_pipeline, Args};
use std::path::Path;

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        println!("Customer Segment Boxplot");
        println!("========================\n");
    }

    let report = run_pipeline(Path::new("."), args.verbose)?;
    print!("{}", report);

    Ok(())
}
