//! End-to-end pipeline: generate, summarize, render, report

use crate::data::generate_customer_data;
use crate::model::{describe, format_report};
use crate::viz::{create_segment_boxplot, CHART_SIZE, OUTPUT_PATH};
use std::path::Path;
use std::time::Instant;

/// Run the full pipeline, writing the chart as [`OUTPUT_PATH`] inside `output_dir`
///
/// Returns the console report. With `verbose`, step progress and timings are
/// printed as the pipeline runs.
pub fn run_pipeline(output_dir: &Path, verbose: bool) -> crate::Result<String> {
    let start_time = Instant::now();

    // Step 1: Generate data
    if verbose {
        println!("Step 1: Generating synthetic purchase data");
    }
    let data_start = Instant::now();
    let dataset = generate_customer_data()?;
    if verbose {
        println!("  Records: {}", dataset.len());
        println!("  Generation time: {:.3}s", data_start.elapsed().as_secs_f64());
    }

    // Step 2: Summarize
    if verbose {
        println!("\nStep 2: Computing segment statistics");
    }
    let summaries = describe(&dataset)?;

    // Step 3: Render
    let output_path = output_dir.join(OUTPUT_PATH);
    if verbose {
        println!("\nStep 3: Rendering boxplot");
        println!("  Output file: {}", output_path.display());
    }
    let viz_start = Instant::now();
    create_segment_boxplot(&dataset, &output_path)?;
    if verbose {
        println!("  Rendering time: {:.3}s", viz_start.elapsed().as_secs_f64());
        println!("  Total processing time: {:.3}s\n", start_time.elapsed().as_secs_f64());
    }

    Ok(format_report(&dataset, &summaries, OUTPUT_PATH, CHART_SIZE))
}
