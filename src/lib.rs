//! segment_boxplot: synthetic customer purchase data summarized per segment
//!
//! This library generates a seeded purchase dataset for four customer
//! segments, computes descriptive statistics per segment, and renders a
//! 512x512 boxplot of purchase amounts with Plotters.

pub mod cli;
pub mod data;
pub mod model;
pub mod pipeline;
pub mod viz;

// Re-export public items for easier access
pub use cli::Args;
pub use data::{generate_customer_data, generate_with_seed, Dataset, PurchaseRecord, Segment, SEGMENTS};
pub use model::{describe, format_report, BoxStats, SegmentSummary};
pub use pipeline::run_pipeline;
pub use viz::{create_segment_boxplot, register_fonts};

/// Common result type used throughout the application
pub type Result<T> = anyhow::Result<T>;
