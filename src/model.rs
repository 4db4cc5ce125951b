//! Descriptive statistics and boxplot geometry for purchase amounts

use crate::data::Dataset;
use statrs::statistics::Statistics;
use std::cmp::Ordering;

/// Whisker reach as a multiple of the interquartile range
pub const WHISKER_IQR_FACTOR: f64 = 1.5;

/// Per-segment summary: count, mean, sample std, min, quartiles, max
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentSummary {
    pub segment: &'static str,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl SegmentSummary {
    /// Summarize the amounts of one segment
    pub fn compute(segment: &'static str, amounts: &[f64]) -> crate::Result<Self> {
        if amounts.is_empty() {
            anyhow::bail!("Segment '{}' has no purchase records", segment);
        }

        let sorted = sorted_copy(amounts);

        Ok(SegmentSummary {
            segment,
            count: amounts.len(),
            mean: amounts.mean(),
            // Sample standard deviation; undefined (NaN) for a single value
            std: amounts.std_dev(),
            min: sorted[0],
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.50),
            q3: quantile(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        })
    }
}

/// Box-and-whisker geometry for one segment
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Lowest data point within `q1 - 1.5 * IQR`
    pub whisker_low: f64,
    /// Highest data point within `q3 + 1.5 * IQR`
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    pub fn compute(amounts: &[f64]) -> crate::Result<Self> {
        if amounts.is_empty() {
            anyhow::bail!("Cannot compute box statistics for an empty series");
        }

        let sorted = sorted_copy(amounts);
        let q1 = quantile(&sorted, 0.25);
        let median = quantile(&sorted, 0.50);
        let q3 = quantile(&sorted, 0.75);
        let iqr = q3 - q1;
        let lower_fence = q1 - WHISKER_IQR_FACTOR * iqr;
        let upper_fence = q3 + WHISKER_IQR_FACTOR * iqr;

        let inside: Vec<f64> = sorted
            .iter()
            .copied()
            .filter(|&v| v >= lower_fence && v <= upper_fence)
            .collect();
        let outliers: Vec<f64> = sorted
            .iter()
            .copied()
            .filter(|&v| v < lower_fence || v > upper_fence)
            .collect();

        // The quartiles always lie within the fences, so `inside` is never empty
        let whisker_low = inside.first().copied().unwrap_or(q1).min(q1);
        let whisker_high = inside.last().copied().unwrap_or(q3).max(q3);

        Ok(BoxStats {
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            outliers,
        })
    }
}

/// Quantile of sorted data using linear interpolation between closest ranks
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }

    let position = (sorted.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

/// Summarize every segment, ordered alphabetically by segment name
pub fn describe(dataset: &Dataset) -> crate::Result<Vec<SegmentSummary>> {
    let mut summaries = dataset
        .group_by_segment()
        .into_iter()
        .map(|(segment, amounts)| SegmentSummary::compute(segment, &amounts))
        .collect::<crate::Result<Vec<_>>>()?;

    summaries.sort_by(|a, b| a.segment.cmp(b.segment));
    Ok(summaries)
}

/// Render summaries as a fixed-width table, values to two decimals
pub fn format_summary_table(summaries: &[SegmentSummary]) -> String {
    let name_width = summaries
        .iter()
        .map(|s| s.segment.len())
        .chain(std::iter::once("Customer Segment".len()))
        .max()
        .unwrap_or(0);

    let mut lines = vec![
        format!(
            "{:<name_width$} {:>6} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9} {:>9}",
            "", "count", "mean", "std", "min", "25%", "50%", "75%", "max",
        ),
        format!("{:<name_width$}", "Customer Segment"),
    ];
    lines.extend(summaries.iter().map(|s| {
        format!(
            "{:<name_width$} {:>6} {:>9.2} {:>9.2} {:>9.2} {:>9.2} {:>9.2} {:>9.2} {:>9.2}",
            s.segment, s.count, s.mean, s.std, s.min, s.q1, s.median, s.q3, s.max,
        )
    }));

    lines.iter().map(|line| format!("{}\n", line)).collect()
}

/// Console report printed after the chart is written
pub fn format_report(
    dataset: &Dataset,
    summaries: &[SegmentSummary],
    output_path: &str,
    dimensions: (u32, u32),
) -> String {
    let mut report = format!(
        "Chart generated successfully: {} ({}x{} pixels)\n",
        output_path, dimensions.0, dimensions.1
    );
    report.push_str("\nDataset Summary:\n");
    report.push_str(&format!("Total customers analyzed: {}\n", dataset.len()));
    report.push_str("\nPurchase statistics by segment:\n");
    report.push_str(&format_summary_table(summaries));
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{generate_customer_data, PurchaseRecord, Segment};

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    fn create_test_dataset() -> Dataset {
        let segments = vec![
            Segment { name: "Zeta", mean: 20.0, std: 1.0, n: 3 },
            Segment { name: "Alpha", mean: 40.0, std: 1.0, n: 4 },
        ];
        let amounts = [("Zeta", 10.0), ("Zeta", 20.0), ("Zeta", 30.0)]
            .into_iter()
            .chain([("Alpha", 40.0), ("Alpha", 10.0), ("Alpha", 30.0), ("Alpha", 20.0)]);
        let records = amounts
            .map(|(segment, amount)| PurchaseRecord { segment, amount })
            .collect();
        Dataset { segments, records }
    }

    #[test]
    fn test_quantile_interpolation() {
        let sorted = [10.0, 20.0, 30.0, 40.0];
        assert_close(quantile(&sorted, 0.0), 10.0);
        assert_close(quantile(&sorted, 0.25), 17.5);
        assert_close(quantile(&sorted, 0.5), 25.0);
        assert_close(quantile(&sorted, 0.75), 32.5);
        assert_close(quantile(&sorted, 1.0), 40.0);
        assert!(quantile(&[], 0.5).is_nan());
    }

    #[test]
    fn test_segment_summary() {
        let summary = SegmentSummary::compute("Alpha", &[40.0, 10.0, 30.0, 20.0]).unwrap();
        assert_eq!(summary.count, 4);
        assert_close(summary.mean, 25.0);
        // Sample std of 10, 20, 30, 40
        assert_close(summary.std, (500.0f64 / 3.0).sqrt());
        assert_close(summary.min, 10.0);
        assert_close(summary.q1, 17.5);
        assert_close(summary.median, 25.0);
        assert_close(summary.q3, 32.5);
        assert_close(summary.max, 40.0);

        assert!(SegmentSummary::compute("Empty", &[]).is_err());
    }

    #[test]
    fn test_describe_sorts_by_name() {
        let summaries = describe(&create_test_dataset()).unwrap();
        let names: Vec<&str> = summaries.iter().map(|s| s.segment).collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);
        assert_eq!(summaries[0].count, 4);
        assert_eq!(summaries[1].count, 3);
    }

    #[test]
    fn test_box_stats_outliers() {
        let mut amounts: Vec<f64> = (1..=9).map(|v| v as f64 * 10.0).collect();
        amounts.push(500.0);
        let stats = BoxStats::compute(&amounts).unwrap();

        assert_close(stats.q1, 32.5);
        assert_close(stats.q3, 77.5);
        assert_eq!(stats.outliers, vec![500.0]);
        assert_close(stats.whisker_low, 10.0);
        assert_close(stats.whisker_high, 90.0);
    }

    #[test]
    fn test_box_stats_without_outliers() {
        let stats = BoxStats::compute(&[12.0, 14.0, 15.0, 16.0, 18.0]).unwrap();
        assert!(stats.outliers.is_empty());
        assert_close(stats.whisker_low, 12.0);
        assert_close(stats.whisker_high, 18.0);
        assert_close(stats.median, 15.0);

        assert!(BoxStats::compute(&[]).is_err());
    }

    #[test]
    fn test_summary_table_format() {
        let summaries = describe(&create_test_dataset()).unwrap();
        let table = format_summary_table(&summaries);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("count"));
        assert!(lines[0].contains("25%"));
        assert!(lines[1].starts_with("Customer Segment"));
        assert!(lines[2].starts_with("Alpha"));
        assert!(lines[2].contains("25.00"));
        assert!(lines[2].contains("17.50"));
        assert!(lines[3].starts_with("Zeta"));
    }

    #[test]
    fn test_report_header() {
        let dataset = generate_customer_data().unwrap();
        let summaries = describe(&dataset).unwrap();
        let report = format_report(&dataset, &summaries, "chart.png", (512, 512));

        assert!(report.starts_with("Chart generated successfully: chart.png (512x512 pixels)"));
        assert!(report.contains("Total customers analyzed: 650"));
        assert!(report.contains("Purchase statistics by segment:"));
        for name in ["Basic", "Occasional", "Premium", "Standard"] {
            assert!(report.contains(name));
        }
    }

    #[test]
    fn test_report_layout() {
        let dataset = create_test_dataset();
        let summaries = describe(&dataset).unwrap();
        let report = format_report(&dataset, &summaries, "chart.png", (512, 512));
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "Chart generated successfully: chart.png (512x512 pixels)");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "Dataset Summary:");
        assert_eq!(lines[3], "Total customers analyzed: 7");
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "Purchase statistics by segment:");
        assert_eq!(lines.len(), 6 + 4);
        assert!(report.ends_with('\n'));
    }
}
