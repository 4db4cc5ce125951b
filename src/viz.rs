//! Boxplot rendering using Plotters

use crate::data::Dataset;
use crate::model::BoxStats;
use plotters::coord::ranged1d::Ranged;
use plotters::prelude::*;
use plotters::style::register_font;
use std::path::Path;

/// Output image size in pixels
pub const CHART_SIZE: (u32, u32) = (512, 512);

/// Default output file, written to the working directory
pub const OUTPUT_PATH: &str = "chart.png";

/// Raster resolution used to convert point sizes to pixels (512 px = 6.4 in)
const DPI: f64 = 80.0;

/// Box fill colors, one per segment in plot order
pub const SEGMENT_COLORS: [RGBColor; 4] = [
    RGBColor(0x2E, 0x86, 0xAB),
    RGBColor(0xA2, 0x3B, 0x72),
    RGBColor(0xF1, 0x8F, 0x01),
    RGBColor(0xC7, 0x3E, 0x1D),
];

const PLOT_BACKGROUND: RGBColor = RGBColor(0xF9, 0xF9, 0xF9);
const MEDIAN_COLOR: RGBColor = RGBColor(0x8B, 0x00, 0x00);
const GRID_COLOR: RGBColor = RGBColor(0xB0, 0xB0, 0xB0);
const OUTLIER_FACE: RGBColor = RGBColor(0x80, 0x80, 0x80);
const OUTLIER_EDGE: RGBColor = RGBColor(0xA9, 0xA9, 0xA9);

const TITLE: &str = "Purchase Amount Distribution by Customer Segment";
const X_LABEL: &str = "Customer Segment";
const Y_LABEL: &str = "Purchase Amount ($)";

// Sizes in points
const TITLE_FONT_PT: f64 = 14.0;
const AXIS_LABEL_FONT_PT: f64 = 12.0;
const TICK_FONT_PT: f64 = 10.0;
const BOX_LINE_PT: f64 = 1.5;
const WHISKER_LINE_PT: f64 = 1.5;
const MEDIAN_LINE_PT: f64 = 2.5;
const GRID_LINE_PT: f64 = 0.7;
const OUTLIER_MARKER_PT: f64 = 6.0;

const GRID_ALPHA: f64 = 0.3;
const OUTLIER_ALPHA: f64 = 0.6;

/// Box width and cap width in category units
const BOX_WIDTH: f64 = 0.8;
const CAP_WIDTH: f64 = BOX_WIDTH / 2.0;

/// Dash pattern for gridlines, in category units
const DASH_LENGTH: f64 = 0.06;
const DASH_GAP: f64 = 0.04;

/// Fraction of the data range added above and below
const Y_MARGIN: f64 = 0.05;

/// Convert a point size to whole pixels at [`DPI`]
fn pt_to_px(pt: f64) -> u32 {
    ((pt * DPI / 72.0).round() as u32).max(1)
}

/// Font size in pixels for a point size at [`DPI`]
fn font_px(pt: f64) -> f64 {
    pt * DPI / 72.0
}

/// Family name every chart font is registered under
const FONT_FAMILY: &str = "sans-serif";

static REGULAR_FACE: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");
static BOLD_FACE: &[u8] = include_bytes!("../assets/fonts/DejaVuSans-Bold.ttf");

/// Register the bundled regular and bold faces under [`FONT_FAMILY`]
///
/// Text is rasterized from these faces only, so `FontStyle::Bold` selects a
/// real bold face instead of whatever the system resolves.
pub fn register_fonts() -> crate::Result<()> {
    for (style, face) in [(FontStyle::Normal, REGULAR_FACE), (FontStyle::Bold, BOLD_FACE)] {
        register_font(FONT_FAMILY, style, face)
            .map_err(|_| anyhow::anyhow!("Bundled {} font face is not a valid font", style.as_str()))?;
    }
    Ok(())
}

/// Chart font at `pt` points in the given style
fn chart_font(pt: f64, style: FontStyle) -> FontDesc<'static> {
    (FONT_FAMILY, font_px(pt)).into_font().style(style)
}

/// Draw a boxplot of purchase amounts with one box per segment
///
/// Segments are laid out left to right in the dataset's segment order. The
/// image is composed in memory and written to `output_path` once, replacing
/// any existing file.
pub fn create_segment_boxplot(dataset: &Dataset, output_path: &Path) -> crate::Result<()> {
    if dataset.is_empty() {
        anyhow::bail!("Cannot draw a boxplot without purchase records");
    }

    let groups = dataset.group_by_segment();
    let names: Vec<&str> = groups.iter().map(|(name, _)| *name).collect();
    let boxes = groups
        .iter()
        .map(|(_, amounts)| BoxStats::compute(amounts))
        .collect::<crate::Result<Vec<_>>>()?;

    let (y_min, y_max) = value_range(dataset);
    let x_range = -0.5..(names.len() as f64 - 0.5);

    register_fonts()?;

    let root = BitMapBackend::new(output_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let title_font = chart_font(TITLE_FONT_PT, FontStyle::Bold);
    let axis_font = chart_font(AXIS_LABEL_FONT_PT, FontStyle::Bold);

    let mut chart = ChartBuilder::on(&root)
        .caption(TITLE, title_font)
        .margin(12)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range.clone(), y_min..y_max)?;

    chart.plotting_area().fill(&PLOT_BACKGROUND)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(names.len() * 2)
        .x_label_formatter(&|x| category_label(&names, *x))
        .y_labels(10)
        .y_label_formatter(&|y| format!("{:.0}", y))
        .label_style(chart_font(TICK_FONT_PT, FontStyle::Normal))
        .x_desc(X_LABEL)
        .y_desc(Y_LABEL)
        .axis_desc_style(axis_font)
        .draw()?;

    // Dashed horizontal gridlines at the y tick positions
    let grid_style = GRID_COLOR
        .mix(GRID_ALPHA)
        .stroke_width(pt_to_px(GRID_LINE_PT));
    let grid_ticks = chart.as_coord_spec().y_spec().key_points(10);
    for y in grid_ticks {
        chart.draw_series(
            dash_segments(x_range.start, x_range.end)
                .into_iter()
                .map(move |(x0, x1)| PathElement::new(vec![(x0, y), (x1, y)], grid_style)),
        )?;
    }

    let box_line = BLACK.stroke_width(pt_to_px(BOX_LINE_PT));
    let whisker_line = BLACK.stroke_width(pt_to_px(WHISKER_LINE_PT));
    let median_line = MEDIAN_COLOR.stroke_width(pt_to_px(MEDIAN_LINE_PT));
    let marker_radius = pt_to_px(OUTLIER_MARKER_PT / 2.0);

    for (idx, stats) in boxes.iter().enumerate() {
        let center = idx as f64;
        let fill = SEGMENT_COLORS[idx % SEGMENT_COLORS.len()];
        let (left, right) = (center - BOX_WIDTH / 2.0, center + BOX_WIDTH / 2.0);
        let (cap_left, cap_right) = (center - CAP_WIDTH / 2.0, center + CAP_WIDTH / 2.0);

        // Whiskers and caps
        chart.draw_series(
            [
                vec![(center, stats.q1), (center, stats.whisker_low)],
                vec![(center, stats.q3), (center, stats.whisker_high)],
                vec![(cap_left, stats.whisker_low), (cap_right, stats.whisker_low)],
                vec![(cap_left, stats.whisker_high), (cap_right, stats.whisker_high)],
            ]
            .into_iter()
            .map(|points| PathElement::new(points, whisker_line)),
        )?;

        // Box body and outline
        chart.draw_series(std::iter::once(Rectangle::new(
            [(left, stats.q1), (right, stats.q3)],
            fill.filled(),
        )))?;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(left, stats.q1), (right, stats.q3)],
            box_line,
        )))?;

        chart.draw_series(std::iter::once(PathElement::new(
            vec![(left, stats.median), (right, stats.median)],
            median_line,
        )))?;

        chart.draw_series(stats.outliers.iter().map(|&value| {
            Circle::new((center, value), marker_radius, OUTLIER_FACE.mix(OUTLIER_ALPHA).filled())
        }))?;
        chart.draw_series(stats.outliers.iter().map(|&value| {
            Circle::new(
                (center, value),
                marker_radius,
                OUTLIER_EDGE.mix(OUTLIER_ALPHA).stroke_width(1),
            )
        }))?;
    }

    root.present()?;

    Ok(())
}

/// Tick label for a category axis position; blank between categories
fn category_label(names: &[&str], x: f64) -> String {
    let nearest = x.round();
    if (x - nearest).abs() > 1e-6 || nearest < 0.0 {
        return String::new();
    }
    names
        .get(nearest as usize)
        .map(|name| name.to_string())
        .unwrap_or_default()
}

/// Y axis bounds: data range padded by [`Y_MARGIN`] on each side
fn value_range(dataset: &Dataset) -> (f64, f64) {
    let min = dataset
        .records
        .iter()
        .map(|r| r.amount)
        .fold(f64::INFINITY, f64::min);
    let max = dataset
        .records
        .iter()
        .map(|r| r.amount)
        .fold(f64::NEG_INFINITY, f64::max);

    let span = (max - min).max(1.0);
    (min - span * Y_MARGIN, max + span * Y_MARGIN)
}

/// Split `[start, end]` into dash segments
fn dash_segments(start: f64, end: f64) -> Vec<(f64, f64)> {
    let mut segments = Vec::new();
    let mut x = start;
    while x < end {
        segments.push((x, (x + DASH_LENGTH).min(end)));
        x += DASH_LENGTH + DASH_GAP;
    }
    segments
}
