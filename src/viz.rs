//! Pure rendering primitives: progress bars and quantized sparklines.
//!
//! Both are deterministic functions of their inputs so panel output can be
//! asserted exactly in tests.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

/// Below this total width no bar is drawn; the label is returned unstyled.
pub const MIN_BAR_WIDTH: usize = 10;
/// Two cells reserved around the bar for the label separator.
const BAR_RESERVED: usize = 2;

pub const BAR_FILLED: char = '\u{2588}'; // █
pub const BAR_EMPTY: char = '\u{2591}'; // ░

/// The nine vertical-fill quantization levels, blank through solid.
pub const SPARK_LEVELS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Filled-cell count for a bar of `bar_width` cells.
pub fn bar_fill(value: f64, max: f64, bar_width: usize) -> usize {
    if bar_width == 0 || max <= 0.0 {
        return 0;
    }
    let proportion = (value / max).clamp(0.0, 1.0);
    ((proportion * bar_width as f64).round() as usize).min(bar_width)
}

/// True when the bar should use alert styling.
pub fn bar_is_alert(value: f64, max: f64) -> bool {
    max > 0.0 && value / max > 0.8
}

/// A labelled horizontal progress bar. Degrades to the bare label when
/// `width` is below [`MIN_BAR_WIDTH`].
pub fn bar(
    value: f64,
    max: f64,
    width: usize,
    label: &str,
    normal: Style,
    alert: Style,
) -> Line<'static> {
    if width < MIN_BAR_WIDTH {
        return Line::from(Span::raw(label.to_string()));
    }

    let bar_width = width.saturating_sub(label.width() + BAR_RESERVED);
    let filled = bar_fill(value, max, bar_width);
    let empty = bar_width - filled;

    let mut glyphs = String::with_capacity(bar_width * 3);
    glyphs.extend(std::iter::repeat_n(BAR_FILLED, filled));
    glyphs.extend(std::iter::repeat_n(BAR_EMPTY, empty));

    let style = if bar_is_alert(value, max) { alert } else { normal };
    Line::from(vec![
        Span::raw(format!("{label} ")),
        Span::styled(glyphs, style),
    ])
}

/// A `height`-row, `width`-column sparkline over the last `width` samples of
/// `series`, right-aligned. `max_val == 0.0` derives the scale from the data
/// (falling back to 1.0 if every sample is `<= 0`).
///
/// Each column stacks fully-filled rows from the bottom; the fractional
/// remainder picks one of the nine [`SPARK_LEVELS`] for the cell above the
/// stack. Rows are returned top-to-bottom.
pub fn sparkline(series: &[f64], width: usize, height: usize, max_val: f64) -> Vec<String> {
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let max = if max_val > 0.0 {
        max_val
    } else {
        let data_max = series.iter().copied().fold(0.0f64, f64::max);
        if data_max > 0.0 { data_max } else { 1.0 }
    };

    let visible = if series.len() > width {
        &series[series.len() - width..]
    } else {
        series
    };
    let pad = width - visible.len();

    // Per column: count of solid rows and the partial level above them.
    let columns: Vec<(usize, usize)> = visible
        .iter()
        .map(|&v| {
            let normalized = (v / max * height as f64).clamp(0.0, height as f64);
            let full = normalized.floor() as usize;
            let level = ((normalized - full as f64) * 8.0).round() as usize;
            (full.min(height), level.min(8))
        })
        .collect();

    let mut rows = Vec::with_capacity(height);
    for row in 0..height {
        let from_bottom = height - 1 - row;
        let mut line = String::with_capacity(width * 3);
        for _ in 0..pad {
            line.push(' ');
        }
        for &(full, level) in &columns {
            if from_bottom < full {
                line.push(SPARK_LEVELS[8]);
            } else if from_bottom == full {
                line.push(SPARK_LEVELS[level]);
            } else {
                line.push(' ');
            }
        }
        rows.push(line);
    }
    rows
}
