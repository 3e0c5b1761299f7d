use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::format::format_uptime;
use crate::metrics::Snapshot;
use crate::ui::theme::Theme;
use crate::viz;

/// Target width of one per-core cell, bar included.
const CORE_CELL_WIDTH: usize = 20;

pub fn render(frame: &mut Frame, area: Rect, snapshot: &Snapshot, alert: bool, theme: &Theme) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style(alert))
        .title(Span::styled(" CPU ", theme.title_style()));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let cpu = &snapshot.cpu;
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(vec![
        Span::styled(
            format!("CPU: {:.1}%", cpu.global_usage_percent),
            theme.title_style(),
        ),
        Span::styled(
            format!("  {}", format_uptime(cpu.uptime_secs)),
            theme.label_style(),
        ),
    ]));
    lines.push(Line::from(Span::styled(
        format!(
            "Load: {:.2} {:.2} {:.2}",
            cpu.load_avg[0], cpu.load_avg[1], cpu.load_avg[2]
        ),
        theme.label_style(),
    )));
    lines.push(Line::from(""));

    // Reserve the bottom of the panel for the GPU summary.
    let core_budget = (inner.height as usize).saturating_sub(lines.len() + 3);
    lines.extend(core_lines(
        &cpu.per_core_usage,
        inner.width as usize,
        core_budget,
        theme,
    ));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("GPU Summary", theme.title_style())));
    if snapshot.gpu.available {
        lines.push(viz::bar(
            snapshot.gpu.utilization as f64,
            100.0,
            inner.width as usize,
            &format!("GPU {}%", snapshot.gpu.utilization),
            theme.bar_style(),
            theme.alert_style(),
        ));
    } else {
        lines.push(Line::from(Span::styled("GPU: N/A", theme.label_style())));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Compact per-core bars packed into as many columns as the width allows.
fn core_lines(usage: &[f64], width: usize, max_rows: usize, theme: &Theme) -> Vec<Line<'static>> {
    if usage.is_empty() {
        return vec![Line::from(Span::styled("No CPU data", theme.label_style()))];
    }

    let num_cols = (width / CORE_CELL_WIDTH).max(1);
    let cell_width = (width / num_cols).saturating_sub(2).max(5);
    let rows = usage.len().div_ceil(num_cols);

    let mut lines = Vec::new();
    for row in 0..rows {
        if row >= max_rows {
            lines.push(Line::from(Span::styled("...", theme.label_style())));
            break;
        }
        let mut spans: Vec<Span> = Vec::new();
        for col in 0..num_cols {
            let idx = row * num_cols + col;
            let Some(&value) = usage.get(idx) else {
                break;
            };
            spans.extend(core_bar(idx, value, cell_width, theme));
            spans.push(Span::raw("  "));
        }
        lines.push(Line::from(spans));
    }
    lines
}

/// One "NN [||||  ]" cell; plain text when the cell is too narrow for a bar.
fn core_bar(index: usize, value: f64, width: usize, theme: &Theme) -> Vec<Span<'static>> {
    let label = format!("{index:2}");
    let bar_len = width.saturating_sub(label.len() + 3);
    if bar_len < 5 {
        return vec![Span::styled(
            format!("{label} {value:.0}%"),
            Style::default().fg(theme.text_primary),
        )];
    }

    let filled = viz::bar_fill(value, 100.0, bar_len);
    let mut glyphs = String::with_capacity(bar_len);
    glyphs.extend(std::iter::repeat_n('|', filled));
    glyphs.extend(std::iter::repeat_n(' ', bar_len - filled));

    let style = if value > 80.0 {
        theme.alert_style()
    } else {
        theme.bar_style()
    };
    vec![
        Span::styled(label, theme.label_style()),
        Span::raw(" ["),
        Span::styled(glyphs, style),
        Span::raw("]"),
    ]
}
