use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::format::format_bytes;
use crate::metrics::{GpuHealth, GpuMetrics};
use crate::ui::theme::Theme;
use crate::viz;

const SPARKLINE_ROWS: usize = 4;
const MAX_GPU_PROCS: usize = 4;

pub fn render(frame: &mut Frame, area: Rect, gpu: &GpuMetrics, alert: bool, theme: &Theme) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style(alert))
        .title(Span::styled(" GPU ", theme.title_style()));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    if !gpu.available {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled("GPU: N/A", theme.label_style()))),
            inner,
        );
        return;
    }

    let width = inner.width as usize;
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        gpu.name.clone(),
        theme.title_style(),
    )));
    lines.push(viz::bar(
        gpu.utilization as f64,
        100.0,
        width,
        &format!("Util {}%", gpu.utilization),
        theme.bar_style(),
        theme.alert_style(),
    ));
    lines.push(viz::bar(
        gpu.memory_used as f64,
        gpu.memory_total.max(1) as f64,
        width,
        &format!(
            "Mem {}/{}",
            format_bytes(gpu.memory_used),
            format_bytes(gpu.memory_total)
        ),
        theme.bar_style(),
        theme.alert_style(),
    ));
    lines.push(Line::from(vec![
        Span::styled(format!("Temp {}\u{b0}C", gpu.temperature), value_style(gpu, theme)),
        Span::styled(format!("  Fan {}%", gpu.fan_speed), theme.label_style()),
    ]));
    lines.push(Line::from(Span::styled(
        format!("Clk {} MHz  Mem {} MHz", gpu.graphics_clock, gpu.memory_clock),
        theme.label_style(),
    )));
    lines.push(Line::from(Span::styled(
        format!(
            "Pwr {:.0} W / {:.0} W",
            gpu.power_usage as f64 / 1000.0,
            gpu.power_limit as f64 / 1000.0
        ),
        theme.label_style(),
    )));
    lines.push(Line::from(vec![
        Span::styled("Health: ", theme.label_style()),
        Span::styled(gpu.health.label(), health_style(gpu.health, theme)),
        error_span(gpu, theme),
    ]));

    // Utilization history, newest on the right.
    if !gpu.history.is_empty() {
        lines.push(Line::from(Span::styled("Util history", theme.label_style())));
        let series = gpu.history.to_vec();
        for row in viz::sparkline(&series, width, SPARKLINE_ROWS, 100.0) {
            lines.push(Line::from(Span::styled(row, theme.bar_style())));
        }
    }

    if !gpu.processes.is_empty() {
        lines.push(Line::from(Span::styled("Procs", theme.title_style())));
        for proc in gpu.processes.iter().take(MAX_GPU_PROCS) {
            lines.push(Line::from(Span::styled(
                format!(
                    "{:>6} {:<12} {}",
                    proc.pid,
                    proc.name,
                    format_bytes(proc.memory_used)
                ),
                Style::default().fg(theme.text_primary),
            )));
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn value_style(gpu: &GpuMetrics, theme: &Theme) -> Style {
    if gpu.temperature > 80 {
        theme.alert_style()
    } else {
        Style::default().fg(theme.text_primary)
    }
}

fn health_style(health: GpuHealth, theme: &Theme) -> Style {
    match health {
        GpuHealth::Healthy => theme.bar_style(),
        GpuHealth::Degraded | GpuHealth::Failed => theme.alert_style(),
    }
}

fn error_span(gpu: &GpuMetrics, theme: &Theme) -> Span<'static> {
    if gpu.error_count > 0 {
        Span::styled(format!("  Errors: {}", gpu.error_count), theme.alert_style())
    } else {
        Span::raw("")
    }
}
