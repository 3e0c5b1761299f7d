pub mod cpu_panel;
pub mod footer;
pub mod gpu_panel;
pub mod process_panel;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use crate::app::App;
use crate::ui::theme::Theme;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    app.layout.set_terminal_size(area.width, area.height);

    // A degenerate terminal renders nothing rather than panicking.
    let Some(geometry) = app.layout.geometry() else {
        return;
    };
    let theme = Theme::from_name(&app.config.general.theme);

    frame.render_widget(
        Block::default().style(Style::default().bg(theme.bg)),
        area,
    );

    let content_height = geometry.content_height;
    let gpu_area = Rect::new(0, 0, geometry.col1, content_height);
    let process_area = Rect::new(geometry.col1, 0, geometry.col2, content_height);
    let cpu_area = Rect::new(geometry.col1 + geometry.col2, 0, geometry.col3, content_height);

    gpu_panel::render(frame, gpu_area, &app.snapshot.gpu, app.alerts.gpu, &theme);
    process_panel::render(frame, process_area, app, &theme);
    cpu_panel::render(frame, cpu_area, &app.snapshot, app.alerts.cpu, &theme);

    footer::render(
        frame,
        Rect::new(0, area.height - 1, area.width, 1),
        app.input_mode,
        &app.filter_sort.pending,
        &theme,
    );

    // Tooltip overlay goes last so it sits on top of the panels.
    if app.tooltip.visible
        && let Some(region) = app.tooltip.region
    {
        let content = app.tooltip_content(region);
        render_tooltip(frame, area, app.tooltip.x, app.tooltip.y, &content, &theme);
    }
}

fn render_tooltip(
    frame: &mut Frame,
    area: Rect,
    pointer_x: u16,
    pointer_y: u16,
    content: &str,
    theme: &Theme,
) {
    let width = 48u16.min(area.width);
    if width < 8 || area.height < 4 {
        return;
    }
    let inner_width = (width - 2) as usize;
    let rows: usize = content
        .lines()
        .map(|l| l.chars().count().div_ceil(inner_width).max(1))
        .sum();
    let height = ((rows + 2) as u16).min(area.height);

    // Keep the overlay on screen, preferring the row below the pointer.
    let x = pointer_x.min(area.width - width);
    let y = if pointer_y + 1 + height <= area.height {
        pointer_y + 1
    } else {
        pointer_y.saturating_sub(height)
    };
    let overlay = Rect::new(x, y, width, height);

    frame.render_widget(Clear, overlay);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.tooltip_border))
        .style(Style::default().bg(theme.tooltip_bg).fg(theme.tooltip_fg));
    frame.render_widget(
        Paragraph::new(content.to_string())
            .block(block)
            .wrap(Wrap { trim: false }),
        overlay,
    );
}

#[cfg(test)]
mod tests;
