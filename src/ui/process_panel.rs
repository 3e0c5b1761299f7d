use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Paragraph, Row, Table, TableState,
};

use crate::app::{App, InputMode};
use crate::format::format_rate;
use crate::proc_table;
use crate::ui::theme::Theme;
use crate::viz;

/// Throughput bars saturate at 100 MB/s.
const MAX_IO: f64 = 100.0 * 1024.0 * 1024.0;

pub fn render(frame: &mut Frame, area: Rect, app: &mut App, theme: &Theme) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    // The panel carries the memory flag; its throughput strip carries disk.
    let alert = app.alerts.mem || app.alerts.disk;
    let title = panel_title(app);
    let sort = format!(" [{}] ", app.filter_sort.sort_key.label());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style(alert))
        .title(Span::styled(title, theme.title_style()))
        .title_top(Line::from(Span::styled(sort, theme.label_style())).right_aligned());
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        app.process_table_area = None;
        return;
    }

    let chunks = Layout::vertical([
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(inner);

    render_table(frame, chunks[0], app, theme);

    let snap = &app.snapshot;
    let bar_width = inner.width as usize;
    frame.render_widget(
        Paragraph::new(viz::bar(
            snap.memory.used_percent,
            100.0,
            bar_width,
            &format!("Mem {:.1}%", snap.memory.used_percent),
            theme.bar_style(),
            theme.alert_style(),
        )),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(viz::bar(
            snap.memory.swap_percent,
            100.0,
            bar_width,
            &format!("Swap {:.1}%", snap.memory.swap_percent),
            theme.bar_style(),
            theme.alert_style(),
        )),
        chunks[2],
    );

    let half_width = (inner.width / 2) as usize;

    let [down, up] = halves().areas(chunks[3]);
    frame.render_widget(
        Paragraph::new(viz::bar(
            snap.net.download_bytes_per_sec as f64,
            MAX_IO,
            half_width,
            &format!("\u{2193} {}", format_rate(snap.net.download_bytes_per_sec)),
            theme.bar_style(),
            theme.alert_style(),
        )),
        down,
    );
    frame.render_widget(
        Paragraph::new(viz::bar(
            snap.net.upload_bytes_per_sec as f64,
            MAX_IO,
            half_width,
            &format!("\u{2191} {}", format_rate(snap.net.upload_bytes_per_sec)),
            theme.bar_style(),
            theme.alert_style(),
        )),
        up,
    );

    let [read, write] = halves().areas(chunks[4]);
    frame.render_widget(
        Paragraph::new(viz::bar(
            snap.disk.read_bytes_per_sec as f64,
            MAX_IO,
            half_width,
            &format!("R {}", format_rate(snap.disk.read_bytes_per_sec)),
            theme.bar_style(),
            theme.alert_style(),
        )),
        read,
    );
    frame.render_widget(
        Paragraph::new(viz::bar(
            snap.disk.write_bytes_per_sec as f64,
            MAX_IO,
            half_width,
            &format!("W {}", format_rate(snap.disk.write_bytes_per_sec)),
            theme.bar_style(),
            theme.alert_style(),
        )),
        write,
    );
}

fn halves() -> Layout {
    Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
}

fn panel_title(app: &App) -> String {
    match app.input_mode {
        InputMode::Filtering => format!(" /{}\u{2588} ", app.filter_sort.pending),
        InputMode::Normal if !app.filter_sort.filter.is_empty() => {
            format!(" Filter: {} ", app.filter_sort.filter)
        }
        InputMode::Normal => " Processes ".to_string(),
    }
}

fn render_table(frame: &mut Frame, area: Rect, app: &mut App, theme: &Theme) {
    let rows: Vec<Row> = proc_table::materialize(&app.visible, app.config.general.max_processes)
        .into_iter()
        .map(|r| {
            Row::new(vec![
                r.pid.to_string(),
                r.user,
                r.cpu,
                r.mem,
                r.command,
            ])
        })
        .collect();

    let header = Row::new(vec!["PID", "User", "CPU%", "Mem%", "Command"]).style(
        Style::default()
            .fg(theme.text_secondary)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(10),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Min(5),
        ],
    )
    .header(header)
    .style(Style::default().fg(theme.text_primary))
    .row_highlight_style(
        Style::default()
            .fg(theme.selection_fg)
            .bg(theme.selection_bg),
    );

    let mut state = TableState::default();
    state.select((!app.visible.is_empty()).then_some(app.selected_index));
    frame.render_stateful_widget(table, area, &mut state);

    // Rows start below the header line; clicks map back through this rect.
    app.process_table_area = Some(Rect::new(
        area.x,
        area.y + 1,
        area.width,
        area.height.saturating_sub(1),
    ));
}
