use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::InputMode;
use crate::ui::theme::Theme;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    input_mode: InputMode,
    pending_filter: &str,
    theme: &Theme,
) {
    let bg_style = Style::default().bg(theme.footer_bg);

    let line = match input_mode {
        InputMode::Filtering => {
            let mut spans = vec![
                Span::styled(
                    " / ",
                    Style::default()
                        .fg(theme.pill_key_fg)
                        .bg(theme.pill_key_bg)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" {pending_filter}"),
                    Style::default().fg(theme.text_primary),
                ),
                Span::styled("\u{2588}", Style::default().fg(theme.pill_key_bg)),
            ];
            spans.extend(pill_spans("Enter", "Apply", theme));
            spans.extend(pill_spans("Esc", "Apply", theme));
            Line::from(spans)
        }
        InputMode::Normal => {
            let mut spans = Vec::new();
            spans.extend(pill_spans("q", "Quit", theme));
            spans.extend(pill_spans("/", "Filter", theme));
            spans.extend(pill_spans("s", "Sort", theme));
            spans.extend(pill_spans("k", "Term", theme));
            spans.extend(pill_spans("F7/F8", "Nice", theme));
            spans.extend(pill_spans("[ ]", "GPU col", theme));
            spans.extend(pill_spans("{ }", "Proc col", theme));
            Line::from(spans)
        }
    };

    frame.render_widget(Paragraph::new(line).style(bg_style), area);
}

fn pill_spans<'a>(key: &'a str, desc: &'a str, theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.pill_key_fg)
                .bg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {desc}"),
            Style::default().fg(theme.text_primary).bg(theme.footer_bg),
        ),
    ]
}
