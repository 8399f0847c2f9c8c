//! Drawing the TUI from the published session state.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::controller::{ResultView, SessionState};
use crate::document::format_size;
use crate::markdown;
use crate::style::SummaryStyle;

use super::app::{App, StatusMessage};
use super::picker::FilePickerState;

const ACCENT: Color = Color::Blue;
const HEADER_TEXT: Color = Color::White;
const MUTED: Color = Color::DarkGray;
const STATUS_ERROR: Color = Color::Red;
const STATUS_OK: Color = Color::Green;

/// Spinner animation frames.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn draw(frame: &mut Frame, session: &SessionState, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header
            Constraint::Length(5), // document
            Constraint::Length(5), // style
            Constraint::Length(3), // submit
            Constraint::Min(3),    // error banner / status
            Constraint::Length(1), // help
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);
    render_document(frame, chunks[1], session);
    render_styles(frame, chunks[2], session.selection.style());
    render_submit(frame, chunks[3], session, app.animation_tick);
    render_messages(frame, chunks[4], session, app.status.as_ref());
    render_help(frame, chunks[5]);

    if session.result.is_open() {
        render_result(frame, session, app.scroll);
    }
    if let Some(picker) = &app.picker {
        render_picker(frame, picker);
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Notes Crunch",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Transform your documents into clear, concise summaries.",
            Style::default().fg(MUTED),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        area,
    );
}

fn render_document(frame: &mut Frame, area: Rect, session: &SessionState) {
    let (border, lines) = match session.selection.document() {
        Some(document) => (
            ACCENT,
            vec![
                Line::from(vec![
                    Span::raw("Selected file: "),
                    Span::styled(document.name().to_string(), Style::default().fg(ACCENT)),
                    Span::styled(
                        format!("  ({})", format_size(document.size())),
                        Style::default().fg(MUTED),
                    ),
                ]),
                Line::from(Span::styled(
                    "[Enter] choose a different file   [c] clear file",
                    Style::default().fg(MUTED),
                )),
            ],
        ),
        None => (
            MUTED,
            vec![
                Line::from("Press Enter to choose your PDF"),
                Line::from(Span::styled("PDF up to 10MB", Style::default().fg(MUTED))),
            ],
        ),
    };

    let block = Block::default()
        .title(" Upload your PDF ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center),
        area,
    );
}

fn render_styles(frame: &mut Frame, area: Rect, selected: SummaryStyle) {
    let block = Block::default()
        .title(" Choose Your Summary Style ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(MUTED));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(inner);

    for (index, (style, cell)) in SummaryStyle::ALL.iter().zip(cells.iter()).enumerate() {
        let is_selected = *style == selected;
        let title_style = if is_selected {
            Style::default()
                .fg(HEADER_TEXT)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(HEADER_TEXT)
        };
        let lines = vec![
            Line::from(Span::styled(
                format!(" {} {} ", index + 1, style.label()),
                title_style,
            )),
            Line::from(Span::styled(style.description(), Style::default().fg(MUTED))),
        ];
        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            *cell,
        );
    }
}

fn render_submit(frame: &mut Frame, area: Rect, session: &SessionState, animation_tick: u8) {
    let line = if session.submission.is_submitting() {
        let spinner = SPINNER_FRAMES[(animation_tick as usize) % SPINNER_FRAMES.len()];
        Line::from(vec![
            Span::styled(format!("{} ", spinner), Style::default().fg(STATUS_OK)),
            Span::styled("Summarising...", Style::default().fg(HEADER_TEXT)),
        ])
    } else if session.can_submit() {
        Line::from(Span::styled(
            " [s] Summarise ",
            Style::default()
                .fg(HEADER_TEXT)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(
            " [s] Summarise ",
            Style::default().fg(MUTED).add_modifier(Modifier::DIM),
        ))
    };

    frame.render_widget(
        Paragraph::new(vec![Line::from(""), line]).alignment(Alignment::Center),
        area,
    );
}

fn render_messages(
    frame: &mut Frame,
    area: Rect,
    session: &SessionState,
    status: Option<&StatusMessage>,
) {
    let mut lines = Vec::new();
    if let Some(error) = session.submission.last_error() {
        lines.push(Line::from(vec![
            Span::styled(
                "Error: ",
                Style::default()
                    .fg(STATUS_ERROR)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(error.to_string(), Style::default().fg(STATUS_ERROR)),
        ]));
    }
    match status {
        Some(StatusMessage::Info(text)) => lines.push(Line::from(Span::styled(
            text.clone(),
            Style::default().fg(STATUS_OK),
        ))),
        Some(StatusMessage::Error(text)) => lines.push(Line::from(Span::styled(
            text.clone(),
            Style::default().fg(STATUS_ERROR),
        ))),
        None => {}
    }

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_help(frame: &mut Frame, area: Rect) {
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Enter file · c clear · 1/2/3 style · s submit · q quit",
            Style::default().fg(MUTED),
        )))
        .alignment(Alignment::Center),
        area,
    );
}

fn render_result(frame: &mut Frame, session: &SessionState, scroll: u16) {
    let area = centered_rect(90, 85, frame.area());
    frame.render_widget(Clear, area);

    let view = session.result.view();
    let other = view.toggled();
    let block = Block::default()
        .title(format!(" {} ", view.label()))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let text = session.result.displayed_text().unwrap_or_default();
    frame.render_widget(
        Paragraph::new(markdown::render(text))
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        chunks[0],
    );

    let export_hint = match view {
        ResultView::Summary => "[e] export summary.txt",
        ResultView::Quiz => "[e] export summary.txt (summary only)",
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!(
                "[Tab] {}   {}   [↑/↓] scroll   [Esc] close",
                other.label(),
                export_hint
            ),
            Style::default().fg(MUTED),
        )))
        .alignment(Alignment::Center),
        chunks[1],
    );
}

fn render_picker(frame: &mut Frame, picker: &FilePickerState) {
    let area = centered_rect(70, 70, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(format!(" {} ", picker.current_dir.display()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));

    let items: Vec<ListItem> = picker
        .entries
        .iter()
        .map(|entry| {
            let (label, style) = if entry.is_dir {
                (format!("{}/", entry.name), Style::default().fg(ACCENT))
            } else if entry.is_pdf {
                (entry.name.clone(), Style::default().fg(HEADER_TEXT))
            } else {
                (entry.name.clone(), Style::default().fg(MUTED))
            };
            ListItem::new(Line::from(Span::styled(label, style)))
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(ACCENT)
            .fg(HEADER_TEXT)
            .add_modifier(Modifier::BOLD),
    );
    let mut state = ListState::default().with_selected(Some(picker.cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

/// Create a centered rect taking the given percentages of `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::export::FileExporter;
    use crate::service::SummaryResult;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn screen_text(session: &SessionState, app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|frame| draw(frame, session, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app() -> App {
        App::new(FileExporter::new("."), std::path::Path::new("."))
    }

    #[test]
    fn shows_error_banner() {
        let mut app = app();
        app.controller
            .select_document(Document::new("report.pdf", vec![1, 2, 3]));
        app.controller.begin_submission();
        app.controller
            .finish_submission(Err(crate::service::ServiceError::Rejected {
                status: 413,
                message: Some("file too large".into()),
            }));

        let text = screen_text(app.controller.state(), &app);
        assert!(text.contains("Error: file too large"));
        assert!(text.contains("report.pdf"));
    }

    #[test]
    fn result_surface_shows_active_view() {
        let mut app = app();
        app.controller
            .select_document(Document::new("report.pdf", vec![1]));
        app.controller.begin_submission();
        app.controller
            .finish_submission(Ok(SummaryResult::new("# Key Points", "1. What is it?")));

        let text = screen_text(app.controller.state(), &app);
        assert!(text.contains("Key Points"));
        assert!(!text.contains("What is it?"));

        app.controller.toggle_view();
        let text = screen_text(app.controller.state(), &app);
        assert!(text.contains("What is it?"));
    }

    #[test]
    fn help_line_lists_main_screen_keys() {
        let app = app();
        let text = screen_text(app.controller.state(), &app);
        assert!(text.contains("c clear"));
        assert!(text.contains("s submit"));
    }

    #[test]
    fn centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let rect = centered_rect(50, 50, area);
        assert_eq!(rect.width, 50);
        assert_eq!(rect.height, 25);
        assert_eq!(rect.x, 25);
    }
}
