use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use fenceline_engine::{
    Annotation, StyleKey,
    parsing::{MathKind, UnmatchedReason},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io::{Stdout, stdout};

const DEPTH_COLORS: [Color; 4] = [Color::Magenta, Color::Blue, Color::LightMagenta, Color::LightBlue];

pub fn style_for(key: &StyleKey) -> Style {
    match *key {
        StyleKey::Frontmatter => Style::default().fg(Color::DarkGray),
        StyleKey::Header { level } => {
            let style = Style::default().fg(Color::Yellow);
            if level == 1 {
                style.add_modifier(Modifier::BOLD)
            } else {
                style
            }
        }
        StyleKey::CodeBlock {
            interactive,
            closed,
        } => {
            let style = Style::default().fg(if interactive { Color::Green } else { Color::Cyan });
            if closed {
                style
            } else {
                style.add_modifier(Modifier::ITALIC)
            }
        }
        StyleKey::Container { depth, .. } => Style::default()
            .fg(DEPTH_COLORS[depth % DEPTH_COLORS.len()])
            .add_modifier(Modifier::BOLD),
        StyleKey::Unmatched { reason } => {
            let style = Style::default().fg(Color::White).bg(Color::Red);
            match reason {
                UnmatchedReason::StrayCloser => style.add_modifier(Modifier::CROSSED_OUT),
                UnmatchedReason::UnclosedOpener => style,
            }
        }
        StyleKey::Math {
            kind: MathKind::Display,
        } => Style::default().fg(Color::LightCyan),
        StyleKey::Math {
            kind: MathKind::Inline,
        } => Style::default().fg(Color::LightGreen),
    }
}

/// Splits `text` into terminal lines, styling each byte by the last
/// annotation covering it.
pub fn styled_lines(text: &str, annotations: &[Annotation]) -> Vec<Line<'static>> {
    let mut styles = vec![Style::default(); text.len()];
    for a in annotations {
        let end = a.span.end.min(text.len());
        let style = style_for(&a.style);
        for s in &mut styles[a.span.start.min(end)..end] {
            *s = style;
        }
    }

    let mut lines = Vec::new();
    let mut offset = 0;
    for raw in text.split('\n') {
        let content = raw.strip_suffix('\r').unwrap_or(raw);
        let mut spans: Vec<Span<'static>> = Vec::new();
        let mut run_start = 0;
        for (i, _) in content.char_indices().skip(1) {
            if styles[offset + i] != styles[offset + run_start] {
                spans.push(Span::styled(
                    content[run_start..i].to_string(),
                    styles[offset + run_start],
                ));
                run_start = i;
            }
        }
        if run_start < content.len() {
            spans.push(Span::styled(
                content[run_start..].to_string(),
                styles[offset + run_start],
            ));
        }
        lines.push(Line::from(spans));
        offset += raw.len() + 1;
    }
    lines
}

struct App {
    title: String,
    lines: Vec<Line<'static>>,
    scroll: u16,
}

impl App {
    fn max_scroll(&self) -> u16 {
        u16::try_from(self.lines.len().saturating_sub(1)).unwrap_or(u16::MAX)
    }

    fn down(&mut self, n: u16) {
        self.scroll = self.scroll.saturating_add(n).min(self.max_scroll());
    }

    fn up(&mut self, n: u16) {
        self.scroll = self.scroll.saturating_sub(n);
    }
}

/// Runs the full-screen viewer until the user quits.
pub fn run(title: String, text: &str, annotations: &[Annotation]) -> Result<()> {
    let mut app = App {
        title,
        lines: styled_lines(text, annotations),
        scroll: 0,
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.down(1),
                KeyCode::Up | KeyCode::Char('k') => app.up(1),
                KeyCode::PageDown | KeyCode::Char(' ') => app.down(20),
                KeyCode::PageUp => app.up(20),
                KeyCode::Home | KeyCode::Char('g') => app.scroll = 0,
                KeyCode::End | KeyCode::Char('G') => app.scroll = app.max_scroll(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)].as_ref())
        .split(f.area());

    let content = Paragraph::new(app.lines.clone())
        .block(Block::default().borders(Borders::ALL).title(app.title.as_str()))
        .scroll((app.scroll, 0));
    f.render_widget(content, chunks[0]);

    let help = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k: Up | "),
        Span::raw("↓/j: Down | "),
        Span::raw("PgUp/PgDn: Page | g/G: Top/Bottom"),
    ]);
    f.render_widget(Paragraph::new(help), chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use fenceline_engine::{decorate, scan_document};
    use pretty_assertions::assert_eq;

    fn rendered(line: &Line<'_>) -> Vec<(String, Style)> {
        line.spans
            .iter()
            .map(|s| (s.content.to_string(), s.style))
            .collect()
    }

    #[test]
    fn header_line_is_one_styled_span() {
        let text = "# Title\nplain";
        let lines = styled_lines(text, &decorate(&scan_document(text)));
        assert_eq!(lines.len(), 2);
        assert_eq!(
            rendered(&lines[0]),
            vec![("# Title".to_string(), style_for(&StyleKey::Header { level: 1 }))]
        );
        assert_eq!(rendered(&lines[1]), vec![("plain".to_string(), Style::default())]);
    }

    #[test]
    fn inline_math_splits_a_line() {
        let text = "a $x$ b";
        let lines = styled_lines(text, &decorate(&scan_document(text)));
        let math = style_for(&StyleKey::Math {
            kind: MathKind::Inline,
        });
        assert_eq!(
            rendered(&lines[0]),
            vec![
                ("a ".to_string(), Style::default()),
                ("$x$".to_string(), math),
                (" b".to_string(), Style::default()),
            ]
        );
    }

    #[test]
    fn multibyte_text_is_not_split_mid_char() {
        let text = "é $ü$";
        let lines = styled_lines(text, &decorate(&scan_document(text)));
        let joined: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(joined, text);
    }
}
