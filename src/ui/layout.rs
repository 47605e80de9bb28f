use crate::state::{Phase, PriceLabel, TickerState, FETCH_ERROR_TEXT};
use crate::ui::format::DetailBlock;
use crate::ui::StatusBar;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct LayoutManager {
    pub title: String,
    pub statusbar: StatusBar,
}

impl LayoutManager {
    pub fn new(symbol: &str) -> Self {
        Self {
            title: format!("Live {} Price Tracker", symbol),
            statusbar: StatusBar::new(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, state: &TickerState, fetching: bool, area: Rect) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(8),
                Constraint::Min(10),
                Constraint::Length(1),
            ])
            .split(area);

        let title = Paragraph::new(Line::from(Span::styled(
            self.title.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta)),
        );
        frame.render_widget(title, main_chunks[0]);

        render_price_label(frame, main_chunks[1], &state.label);
        render_detail(frame, main_chunks[2], state.detail.as_ref());
        state.charts.render(frame, main_chunks[3]);

        self.statusbar.starting = state.phase == Phase::Initializing;
        self.statusbar.healthy = state.last_error.is_none();
        self.statusbar.fetching = fetching;
        self.statusbar.last_update = state.history().last_timestamp().map(str::to_string);
        self.statusbar.samples = state.history().len();
        self.statusbar.render(frame, main_chunks[4]);
    }
}

pub fn price_label_line(label: &PriceLabel) -> Line<'static> {
    match label {
        PriceLabel::Fetching => Line::from(Span::styled(
            "Fetching...",
            Style::default().fg(Color::Gray),
        )),
        PriceLabel::Error => Line::from(Span::styled(
            FETCH_ERROR_TEXT,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        PriceLabel::Price { currency, parts } => Line::from(vec![
            Span::styled(
                format!("{} ", currency),
                Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                parts.head(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                parts.trailing_decimals.clone(),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
            ),
        ]),
    }
}

fn render_price_label(frame: &mut Frame, area: Rect, label: &PriceLabel) {
    let para = Paragraph::new(price_label_line(label)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(para, area);
}

fn render_detail(frame: &mut Frame, area: Rect, detail: Option<&DetailBlock>) {
    let lines: Vec<Line> = match detail {
        Some(detail) => detail
            .rows
            .iter()
            .map(|row| {
                let value_style = match row.trend {
                    Some(pct) if pct >= 0.0 => Style::default().fg(Color::Green),
                    Some(_) => Style::default().fg(Color::Red),
                    None => Style::default().fg(Color::White),
                };
                Line::from(vec![
                    Span::styled(
                        format!("{}: ", row.label),
                        Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(row.value.clone(), value_style),
                ])
            })
            .collect(),
        None => vec![Line::from(Span::styled(
            "No data yet",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let para = Paragraph::new(lines).block(
        Block::default()
            .title("Details")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    frame.render_widget(para, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{FetchError, Quote};
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(state: &TickerState) -> Vec<String> {
        let mut layout = LayoutManager::new("XRP");
        let mut terminal = Terminal::new(TestBackend::new(110, 36)).unwrap();
        terminal
            .draw(|frame| layout.render(frame, state, false, frame.area()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    fn quote(price: f64) -> Quote {
        Quote {
            name: "XRP".to_string(),
            symbol: "XRP".to_string(),
            currency: "CAD".to_string(),
            price,
            percent_change_1h: 1.0,
            percent_change_24h: -2.0,
            circulating_supply: 50_000_000_000.0,
            total_supply: 100_000_000_000.0,
        }
    }

    fn contains(rows: &[String], needle: &str) -> bool {
        rows.iter().any(|row| row.contains(needle))
    }

    #[test]
    fn first_frame_shows_fetching() {
        let state = TickerState::new("XRP".to_string(), "CAD".to_string());
        let rows = screen(&state);
        assert!(contains(&rows, "Live XRP Price Tracker"));
        assert!(contains(&rows, "Fetching..."));
        assert!(contains(&rows, "Samples 0"));
        assert!(contains(&rows, "STARTING"));
    }

    #[test]
    fn quote_renders_label_and_details() {
        let mut state = TickerState::new("XRP".to_string(), "CAD".to_string());
        state.apply(Ok(quote(0.5)), "09:00:00".to_string());
        let rows = screen(&state);
        assert!(contains(&rows, "CAD 0.5000000000"));
        assert!(contains(&rows, "Circulating Supply: 50,000,000,000"));
        assert!(contains(&rows, "Change (24h): -2.00%"));
        assert!(contains(&rows, "Updated 09:00:00"));
    }

    #[test]
    fn failed_tick_shows_error_text() {
        let mut state = TickerState::new("XRP".to_string(), "CAD".to_string());
        state.apply(Ok(quote(0.5)), "09:00:00".to_string());
        state.apply(
            Err(FetchError::Parse("missing data.XRP".to_string())),
            "09:01:00".to_string(),
        );
        let rows = screen(&state);
        assert!(contains(&rows, FETCH_ERROR_TEXT));
        assert!(contains(&rows, "FETCH FAILED"));
        assert!(contains(&rows, "Price: 0.50000 CAD"));
    }
}
