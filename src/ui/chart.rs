use crate::data::HistoryBuffer;
use crate::ui::format::compact_amount;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

const ORANGE: Color = Color::Rgb(255, 165, 0);

/// Everything both panes need for one full draw, rebuilt wholesale per update.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSnapshot {
    pub points: Vec<(f64, f64)>,
    pub x_labels: Vec<String>,
    pub y_bounds: [f64; 2],
    pub circulating_supply: f64,
    pub total_supply: f64,
}

impl ChartSnapshot {
    fn build(history: &HistoryBuffer, circulating_supply: f64, total_supply: f64) -> Self {
        let prices = history.prices();
        let points: Vec<(f64, f64)> = prices
            .iter()
            .enumerate()
            .map(|(idx, price)| (idx as f64, *price))
            .collect();

        let (min_price, max_price) = prices
            .iter()
            .fold((f64::MAX, f64::MIN), |(min, max), p| (min.min(*p), max.max(*p)));
        let margin = ((max_price - min_price) * 0.05).max(max_price.abs() * 0.001).max(1e-8);

        let timestamps = history.timestamps();
        let mut x_labels = vec![timestamps[0].clone()];
        if timestamps.len() > 2 {
            x_labels.push(timestamps[timestamps.len() / 2].clone());
        }
        x_labels.push(timestamps[timestamps.len() - 1].clone());

        Self {
            points,
            x_labels,
            y_bounds: [min_price - margin, max_price + margin],
            circulating_supply,
            total_supply,
        }
    }
}

/// Price line chart and supply bar chart, side by side.
#[derive(Debug, Clone)]
pub struct ChartPanes {
    pub symbol: String,
    pub currency: String,
    snapshot: Option<ChartSnapshot>,
    redraws: u64,
}

impl ChartPanes {
    pub fn new(symbol: String, currency: String) -> Self {
        Self {
            symbol,
            currency,
            snapshot: None,
            redraws: 0,
        }
    }

    /// Replaces both panes' content. Needs at least two points; returns whether it redrew.
    pub fn redraw(&mut self, history: &HistoryBuffer, circulating_supply: f64, total_supply: f64) -> bool {
        if history.len() <= 1 {
            return false;
        }
        self.snapshot = Some(ChartSnapshot::build(history, circulating_supply, total_supply));
        self.redraws += 1;
        true
    }

    pub fn snapshot(&self) -> Option<&ChartSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn redraws(&self) -> u64 {
        self.redraws
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);

        let price_title = format!("{} Price Over Time", self.symbol);
        let supply_title = "Circulating vs Total Supply";

        match self.snapshot() {
            Some(snapshot) => {
                self.render_price(frame, panes[0], &price_title, snapshot);
                self.render_supply(frame, panes[1], supply_title, snapshot);
            }
            None => {
                render_waiting(frame, panes[0], &price_title);
                render_waiting(frame, panes[1], supply_title);
            }
        }
    }

    fn render_price(&self, frame: &mut Frame, area: Rect, title: &str, snapshot: &ChartSnapshot) {
        let legend = format!("{} Price ({})", self.symbol, self.currency);
        let datasets = vec![
            Dataset::default()
                .name(legend)
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Blue))
                .data(&snapshot.points),
            Dataset::default()
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::LightBlue))
                .data(&snapshot.points),
        ];

        let [low, high] = snapshot.y_bounds;
        let last_x = (snapshot.points.len() - 1) as f64;

        let chart = Chart::new(datasets)
            .block(pane_block(title))
            .x_axis(
                Axis::default()
                    .title("Time")
                    .style(Style::default().fg(Color::Gray))
                    .bounds([0.0, last_x])
                    .labels(snapshot.x_labels.iter().map(|l| Span::raw(l.clone())).collect::<Vec<_>>()),
            )
            .y_axis(
                Axis::default()
                    .title(format!("Price ({})", self.currency))
                    .style(Style::default().fg(Color::Gray))
                    .bounds([low, high])
                    .labels(vec![
                        Span::raw(format!("{:.4}", low)),
                        Span::raw(format!("{:.4}", (low + high) / 2.0)),
                        Span::raw(format!("{:.4}", high)),
                    ]),
            );

        frame.render_widget(chart, area);
    }

    fn render_supply(&self, frame: &mut Frame, area: Rect, title: &str, snapshot: &ChartSnapshot) {
        let bars = [
            supply_bar("Circulating", snapshot.circulating_supply, Color::Green),
            supply_bar("Total", snapshot.total_supply, ORANGE),
        ];

        let inner_width = area.width.saturating_sub(2);
        let bar_width = (inner_width.saturating_sub(3) / 2).clamp(3, 20);

        let chart = BarChart::default()
            .block(pane_block(title))
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width)
            .bar_gap(3)
            .value_style(Style::default().fg(Color::Black).add_modifier(Modifier::BOLD));

        frame.render_widget(chart, area);
    }
}

fn supply_bar(label: &'static str, value: f64, color: Color) -> Bar<'static> {
    Bar::default()
        .label(Line::from(label))
        .value(value.max(0.0) as u64)
        .text_value(compact_amount(value))
        .style(Style::default().fg(color))
}

fn pane_block(title: &str) -> Block<'static> {
    Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
}

fn render_waiting(frame: &mut Frame, area: Rect, title: &str) {
    let para = Paragraph::new(Line::from(Span::styled(
        "Waiting for more data...",
        Style::default().fg(Color::DarkGray),
    )))
    .alignment(Alignment::Center)
    .block(pane_block(title));
    frame.render_widget(para, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn history(prices: &[f64]) -> HistoryBuffer {
        let mut history = HistoryBuffer::new();
        for (idx, price) in prices.iter().enumerate() {
            history.append(format!("10:{:02}:00", idx), *price);
        }
        history
    }

    fn panes() -> ChartPanes {
        ChartPanes::new("XRP".to_string(), "CAD".to_string())
    }

    #[test]
    fn skips_redraw_below_two_points() {
        let mut charts = panes();
        assert!(!charts.redraw(&history(&[]), 1.0, 2.0));
        assert!(!charts.redraw(&history(&[0.5]), 1.0, 2.0));
        assert!(charts.snapshot().is_none());
        assert_eq!(charts.redraws(), 0);
    }

    #[test]
    fn redraws_once_per_call_and_replaces_content() {
        let mut charts = panes();
        assert!(charts.redraw(&history(&[0.5, 0.6]), 1.0, 2.0));
        assert_eq!(charts.redraws(), 1);
        assert_eq!(charts.snapshot().unwrap().points, vec![(0.0, 0.5), (1.0, 0.6)]);

        assert!(charts.redraw(&history(&[0.5, 0.6, 0.4]), 3.0, 4.0));
        assert_eq!(charts.redraws(), 2);
        let snapshot = charts.snapshot().unwrap();
        assert_eq!(snapshot.points.len(), 3);
        assert_eq!(snapshot.circulating_supply, 3.0);
        assert_eq!(snapshot.total_supply, 4.0);
        assert_eq!(snapshot.x_labels, vec!["10:00:00", "10:01:00", "10:02:00"]);
    }

    #[test]
    fn flat_history_still_has_a_span() {
        let mut charts = panes();
        charts.redraw(&history(&[0.5, 0.5]), 1.0, 2.0);
        let [low, high] = charts.snapshot().unwrap().y_bounds;
        assert!(low < 0.5 && high > 0.5);
    }

    #[test]
    fn empty_panes_render_placeholder() {
        let charts = panes();
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| charts.render(frame, frame.area())).unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(charts.snapshot().is_none());
        assert!(content.contains("Waiting for more data..."));
    }

    #[test]
    fn renders_titles_into_buffer() {
        let mut charts = panes();
        charts.redraw(&history(&[0.5, 0.6]), 50e9, 100e9);

        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| charts.render(frame, frame.area())).unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(content.contains("XRP Price Over Time"));
        assert!(content.contains("Circulating vs Total Supply"));
    }
}
