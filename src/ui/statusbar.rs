use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

pub struct StatusBar {
    pub starting: bool,
    pub healthy: bool,
    pub fetching: bool,
    pub last_update: Option<String>,
    pub samples: usize,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            starting: true,
            healthy: true,
            fetching: false,
            last_update: None,
            samples: 0,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let status_color = if self.healthy {
            Color::Green
        } else {
            Color::Red
        };
        let status_text = if self.healthy { "●" } else { "○" };
        let label = match (self.fetching, self.healthy) {
            _ if self.starting => "STARTING",
            (true, _) => "FETCHING",
            (false, true) => "LIVE",
            (false, false) => "FETCH FAILED",
        };

        let text = Line::from(vec![
            Span::styled(
                format!("{} ", status_text),
                Style::default().fg(status_color),
            ),
            Span::styled(label, Style::default().fg(Color::White)),
            Span::raw(" | "),
            Span::styled("Updated ", Style::default().fg(Color::Gray)),
            Span::styled(
                self.last_update.clone().unwrap_or_else(|| "--:--:--".to_string()),
                Style::default().fg(Color::White),
            ),
            Span::raw(" | "),
            Span::styled("Samples ", Style::default().fg(Color::Gray)),
            Span::styled(self.samples.to_string(), Style::default().fg(Color::White)),
            Span::raw(" | "),
            Span::styled("Q", Style::default().fg(Color::Yellow)),
            Span::raw("/"),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::raw(":Quit"),
        ]);

        let para = Paragraph::new(text).block(Block::default());
        frame.render_widget(para, area);
    }
}
