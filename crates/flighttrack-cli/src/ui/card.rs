use flighttrack_models::{EndpointCard, FlightCard};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const ACTIVE_COLOR: Color = Color::Green;

pub fn header_lines(card: &FlightCard) -> Vec<Line<'static>> {
    let status_style = if card.status_is_active {
        Style::default().fg(ACTIVE_COLOR).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    vec![
        Line::from(Span::styled(
            card.airline.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::raw("Flight: "),
            Span::styled(card.flight.clone(), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" • Status: "),
            Span::styled(card.status.clone(), status_style),
        ]),
    ]
}

pub fn endpoint_lines(endpoint: &EndpointCard) -> Vec<Line<'static>> {
    let dim = Style::default().fg(Color::DarkGray);

    let mut meta = vec![
        Span::styled("Terminal ", dim),
        Span::raw(endpoint.terminal.clone()),
    ];
    // No gate block at all when the provider has none.
    if let Some(gate) = &endpoint.gate {
        meta.push(Span::styled("   Gate ", dim));
        meta.push(Span::raw(gate.clone()));
    }
    meta.push(Span::styled(format!("   {} ", endpoint.detail.label()), dim));
    meta.push(Span::raw(endpoint.detail.display()));

    vec![
        Line::from(Span::styled(endpoint.heading(), dim)),
        Line::from(Span::styled(
            endpoint.time.clone(),
            Style::default().fg(ACTIVE_COLOR).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(endpoint.date.clone(), dim)),
        Line::from(endpoint.airport.clone()),
        Line::from(meta),
        Line::from(vec![
            Span::styled("Estimated: ", dim),
            Span::raw(endpoint.estimated.clone()),
        ]),
    ]
}

pub fn footer_line(card: &FlightCard) -> Line<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    Line::from(vec![
        Span::styled("Airline ", dim),
        Span::raw(card.footer.airline.clone()),
        Span::styled("   Flight ", dim),
        Span::raw(card.footer.flight.clone()),
        Span::styled("   Flight date ", dim),
        Span::raw(card.footer.flight_date.clone()),
    ])
}

pub fn render_card(f: &mut Frame, area: Rect, card: &FlightCard) {
    let block = Block::default().borders(Borders::ALL).title("Flight");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(7),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    f.render_widget(Paragraph::new(header_lines(card)), rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);
    f.render_widget(Paragraph::new(endpoint_lines(&card.departure)), columns[0]);
    f.render_widget(Paragraph::new(endpoint_lines(&card.arrival)), columns[1]);

    f.render_widget(Paragraph::new(footer_line(card)), rows[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use flighttrack_models::{format_card, Endpoint, FlightRecord};

    fn record(gate: Option<&str>) -> FlightRecord {
        FlightRecord {
            flight_status: Some("active".into()),
            departure: Some(Endpoint {
                iata: Some("DEL".into()),
                gate: gate.map(str::to_string),
                ..Endpoint::default()
            }),
            ..FlightRecord::default()
        }
    }

    fn text(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn gate_block_is_omitted_when_absent() {
        let card = format_card(&record(None));
        let rendered = text(&endpoint_lines(&card.departure));
        assert!(!rendered.contains("Gate"));
        assert!(rendered.contains("Departure from DEL"));
        assert!(rendered.contains("Delay - min"));
    }

    #[test]
    fn gate_block_is_shown_when_present() {
        let card = format_card(&record(Some("12")));
        let rendered = text(&endpoint_lines(&card.departure));
        assert!(rendered.contains("Gate 12"));
    }

    #[test]
    fn active_status_is_highlighted() {
        let card = format_card(&record(None));
        let header = header_lines(&card);
        let status = header[1].spans.last().unwrap();
        assert_eq!(status.content, "ACTIVE");
        assert_eq!(status.style.fg, Some(ACTIVE_COLOR));
    }
}
