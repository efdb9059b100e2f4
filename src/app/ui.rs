use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Block, Borders, Chart, Clear, Dataset, GraphType, List, ListItem, ListState,
        Paragraph, Wrap,
    },
};
use strum::IntoEnumIterator;

use crate::{
    app::{
        context::AppContext,
        screen::Screen,
        views::{HistoricalView, HistoryField, NEWS_TOPICS, NewsView, SpotField, SpotQuotesView, TickerPicker},
    },
    models::SeriesTable,
    services::read_table,
};

const SERIES_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Yellow,
    Color::Green,
    Color::Magenta,
    Color::Red,
    Color::Blue,
];

#[allow(clippy::too_many_arguments)]
pub fn render(
    frame: &mut Frame,
    ctx: &AppContext,
    screen: Screen,
    menu_state: &mut ListState,
    spot: &SpotQuotesView,
    historical: &HistoricalView,
    news: &NewsView,
    popup_message: &Option<String>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let title = Paragraph::new(format!("Crypto Quotes - {}", screen))
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    match screen {
        Screen::Home => render_home(frame, chunks[1], menu_state),
        Screen::SpotQuotes => render_spot(frame, chunks[1], ctx, spot),
        Screen::HistoricalQuotes => render_historical(frame, chunks[1], ctx, historical),
        Screen::CryptoNews => render_news(frame, chunks[1], news),
    }

    let help = match screen {
        Screen::Home => "Up/Down: select  Enter: open  q: quit",
        Screen::SpotQuotes => "Tab: next field  Space: toggle adjusted  Enter: search  F5: refresh  Esc: back",
        Screen::HistoricalQuotes => {
            "Tab: next field  Enter: graph  F2: format  F3: export  F5: refresh  Esc: back"
        }
        Screen::CryptoNews => "Left/Right: topic  Enter: search news  F5: refresh  Esc: back",
    };
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );

    if let Some(message) = popup_message {
        let area = centered_rect(60, 20, frame.area());
        let popup = Paragraph::new(message.as_str())
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::White))
            .block(
                Block::default()
                    .title("Export (Enter to close)")
                    .borders(Borders::ALL),
            );
        frame.render_widget(Clear, area);
        frame.render_widget(popup, area);
    }
}

fn render_home(frame: &mut Frame, area: Rect, menu_state: &mut ListState) {
    let items: Vec<ListItem> = Screen::iter()
        .filter(|s| *s != Screen::Home)
        .map(|s| ListItem::new(s.to_string()))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title("Welcome to Crypto App!")
                .borders(Borders::ALL),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol(">> ");

    frame.render_stateful_widget(list, area, menu_state);
}

fn field_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn input_box<'a>(title: &'a str, value: &'a str, focused: bool) -> Paragraph<'a> {
    Paragraph::new(value).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(field_style(focused)),
    )
}

fn render_picker(
    frame: &mut Frame,
    input_area: Rect,
    list_area: Rect,
    ctx: &AppContext,
    picker: &TickerPicker,
    focused: bool,
) {
    let directory = ctx.directory();

    if !directory.is_available() {
        let value = if picker.input().is_empty() {
            "Failed to load tickers"
        } else {
            picker.input()
        };
        frame.render_widget(input_box("Ticker", value, focused), input_area);
        frame.render_widget(
            Paragraph::new("No internet connection!").style(Style::default().fg(Color::Red)),
            list_area,
        );
        return;
    }

    frame.render_widget(input_box("Ticker", picker.input(), focused), input_area);

    if focused {
        let items: Vec<ListItem> = picker
            .suggestions(directory)
            .into_iter()
            .map(ListItem::new)
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state = ListState::default();
        state.select(picker.selected());
        frame.render_stateful_widget(list, list_area, &mut state);
    }
}

fn render_result(frame: &mut Frame, area: Rect, title: &str, text: Option<&str>, busy: bool) {
    let mut lines: Vec<Line> = Vec::new();
    if busy {
        lines.push(Line::from(Span::styled(
            "Loading...",
            Style::default().fg(Color::Yellow),
        )));
    }
    if let Some(text) = text {
        lines.extend(text.lines().map(|l| Line::from(l.to_string())));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().title(title.to_string()).borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_spot(frame: &mut Frame, area: Rect, ctx: &AppContext, spot: &SpotQuotesView) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);
    let inputs = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Percentage(30),
        ])
        .split(rows[0]);
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    render_picker(
        frame,
        inputs[0],
        body[0],
        ctx,
        spot.picker(),
        spot.focus() == SpotField::Ticker,
    );
    frame.render_widget(
        input_box("Date (YYYY-MM-DD)", spot.date(), spot.focus() == SpotField::Date),
        inputs[1],
    );
    let adjusted = if spot.adjusted() {
        "adjusted"
    } else {
        "not adjusted"
    };
    frame.render_widget(
        input_box("Close", adjusted, spot.focus() == SpotField::Adjusted),
        inputs[2],
    );

    render_result(frame, body[1], "Result", spot.result(), spot.is_busy());
}

fn render_historical(frame: &mut Frame, area: Rect, ctx: &AppContext, view: &HistoricalView) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);
    let inputs = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(35),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(15),
        ])
        .split(rows[0]);
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
        .split(rows[1]);

    let ticker_focused = view.focus() == HistoryField::Ticker;
    let chart_area = if ticker_focused { body[1] } else { rows[1] };

    render_picker(frame, inputs[0], body[0], ctx, view.picker(), ticker_focused);
    frame.render_widget(
        input_box("Start", view.start(), view.focus() == HistoryField::Start),
        inputs[1],
    );
    frame.render_widget(
        input_box("End", view.end(), view.focus() == HistoryField::End),
        inputs[2],
    );
    let format = view.export_format().to_string();
    frame.render_widget(input_box("Export", &format, false), inputs[3]);

    render_chart(frame, chart_area, &read_table(ctx.series()));
    render_result(frame, rows[2], "Status", view.message(), view.is_busy());
}

fn render_chart(frame: &mut Frame, area: Rect, table: &SeriesTable) {
    let block = Block::default().title("Close").borders(Borders::ALL);
    let Some(first) = table.dates().next().copied() else {
        frame.render_widget(Paragraph::new("No data to display.").block(block), area);
        return;
    };
    let last = table.dates().last().copied().unwrap_or(first);

    let points: Vec<Vec<(f64, f64)>> = table
        .symbols()
        .iter()
        .map(|symbol| {
            table
                .closes(symbol)
                .into_iter()
                .filter_map(|(date, close)| {
                    close.map(|c| ((date - first).num_days() as f64, c))
                })
                .collect()
        })
        .collect();

    let (min_y, max_y) = points
        .iter()
        .flatten()
        .fold((f64::MAX, f64::MIN), |(lo, hi), (_, y)| (lo.min(*y), hi.max(*y)));
    let pad = ((max_y - min_y) * 0.05).max(1e-9);
    let max_x = ((last - first).num_days() as f64).max(1.0);

    let datasets: Vec<Dataset> = table
        .symbols()
        .iter()
        .zip(points.iter())
        .enumerate()
        .map(|(i, (symbol, data))| {
            Dataset::default()
                .name(symbol.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(SERIES_COLORS[i % SERIES_COLORS.len()]))
                .data(data)
        })
        .collect();

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, max_x])
                .labels(vec![
                    first.format("%Y-%m-%d").to_string(),
                    last.format("%Y-%m-%d").to_string(),
                ]),
        )
        .y_axis(
            Axis::default()
                .bounds([min_y - pad, max_y + pad])
                .labels(vec![format!("{:.2}", min_y), format!("{:.2}", max_y)]),
        );

    frame.render_widget(chart, area);
}

fn render_news(frame: &mut Frame, area: Rect, news: &NewsView) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let topics: Vec<Span> = NEWS_TOPICS
        .iter()
        .enumerate()
        .flat_map(|(i, topic)| {
            let style = if i == news.topic_index() {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            [Span::styled(topic.to_string(), style), Span::raw("  ")]
        })
        .collect();

    frame.render_widget(
        Paragraph::new(Line::from(topics))
            .block(Block::default().title("Topic").borders(Borders::ALL)),
        rows[0],
    );
    render_result(frame, rows[1], "News", news.result(), news.is_busy());
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
