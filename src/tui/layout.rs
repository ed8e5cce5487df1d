//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState};

use super::runtime::{App, Field};
use super::style;
use crate::assets::{
    AssetFormState, CardDescriptor, DialogMode, EnergyAsset, Sector, classify_sector,
};
use crate::source::AssetSource;

/// Renders the full TUI frame.
pub fn render<S: AssetSource>(frame: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(8),    // table + cards
            Constraint::Length(1), // error line
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_header(frame, app, chunks[0]);
    render_table(frame, app, body[0]);
    render_cards(frame, app, body[1]);
    render_error(frame, app, chunks[2]);
    render_footer(frame, app, chunks[3]);

    if app.dialog_open() {
        render_dialog(frame, app);
    }
}

/// Header bar: page window and totals.
fn render_header<S: AssetSource>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let page = app.board().cached_page();
    let first = if page.items.is_empty() { 0 } else { page.skip.saturating_add(1) };
    let header = Line::from(vec![
        Span::styled(
            " ASSET BOARD ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            " │ page {} │ {}-{} of {} ",
            app.board().page().index() + 1,
            first,
            page.skip.saturating_add(page.items.len()),
            page.total,
        )),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

fn sector_cell(asset: &EnergyAsset) -> Cell<'static> {
    if asset.asset_type.is_recognized() {
        let sector = classify_sector(asset);
        Cell::from(sector.as_str()).style(Style::default().fg(style::sector_color(sector)))
    } else {
        Cell::from("?").style(Style::default().fg(style::UNRECOGNIZED_COLOR))
    }
}

/// Raw asset table, one row per fetched asset.
fn render_table<S: AssetSource>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let rows = app.board().assets().iter().map(|a| {
        Row::new(vec![
            Cell::from(a.name.clone()),
            Cell::from(a.asset_type.to_string()),
            sector_cell(a),
            Cell::from(a.capacity_kw.map(|c| format!("{c:.1}")).unwrap_or_default()),
            Cell::from(a.status.map(|s| s.as_str()).unwrap_or("")),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Min(12),
            Constraint::Length(16),
            Constraint::Length(7),
            Constraint::Length(9),
            Constraint::Length(11),
        ],
    )
    .header(
        Row::new(["Name", "Type", "Sector", "kW", "Status"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .row_highlight_style(Style::default().bg(style::HIGHLIGHT_BG))
    .block(Block::default().title(" Assets ").borders(Borders::ALL));

    let mut state = TableState::default();
    if !app.board().assets().is_empty() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(table, area, &mut state);
}

/// Dashboard cards grouped by sector.
fn render_cards<S: AssetSource>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let cards = app.board().cards();
    let lines: Vec<Line> = if cards.is_empty() {
        vec![Line::from("  No assets to link yet.")]
    } else {
        cards
            .iter()
            .map(|card| match card {
                CardDescriptor::GroupHeader { sector, count } => Line::from(Span::styled(
                    format!("{} ({count})", sector_title(*sector)),
                    Style::default()
                        .fg(style::sector_color(*sector))
                        .add_modifier(Modifier::BOLD),
                )),
                CardDescriptor::Asset {
                    name,
                    icon,
                    dashboard_url,
                    ..
                } => Line::from(vec![
                    Span::raw(format!("  [{}] {name} ", icon.as_str())),
                    Span::styled(
                        dashboard_url.clone(),
                        Style::default().fg(style::FOOTER_FG),
                    ),
                ]),
            })
            .collect()
    };

    let block = Block::default().title(" Dashboards ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn sector_title(sector: Sector) -> &'static str {
    match sector {
        Sector::Demand => "Energy demand",
        Sector::Supply => "Energy supply",
    }
}

fn render_error<S: AssetSource>(frame: &mut Frame, app: &App<S>, area: Rect) {
    if let Some(err) = app.board().last_error() {
        let line = Line::from(Span::styled(
            format!(" {err}"),
            Style::default().fg(style::ERROR_FG),
        ));
        frame.render_widget(Paragraph::new(line), area);
    } else if let Some(notice) = &app.notice {
        frame.render_widget(Paragraph::new(format!(" {notice}")), area);
    }
}

/// Footer with keybinding hints.
fn render_footer<S: AssetSource>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let hints = if app.dialog_open() {
        " Tab:Field  ←/→:Select  Enter:Save  Esc:Cancel"
    } else {
        " q:Quit  r:Refresh  n/p:Page  ↑/↓:Select  a:Add  e:Edit  d:Delete"
    };
    let footer = Paragraph::new(Line::from(Span::styled(
        hints,
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}

fn field_value(form: &AssetFormState, field: Field) -> String {
    match field {
        Field::Name => form.name.clone(),
        Field::Sector => format!("◀ {} ▶", form.sector),
        Field::Type => match form.supply_type {
            Some(t) => format!("◀ {} ▶", t.as_str()),
            None => "◀ select ▶".to_string(),
        },
        Field::Capacity => form.capacity_kw.clone(),
    }
}

/// Add/edit dialog drawn over the centre of the screen.
fn render_dialog<S: AssetSource>(frame: &mut Frame, app: &App<S>) {
    let dialog = app.board().dialog();
    let Some(form) = dialog.form() else {
        return;
    };
    let title = match dialog.mode() {
        Some(DialogMode::Edit { .. }) => " Edit asset ",
        _ => " Add asset ",
    };

    let mut lines: Vec<Line> = app
        .visible_fields()
        .iter()
        .map(|&field| {
            let value_style = if field == app.focus {
                Style::default().bg(style::HIGHLIGHT_BG)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::raw(format!(" {:<14}", field.label())),
                Span::styled(field_value(form, field), value_style),
            ])
        })
        .collect();
    if let Some(err) = dialog.error() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {err}"),
            Style::default().fg(style::ERROR_FG),
        )));
    }

    let area = centered(frame.area(), 56, 9);
    frame.render_widget(Clear, area);
    let block = Block::default().title(title).borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
