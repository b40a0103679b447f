//! Rendering.
//!
//! Layout:
//!   ┌─── sidebar ──────┬─── content ─────────────────────────────────────────┐
//!   │  SIMRS Regu-AI   │  Overview | BLU Accounting | Clinical AI (FHIR)      │
//!   │  [1] Overview    │                                                      │
//!   │  [2] Accounting  │                                                      │
//!   │  [3] Clinical    │                                                      │
//!   │  System status   │                                                      │
//!   ├──────────────────┴──────────────────────────────────────────────────────┤
//!   │  footer (key bindings)                                                  │
//!   └─────────────────────────────────────────────────────────────────────────┘

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, Wrap},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use simrs_ref_hospital::{
    format::{format_idr, format_idr_billions},
    panels::{
        clinical,
        finance::{self, FinancePanel},
        overview::{self, StatusLevel},
        View,
    },
};

use crate::app::AppState;

const ACCENT: Color = Color::Cyan;

fn border() -> Style {
    Style::default().fg(Color::DarkGray)
}

fn titled(title: &str) -> Block<'_> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(border())
}

pub fn draw(f: &mut Frame, app: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(3)])
        .split(f.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(40)])
        .split(rows[0]);

    render_sidebar(f, columns[0], app);
    match app.view {
        View::Overview => render_overview(f, columns[1], app),
        View::Finance => render_finance(f, columns[1], app),
        View::Clinical => render_clinical(f, columns[1], app),
    }
    render_footer(f, rows[1], app);
}

// ── Sidebar ───────────────────────────────────────────────────────────────────

fn render_sidebar(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(4)])
        .split(area);

    let mut items = vec![
        ListItem::new(Line::from(Span::styled(
            overview::APP_NAME,
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ))),
        ListItem::new(Line::from(Span::styled(
            overview::APP_TAGLINE,
            Style::default().fg(Color::Gray),
        ))),
        ListItem::new(""),
    ];

    for (i, view) in View::ALL.iter().enumerate() {
        let style = if *view == app.view {
            Style::default()
                .fg(Color::Black)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        items.push(ListItem::new(Line::from(Span::styled(
            format!("[{}] {}", i + 1, view.label()),
            style,
        ))));
    }

    f.render_widget(List::new(items).block(titled("Menu")), chunks[0]);

    let status: Vec<Line> = overview::system_status(app.advisory_configured)
        .into_iter()
        .map(|line| {
            let color = match line.level {
                StatusLevel::Ready => Color::Green,
                StatusLevel::Degraded => Color::Yellow,
            };
            Line::from(vec![
                Span::styled("● ", Style::default().fg(color)),
                Span::raw(line.label),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(status).block(titled("System Status")), chunks[1]);
}

// ── Overview ──────────────────────────────────────────────────────────────────

fn render_overview(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(6)])
        .split(area);

    let welcome = Paragraph::new(vec![
        Line::from(Span::styled(
            overview::WELCOME_TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            overview::WELCOME_SUBTITLE,
            Style::default().fg(Color::Gray),
        )),
    ])
    .block(titled("Overview"));
    f.render_widget(welcome, chunks[0]);

    let cards = overview::cards();
    let card_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    for (i, (card, area)) in cards.iter().zip(card_areas.iter()).enumerate() {
        let focused = i == app.focused_card;
        let block = Block::default()
            .title(format!(" {} ", card.title))
            .borders(Borders::ALL)
            .border_style(if focused {
                Style::default().fg(ACCENT)
            } else {
                border()
            });
        let body = Paragraph::new(vec![
            Line::from(card.description),
            Line::from(""),
            Line::from(Span::styled(
                format!("Open {} →", card.target.label()),
                Style::default().fg(ACCENT),
            )),
        ])
        .wrap(Wrap { trim: true })
        .block(block);
        f.render_widget(body, *area);
    }
}

// ── Finance ───────────────────────────────────────────────────────────────────

fn render_finance(f: &mut Frame, area: Rect, app: &AppState) {
    let panel = match &app.finance.panel {
        Ok(panel) => panel,
        Err(message) => {
            let error = Paragraph::new(Span::styled(message.as_str(), Style::default().fg(Color::Red)))
                .wrap(Wrap { trim: true })
                .block(titled(finance::TITLE));
            f.render_widget(error, area);
            return;
        }
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),  // summary cards
            Constraint::Length(9),  // chart + AI summary
            Constraint::Min(8),     // aging table
        ])
        .split(area);

    render_summary_cards(f, chunks[0], panel);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    render_position_chart(f, middle[0], panel);

    let analysis_style = if app.finance.processing {
        Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC)
    } else {
        Style::default()
    };
    let analysis = Paragraph::new(Span::styled(app.finance.analysis.as_str(), analysis_style))
        .wrap(Wrap { trim: true })
        .block(titled("AI Financial Executive Summary"));
    f.render_widget(analysis, middle[1]);

    render_aging_table(f, chunks[2], panel);
}

fn render_summary_cards(f: &mut Frame, area: Rect, panel: &FinancePanel) {
    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for (card, area) in panel.cards().iter().zip(areas.iter()) {
        let value_color = if card.value < Decimal::ZERO { Color::Red } else { Color::White };
        let body = Paragraph::new(Line::from(Span::styled(
            format_idr(card.value),
            Style::default().fg(value_color).add_modifier(Modifier::BOLD),
        )))
        .block(titled(card.label));
        f.render_widget(body, *area);
    }
}

fn render_position_chart(f: &mut Frame, area: Rect, panel: &FinancePanel) {
    let chart = panel.chart();
    let bars: Vec<Bar> = chart
        .iter()
        .map(|bar| {
            // Bars are drawn in millions; negative equity draws as empty.
            let millions = (bar.value / Decimal::from(1_000_000))
                .to_u64()
                .unwrap_or(0);
            Bar::default()
                .label(Line::from(bar.name))
                .value(millions)
                .text_value(format_idr_billions(bar.value))
                .style(Style::default().fg(ACCENT))
        })
        .collect();

    let widget = BarChart::default()
        .block(titled(finance::TITLE))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bars));
    f.render_widget(widget, area);
}

fn render_aging_table(f: &mut Frame, area: Rect, panel: &FinancePanel) {
    let right = |text: String| Cell::from(Line::from(text).alignment(Alignment::Right));

    let header = Row::new(vec![
        Cell::from("Debitur"),
        right("Umur (Bln)".to_string()),
        right("Nilai Piutang".to_string()),
        right("% Penyisihan".to_string()),
        right("Nilai Bersih".to_string()),
    ])
    .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));

    let mut rows: Vec<Row> = panel
        .aging_rows()
        .into_iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(row.debtor),
                right(row.age_months.to_string()),
                right(format_idr(row.gross)),
                right(row.allowance_percent.to_string()),
                right(format_idr(row.net)),
            ])
        })
        .collect();

    rows.push(
        Row::new(vec![
            Cell::from("TOTAL"),
            right(String::new()),
            right(format_idr(panel.report.gross_total)),
            right(format!("({})", format_idr(panel.report.allowance_total))),
            right(format_idr(panel.report.net_total())),
        ])
        .style(Style::default().add_modifier(Modifier::BOLD)),
    );

    let table = Table::new(
        rows,
        [
            Constraint::Min(24),
            Constraint::Length(10),
            Constraint::Length(18),
            Constraint::Length(18),
            Constraint::Length(18),
        ],
    )
    .header(header)
    .block(titled(finance::AGING_TITLE));
    f.render_widget(table, area);
}

// ── Clinical ──────────────────────────────────────────────────────────────────

fn render_clinical(f: &mut Frame, area: Rect, app: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(38), Constraint::Min(30)])
        .split(area);

    render_patients(f, columns[0], app);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(50),
            Constraint::Length(3),
            Constraint::Min(6),
        ])
        .split(columns[1]);

    render_editor(f, right[0], app);
    render_generate(f, right[1], app);
    render_summary(f, right[2], app);
}

fn render_patients(f: &mut Frame, area: Rect, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(4)])
        .split(area);

    render_search(f, chunks[0], app);

    let mut items: Vec<ListItem> = Vec::new();
    let visible = app.visible_patients();

    if visible.is_empty() {
        items.push(ListItem::new(Line::from(Span::styled(
            "No matching patients.",
            Style::default().fg(Color::DarkGray),
        ))));
    }

    for i in visible {
        let Some(patient) = app.store.patients.get(i) else {
            continue;
        };
        let selected = i == app.clinical.selected_patient;
        let name_style = if selected {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let marker = if selected { "▸ " } else { "  " };

        items.push(ListItem::new(vec![
            Line::from(vec![
                Span::styled(marker, Style::default().fg(ACCENT)),
                Span::styled(patient.name.as_str(), name_style),
                Span::styled(
                    format!("  {}", patient.gender),
                    Style::default().fg(Color::Gray),
                ),
            ]),
            Line::from(Span::styled(
                format!("  {}", clinical::patient_detail(patient)),
                Style::default().fg(Color::Gray),
            )),
        ]));

        let chips: Vec<Span> = app
            .store
            .conditions_for(&patient.id)
            .flat_map(|c| {
                [
                    Span::styled(
                        format!("[{}]", clinical::condition_chip(c)),
                        Style::default().fg(Color::Yellow),
                    ),
                    Span::raw(" "),
                ]
            })
            .collect();
        if !chips.is_empty() {
            let mut line = vec![Span::raw("  ")];
            line.extend(chips);
            items.push(ListItem::new(Line::from(line)));
        }
        items.push(ListItem::new(""));
    }

    f.render_widget(List::new(items).block(titled("Patients")), chunks[1]);
}

fn render_search(f: &mut Frame, area: Rect, app: &AppState) {
    let line = if app.clinical.search.is_empty() && !app.clinical.searching {
        Line::from(vec![
            Span::styled("[/] ", Style::default().fg(ACCENT)),
            Span::styled(clinical::SEARCH_PLACEHOLDER, Style::default().fg(Color::DarkGray)),
        ])
    } else {
        let mut text = app.clinical.search.clone();
        if app.clinical.searching {
            text.push('▏');
        }
        Line::from(Span::raw(text))
    };

    let block = Block::default()
        .title(format!(" {} ", clinical::SEARCH_TITLE))
        .borders(Borders::ALL)
        .border_style(if app.clinical.searching {
            Style::default().fg(ACCENT)
        } else {
            border()
        });
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn render_editor(f: &mut Frame, area: Rect, app: &AppState) {
    let source = app
        .selected_patient()
        .map(|p| format!("{} (Source: {})", clinical::EDITOR_TITLE, p.name))
        .unwrap_or_else(|| clinical::EDITOR_TITLE.to_string());

    let mut text = app.clinical.note_text.clone();
    if app.clinical.editing {
        text.push('▏');
    }

    let block = Block::default()
        .title(format!(" {} ", source))
        .borders(Borders::ALL)
        .border_style(if app.clinical.editing {
            Style::default().fg(ACCENT)
        } else {
            border()
        });

    f.render_widget(
        Paragraph::new(text).wrap(Wrap { trim: false }).block(block),
        area,
    );
}

fn render_generate(f: &mut Frame, area: Rect, app: &AppState) {
    let line = if app.clinical.processing {
        Line::from(Span::styled(
            clinical::PROCESSING_LABEL,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
        ))
    } else {
        Line::from(vec![
            Span::styled("[g] ", Style::default().fg(ACCENT)),
            Span::styled(
                clinical::GENERATE_LABEL,
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ])
    };
    f.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL).border_style(border())),
        area,
    );
}

fn render_summary(f: &mut Frame, area: Rect, app: &AppState) {
    let lines: Vec<Line> = match &app.clinical.summary {
        None => vec![Line::from(Span::styled(
            "No summary generated yet.",
            Style::default().fg(Color::DarkGray),
        ))],
        Some(advisory) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    format!("! {}", clinical::ETHICAL_DISCLAIMER),
                    Style::default().fg(Color::Yellow),
                )),
                Line::from(""),
            ];
            let style = if advisory.is_generated() {
                Style::default()
            } else {
                Style::default().fg(Color::Red)
            };
            lines.extend(
                advisory
                    .text
                    .lines()
                    .map(|l| Line::from(Span::styled(l.to_string(), style))),
            );
            lines
        }
    };

    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(titled(clinical::RESULT_TITLE)),
        area,
    );
}

// ── Footer ────────────────────────────────────────────────────────────────────

fn render_footer(f: &mut Frame, area: Rect, app: &AppState) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(ACCENT));

    let spans: Vec<Span> = if app.clinical.searching {
        vec![
            key(" [Enter/Esc] "),
            Span::raw("Done  "),
            key("[Backspace] "),
            Span::raw("Delete  "),
            key("[Ctrl-C] "),
            Span::raw("Quit"),
        ]
    } else if app.clinical.editing {
        vec![
            key(" [Esc] "),
            Span::raw("Stop editing  "),
            key("[Enter] "),
            Span::raw("Newline  "),
            key("[Ctrl-C] "),
            Span::raw("Quit"),
        ]
    } else {
        let mut spans = vec![
            key(" [1-3] "),
            Span::raw("Select view  "),
            key("[Tab] "),
            Span::raw("Next view  "),
        ];
        match app.view {
            View::Overview => {
                spans.push(key("[←/→] "));
                spans.push(Span::raw("Focus card  "));
                spans.push(key("[Enter] "));
                spans.push(Span::raw("Open  "));
            }
            View::Finance => {}
            View::Clinical => {
                spans.push(key("[↑/↓] "));
                spans.push(Span::raw("Patient  "));
                spans.push(key("[/] "));
                spans.push(Span::raw("Search  "));
                spans.push(key("[e] "));
                spans.push(Span::raw("Edit note  "));
                spans.push(key("[r] "));
                spans.push(Span::raw("Reset  "));
                spans.push(key("[g] "));
                spans.push(Span::raw("Generate  "));
            }
        }
        spans.push(key("[q] "));
        spans.push(Span::raw("Quit"));
        spans
    };

    let footer = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).border_style(border()));
    f.render_widget(footer, area);
}
