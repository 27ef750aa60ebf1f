use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Sparkline, Table, Wrap},
    Frame,
};

use crate::app::{App, DetailView};
use crate::info::{risk_bucket, RiskBucket};
use crate::theme::{Theme, THEME_NAMES};
use crate::types::*;

use super::format::{format_count, format_large, format_pct, format_price};
use super::sparkline::{chart_levels, spark_string};

pub fn draw(f: &mut Frame, app: &mut App) {
    // Fill background
    let bg_block = Block::default().style(Style::default().bg(app.theme.bg));
    f.render_widget(bg_block, f.area());

    if app.phase != LoadPhase::Running {
        draw_startup_screen(f, app);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // top bar
            Constraint::Min(5),    // main
            Constraint::Length(1), // bottom bar
        ])
        .split(f.area());

    draw_top_bar(f, app, chunks[0]);

    if app.detail.is_some() {
        draw_detail(f, app, chunks[1]);
    } else {
        draw_main(f, app, chunks[1]);
    }

    draw_bottom_bar(f, app, chunks[2]);

    if app.input_mode == InputMode::Settings {
        draw_settings(f, app);
    }

    if app.input_mode == InputMode::Search {
        draw_search(f, app);
    }
}

// -- Startup screen --

fn draw_startup_screen(f: &mut Frame, app: &App) {
    let t = &app.theme;
    let area = f.area();

    // Center a box
    let box_w = 48_u16.min(area.width.saturating_sub(4));
    let box_h = 5_u16;
    let x = (area.width.saturating_sub(box_w)) / 2;
    let y = (area.height.saturating_sub(box_h)) / 2;
    let popup = Rect::new(x, y, box_w, box_h);

    f.render_widget(Clear, popup);

    let block = Block::default()
        .title(" lizard ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(t.border));

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    match app.phase {
        LoadPhase::Waiting => {
            let msg = Paragraph::new("  Server is loading cryptocurrency data...")
                .style(Style::default().fg(t.fg));
            f.render_widget(msg, chunks[0]);

            let progress = Paragraph::new(format!(
                "  {} coins loaded so far",
                app.health.coins_loaded
            ))
            .style(Style::default().fg(t.dim));
            f.render_widget(progress, chunks[1]);
        }
        _ => {
            let msg = Paragraph::new("  Connecting to server...")
                .style(Style::default().fg(t.fg));
            f.render_widget(msg, chunks[0]);

            let url = Paragraph::new(format!("  {}", app.config.base_url))
                .style(Style::default().fg(t.dim));
            f.render_widget(url, chunks[1]);
        }
    }
}

// -- Top bar --

fn draw_top_bar(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;

    let tabs_list = [Tab::Overview, Tab::Coins, Tab::Trending];
    let mut spans: Vec<Span> = Vec::new();

    spans.push(Span::styled(
        " lizard ",
        Style::default().fg(t.title).add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::styled("\u{2502} ", Style::default().fg(t.dim)));

    for (i, tab) in tabs_list.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" \u{b7} ", Style::default().fg(t.dim)));
        }
        if tab.index() == app.tab.index() {
            spans.push(Span::styled(
                tab.label(),
                Style::default().fg(t.title).add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(tab.label(), Style::default().fg(t.dim)));
        }
    }

    if let Some(d) = &app.detail {
        spans.push(Span::styled(" > ", Style::default().fg(t.dim)));
        spans.push(Span::styled(
            d.coin.name.clone(),
            Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
        ));
    }

    // Right-align refresh info
    let refresh_info = if app.loading {
        "loading...".to_string()
    } else if app.last_refresh_display.is_empty() {
        String::new()
    } else {
        app.last_refresh_display.clone()
    };

    if !refresh_info.is_empty() {
        let used: usize = spans.iter().map(|s| s.content.len()).sum();
        let pad = (area.width as usize).saturating_sub(used + refresh_info.len() + 1);
        if pad > 0 {
            spans.push(Span::raw(" ".repeat(pad)));
        }
        spans.push(Span::styled(refresh_info, Style::default().fg(t.dim)));
    }

    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(t.border)),
    );
    f.render_widget(bar, area);
}

// -- Main views --

fn draw_main(f: &mut Frame, app: &mut App, area: Rect) {
    if app.loading && app.coins.is_empty() {
        let loading = Paragraph::new("  Fetching market data...")
            .style(Style::default().fg(app.theme.dim));
        f.render_widget(loading, area);
        return;
    }

    if app.coins.is_empty() {
        draw_failure(f, app, area);
        return;
    }

    match app.tab {
        Tab::Overview => draw_overview(f, app, area),
        Tab::Coins => draw_all_coins(f, app, area),
        Tab::Trending => draw_trending(f, app, area),
    }
}

fn draw_failure(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Failed to load cryptocurrency data. Please try again later.",
            Style::default().fg(t.error),
        )),
        Line::from(Span::styled(
            "  Press 'r' to retry.",
            Style::default().fg(t.dim),
        )),
    ];
    if let Some(ref err) = app.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", err),
            Style::default().fg(t.dim),
        )));
    }
    f.render_widget(Paragraph::new(lines), area);
}

fn draw_overview(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // stat cards
            Constraint::Min(6),    // top coins
            Constraint::Length(7), // movers
        ])
        .split(area);

    draw_stat_cards(f, app, chunks[0]);
    draw_basic_table(f, app, chunks[1], " Top Cryptocurrencies ");
    draw_movers(f, app, chunks[2]);
}

fn draw_stat_cards(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    match &app.global {
        Some(g) => {
            let sign = if g.market_cap_change_24h >= 0.0 { "+" } else { "" };
            let delta = format!("{}{:.1}% (24h)", sign, g.market_cap_change_24h);
            let delta_color = if g.market_cap_change_24h >= 0.0 {
                t.positive
            } else {
                t.negative
            };
            stat_card(
                f,
                t,
                cards[0],
                " Market Cap ",
                &format!("${}", format_large(g.total_market_cap)),
                &delta,
                delta_color,
            );
            stat_card(
                f,
                t,
                cards[1],
                " 24h Volume ",
                &format!("${}", format_large(g.total_volume)),
                "",
                t.dim,
            );
            stat_card(
                f,
                t,
                cards[2],
                " BTC Dominance ",
                &format!("{:.1}%", g.btc_dominance),
                "",
                t.dim,
            );
            stat_card(
                f,
                t,
                cards[3],
                " Active Coins ",
                &format_count(g.active_cryptocurrencies),
                "",
                t.dim,
            );
        }
        None => {
            for (i, title) in [" Market Cap ", " 24h Volume ", " BTC Dominance ", " Active Coins "]
                .iter()
                .enumerate()
            {
                stat_card(f, t, cards[i], title, "--", "", t.dim);
            }
        }
    }
}

fn stat_card(
    f: &mut Frame,
    t: &Theme,
    area: Rect,
    title: &str,
    value: &str,
    sub: &str,
    sub_color: Color,
) {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(t.border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut lines = vec![Line::from(Span::styled(
        format!(" {}", value),
        Style::default().fg(t.fg).add_modifier(Modifier::BOLD),
    ))];
    if !sub.is_empty() {
        lines.push(Line::from(Span::styled(
            format!(" {}", sub),
            Style::default().fg(sub_color),
        )));
    }
    f.render_widget(Paragraph::new(lines), inner);
}

// Rank, name, price and 24h change; shared by the overview and trending
// tabs, which differ only in which coins are visible.
fn draw_basic_table(f: &mut Frame, app: &mut App, area: Rect, title: &str) {
    let t = &app.theme;
    let table_height = area.height.saturating_sub(3) as usize;
    app.page_height = table_height.max(1);

    let fg = t.fg;
    let dim = t.dim;
    let accent = t.accent;
    let positive = t.positive;
    let negative = t.negative;
    let highlight_bg = t.highlight_bg;
    let highlight_fg = t.highlight_fg;
    let border = t.border;

    let visible = app.visible_coins();

    if visible.is_empty() {
        let p = Paragraph::new("  No data.").style(Style::default().fg(dim));
        f.render_widget(p, area);
        return;
    }

    let header = Row::new(
        ["#", "Name", "Ticker", "Price", "24h%", "MCap"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().fg(dim))),
    )
    .height(1);

    let rows: Vec<Row> = visible
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(app.page_height)
        .map(|(i, (_, coin))| {
            let change = format_pct(coin.change_24h);
            let cells = vec![
                Cell::from(coin.rank.to_string()).style(Style::default().fg(dim)),
                Cell::from(coin.name.clone()).style(Style::default().fg(fg)),
                Cell::from(coin.symbol.to_uppercase()).style(Style::default().fg(accent)),
                Cell::from(format!("${}", format_price(coin.price))).style(Style::default().fg(fg)),
                pct_cell(coin.change_24h, &change, positive, negative, dim),
                Cell::from(format_large(coin.market_cap)).style(Style::default().fg(dim)),
            ];

            let style = if i == app.selected {
                Style::default().bg(highlight_bg).fg(highlight_fg)
            } else {
                Style::default()
            };
            Row::new(cells).style(style)
        })
        .collect();

    let widths = vec![
        Constraint::Length(4),
        Constraint::Min(12),
        Constraint::Length(7),
        Constraint::Length(13),
        Constraint::Length(8),
        Constraint::Length(9),
    ];

    let table = Table::new(rows, &widths)
        .header(header)
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}

fn draw_movers(f: &mut Frame, app: &App, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let (gainers, losers) = app.top_movers();
    mover_panel(f, &app.theme, halves[0], " Top Gainers (24h) ", &gainers);
    mover_panel(f, &app.theme, halves[1], " Top Losers (24h) ", &losers);
}

fn mover_panel(f: &mut Frame, t: &Theme, area: Rect, title: &str, coins: &[&Coin]) {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(t.border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines: Vec<Line> = coins
        .iter()
        .map(|c| {
            let color = if c.change_24h >= 0.0 { t.positive } else { t.negative };
            Line::from(vec![
                Span::styled(
                    format!(" {:<6}", c.symbol.to_uppercase()),
                    Style::default().fg(t.accent),
                ),
                Span::styled(
                    format!("{:>9}", format_pct(c.change_24h)),
                    Style::default().fg(color),
                ),
                Span::styled(
                    format!("  ${}", format_price(c.price)),
                    Style::default().fg(t.dim),
                ),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(lines), inner);
}

// Rank carries no indicator: it is the server order, not a user sort.
fn sort_indicator(app: &App, col: SortColumn) -> &'static str {
    if app.sort_column == col && col != SortColumn::Rank {
        match app.sort_direction {
            SortDirection::Asc => " \u{25b4}",
            SortDirection::Desc => " \u{25be}",
        }
    } else {
        ""
    }
}

fn draw_all_coins(f: &mut Frame, app: &mut App, area: Rect) {
    let t = &app.theme;
    let table_height = area.height.saturating_sub(3) as usize;
    app.page_height = table_height.max(1);

    let fg = t.fg;
    let dim = t.dim;
    let accent = t.accent;
    let positive = t.positive;
    let negative = t.negative;
    let highlight_bg = t.highlight_bg;
    let highlight_fg = t.highlight_fg;
    let border = t.border;

    let visible = app.visible_coins();

    if visible.is_empty() {
        let p = Paragraph::new("  No data.").style(Style::default().fg(dim));
        f.render_widget(p, area);
        return;
    }

    let header_cells = vec![
        format!("#{}", sort_indicator(app, SortColumn::Rank)),
        "Name".to_string(),
        "Ticker".to_string(),
        format!("Price{}", sort_indicator(app, SortColumn::Price)),
        format!("24h%{}", sort_indicator(app, SortColumn::Change)),
        "MCap".to_string(),
        format!("Volume{}", sort_indicator(app, SortColumn::Volume)),
        "7d".to_string(),
    ];

    let header = Row::new(
        header_cells
            .iter()
            .map(|h| Cell::from(h.as_str()).style(Style::default().fg(dim))),
    )
    .height(1);

    let rows: Vec<Row> = visible
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(app.page_height)
        .map(|(i, (_, coin))| {
            let change = format_pct(coin.change_24h);
            let spark = spark_string(&coin.sparkline_data, 18);
            let spark_color = if coin.sparkline_data.is_empty() {
                dim
            } else if coin.change_24h >= 0.0 {
                positive
            } else {
                negative
            };

            let cells = vec![
                Cell::from(coin.rank.to_string()).style(Style::default().fg(dim)),
                Cell::from(coin.name.clone()).style(Style::default().fg(fg)),
                Cell::from(coin.symbol.to_uppercase()).style(Style::default().fg(accent)),
                Cell::from(format!("${}", format_price(coin.price))).style(Style::default().fg(fg)),
                pct_cell(coin.change_24h, &change, positive, negative, dim),
                Cell::from(format_large(coin.market_cap)).style(Style::default().fg(dim)),
                Cell::from(format_large(coin.volume_24h)).style(Style::default().fg(dim)),
                Cell::from(spark).style(Style::default().fg(spark_color)),
            ];

            let style = if i == app.selected {
                Style::default().bg(highlight_bg).fg(highlight_fg)
            } else {
                Style::default()
            };
            Row::new(cells).style(style)
        })
        .collect();

    let widths = vec![
        Constraint::Length(5),
        Constraint::Min(12),
        Constraint::Length(7),
        Constraint::Length(14),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(10),
        Constraint::Length(18),
    ];

    let table = Table::new(rows, &widths)
        .header(header)
        .block(
            Block::default()
                .title(" All Coins ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}

fn draw_trending(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(7)])
        .split(area);

    let title = if app.trending.coins.is_empty() {
        " Trending (showing top coins) "
    } else {
        " Trending Coins "
    };
    draw_basic_table(f, app, chunks[0], title);

    let t = &app.theme;
    let block = Block::default()
        .title(" Trending Categories ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(t.border));
    let inner = block.inner(chunks[1]);
    f.render_widget(block, chunks[1]);

    if app.trending.categories.is_empty() {
        let msg = Paragraph::new("  Trending categories loading...")
            .style(Style::default().fg(t.dim));
        f.render_widget(msg, inner);
    } else {
        let lines: Vec<Line> = app
            .trending
            .categories
            .iter()
            .take(5)
            .map(|c| {
                Line::from(vec![
                    Span::styled(format!(" {:<20}", c.name), Style::default().fg(t.fg)),
                    Span::styled(c.trend.clone(), Style::default().fg(t.accent)),
                ])
            })
            .collect();
        f.render_widget(Paragraph::new(lines), inner);
    }
}

// -- Detail page --

fn draw_detail(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let d = match &app.detail {
        Some(d) => d,
        None => return,
    };
    let coin = &d.coin;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),  // name + price
            Constraint::Length(11), // chart panel
            Constraint::Length(6),  // statistics
            Constraint::Min(0),     // about
        ])
        .split(area);

    let change_color = if coin.change_24h >= 0.0 { t.positive } else { t.negative };
    let header_lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", coin.name),
                Style::default().fg(t.title).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("({})", coin.symbol.to_uppercase()),
                Style::default().fg(t.accent),
            ),
            Span::styled(format!("  #{}", coin.rank), Style::default().fg(t.dim)),
        ]),
        Line::from(vec![
            Span::styled(
                format!(" ${}  ", format_price(coin.price)),
                Style::default().fg(t.fg).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format_pct(coin.change_24h), Style::default().fg(change_color)),
        ]),
    ];
    f.render_widget(Paragraph::new(header_lines), chunks[0]);

    draw_chart_panel(f, app, d, chunks[1]);
    draw_detail_stats(f, app, coin, chunks[2]);
    draw_about(f, app, coin, chunks[3]);
}

fn draw_chart_panel(f: &mut Frame, app: &App, d: &DetailView, area: Rect) {
    let t = &app.theme;
    let block = Block::default()
        .title(" Price History ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(t.border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // period selector
            Constraint::Length(1), // window stats
            Constraint::Min(3),    // chart
            Constraint::Length(1), // time range
        ])
        .split(inner);

    let mut selector: Vec<Span> = vec![Span::raw(" ")];
    for (i, p) in CHART_PERIODS.iter().enumerate() {
        if i > 0 {
            selector.push(Span::raw("  "));
        }
        if *p == d.period {
            selector.push(Span::styled(
                p.label(),
                Style::default().fg(t.input_accent).add_modifier(Modifier::BOLD),
            ));
        } else {
            selector.push(Span::styled(p.label(), Style::default().fg(t.dim)));
        }
    }
    f.render_widget(Paragraph::new(Line::from(selector)), rows[0]);

    match &d.chart {
        Some(chart) => {
            let change = chart.change_pct();
            let color = if chart.rising { t.positive } else { t.negative };
            let sign = if change >= 0.0 { "+" } else { "" };

            let stats = Line::from(vec![
                Span::styled(
                    format!(" ${}  ", format_price(chart.last_price())),
                    Style::default().fg(t.fg),
                ),
                Span::styled(format!("{}{:.2}%", sign, change), Style::default().fg(color)),
                Span::styled(
                    format!(
                        "   Lo: ${}  Hi: ${}",
                        format_price(chart.low()),
                        format_price(chart.high())
                    ),
                    Style::default().fg(t.dim),
                ),
            ]);
            f.render_widget(Paragraph::new(stats), rows[1]);

            let width = rows[2].width as usize;
            let height = rows[2].height as usize;
            let levels = chart_levels(&chart.prices, width, height);
            let resolution = height.max(1) as u64 * 8;
            let spark = Sparkline::default()
                .data(&levels)
                .max(resolution)
                .style(Style::default().fg(color));
            f.render_widget(spark, rows[2]);

            let label = Paragraph::new(format!(" {}", chart.time_range_label()))
                .style(Style::default().fg(t.dim));
            f.render_widget(label, rows[3]);
        }
        None => {
            let msg = Paragraph::new("  Chart data loading...")
                .style(Style::default().fg(t.dim));
            f.render_widget(msg, rows[2]);
        }
    }
}

fn draw_detail_stats(f: &mut Frame, app: &App, coin: &Coin, area: Rect) {
    let t = &app.theme;
    let block = Block::default()
        .title(" Statistics ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(t.border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    let total = if coin.total_supply > 0.0 {
        format_large(coin.total_supply)
    } else {
        "N/A".to_string()
    };
    let max_supply = if coin.max_supply > 0.0 {
        format_large(coin.max_supply)
    } else {
        "\u{221e}".to_string()
    };

    let left = vec![
        stat_line(t, "Market Cap", &format!("${}", format_large(coin.market_cap))),
        stat_line(t, "Volume (24h)", &format!("${}", format_large(coin.volume_24h))),
        stat_line(t, "Circulating", &format_large(coin.circulating_supply)),
        stat_line(t, "Total Supply", &total),
    ];
    f.render_widget(Paragraph::new(left), halves[0]);

    let ath_color = if coin.ath_change_percentage >= 0.0 {
        t.positive
    } else {
        t.negative
    };
    let right = vec![
        stat_line(t, "Max Supply", &max_supply),
        stat_line(t, "All-Time High", &format!("${}", format_price(coin.ath))),
        Line::from(vec![
            Span::styled(format!(" {:<14}", "From ATH"), Style::default().fg(t.dim)),
            Span::styled(
                format_pct(coin.ath_change_percentage),
                Style::default().fg(ath_color),
            ),
        ]),
        stat_line(t, "ATH Date", &format_ath_date(&coin.ath_date)),
    ];
    f.render_widget(Paragraph::new(right), halves[1]);
}

fn stat_line(t: &Theme, label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {:<14}", label), Style::default().fg(t.dim)),
        Span::styled(value.to_string(), Style::default().fg(t.fg)),
    ])
}

fn format_ath_date(raw: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(raw) {
        Ok(d) => d.format("%b %d, %Y").to_string(),
        Err(_) if raw.is_empty() => "--".to_string(),
        Err(_) => raw.to_string(),
    }
}

fn draw_about(f: &mut Frame, app: &App, coin: &Coin, area: Rect) {
    let t = &app.theme;
    let block = Block::default()
        .title(format!(" About {} ", coin.name))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(t.border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let info = match app.coin_info.get(&coin.id) {
        Some(info) => info,
        None => {
            let msg = Paragraph::new("  No background information for this coin.")
                .style(Style::default().fg(t.dim));
            f.render_widget(msg, inner);
            return;
        }
    };

    let bucket = risk_bucket(&info.risk_level);
    let mut lines: Vec<Line> = Vec::new();

    if !info.founder.is_empty() {
        lines.push(Line::from(vec![
            Span::styled(" Founded: ", Style::default().fg(t.dim)),
            Span::styled(
                format!("{} by {}", info.date_found, info.founder),
                Style::default().fg(t.fg),
            ),
        ]));
    }

    lines.push(Line::from(vec![
        Span::styled(" Risk: ", Style::default().fg(t.dim)),
        Span::styled(
            bucket.label(),
            Style::default().fg(risk_color(t, bucket)).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", info.risk_explanation),
            Style::default().fg(t.dim),
        ),
    ]));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(" {}", info.description),
        Style::default().fg(t.fg),
    )));

    if !info.major_price_events.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " Key price events:",
            Style::default().fg(t.dim),
        )));
        for event in &info.major_price_events {
            lines.push(Line::from(Span::styled(
                format!(" \u{2022} {}", event),
                Style::default().fg(t.fg),
            )));
        }
    }

    if !info.mining_method.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(" Consensus: ", Style::default().fg(t.dim)),
            Span::styled(info.mining_method.clone(), Style::default().fg(t.fg)),
            Span::styled(
                format!("   Energy: {}", info.mining_energy_cost),
                Style::default().fg(t.dim),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::styled(" Transactions: ", Style::default().fg(t.dim)),
            Span::styled(info.transaction_method.clone(), Style::default().fg(t.fg)),
            Span::styled(
                format!("   Est. cost per coin: {}", info.mining_cost_per_coin),
                Style::default().fg(t.dim),
            ),
        ]));
    }

    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn risk_color(t: &Theme, bucket: RiskBucket) -> Color {
    match bucket {
        RiskBucket::Low => t.positive,
        RiskBucket::Medium => t.input_accent,
        RiskBucket::MediumHigh => t.warn,
        RiskBucket::High => t.negative,
        RiskBucket::VeryHigh => t.error,
    }
}

// -- Bottom bar --

fn draw_bottom_bar(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;

    // Sort picking mode
    if app.sort_picking {
        let bar = Paragraph::new(" Sort by: r)ank  p)rice  c)hange  v)olume  Esc)cancel ")
            .style(Style::default().fg(t.input_accent));
        f.render_widget(bar, area);
        return;
    }

    let hints = if app.input_mode == InputMode::Settings {
        " j/k navigate | h/l change | Enter edit | s save | Esc cancel "
    } else if app.input_mode == InputMode::Search {
        " \u{2191}/\u{2193} select | Enter open | Esc close "
    } else if app.detail.is_some() {
        " h/l period | r refresh | Esc back | q quit "
    } else {
        match app.tab {
            Tab::Coins => " j/k \u{2195} | Tab/1-3 tabs | Enter detail | / search | s sort | r refresh | S settings | q quit ",
            _ => " j/k \u{2195} | Tab/1-3 tabs | Enter detail | / search | r refresh | S settings | q quit ",
        }
    };

    let mut spans = vec![Span::styled(hints, Style::default().fg(t.dim))];

    if let Some(ref err) = app.error {
        spans.push(Span::styled(
            format!(" \u{2502} {}", err),
            Style::default().fg(t.error),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

// -- Settings dialog --

fn draw_settings(f: &mut Frame, app: &App) {
    let t = &app.theme;
    let area = f.area();
    let box_w = 56_u16.min(area.width.saturating_sub(4));
    let box_h = 13_u16.min(area.height.saturating_sub(2));
    let x = (area.width.saturating_sub(box_w)) / 2;
    let y = (area.height.saturating_sub(box_h)) / 2;
    let popup = Rect::new(x, y, box_w, box_h);

    f.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Settings ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(t.accent));

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // [0] blank
            Constraint::Length(1), // [1] theme label
            Constraint::Length(1), // [2] theme value
            Constraint::Length(1), // [3] blank
            Constraint::Length(1), // [4] url label
            Constraint::Length(1), // [5] url value
            Constraint::Length(1), // [6] blank
            Constraint::Length(1), // [7] refresh label
            Constraint::Length(1), // [8] refresh value
            Constraint::Length(1), // [9] blank
            Constraint::Length(1), // [10] hint
            Constraint::Min(0),
        ])
        .split(inner);

    draw_cycle_field(
        f,
        t,
        chunks[1],
        chunks[2],
        app.settings_field == SettingsField::Theme,
        "Theme",
        THEME_NAMES[app.settings_theme_idx],
    );

    draw_text_field(
        f,
        t,
        chunks[4],
        chunks[5],
        app.settings_field == SettingsField::BaseUrl,
        app.settings_editing && app.settings_field == SettingsField::BaseUrl,
        SettingsField::BaseUrl.label(),
        &app.settings_base_url,
    );

    draw_text_field(
        f,
        t,
        chunks[7],
        chunks[8],
        app.settings_field == SettingsField::RefreshSecs,
        app.settings_editing && app.settings_field == SettingsField::RefreshSecs,
        SettingsField::RefreshSecs.label(),
        &app.settings_refresh_buf,
    );

    let hint = if app.settings_editing {
        "  Enter/Esc finish editing"
    } else if app.settings_field.is_text_field() {
        "  Enter edit | s save & close | Esc cancel"
    } else {
        "  h/l change | s save & close | Esc cancel"
    };
    let hint_p = Paragraph::new(hint).style(Style::default().fg(t.dim));
    f.render_widget(hint_p, chunks[10]);
}

fn draw_cycle_field(
    f: &mut Frame,
    t: &Theme,
    label_area: Rect,
    value_area: Rect,
    is_selected: bool,
    label: &str,
    value: &str,
) {
    let label_style = if is_selected {
        Style::default().fg(t.fg).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(t.dim)
    };
    let marker = if is_selected { "\u{25b8} " } else { "  " };
    f.render_widget(
        Paragraph::new(format!("{}{}", marker, label)).style(label_style),
        label_area,
    );

    let val_spans = if is_selected {
        Line::from(vec![
            Span::styled("    \u{25c2} ", Style::default().fg(t.dim)),
            Span::styled(
                value.to_string(),
                Style::default().fg(t.fg).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" \u{25b8}", Style::default().fg(t.dim)),
        ])
    } else {
        Line::from(Span::styled(
            format!("    {}", value),
            Style::default().fg(t.accent),
        ))
    };
    f.render_widget(Paragraph::new(val_spans), value_area);
}

fn draw_text_field(
    f: &mut Frame,
    t: &Theme,
    label_area: Rect,
    value_area: Rect,
    is_selected: bool,
    is_editing: bool,
    label: &str,
    value: &str,
) {
    let label_style = if is_selected {
        Style::default().fg(t.fg).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(t.dim)
    };
    let marker = if is_selected { "\u{25b8} " } else { "  " };
    f.render_widget(
        Paragraph::new(format!("{}{}", marker, label)).style(label_style),
        label_area,
    );

    let val_text = if is_editing {
        format!("    {}_", value)
    } else if value.is_empty() {
        "    (not set)".to_string()
    } else {
        format!("    {}", value)
    };

    let val_style = if is_editing {
        Style::default().fg(t.input_accent)
    } else if value.is_empty() {
        Style::default().fg(t.dim)
    } else {
        Style::default().fg(t.accent)
    };

    f.render_widget(Paragraph::new(val_text).style(val_style), value_area);
}

// -- Search popup --

fn draw_search(f: &mut Frame, app: &App) {
    let t = &app.theme;
    let area = f.area();
    let results = app.search_results();

    let list_rows = results.len().max(1) as u16;
    let box_w = 54_u16.min(area.width.saturating_sub(4));
    let box_h = (list_rows + 7).min(area.height.saturating_sub(2));
    let x = (area.width.saturating_sub(box_w)) / 2;
    let y = (area.height.saturating_sub(box_h)) / 2;
    let popup = Rect::new(x, y, box_w, box_h);

    f.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Search Coins ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(t.accent));

    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let mut constraints = vec![
        Constraint::Length(1), // label
        Constraint::Length(1), // input
        Constraint::Length(1), // blank
    ];
    for _ in 0..list_rows {
        constraints.push(Constraint::Length(1));
    }
    constraints.push(Constraint::Min(1)); // hint

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let label = Paragraph::new("  Search by name or ticker:")
        .style(Style::default().fg(t.dim));
    f.render_widget(label, chunks[0]);

    let input_text = if app.search_query.is_empty() {
        "  _".to_string()
    } else {
        format!("  {}_", app.search_query)
    };
    let input = Paragraph::new(input_text).style(Style::default().fg(t.input_accent));
    f.render_widget(input, chunks[1]);

    if results.is_empty() {
        let msg = if app.search_query.trim().is_empty() {
            "  Type to filter the coin list."
        } else {
            "  No results found"
        };
        f.render_widget(Paragraph::new(msg).style(Style::default().fg(t.dim)), chunks[3]);
    } else {
        for (i, (_, coin)) in results.iter().enumerate() {
            let is_sel = i == app.search_selected;
            let marker = if is_sel { "\u{25b8} " } else { "  " };
            let name_style = if is_sel {
                Style::default().fg(t.fg).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(t.fg)
            };

            let line = Line::from(vec![
                Span::styled(
                    marker,
                    if is_sel {
                        Style::default().fg(t.fg)
                    } else {
                        Style::default().fg(t.dim)
                    },
                ),
                Span::styled(coin.name.clone(), name_style),
                Span::styled(
                    format!(" ({})", coin.symbol.to_uppercase()),
                    Style::default().fg(t.dim),
                ),
                Span::styled(format!("  #{}", coin.rank), Style::default().fg(t.dim)),
                Span::styled(
                    format!("  ${}", format_price(coin.price)),
                    Style::default().fg(t.accent),
                ),
            ]);

            let style = if is_sel {
                Style::default().bg(t.highlight_bg)
            } else {
                Style::default()
            };
            f.render_widget(Paragraph::new(line).style(style), chunks[3 + i]);
        }
    }

    let hint_idx = chunks.len().saturating_sub(1);
    let hint = Paragraph::new("  \u{2191}/\u{2193} select | Enter open | Esc close")
        .style(Style::default().fg(t.dim));
    f.render_widget(hint, chunks[hint_idx]);
}

// -- Helpers --

fn pct_cell(v: f64, formatted: &str, positive: Color, negative: Color, dim: Color) -> Cell<'static> {
    let color = if v > 0.0 {
        positive
    } else if v < 0.0 {
        negative
    } else {
        dim
    };
    Cell::from(formatted.to_string()).style(Style::default().fg(color))
}
