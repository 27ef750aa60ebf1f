mod api;
mod app;
mod chart;
mod config;
mod info;
mod theme;
mod types;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use api::BackendClient;
use app::{App, RefreshTarget};
use config::Config;
use types::*;

#[derive(Parser, Debug)]
#[command(author, version, about = "Cryptocurrency market dashboard for the terminal", long_about = None)]
struct Args {
    /// Backend API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Refresh interval in seconds (minimum 30)
    #[arg(long)]
    refresh: Option<u64>,

    /// Colour theme name
    #[arg(long)]
    theme: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load()?;
    if let Some(url) = args.base_url {
        config.base_url = url.trim_end_matches('/').to_string();
    }
    if let Some(secs) = args.refresh {
        config.refresh_interval_secs = secs.max(30);
    }
    if let Some(name) = args.theme {
        config.theme = name;
    }

    let coin_info = info::load();
    let mut app = App::new(config, coin_info);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        let msg = format!("Fatal: {}", e);
        app::log_error(&msg);
        eprintln!("Error: {}", e);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let tick_rate = Duration::from_millis(250);
    let probe_interval = Duration::from_secs(2);

    let client = BackendClient::new(&app.config.base_url);

    // Health probe loop: poll until the backend reports ready (or proves
    // unreachable), then fire the initial load exactly once.
    let mut last_probe: Option<Instant> = None;
    loop {
        terminal.draw(|f| ui::draw(f, &mut *app))?;

        if app.quit {
            return Ok(());
        }

        let probe_due = match last_probe {
            Some(at) => at.elapsed() >= probe_interval,
            None => true,
        };
        if probe_due {
            let health = client.fetch_health().await;
            last_probe = Some(Instant::now());
            if app.on_health(health) {
                break;
            }
        }

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    return Ok(());
                }
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                    return Ok(());
                }
            }
        }
    }

    // One frame between the gate and the data so the fetch shows as such
    terminal.draw(|f| ui::draw(f, &mut *app))?;

    let (coins, global, trending) = tokio::join!(
        client.fetch_coins(),
        client.fetch_global(),
        client.fetch_trending()
    );
    app.apply_initial(coins, global, trending);
    app.last_refresh = Some(Instant::now());
    app.update_refresh_display();

    run_main_loop(terminal, app, client).await
}

async fn run_main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    mut client: BackendClient,
) -> Result<()> {
    let tick_rate = Duration::from_millis(250);

    loop {
        let refresh_dur = Duration::from_secs(app.config.refresh_interval_secs);
        app.update_refresh_display();

        terminal.draw(|f| ui::draw(f, &mut *app))?;

        // Auto-refresh
        if let Some(last) = app.last_refresh {
            if last.elapsed() >= refresh_dur {
                run_refresh(app, &client).await;
            }
        }

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                    app.quit = true;
                }

                match app.input_mode {
                    InputMode::Settings => {
                        handle_settings_key(app, key.code, &mut client);
                    }
                    InputMode::Search => match key.code {
                        KeyCode::Esc => {
                            app.close_search();
                        }
                        KeyCode::Enter => {
                            let id = app
                                .search_results()
                                .get(app.search_selected)
                                .map(|(_, c)| c.id.clone());
                            if let Some(id) = id {
                                open_coin_detail(app, &client, &id).await;
                            }
                        }
                        KeyCode::Down => {
                            app.search_selected += 1;
                            app.clamp_search_selection();
                        }
                        KeyCode::Up => {
                            app.search_selected = app.search_selected.saturating_sub(1);
                        }
                        KeyCode::Backspace => {
                            app.search_query.pop();
                            app.clamp_search_selection();
                        }
                        KeyCode::Char(c) => {
                            app.search_query.push(c);
                            app.clamp_search_selection();
                        }
                        _ => {}
                    },
                    InputMode::Normal if app.sort_picking => {
                        app.sort_picking = false;
                        match key.code {
                            KeyCode::Char('r') => app.set_sort(SortColumn::Rank),
                            KeyCode::Char('p') => app.set_sort(SortColumn::Price),
                            KeyCode::Char('c') => app.set_sort(SortColumn::Change),
                            KeyCode::Char('v') => app.set_sort(SortColumn::Volume),
                            _ => {}
                        }
                    }
                    InputMode::Normal if app.detail.is_some() => match key.code {
                        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace => {
                            app.close_detail();
                        }
                        KeyCode::Char('l') | KeyCode::Right => {
                            app.cycle_period(true);
                        }
                        KeyCode::Char('h') | KeyCode::Left => {
                            app.cycle_period(false);
                        }
                        KeyCode::Char('r') => {
                            run_refresh(app, &client).await;
                        }
                        // Tab switches land on the list view, never under
                        // an open detail page.
                        KeyCode::Tab => {
                            app.switch_tab(app.tab.next());
                        }
                        KeyCode::Char('1') => {
                            app.switch_tab(Tab::Overview);
                        }
                        KeyCode::Char('2') => {
                            app.switch_tab(Tab::Coins);
                        }
                        KeyCode::Char('3') => {
                            app.switch_tab(Tab::Trending);
                        }
                        KeyCode::Char('/') => {
                            app.open_search();
                        }
                        _ => {}
                    },
                    InputMode::Normal => match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
                        KeyCode::Tab => {
                            app.switch_tab(app.tab.next());
                        }
                        KeyCode::Char('1') => {
                            app.switch_tab(Tab::Overview);
                        }
                        KeyCode::Char('2') => {
                            app.switch_tab(Tab::Coins);
                        }
                        KeyCode::Char('3') => {
                            app.switch_tab(Tab::Trending);
                        }
                        KeyCode::Char('j') | KeyCode::Down => {
                            let len = app.visible_coins().len();
                            if len > 0 {
                                app.selected = (app.selected + 1).min(len - 1);
                            }
                            app.adjust_scroll();
                        }
                        KeyCode::Char('k') | KeyCode::Up => {
                            app.selected = app.selected.saturating_sub(1);
                            app.adjust_scroll();
                        }
                        KeyCode::PageDown => {
                            let len = app.visible_coins().len();
                            if len > 0 {
                                app.selected = (app.selected + app.page_height).min(len - 1);
                            }
                            app.adjust_scroll();
                        }
                        KeyCode::PageUp => {
                            app.selected = app.selected.saturating_sub(app.page_height);
                            app.adjust_scroll();
                        }
                        KeyCode::Char('g') => {
                            app.selected = 0;
                            app.adjust_scroll();
                        }
                        KeyCode::Char('G') => {
                            let len = app.visible_coins().len();
                            if len > 0 {
                                app.selected = len - 1;
                            }
                            app.adjust_scroll();
                        }
                        KeyCode::Enter => {
                            let id = app.selected_coin().map(|c| c.id.clone());
                            if let Some(id) = id {
                                open_coin_detail(app, &client, &id).await;
                            }
                        }
                        KeyCode::Char('/') => {
                            app.open_search();
                        }
                        KeyCode::Char('s') => {
                            if app.tab == Tab::Coins {
                                app.sort_picking = true;
                            }
                        }
                        KeyCode::Char('S') => {
                            app.open_settings();
                        }
                        KeyCode::Char('r') => {
                            run_refresh(app, &client).await;
                        }
                        _ => {}
                    },
                }
            }
        }

        if app.quit {
            break;
        }
    }

    Ok(())
}

// Every attempt stamps last_refresh, so a failing backend is retried on
// the next interval instead of on every tick.
async fn run_refresh(app: &mut App, client: &BackendClient) {
    match app.refresh_target() {
        RefreshTarget::FullList if app.coins.is_empty() => {
            // Nothing on screen yet: redo the whole combined load.
            let (coins, global, trending) = tokio::join!(
                client.fetch_coins(),
                client.fetch_global(),
                client.fetch_trending()
            );
            app.apply_full_refresh(coins, global, trending);
        }
        RefreshTarget::FullList => {
            // Global stats and trending stay as fetched at startup; the
            // periodic refresh re-pulls the list alone.
            let coins = client.fetch_coins().await;
            app.apply_full_refresh(coins, None, TrendingData::default());
        }
        RefreshTarget::Detail(id) => {
            // A dropped detail fetch keeps the page on stale data.
            if let Some(coin) = client.fetch_coin_detail(&id).await {
                app.apply_detail_update(coin);
            }
        }
    }
    app.last_refresh = Some(Instant::now());
    app.update_refresh_display();
}

async fn open_coin_detail(app: &mut App, client: &BackendClient, coin_id: &str) {
    match client.fetch_coin_detail(coin_id).await {
        Some(coin) => app.open_detail(coin),
        None => app.set_error("Failed to load coin details".to_string()),
    }
}

fn handle_settings_key(app: &mut App, key: KeyCode, client: &mut BackendClient) {
    if app.settings_editing {
        match key {
            KeyCode::Esc | KeyCode::Enter => {
                app.settings_editing = false;
            }
            KeyCode::Backspace => {
                if app.settings_field.is_text_field() {
                    app.current_settings_value_mut().pop();
                }
            }
            KeyCode::Char(c) => {
                if app.settings_field.is_text_field() {
                    app.current_settings_value_mut().push(c);
                }
            }
            _ => {}
        }
    } else {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => {
                // Revert theme to saved value
                app.theme = theme::by_name(&app.config.theme);
                app.input_mode = InputMode::Normal;
            }
            KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => {
                app.settings_field = app.settings_field.next();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                app.settings_field = app.settings_field.prev();
            }
            KeyCode::Enter | KeyCode::Char('e') => {
                if app.settings_field.is_text_field() {
                    app.settings_editing = true;
                }
            }
            KeyCode::Char('h') | KeyCode::Left => {
                if app.settings_field == SettingsField::Theme {
                    app.cycle_theme(false);
                }
            }
            KeyCode::Char('l') | KeyCode::Right => {
                if app.settings_field == SettingsField::Theme {
                    app.cycle_theme(true);
                }
            }
            KeyCode::Char('s') => {
                // Save settings
                let new_theme_name = theme::THEME_NAMES[app.settings_theme_idx].to_string();
                let new_base_url = app
                    .settings_base_url
                    .trim()
                    .trim_end_matches('/')
                    .to_string();
                let base_url_changed = new_base_url != app.config.base_url;

                let refresh_secs = app
                    .settings_refresh_buf
                    .trim()
                    .parse::<u64>()
                    .unwrap_or(app.config.refresh_interval_secs)
                    .max(30);

                app.config.base_url = new_base_url;
                app.config.refresh_interval_secs = refresh_secs;
                app.config.theme = new_theme_name.clone();
                app.theme = theme::by_name(&new_theme_name);

                if let Err(e) = app.config.save() {
                    app.set_error(format!("Save failed: {}", e));
                }

                if base_url_changed {
                    *client = BackendClient::new(&app.config.base_url);
                }

                app.input_mode = InputMode::Normal;
            }
            _ => {}
        }
    }
}
