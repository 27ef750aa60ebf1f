use std::cmp::Ordering;
use std::fs::OpenOptions;
use std::io::Write;
use std::time::Instant;

use crate::chart::ChartState;
use crate::config::Config;
use crate::info::CoinInfoMap;
use crate::theme::{self, Theme, THEME_NAMES};
use crate::types::*;

// Detail page state. The coin here is the enriched single-coin payload
// and is deliberately separate from the list entry of the same id.
pub struct DetailView {
    pub coin: Coin,
    pub period: ChartPeriod,
    pub chart: Option<ChartState>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshTarget {
    FullList,
    Detail(String),
}

pub struct App {
    pub tab: Tab,
    pub coins: Vec<Coin>,
    // permutation over coins; only the All Coins tab reads it
    pub display_order: Vec<usize>,
    pub selected: usize,
    pub scroll_offset: usize,
    pub page_height: usize,
    pub detail: Option<DetailView>,
    pub global: Option<GlobalStats>,
    pub trending: TrendingData,
    pub coin_info: CoinInfoMap,
    pub phase: LoadPhase,
    pub health: Health,
    pub input_mode: InputMode,
    pub last_refresh: Option<Instant>,
    pub last_refresh_display: String,
    pub error: Option<String>,
    pub loading: bool,
    pub config: Config,
    pub theme: Theme,
    pub quit: bool,
    // Sort
    pub sort_column: SortColumn,
    pub sort_direction: SortDirection,
    pub sort_picking: bool,
    // Search
    pub search_query: String,
    pub search_selected: usize,
    // Settings
    pub settings_field: SettingsField,
    pub settings_base_url: String,
    pub settings_refresh_buf: String,
    pub settings_theme_idx: usize,
    pub settings_editing: bool,
}

impl App {
    pub fn new(config: Config, coin_info: CoinInfoMap) -> Self {
        let loaded_theme = theme::by_name(&config.theme);
        let theme_idx = THEME_NAMES
            .iter()
            .position(|t| *t == config.theme)
            .unwrap_or(0);
        Self {
            tab: Tab::Overview,
            coins: Vec::new(),
            display_order: Vec::new(),
            selected: 0,
            scroll_offset: 0,
            page_height: 20,
            detail: None,
            global: None,
            trending: TrendingData::default(),
            coin_info,
            phase: LoadPhase::Initial,
            health: Health::default(),
            input_mode: InputMode::Normal,
            last_refresh: None,
            last_refresh_display: String::new(),
            error: None,
            loading: true,
            config,
            theme: loaded_theme,
            quit: false,
            sort_column: SortColumn::Rank,
            sort_direction: SortDirection::Asc,
            sort_picking: false,
            search_query: String::new(),
            search_selected: 0,
            settings_field: SettingsField::Theme,
            settings_base_url: String::new(),
            settings_refresh_buf: String::new(),
            settings_theme_idx: theme_idx,
            settings_editing: false,
        }
    }

    // Feeds a health probe into the startup phase machine. Returns true
    // exactly once per program run: the moment the combined data load
    // should fire. An unreachable server on the very first probe still
    // triggers the load so the failure surfaces as an empty dashboard
    // instead of an eternal wait.
    pub fn on_health(&mut self, health: Health) -> bool {
        let trigger = match (self.phase, health.status) {
            (LoadPhase::Initial, ServerStatus::Loading) => {
                self.phase = LoadPhase::Waiting;
                false
            }
            (LoadPhase::Initial, _) => {
                self.phase = LoadPhase::Running;
                true
            }
            (LoadPhase::Waiting, ServerStatus::Ready) => {
                self.phase = LoadPhase::Running;
                true
            }
            _ => false,
        };
        self.health = health;
        trigger
    }

    pub fn refresh_target(&self) -> RefreshTarget {
        match &self.detail {
            Some(d) => RefreshTarget::Detail(d.coin.id.clone()),
            None => RefreshTarget::FullList,
        }
    }

    pub fn apply_initial(
        &mut self,
        coins: Vec<Coin>,
        global: Option<GlobalStats>,
        trending: TrendingData,
    ) {
        self.apply_full_refresh(coins, global, trending);
        self.loading = false;
    }

    // A failed fetch hands back empties; stale data beats a blank table,
    // so empties never overwrite what is already on screen.
    pub fn apply_full_refresh(
        &mut self,
        coins: Vec<Coin>,
        global: Option<GlobalStats>,
        trending: TrendingData,
    ) {
        if !coins.is_empty() {
            self.coins = coins;
            self.error = None;
            self.rebuild_display_order();
            self.clamp_selection();
        }
        if global.is_some() {
            self.global = global;
        }
        if !trending.coins.is_empty() || !trending.categories.is_empty() {
            self.trending = trending;
        }
    }

    // Replaces only the detail page. The list keeps its prices until the
    // next full refresh.
    pub fn apply_detail_update(&mut self, coin: Coin) {
        if let Some(d) = &mut self.detail {
            let chart = ChartState::build(&coin, d.period);
            d.chart = chart;
            d.coin = coin;
        }
    }

    pub fn open_detail(&mut self, coin: Coin) {
        let period = ChartPeriod::Hour24;
        let chart = ChartState::build(&coin, period);
        self.detail = Some(DetailView { coin, period, chart });
        self.error = None;
        self.input_mode = InputMode::Normal;
        self.search_query.clear();
        self.search_selected = 0;
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    pub fn cycle_period(&mut self, forward: bool) {
        if let Some(d) = &mut self.detail {
            d.period = if forward { d.period.next() } else { d.period.prev() };
            let chart = ChartState::build(&d.coin, d.period);
            d.chart = chart;
        }
    }

    // Tabs are exclusive with the detail page, so switching always drops
    // back to the list view first.
    pub fn switch_tab(&mut self, tab: Tab) {
        self.detail = None;
        if self.tab != tab {
            self.tab = tab;
            self.selected = 0;
            self.scroll_offset = 0;
        }
        self.clamp_selection();
    }

    pub fn visible_coins(&self) -> Vec<(usize, &Coin)> {
        match self.tab {
            Tab::Overview => self.coins.iter().enumerate().take(20).collect(),
            Tab::Coins => self
                .display_order
                .iter()
                .filter_map(|&i| self.coins.get(i).map(|c| (i, c)))
                .collect(),
            Tab::Trending => {
                if self.trending.coins.is_empty() {
                    self.coins.iter().enumerate().take(10).collect()
                } else {
                    self.trending
                        .coins
                        .iter()
                        .filter_map(|t| {
                            self.coins
                                .iter()
                                .position(|c| c.id == t.id)
                                .map(|i| (i, &self.coins[i]))
                        })
                        .collect()
                }
            }
        }
    }

    pub fn selected_coin(&self) -> Option<&Coin> {
        let visible = self.visible_coins();
        visible.get(self.selected).map(|(_, c)| *c)
    }

    pub fn clamp_selection(&mut self) {
        let len = self.visible_coins().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
        self.adjust_scroll();
    }

    pub fn adjust_scroll(&mut self) {
        if self.page_height == 0 {
            return;
        }
        if self.selected < self.scroll_offset {
            self.scroll_offset = self.selected;
        } else if self.selected >= self.scroll_offset + self.page_height {
            self.scroll_offset = self.selected - self.page_height + 1;
        }
    }

    // Biggest gainers and losers over 24h, five of each. Works on a
    // scratch vec of refs; the canonical list keeps server order.
    pub fn top_movers(&self) -> (Vec<&Coin>, Vec<&Coin>) {
        let mut by_change: Vec<&Coin> = self.coins.iter().collect();
        by_change.sort_by(|a, b| {
            b.change_24h
                .partial_cmp(&a.change_24h)
                .unwrap_or(Ordering::Equal)
        });
        let gainers = by_change.iter().take(5).copied().collect();
        let losers = by_change.iter().rev().take(5).copied().collect();
        (gainers, losers)
    }

    // Picking the active column again inverts it. Rank is the exception:
    // it always restores ascending server order.
    pub fn set_sort(&mut self, column: SortColumn) {
        if column == SortColumn::Rank {
            self.sort_column = SortColumn::Rank;
            self.sort_direction = SortDirection::Asc;
        } else if self.sort_column == column {
            self.sort_direction = self.sort_direction.flip();
        } else {
            self.sort_column = column;
            self.sort_direction = SortDirection::Desc;
        }
        self.rebuild_display_order();
        self.clamp_selection();
    }

    pub fn rebuild_display_order(&mut self) {
        let mut order: Vec<usize> = (0..self.coins.len()).collect();
        let column = self.sort_column;
        let direction = self.sort_direction;
        order.sort_by(|&a, &b| {
            let (ca, cb) = (&self.coins[a], &self.coins[b]);
            let ord = match column {
                SortColumn::Rank => ca.rank.cmp(&cb.rank),
                SortColumn::Price => {
                    ca.price.partial_cmp(&cb.price).unwrap_or(Ordering::Equal)
                }
                SortColumn::Change => ca
                    .change_24h
                    .partial_cmp(&cb.change_24h)
                    .unwrap_or(Ordering::Equal),
                SortColumn::Volume => ca
                    .volume_24h
                    .partial_cmp(&cb.volume_24h)
                    .unwrap_or(Ordering::Equal),
            };
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
        self.display_order = order;
    }

    pub fn open_search(&mut self) {
        self.search_query.clear();
        self.search_selected = 0;
        self.input_mode = InputMode::Search;
    }

    pub fn close_search(&mut self) {
        self.search_query.clear();
        self.search_selected = 0;
        self.input_mode = InputMode::Normal;
    }

    // Case-insensitive substring match on name or symbol, first five hits
    // in list order.
    pub fn search_results(&self) -> Vec<(usize, &Coin)> {
        let query = self.search_query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.coins
            .iter()
            .enumerate()
            .filter(|(_, c)| {
                c.name.to_lowercase().contains(&query)
                    || c.symbol.to_lowercase().contains(&query)
            })
            .take(5)
            .collect()
    }

    pub fn clamp_search_selection(&mut self) {
        let len = self.search_results().len();
        if len == 0 {
            self.search_selected = 0;
        } else if self.search_selected >= len {
            self.search_selected = len - 1;
        }
    }

    pub fn open_settings(&mut self) {
        self.settings_base_url = self.config.base_url.clone();
        self.settings_refresh_buf = self.config.refresh_interval_secs.to_string();
        self.settings_theme_idx = THEME_NAMES
            .iter()
            .position(|t| *t == self.config.theme)
            .unwrap_or(0);
        self.settings_field = SettingsField::Theme;
        self.settings_editing = false;
        self.input_mode = InputMode::Settings;
    }

    pub fn current_settings_value_mut(&mut self) -> &mut String {
        match self.settings_field {
            SettingsField::BaseUrl => &mut self.settings_base_url,
            SettingsField::RefreshSecs => &mut self.settings_refresh_buf,
            SettingsField::Theme => &mut self.settings_base_url, // unused for the cycle field
        }
    }

    pub fn cycle_theme(&mut self, forward: bool) {
        let len = THEME_NAMES.len();
        if forward {
            self.settings_theme_idx = (self.settings_theme_idx + 1) % len;
        } else {
            self.settings_theme_idx = (self.settings_theme_idx + len - 1) % len;
        }
        // Live preview
        self.theme = theme::by_name(THEME_NAMES[self.settings_theme_idx]);
    }

    pub fn update_refresh_display(&mut self) {
        if let Some(inst) = self.last_refresh {
            let secs = inst.elapsed().as_secs();
            if secs < 60 {
                self.last_refresh_display = format!("{}s ago", secs);
            } else {
                self.last_refresh_display = format!("{}m ago", secs / 60);
            }
        }
    }

    pub fn set_error(&mut self, msg: String) {
        log_error(&msg);
        self.error = Some(msg);
    }
}

fn log_path() -> std::path::PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| std::path::PathBuf::from("."));
    path.push("lizard");
    path.push("errors.log");
    path
}

pub fn log_error(msg: &str) {
    let path = log_path();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&path) {
        let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let _ = writeln!(f, "[{}] {}", now, msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn coin(id: &str, rank: u32, price: f64, change: f64, volume: f64) -> Coin {
        serde_json::from_value(json!({
            "id": id,
            "rank": rank,
            "name": format!("{}{}", id[..1].to_uppercase(), &id[1..]),
            "symbol": &id[..3.min(id.len())],
            "price": price,
            "change24h": change,
            "volume24h": volume,
        }))
        .unwrap()
    }

    fn detail_coin(id: &str, price: f64) -> Coin {
        serde_json::from_value(json!({
            "id": id,
            "rank": 1,
            "name": id,
            "symbol": &id[..3.min(id.len())],
            "price": price,
            "change24h": 1.0,
            "historicalData": {
                "24h": [
                    {"time": 1723000000000u64, "price": price - 10.0},
                    {"time": 1723003600000u64, "price": price},
                ],
                "7d": [
                    {"time": 1722400000000u64, "price": price - 50.0},
                    {"time": 1723003600000u64, "price": price},
                ],
            },
        }))
        .unwrap()
    }

    fn ready() -> Health {
        serde_json::from_str(r#"{"status":"ready","coins_loaded":50}"#).unwrap()
    }

    fn loading(n: u64) -> Health {
        serde_json::from_str(&format!(r#"{{"status":"loading","coins_loaded":{}}}"#, n)).unwrap()
    }

    fn running_app(coins: Vec<Coin>) -> App {
        let mut app = App::new(Config::default(), CoinInfoMap::default());
        app.phase = LoadPhase::Running;
        app.loading = false;
        app.apply_full_refresh(coins, None, TrendingData::default());
        app
    }

    #[test]
    fn warming_server_delays_the_load_until_ready() {
        let mut app = App::new(Config::default(), CoinInfoMap::default());
        assert!(!app.on_health(loading(3)));
        assert_eq!(app.phase, LoadPhase::Waiting);
        assert_eq!(app.health.coins_loaded, 3);

        assert!(!app.on_health(loading(30)));
        assert_eq!(app.health.coins_loaded, 30);

        assert!(app.on_health(ready()));
        assert_eq!(app.phase, LoadPhase::Running);

        // later probes never re-trigger the combined load
        assert!(!app.on_health(ready()));
        assert!(!app.on_health(loading(1)));
    }

    #[test]
    fn ready_server_loads_immediately_and_once() {
        let mut app = App::new(Config::default(), CoinInfoMap::default());
        assert!(app.on_health(ready()));
        assert_eq!(app.phase, LoadPhase::Running);
        assert!(!app.on_health(ready()));
    }

    #[test]
    fn unreachable_server_still_attempts_the_load() {
        let mut app = App::new(Config::default(), CoinInfoMap::default());
        assert!(app.on_health(Health::default()));
        assert_eq!(app.phase, LoadPhase::Running);
    }

    #[test]
    fn waiting_survives_a_dropped_probe() {
        let mut app = App::new(Config::default(), CoinInfoMap::default());
        assert!(!app.on_health(loading(5)));
        assert!(!app.on_health(Health::default()));
        assert_eq!(app.phase, LoadPhase::Waiting);
        assert!(app.on_health(ready()));
    }

    #[test]
    fn refresh_targets_detail_only_while_open() {
        let mut app = running_app(vec![coin("bitcoin", 1, 100.0, 1.0, 10.0)]);
        assert_eq!(app.refresh_target(), RefreshTarget::FullList);

        app.open_detail(detail_coin("bitcoin", 100.0));
        assert_eq!(
            app.refresh_target(),
            RefreshTarget::Detail("bitcoin".to_string())
        );

        app.close_detail();
        assert_eq!(app.refresh_target(), RefreshTarget::FullList);
    }

    #[test]
    fn empty_fetch_keeps_stale_data() {
        let mut app = running_app(vec![
            coin("bitcoin", 1, 100.0, 1.0, 10.0),
            coin("ethereum", 2, 50.0, -2.0, 5.0),
        ]);
        app.apply_full_refresh(Vec::new(), None, TrendingData::default());
        assert_eq!(app.coins.len(), 2);
        assert_eq!(app.coins[0].id, "bitcoin");
    }

    #[test]
    fn detail_update_never_touches_the_list() {
        let mut app = running_app(vec![coin("bitcoin", 1, 100.0, 1.0, 10.0)]);
        app.open_detail(detail_coin("bitcoin", 100.0));

        app.apply_detail_update(detail_coin("bitcoin", 120.0));
        let d = app.detail.as_ref().unwrap();
        assert_eq!(d.coin.price, 120.0);
        assert_eq!(d.chart.as_ref().unwrap().last_price(), 120.0);
        // list entry still carries the pre-update price
        assert_eq!(app.coins[0].price, 100.0);
    }

    #[test]
    fn detail_update_preserves_the_selected_period() {
        let mut app = running_app(vec![coin("bitcoin", 1, 100.0, 1.0, 10.0)]);
        app.open_detail(detail_coin("bitcoin", 100.0));
        app.cycle_period(true);
        assert_eq!(app.detail.as_ref().unwrap().period, ChartPeriod::Day7);

        app.apply_detail_update(detail_coin("bitcoin", 130.0));
        let d = app.detail.as_ref().unwrap();
        assert_eq!(d.period, ChartPeriod::Day7);
        assert_eq!(d.chart.as_ref().unwrap().period, ChartPeriod::Day7);
    }

    #[test]
    fn sorting_twice_inverts_and_leaves_canonical_order_alone() {
        let mut app = running_app(vec![
            coin("bitcoin", 1, 100.0, 1.0, 10.0),
            coin("ethereum", 2, 300.0, -2.0, 5.0),
            coin("tether", 3, 1.0, 0.1, 50.0),
        ]);
        app.tab = Tab::Coins;

        app.set_sort(SortColumn::Price);
        let ids: Vec<&str> = app.visible_coins().iter().map(|(_, c)| c.id.as_str()).collect();
        assert_eq!(ids, vec!["ethereum", "bitcoin", "tether"]);

        app.set_sort(SortColumn::Price);
        let ids: Vec<&str> = app.visible_coins().iter().map(|(_, c)| c.id.as_str()).collect();
        assert_eq!(ids, vec!["tether", "bitcoin", "ethereum"]);

        // canonical vec keeps server order through both sorts
        let canonical: Vec<&str> = app.coins.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(canonical, vec!["bitcoin", "ethereum", "tether"]);
    }

    #[test]
    fn sort_applies_only_to_the_all_coins_tab() {
        let mut app = running_app(vec![
            coin("bitcoin", 1, 100.0, 1.0, 10.0),
            coin("ethereum", 2, 300.0, -2.0, 5.0),
        ]);
        app.set_sort(SortColumn::Price);

        app.tab = Tab::Overview;
        let ids: Vec<&str> = app.visible_coins().iter().map(|(_, c)| c.id.as_str()).collect();
        assert_eq!(ids, vec!["bitcoin", "ethereum"]);
    }

    #[test]
    fn rank_sort_restores_server_order() {
        let mut app = running_app(vec![
            coin("bitcoin", 1, 100.0, 1.0, 10.0),
            coin("ethereum", 2, 300.0, -2.0, 5.0),
        ]);
        app.tab = Tab::Coins;
        app.set_sort(SortColumn::Volume);
        app.set_sort(SortColumn::Rank);
        let ids: Vec<&str> = app.visible_coins().iter().map(|(_, c)| c.id.as_str()).collect();
        assert_eq!(ids, vec!["bitcoin", "ethereum"]);

        // rank never inverts
        app.set_sort(SortColumn::Rank);
        assert_eq!(app.sort_direction, SortDirection::Asc);
    }

    #[test]
    fn search_is_case_insensitive_and_caps_at_five() {
        let mut coins: Vec<Coin> = (0..8)
            .map(|i| coin(&format!("testcoin{}", i), i + 1, 10.0, 0.0, 1.0))
            .collect();
        coins.push(coin("bitcoin", 9, 100.0, 1.0, 10.0));
        let mut app = running_app(coins);

        app.open_search();
        app.search_query = "TESTCOIN".to_string();
        assert_eq!(app.search_results().len(), 5);

        app.search_query = "BIT".to_string();
        let hits = app.search_results();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].1.id, "bitcoin");
    }

    #[test]
    fn search_matches_symbols_too() {
        let mut app = running_app(vec![coin("ethereum", 1, 300.0, 1.0, 5.0)]);
        app.open_search();
        app.search_query = "ETH".to_string();
        assert_eq!(app.search_results().len(), 1);
    }

    #[test]
    fn blank_and_hopeless_queries_return_nothing() {
        let mut app = running_app(vec![coin("bitcoin", 1, 100.0, 1.0, 10.0)]);
        app.open_search();
        assert!(app.search_results().is_empty());
        app.search_query = "   ".to_string();
        assert!(app.search_results().is_empty());
        app.search_query = "zzzzzz".to_string();
        assert!(app.search_results().is_empty());
    }

    #[test]
    fn shrinking_results_pull_the_search_selection_back() {
        let coins: Vec<Coin> = (0..5)
            .map(|i| coin(&format!("testcoin{}", i), i + 1, 10.0, 0.0, 1.0))
            .collect();
        let mut app = running_app(coins);
        app.open_search();
        app.search_query = "testcoin".to_string();
        app.search_selected = 4;
        app.search_query = "testcoin1".to_string();
        app.clamp_search_selection();
        assert_eq!(app.search_selected, 0);
    }

    #[test]
    fn switching_tabs_closes_the_detail_page() {
        let mut app = running_app(vec![coin("bitcoin", 1, 100.0, 1.0, 10.0)]);
        app.open_detail(detail_coin("bitcoin", 100.0));
        app.switch_tab(Tab::Trending);
        assert!(app.detail.is_none());
        assert_eq!(app.tab, Tab::Trending);
    }

    #[test]
    fn selection_clamps_when_the_list_shrinks() {
        let mut app = running_app(vec![
            coin("bitcoin", 1, 100.0, 1.0, 10.0),
            coin("ethereum", 2, 300.0, -2.0, 5.0),
            coin("tether", 3, 1.0, 0.1, 50.0),
        ]);
        app.selected = 10;
        app.clamp_selection();
        assert_eq!(app.selected, 2);
    }

    #[test]
    fn trending_tab_joins_against_the_list() {
        let mut app = running_app(vec![
            coin("bitcoin", 1, 100.0, 1.0, 10.0),
            coin("ethereum", 2, 300.0, -2.0, 5.0),
        ]);
        app.trending = serde_json::from_value(json!({
            "coins": [{"id": "ethereum", "name": "Ethereum", "symbol": "eth", "logo": "", "rank": 2}],
            "categories": [],
        }))
        .unwrap();
        app.tab = Tab::Trending;
        let visible = app.visible_coins();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].0, 1);
        assert_eq!(visible[0].1.id, "ethereum");
    }

    #[test]
    fn empty_trending_falls_back_to_the_top_of_the_list() {
        let coins: Vec<Coin> = (0..15)
            .map(|i| coin(&format!("testcoin{}", i), i + 1, 10.0, 0.0, 1.0))
            .collect();
        let mut app = running_app(coins);
        app.tab = Tab::Trending;
        assert_eq!(app.visible_coins().len(), 10);
    }

    #[test]
    fn movers_split_without_reordering_the_list() {
        let mut app = running_app(vec![
            coin("a", 1, 1.0, 5.0, 1.0),
            coin("b", 2, 1.0, -8.0, 1.0),
            coin("c", 3, 1.0, 12.0, 1.0),
            coin("d", 4, 1.0, 0.5, 1.0),
        ]);
        app.tab = Tab::Overview;
        let (gainers, losers) = app.top_movers();
        assert_eq!(gainers[0].id, "c");
        assert_eq!(losers[0].id, "b");

        let canonical: Vec<&str> = app.coins.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(canonical, vec!["a", "b", "c", "d"]);
    }
}
