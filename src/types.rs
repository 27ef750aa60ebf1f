use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

fn f64_or_zero<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Option::<f64>::deserialize(d).map(|v| v.unwrap_or(0.0))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coin {
    pub id: String,
    #[serde(default)]
    pub rank: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub price: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub change_24h: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub market_cap: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub volume_24h: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub circulating_supply: f64,
    // 0.0 encodes "no figure" for both supplies
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub total_supply: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub max_supply: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub ath: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub ath_change_percentage: f64,
    #[serde(default)]
    pub ath_date: String,
    #[serde(default)]
    pub sparkline_data: Vec<f64>,
    // keyed by period ("24h", "7d", ...); only the single-coin endpoint fills it
    #[serde(default)]
    pub historical_data: HashMap<String, Vec<PricePoint>>,
}

impl Coin {
    pub fn history(&self, period: ChartPeriod) -> Option<&[PricePoint]> {
        self.historical_data
            .get(period.key())
            .filter(|points| !points.is_empty())
            .map(|points| points.as_slice())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PricePoint {
    // milliseconds since epoch
    pub time: i64,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub total_market_cap: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub total_volume: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub btc_dominance: f64,
    #[serde(default)]
    pub active_cryptocurrencies: u64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub market_cap_change_24h: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrendingData {
    #[serde(default)]
    pub coins: Vec<TrendingCoin>,
    #[serde(default)]
    pub categories: Vec<TrendingCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingCoin {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub rank: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingCategory {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub trend: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Ready,
    Loading,
    #[serde(other)]
    Unavailable,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    pub status: ServerStatus,
    #[serde(default)]
    pub coins_loaded: u64,
}

impl Default for Health {
    fn default() -> Self {
        Self {
            status: ServerStatus::Unavailable,
            coins_loaded: 0,
        }
    }
}

// One combined load per program start; Waiting covers the 2s health polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Initial,
    Waiting,
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Coins,
    Trending,
}

impl Tab {
    pub fn index(self) -> usize {
        match self {
            Tab::Overview => 0,
            Tab::Coins => 1,
            Tab::Trending => 2,
        }
    }

    pub fn from_index(i: usize) -> Self {
        match i {
            0 => Tab::Overview,
            1 => Tab::Coins,
            2 => Tab::Trending,
            _ => Tab::Overview,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Coins => "All Coins",
            Tab::Trending => "Trending",
        }
    }

    pub fn next(self) -> Self {
        Self::from_index((self.index() + 1) % 3)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartPeriod {
    Hour24,
    Day7,
    Week2,
    Month1,
    Month3,
    Month6,
    Year1,
}

pub const CHART_PERIODS: &[ChartPeriod] = &[
    ChartPeriod::Hour24,
    ChartPeriod::Day7,
    ChartPeriod::Week2,
    ChartPeriod::Month1,
    ChartPeriod::Month3,
    ChartPeriod::Month6,
    ChartPeriod::Year1,
];

impl ChartPeriod {
    // key into Coin::historical_data
    pub fn key(self) -> &'static str {
        match self {
            ChartPeriod::Hour24 => "24h",
            ChartPeriod::Day7 => "7d",
            ChartPeriod::Week2 => "2w",
            ChartPeriod::Month1 => "1m",
            ChartPeriod::Month3 => "3m",
            ChartPeriod::Month6 => "6m",
            ChartPeriod::Year1 => "1y",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChartPeriod::Hour24 => "24H",
            ChartPeriod::Day7 => "7D",
            ChartPeriod::Week2 => "2W",
            ChartPeriod::Month1 => "1M",
            ChartPeriod::Month3 => "3M",
            ChartPeriod::Month6 => "6M",
            ChartPeriod::Year1 => "1Y",
        }
    }

    // short windows get hour-resolution axis labels
    pub fn hourly_axis(self) -> bool {
        matches!(self, ChartPeriod::Hour24 | ChartPeriod::Day7)
    }

    pub fn next(self) -> Self {
        let i = CHART_PERIODS.iter().position(|p| *p == self).unwrap_or(0);
        CHART_PERIODS[(i + 1) % CHART_PERIODS.len()]
    }

    pub fn prev(self) -> Self {
        let i = CHART_PERIODS.iter().position(|p| *p == self).unwrap_or(0);
        CHART_PERIODS[(i + CHART_PERIODS.len() - 1) % CHART_PERIODS.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsField {
    Theme,
    BaseUrl,
    RefreshSecs,
}

impl SettingsField {
    pub fn label(self) -> &'static str {
        match self {
            SettingsField::Theme => "Theme",
            SettingsField::BaseUrl => "Backend URL",
            SettingsField::RefreshSecs => "Refresh interval (secs)",
        }
    }

    pub fn next(self) -> Self {
        match self {
            SettingsField::Theme => SettingsField::BaseUrl,
            SettingsField::BaseUrl => SettingsField::RefreshSecs,
            SettingsField::RefreshSecs => SettingsField::Theme,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            SettingsField::Theme => SettingsField::RefreshSecs,
            SettingsField::BaseUrl => SettingsField::Theme,
            SettingsField::RefreshSecs => SettingsField::BaseUrl,
        }
    }

    pub fn is_text_field(self) -> bool {
        matches!(self, SettingsField::BaseUrl | SettingsField::RefreshSecs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Rank,
    Price,
    Change,
    Volume,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COIN_LIST_JSON: &str = r#"[
        {"id":"bitcoin","rank":1,"name":"Bitcoin","symbol":"btc",
         "logo":"https://example.com/btc.png","price":64250.12,
         "change24h":2.35,"marketCap":1267000000000.0,"volume24h":28400000000.0,
         "circulatingSupply":19720000.0,"totalSupply":19720000.0,"maxSupply":21000000.0,
         "ath":73750.0,"athChangePercentage":-12.9,"athDate":"2024-03-14T07:10:36.635Z",
         "sparklineData":[63000.0,63500.0,64250.12]},
        {"id":"ethereum","rank":2,"name":"Ethereum","symbol":"eth",
         "logo":"https://example.com/eth.png","price":3150.4,
         "change24h":-1.02,"marketCap":378000000000.0,"volume24h":14100000000.0,
         "circulatingSupply":120200000.0,"totalSupply":null,"maxSupply":null,
         "ath":4878.26,"athChangePercentage":-35.4,"athDate":"2021-11-10T14:24:19.604Z",
         "sparklineData":[]}
    ]"#;

    #[test]
    fn decodes_coin_list() {
        let coins: Vec<Coin> = serde_json::from_str(COIN_LIST_JSON).unwrap();
        assert_eq!(coins.len(), 2);
        assert_eq!(coins[0].id, "bitcoin");
        assert_eq!(coins[0].rank, 1);
        assert_eq!(coins[0].sparkline_data.len(), 3);
        assert!(coins[0].historical_data.is_empty());
    }

    #[test]
    fn null_supplies_become_zero() {
        let coins: Vec<Coin> = serde_json::from_str(COIN_LIST_JSON).unwrap();
        assert_eq!(coins[1].total_supply, 0.0);
        assert_eq!(coins[1].max_supply, 0.0);
        assert_eq!(coins[1].change_24h, -1.02);
    }

    #[test]
    fn decodes_detail_with_history() {
        let json = r#"{"id":"bitcoin","rank":1,"name":"Bitcoin","symbol":"btc",
            "logo":"","price":64250.12,"change24h":2.35,"marketCap":1.0,
            "volume24h":1.0,"circulatingSupply":1.0,"totalSupply":1.0,
            "maxSupply":1.0,"ath":1.0,"athChangePercentage":0.0,"athDate":"",
            "sparklineData":[],
            "historicalData":{
                "24h":[{"time":1723000000000,"price":64000.0},
                       {"time":1723003600000,"price":64100.0}],
                "7d":[]
            }}"#;
        let coin: Coin = serde_json::from_str(json).unwrap();
        let day = coin.history(ChartPeriod::Hour24).unwrap();
        assert_eq!(day.len(), 2);
        assert_eq!(day[0].time, 1723000000000);
        // empty series behaves like a missing one
        assert!(coin.history(ChartPeriod::Day7).is_none());
        assert!(coin.history(ChartPeriod::Year1).is_none());
    }

    #[test]
    fn decodes_global_stats() {
        let json = r#"{"totalMarketCap":2430000000000.0,"totalVolume":89200000000.0,
            "btcDominance":52.1,"activeCryptocurrencies":10234,
            "marketCapChange24h":-0.8}"#;
        let stats: GlobalStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.active_cryptocurrencies, 10234);
        assert!(stats.market_cap_change_24h < 0.0);
    }

    #[test]
    fn decodes_trending() {
        let json = r#"{"coins":[{"id":"pepe","name":"Pepe","symbol":"pepe",
            "logo":"","rank":24}],
            "categories":[{"name":"Meme","trend":"Trending #1"}]}"#;
        let trending: TrendingData = serde_json::from_str(json).unwrap();
        assert_eq!(trending.coins.len(), 1);
        assert_eq!(trending.categories[0].name, "Meme");
    }

    #[test]
    fn decodes_health_states() {
        let ready: Health = serde_json::from_str(r#"{"status":"ready","coins_loaded":50}"#).unwrap();
        assert_eq!(ready.status, ServerStatus::Ready);
        assert_eq!(ready.coins_loaded, 50);

        let loading: Health = serde_json::from_str(r#"{"status":"loading","coins_loaded":12}"#).unwrap();
        assert_eq!(loading.status, ServerStatus::Loading);

        // unknown strings count as unavailable
        let odd: Health = serde_json::from_str(r#"{"status":"rebooting"}"#).unwrap();
        assert_eq!(odd.status, ServerStatus::Unavailable);
        assert_eq!(odd.coins_loaded, 0);
    }

    #[test]
    fn chart_periods_cycle() {
        assert_eq!(ChartPeriod::Hour24.next(), ChartPeriod::Day7);
        assert_eq!(ChartPeriod::Hour24.prev(), ChartPeriod::Year1);
        assert_eq!(ChartPeriod::Year1.next(), ChartPeriod::Hour24);
        assert_eq!(ChartPeriod::Month1.key(), "1m");
        assert!(ChartPeriod::Day7.hourly_axis());
        assert!(!ChartPeriod::Month3.hourly_axis());
    }
}
