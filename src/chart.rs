use chrono::DateTime;

use crate::types::{ChartPeriod, Coin};

// Snapshot of one coin's series for the selected window. Rebuilt (and the
// previous one dropped) on every open, period switch, and detail refresh so
// stale series never stack up behind the widget.
#[derive(Debug, Clone)]
pub struct ChartState {
    pub period: ChartPeriod,
    pub prices: Vec<f64>,
    pub start_time: i64,
    pub end_time: i64,
    pub rising: bool,
}

impl ChartState {
    // None when the coin has no data for the window; the panel then shows
    // the loading placeholder instead of a chart.
    pub fn build(coin: &Coin, period: ChartPeriod) -> Option<Self> {
        let points = coin.history(period)?;
        let first = points.first()?;
        let last = points.last()?;
        Some(Self {
            period,
            prices: points.iter().map(|p| p.price).collect(),
            start_time: first.time,
            end_time: last.time,
            rising: last.price >= first.price,
        })
    }

    pub fn last_price(&self) -> f64 {
        self.prices.last().copied().unwrap_or(0.0)
    }

    pub fn low(&self) -> f64 {
        self.prices.iter().cloned().fold(f64::INFINITY, f64::min)
    }

    pub fn high(&self) -> f64 {
        self.prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
    }

    pub fn change_pct(&self) -> f64 {
        let first = self.prices.first().copied().unwrap_or(0.0);
        let last = self.last_price();
        if first > 0.0 {
            ((last - first) / first) * 100.0
        } else {
            0.0
        }
    }

    pub fn time_range_label(&self) -> String {
        let fmt = if self.period.hourly_axis() {
            "%b %d %H:%M"
        } else {
            "%b %d, %Y"
        };
        match (
            DateTime::from_timestamp_millis(self.start_time),
            DateTime::from_timestamp_millis(self.end_time),
        ) {
            (Some(a), Some(b)) => format!("{} - {}", a.format(fmt), b.format(fmt)),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn coin_with_history(prices_24h: &[(i64, f64)]) -> Coin {
        let points: Vec<_> = prices_24h
            .iter()
            .map(|(t, p)| json!({"time": t, "price": p}))
            .collect();
        serde_json::from_value(json!({
            "id": "bitcoin",
            "historicalData": {"24h": points}
        }))
        .unwrap()
    }

    #[test]
    fn missing_window_yields_none() {
        let coin = coin_with_history(&[(1_723_000_000_000, 100.0)]);
        assert!(ChartState::build(&coin, ChartPeriod::Day7).is_none());
        assert!(ChartState::build(&coin, ChartPeriod::Hour24).is_some());
    }

    #[test]
    fn rising_when_last_at_least_first() {
        let up = coin_with_history(&[(0, 100.0), (1, 90.0), (2, 120.0)]);
        assert!(ChartState::build(&up, ChartPeriod::Hour24).unwrap().rising);

        let flat = coin_with_history(&[(0, 100.0), (1, 100.0)]);
        assert!(ChartState::build(&flat, ChartPeriod::Hour24).unwrap().rising);

        let down = coin_with_history(&[(0, 100.0), (1, 99.9)]);
        assert!(!ChartState::build(&down, ChartPeriod::Hour24).unwrap().rising);
    }

    #[test]
    fn window_stats() {
        let coin = coin_with_history(&[(0, 100.0), (1, 80.0), (2, 150.0)]);
        let chart = ChartState::build(&coin, ChartPeriod::Hour24).unwrap();
        assert_eq!(chart.low(), 80.0);
        assert_eq!(chart.high(), 150.0);
        assert_eq!(chart.last_price(), 150.0);
        assert!((chart.change_pct() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn time_range_resolution_follows_period() {
        let coin = coin_with_history(&[(1_723_000_000_000, 1.0), (1_723_086_400_000, 2.0)]);
        let chart = ChartState::build(&coin, ChartPeriod::Hour24).unwrap();
        let label = chart.time_range_label();
        assert!(label.contains("Aug"));
        assert!(label.contains(':'));
    }
}
