//! Candlestick construction from daily price history.
//!
//! The upstream history only carries one price per day, so each candle is
//! synthesized from two adjacent daily prices: the previous day's price opens
//! the candle and the current day's price closes it. The first price point
//! only seeds the open of the second candle, so `N` points yield `N - 1`
//! candles.

use crate::models::Candlestick;
use chrono::{DateTime, Utc};
use market_data_client::{ChartPoint, MarketChart};
use thiserror::Error;

/// Reasons a market chart cannot be turned into candlesticks.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CandleError {
    /// No volume point lines up with a price point.
    #[error("missing volume for price point {0}")]
    MissingVolume(usize),
    /// Timestamp does not map to a calendar date.
    #[error("timestamp out of range: {0}")]
    InvalidTimestamp(i64),
}

/// Builds one candlestick per adjacent pair of daily prices.
///
/// # Errors
/// Returns [`CandleError`] if the volume series is shorter than the price
/// series or a timestamp is out of range.
pub fn build_candlesticks(chart: &MarketChart) -> Result<Vec<Candlestick>, CandleError> {
    chart
        .prices
        .windows(2)
        .enumerate()
        .map(|(offset, pair)| {
            let index = offset + 1;
            let volume = chart
                .total_volumes
                .get(index)
                .ok_or(CandleError::MissingVolume(index))?;
            candle(&pair[0], &pair[1], volume)
        })
        .collect()
}

fn candle(
    previous: &ChartPoint,
    current: &ChartPoint,
    volume: &ChartPoint,
) -> Result<Candlestick, CandleError> {
    let ts = current.timestamp_ms();
    let time = DateTime::<Utc>::from_timestamp_millis(ts)
        .ok_or(CandleError::InvalidTimestamp(ts))?
        .date_naive();

    let open = previous.value();
    let close = current.value();

    Ok(Candlestick {
        time,
        open,
        high: open.max(close),
        low: open.min(close),
        close,
        volume: volume.value(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const DAY_MS: f64 = 86_400_000.0;
    // 2024-01-01 00:00:00 UTC
    const T0: f64 = 1_704_067_200_000.0;

    fn chart(prices: &[f64], volumes: &[f64]) -> MarketChart {
        MarketChart {
            prices: prices
                .iter()
                .enumerate()
                .map(|(i, p)| ChartPoint(T0 + i as f64 * DAY_MS, *p))
                .collect(),
            market_caps: Vec::new(),
            total_volumes: volumes
                .iter()
                .enumerate()
                .map(|(i, v)| ChartPoint(T0 + i as f64 * DAY_MS, *v))
                .collect(),
        }
    }

    #[test]
    fn test_three_points_make_two_candles() {
        let candles = build_candlesticks(&chart(&[10.0, 12.0, 9.0], &[100.0, 150.0, 80.0])).unwrap();

        assert_eq!(candles.len(), 2);
        assert_eq!(
            candles[0],
            Candlestick {
                time: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                open: 10.0,
                high: 12.0,
                low: 10.0,
                close: 12.0,
                volume: 150.0,
            }
        );
        assert_eq!(
            candles[1],
            Candlestick {
                time: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
                open: 12.0,
                high: 12.0,
                low: 9.0,
                close: 9.0,
                volume: 80.0,
            }
        );
    }

    #[test]
    fn test_open_is_previous_close() {
        let candles =
            build_candlesticks(&chart(&[1.0, 3.0, 2.0, 5.0, 4.0], &[0.0; 5])).unwrap();

        for pair in candles.windows(2) {
            assert_eq!(pair[1].open, pair[0].close);
        }
    }

    #[test]
    fn test_single_point_yields_nothing() {
        assert!(build_candlesticks(&chart(&[10.0], &[1.0])).unwrap().is_empty());
        assert!(build_candlesticks(&chart(&[], &[])).unwrap().is_empty());
    }

    #[test]
    fn test_missing_volume_is_error() {
        let err = build_candlesticks(&chart(&[10.0, 11.0, 12.0], &[1.0, 2.0])).unwrap_err();
        assert_eq!(err, CandleError::MissingVolume(2));
    }

    #[test]
    fn test_time_serializes_as_iso_date() {
        let candles = build_candlesticks(&chart(&[10.0, 12.0], &[1.0, 2.0])).unwrap();
        let json = serde_json::to_value(&candles[0]).unwrap();

        assert_eq!(json["time"], "2024-01-02");
    }

    #[test]
    fn test_intraday_timestamp_truncated_to_day() {
        let mut data = chart(&[10.0, 12.0], &[1.0, 2.0]);
        // 2024-01-02 23:59:59 UTC
        data.prices[1] = ChartPoint(T0 + 2.0 * DAY_MS - 1000.0, 12.0);

        let candles = build_candlesticks(&data).unwrap();
        assert_eq!(candles[0].time, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
    }
}
