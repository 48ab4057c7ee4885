//! Today's weather lookup
//!
//! The upstream source serves a JSON array with one entry per calendar day,
//! keyed by month and day:
//!
//! ```json
//! [{ "date": "10-19", "weather": "Sunny" }, { "date": "10-20", "weather": "Rainy" }]
//! ```
//!
//! Todo creation stores the label for the server's local date. Any failure
//! to produce one aborts the creation.

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::debug;

/// Error type for weather lookups
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("weather request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Upstream answered with something other than 200
    #[error("weather service returned status {0}")]
    Status(u16),

    #[error("weather service returned no entries")]
    Empty,

    /// Upstream has no entry for the requested `MM-dd`
    #[error("no weather entry for {0}")]
    MissingDate(String),
}

/// Supplies the weather label stored on new todos
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn today_weather(&self) -> Result<String, WeatherError>;
}

/// One day in the upstream feed
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherEntry {
    /// `MM-dd`
    pub date: String,
    pub weather: String,
}

/// Picks the label for `date` out of the feed
pub fn weather_for_date(entries: &[WeatherEntry], date: NaiveDate) -> Result<String, WeatherError> {
    if entries.is_empty() {
        return Err(WeatherError::Empty);
    }

    let key = date.format("%m-%d").to_string();
    entries
        .iter()
        .find(|entry| entry.date == key)
        .map(|entry| entry.weather.clone())
        .ok_or(WeatherError::MissingDate(key))
}

/// Fetches the feed over HTTP on every call
#[derive(Debug, Clone)]
pub struct HttpWeatherClient {
    client: reqwest::Client,
    url: String,
}

impl HttpWeatherClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    async fn fetch(&self) -> Result<Vec<WeatherEntry>, WeatherError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(WeatherError::Status(status.as_u16()));
        }

        Ok(response.json::<Vec<WeatherEntry>>().await?)
    }
}

#[async_trait]
impl WeatherProvider for HttpWeatherClient {
    async fn today_weather(&self) -> Result<String, WeatherError> {
        let entries = self.fetch().await?;
        let weather = weather_for_date(&entries, Local::now().date_naive())?;

        debug!(weather = %weather, "Fetched today's weather");
        Ok(weather)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(date: &str, weather: &str) -> WeatherEntry {
        WeatherEntry {
            date: date.to_string(),
            weather: weather.to_string(),
        }
    }

    #[test]
    fn test_picks_matching_day() {
        let entries = vec![entry("10-18", "Cloudy"), entry("10-19", "Sunny")];
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();

        assert_eq!(weather_for_date(&entries, date).unwrap(), "Sunny");
    }

    #[test]
    fn test_zero_padded_key() {
        let entries = vec![entry("01-05", "Snow")];
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();

        assert_eq!(weather_for_date(&entries, date).unwrap(), "Snow");
    }

    #[test]
    fn test_empty_feed() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert!(matches!(weather_for_date(&[], date), Err(WeatherError::Empty)));
    }

    #[test]
    fn test_missing_day() {
        let entries = vec![entry("01-04", "Snow")];
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();

        match weather_for_date(&entries, date) {
            Err(WeatherError::MissingDate(key)) => assert_eq!(key, "01-05"),
            other => panic!("expected MissingDate, got {:?}", other),
        }
    }

    #[test]
    fn test_feed_deserializes() {
        let json = r#"[{"date":"02-29","weather":"Windy"}]"#;
        let entries: Vec<WeatherEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(entries[0].date, "02-29");
        assert_eq!(entries[0].weather, "Windy");
    }
}
