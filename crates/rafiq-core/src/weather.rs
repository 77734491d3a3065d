//! Current-weather widget data: a one-shot IP geolocation fix feeding an
//! Open-Meteo read. Failures leave the widget empty; nothing retries.

use anyhow::{Context, Result};
use serde::Deserialize;

const GEO_API: &str = "http://ip-api.com/json";
const WEATHER_API: &str = "https://api.open-meteo.com/v1/forecast";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherCondition {
    Clear,
    PartlyCloudy,
    Foggy,
    Raining,
    Stormy,
}

impl WeatherCondition {
    pub fn label(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "Clear",
            WeatherCondition::PartlyCloudy => "Partly Cloudy",
            WeatherCondition::Foggy => "Foggy",
            WeatherCondition::Raining => "Raining",
            WeatherCondition::Stormy => "Stormy",
        }
    }
}

/// Bucket an Open-Meteo weather code into a display condition.
pub fn condition_for_code(code: u32) -> WeatherCondition {
    if code == 0 {
        WeatherCondition::Clear
    } else if code < 3 {
        WeatherCondition::PartlyCloudy
    } else if code < 50 {
        WeatherCondition::Foggy
    } else if code < 70 {
        WeatherCondition::Raining
    } else {
        WeatherCondition::Stormy
    }
}

#[derive(Debug, Clone)]
pub struct Weather {
    /// Rounded temperature in °C.
    pub temp: i32,
    pub condition: WeatherCondition,
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: CurrentWeather,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f64,
    weathercode: u32,
}

pub struct WeatherClient {
    client: reqwest::Client,
    /// Fixed coordinates override the geolocation lookup.
    coordinates: Option<(f64, f64)>,
}

impl WeatherClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            coordinates: None,
        }
    }

    pub fn with_coordinates(mut self, lat: f64, lon: f64) -> Self {
        self.coordinates = Some((lat, lon));
        self
    }

    /// Fetch the current weather for the configured or geolocated position.
    pub async fn current(&self) -> Result<Weather> {
        let (lat, lon) = match self.coordinates {
            Some(coords) => coords,
            None => self.geolocate().await?,
        };

        let url = format!("{WEATHER_API}?latitude={lat}&longitude={lon}&current_weather=true");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to fetch weather")?;

        if !response.status().is_success() {
            anyhow::bail!("weather API error ({})", response.status());
        }

        let forecast: ForecastResponse =
            response.json().await.context("Failed to parse weather")?;

        Ok(Weather {
            temp: forecast.current_weather.temperature.round() as i32,
            condition: condition_for_code(forecast.current_weather.weathercode),
        })
    }

    async fn geolocate(&self) -> Result<(f64, f64)> {
        let response = self
            .client
            .get(GEO_API)
            .send()
            .await
            .context("Failed to geolocate")?;
        let geo: GeoResponse = response.json().await.context("Failed to parse geolocation")?;
        Ok((geo.lat, geo.lon))
    }
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_codes_bucket_as_documented() {
        assert_eq!(condition_for_code(0), WeatherCondition::Clear);
        assert_eq!(condition_for_code(1), WeatherCondition::PartlyCloudy);
        assert_eq!(condition_for_code(2), WeatherCondition::PartlyCloudy);
        assert_eq!(condition_for_code(3), WeatherCondition::Foggy);
        assert_eq!(condition_for_code(49), WeatherCondition::Foggy);
        assert_eq!(condition_for_code(50), WeatherCondition::Raining);
        assert_eq!(condition_for_code(69), WeatherCondition::Raining);
        assert_eq!(condition_for_code(70), WeatherCondition::Stormy);
        assert_eq!(condition_for_code(99), WeatherCondition::Stormy);
    }
}
