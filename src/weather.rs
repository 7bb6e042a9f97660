//! Weather lookup: a typed client for an OpenWeatherMap-compatible API
//! and the two handlers of the lookup page. Upstream failures are shown
//! in-page rather than aborting with an error response.

use axum::extract::State;
use axum::response::Html;
use axum::Form;
use serde::Deserialize;

use crate::pages;

#[derive(Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// The subset of the upstream payload the page renders.
#[derive(Debug, Clone)]
pub struct WeatherReport {
    pub location: String,
    pub temperature_c: f64,
    pub description: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    name: String,
    main: MainSection,
    weather: Vec<ConditionSection>,
}

#[derive(Debug, Deserialize)]
struct MainSection {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionSection {
    description: String,
}

impl WeatherClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key,
        }
    }

    /// Fetch current conditions for a city, metric units.
    pub async fn current(&self, city: &str) -> Result<WeatherReport, reqwest::Error> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: ApiResponse = response.json().await?;
        Ok(WeatherReport::from(body))
    }
}

impl From<ApiResponse> for WeatherReport {
    fn from(body: ApiResponse) -> Self {
        let description = body
            .weather
            .first()
            .map(|c| title_case(&c.description))
            .unwrap_or_default();
        Self {
            location: body.name,
            temperature_c: body.main.temp,
            description,
        }
    }
}

/// Upstream descriptions arrive lowercased ("scattered clouds").
fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Deserialize)]
pub struct CityQuery {
    pub city: String,
}

/// GET / - the search form.
pub async fn form() -> Html<String> {
    Html(pages::weather_page(None))
}

/// POST / - look up the submitted city and render the report or the
/// failure text.
pub async fn lookup(
    State(client): State<WeatherClient>,
    Form(query): Form<CityQuery>,
) -> Html<String> {
    match client.current(&query.city).await {
        Ok(report) => Html(pages::weather_page(Some(Ok(&report)))),
        Err(e) => {
            tracing::warn!(city = %query.city, "weather lookup failed: {}", e);
            Html(pages::weather_page(Some(Err(&e.to_string()))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_upstream_payload() {
        let json = r#"{
            "name": "London",
            "main": { "temp": 17.3, "humidity": 62 },
            "weather": [ { "id": 802, "description": "scattered clouds" } ]
        }"#;
        let body: ApiResponse = serde_json::from_str(json).unwrap();
        let report = WeatherReport::from(body);
        assert_eq!(report.location, "London");
        assert_eq!(report.temperature_c, 17.3);
        assert_eq!(report.description, "Scattered Clouds");
    }

    #[test]
    fn test_decode_rejects_missing_fields() {
        let json = r#"{ "name": "London" }"#;
        assert!(serde_json::from_str::<ApiResponse>(json).is_err());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("scattered clouds"), "Scattered Clouds");
        assert_eq!(title_case("mist"), "Mist");
        assert_eq!(title_case(""), "");
    }
}
