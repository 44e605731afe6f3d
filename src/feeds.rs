//! HTTP clients for the two upstream feeds.
//!
//! Both feeds are plain unauthenticated GET endpoints returning JSON.
//! Fetches are single-shot: a failure is reported, never retried.

use crate::error::{AggregateError, AggregateResult};
use crate::models::{SpeedLocation, StatusComponent, StatusSummary};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Build the HTTP client shared by both fetches.
pub fn build_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder().timeout(timeout).build()
}

/// Fetch the status feed and unwrap its component list.
pub async fn fetch_status_components(
    client: &Client,
    url: &str,
) -> AggregateResult<Vec<StatusComponent>> {
    let summary: StatusSummary = get_json(client, url).await?;
    debug!("Status feed reported {} components", summary.components.len());
    Ok(summary.components)
}

/// Fetch the speed feed's location list.
pub async fn fetch_speed_locations(
    client: &Client,
    url: &str,
) -> AggregateResult<Vec<SpeedLocation>> {
    let locations: Vec<SpeedLocation> = get_json(client, url).await?;
    debug!("Speed feed reported {} locations", locations.len());
    Ok(locations)
}

/// GET a URL and decode its JSON body.
async fn get_json<T: DeserializeOwned>(client: &Client, url: &str) -> AggregateResult<T> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| AggregateError::Transport {
            url: url.to_string(),
            source: e,
        })?;

    if !response.status().is_success() {
        return Err(AggregateError::UpstreamStatus {
            url: url.to_string(),
            status: response.status(),
        });
    }

    response.json().await.map_err(|e| AggregateError::Decode {
        url: url.to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_status_components_unwraps_the_summary() {
        let server = MockServer::start().await;
        let body = r#"{
            "page": {"name": "Example Network"},
            "components": [
                {"id": "1", "name": "Amsterdam, NL - (AMS)", "status": "operational"},
                {"id": "2", "name": "Sites and Services", "status": "operational"}
            ],
            "incidents": []
        }"#;
        Mock::given(method("GET"))
            .and(path("/api/v2/summary.json"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
            .mount(&server)
            .await;

        let client = build_client(Duration::from_secs(5)).unwrap();
        let url = format!("{}/api/v2/summary.json", server.uri());
        let components = assert_ok!(fetch_status_components(&client, &url).await);

        assert_eq!(components.len(), 2);
        assert_eq!(components[0].name, "Amsterdam, NL - (AMS)");
        assert_eq!(components[1].status, "operational");
    }

    #[tokio::test]
    async fn test_fetch_speed_locations_parses_flat_records() {
        let server = MockServer::start().await;
        let body = r#"[
            {"iata": "AMS", "city": "Amsterdam", "lat": 52.3, "lon": 4.9,
             "cca2": "NL", "region": "Europe"}
        ]"#;
        Mock::given(method("GET"))
            .and(path("/locations"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
            .mount(&server)
            .await;

        let client = build_client(Duration::from_secs(5)).unwrap();
        let url = format!("{}/locations", server.uri());
        let locations = assert_ok!(fetch_speed_locations(&client, &url).await);

        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].iata, "AMS");
        assert_eq!(locations[0].fields.city, "Amsterdam");
    }

    #[tokio::test]
    async fn test_non_success_status_surfaces_as_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/locations"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = build_client(Duration::from_secs(5)).unwrap();
        let url = format!("{}/locations", server.uri());
        let err = assert_err!(fetch_speed_locations(&client, &url).await);

        assert!(matches!(
            err,
            AggregateError::UpstreamStatus { status, .. } if status.as_u16() == 500
        ));
    }

    #[tokio::test]
    async fn test_non_json_body_surfaces_as_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/summary.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = build_client(Duration::from_secs(5)).unwrap();
        let url = format!("{}/api/v2/summary.json", server.uri());
        let err = assert_err!(fetch_status_components(&client, &url).await);

        assert!(matches!(err, AggregateError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_host_surfaces_as_transport_error() {
        let client = build_client(Duration::from_secs(1)).unwrap();
        // Port 1 is never listening.
        let err = assert_err!(fetch_speed_locations(&client, "http://127.0.0.1:1/locations").await);

        assert!(matches!(err, AggregateError::Transport { .. }));
    }
}
