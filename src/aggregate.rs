//! The aggregator: fetch both feeds, join on PoP code, emit merged records.

use crate::error::AggregateResult;
use crate::extract;
use crate::feeds;
use crate::models::{MergedLocation, SpeedLocation, StatusComponent};
use futures::try_join;
use std::time::Duration;
use tracing::debug;

/// Configuration for the aggregator.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    pub status_url: String,
    pub speed_url: String,
    pub timeout: Duration,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            status_url: "https://www.cloudflarestatus.com/api/v2/summary.json".to_string(),
            speed_url: "https://speed.cloudflare.com/locations".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Fetches the status and speed feeds and joins them into one PoP map.
pub struct LocationAggregator {
    config: AggregatorConfig,
    client: reqwest::Client,
}

impl LocationAggregator {
    /// Create an aggregator with its own HTTP client.
    pub fn new(config: AggregatorConfig) -> Self {
        let client = feeds::build_client(config.timeout).expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Fetch both feeds concurrently and merge them.
    ///
    /// Output order follows the status feed's component order, not the
    /// order in which the two requests happen to complete. Either fetch
    /// failing fails the whole call.
    pub async fn fetch_locations(&self) -> AggregateResult<Vec<MergedLocation>> {
        let (components, speed) = try_join!(
            feeds::fetch_status_components(&self.client, &self.config.status_url),
            feeds::fetch_speed_locations(&self.client, &self.config.speed_url),
        )?;

        merge_locations(&components, &speed)
    }
}

/// Join status components against the speed locations on PoP code.
///
/// Components that do not follow the PoP naming convention are skipped.
/// Each surviving component produces exactly one record, in feed order;
/// a code absent from the speed list still yields a record, just without
/// geography. When the speed list repeats a code, the first entry wins.
pub fn merge_locations(
    components: &[StatusComponent],
    speed: &[SpeedLocation],
) -> AggregateResult<Vec<MergedLocation>> {
    let mut merged = Vec::new();

    for component in components
        .iter()
        .filter(|c| extract::is_pop_component(&c.name))
    {
        let iata = extract::pop_code(&component.name)?;
        let location = speed.iter().find(|l| l.iata == iata);

        match location {
            Some(l) => debug!("{}: matched speed location in {}", iata, l.fields.city),
            None => debug!("{}: no speed location for this code", iata),
        }

        merged.push(MergedLocation {
            iata: iata.to_string(),
            status: component.status.clone(),
            speed: location.map(|l| l.fields.clone()),
        });
    }

    debug!(
        "Merged {} PoPs out of {} status components",
        merged.len(),
        components.len()
    );

    Ok(merged)
}
