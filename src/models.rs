//! Data models for the PoP aggregator.
//!
//! This module contains the wire shapes of the two upstream feeds and
//! the merged record the aggregator emits.

use serde::{Deserialize, Serialize};

/// Top-level payload of the status endpoint.
///
/// The status page wraps its component list in a summary object; only the
/// components matter here, everything else is ignored on decode.
#[derive(Debug, Clone, Deserialize)]
pub struct StatusSummary {
    /// All reported components, points-of-presence and rollup groups alike.
    pub components: Vec<StatusComponent>,
}

/// A single entry from the status feed.
///
/// Components cover both physical points-of-presence, whose `name` embeds a
/// parenthesized code ("Amsterdam, NL - (AMS)"), and aggregate groups
/// ("Sites and Services"), which carry no code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusComponent {
    /// Human-readable component name as reported upstream.
    pub name: String,
    /// Operational state, e.g. "operational" or "partial_outage".
    pub status: String,
}

/// A single entry from the speed feed, keyed by its PoP code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedLocation {
    /// Three-letter location code (historically an airport code).
    pub iata: String,
    /// Geographic metadata that rides along into the merged record.
    #[serde(flatten)]
    pub fields: SpeedFields,
}

/// The speed feed's per-location metadata, minus the `iata` key.
///
/// Kept separate so a merged record can inline these fields without
/// serializing `iata` twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeedFields {
    /// City the PoP serves.
    pub city: String,
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
    /// ISO 3166-1 alpha-2 country code.
    pub cca2: String,
    /// Continent-level region name.
    pub region: String,
}

/// One PoP with its operational status and, when the speed feed knows the
/// code, its geographic metadata.
///
/// Serializes flat: the speed-side keys sit next to `iata` and `status`
/// when a match was found and are absent (not null-filled) otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedLocation {
    /// PoP code extracted from the status component name.
    pub iata: String,
    /// Operational state copied from the status component.
    pub status: String,
    /// Speed-side metadata; `None` when the code has no speed entry.
    #[serde(flatten)]
    pub speed: Option<SpeedFields>,
}

impl MergedLocation {
    /// Whether the PoP reports the fully healthy status.
    pub fn is_operational(&self) -> bool {
        self.status == "operational"
    }

    /// Whether the speed feed contributed metadata for this PoP.
    pub fn is_matched(&self) -> bool {
        self.speed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fields() -> SpeedFields {
        SpeedFields {
            city: "Amsterdam".to_string(),
            lat: 52.3,
            lon: 4.9,
            cca2: "NL".to_string(),
            region: "Europe".to_string(),
        }
    }

    #[test]
    fn test_merged_location_serializes_flat_when_matched() {
        let merged = MergedLocation {
            iata: "AMS".to_string(),
            status: "operational".to_string(),
            speed: Some(sample_fields()),
        };

        let value = serde_json::to_value(&merged).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object["iata"], "AMS");
        assert_eq!(object["status"], "operational");
        assert_eq!(object["city"], "Amsterdam");
        assert_eq!(object["lat"], 52.3);
        assert_eq!(object["lon"], 4.9);
        assert_eq!(object["cca2"], "NL");
        assert_eq!(object["region"], "Europe");
    }

    #[test]
    fn test_merged_location_omits_speed_keys_when_unmatched() {
        let merged = MergedLocation {
            iata: "XYZ".to_string(),
            status: "operational".to_string(),
            speed: None,
        };

        let value = serde_json::to_value(&merged).unwrap();
        let object = value.as_object().unwrap();

        // Exactly the base record: no nulled-out geography.
        assert_eq!(object.len(), 2);
        assert_eq!(object["iata"], "XYZ");
        assert_eq!(object["status"], "operational");
    }

    #[test]
    fn test_status_summary_ignores_unknown_fields() {
        let json = r#"{
            "page": {"name": "Example Network", "updated_at": "2024-01-01T00:00:00Z"},
            "components": [
                {"id": "abc123", "name": "Lisbon, PT - (LIS)", "status": "operational",
                 "created_at": "2020-01-01T00:00:00Z", "group_id": "xyz"}
            ]
        }"#;

        let summary: StatusSummary = serde_json::from_str(json).unwrap();

        assert_eq!(summary.components.len(), 1);
        assert_eq!(summary.components[0].name, "Lisbon, PT - (LIS)");
        assert_eq!(summary.components[0].status, "operational");
    }

    #[test]
    fn test_speed_location_flattens_fields_on_decode() {
        let json = r#"{
            "iata": "AMS", "lat": 52.3, "lon": 4.9,
            "cca2": "NL", "region": "Europe", "city": "Amsterdam"
        }"#;

        let location: SpeedLocation = serde_json::from_str(json).unwrap();

        assert_eq!(location.iata, "AMS");
        assert_eq!(location.fields, sample_fields());
    }

    #[test]
    fn test_is_operational() {
        let mut merged = MergedLocation {
            iata: "DFW".to_string(),
            status: "operational".to_string(),
            speed: None,
        };
        assert!(merged.is_operational());

        merged.status = "partial_outage".to_string();
        assert!(!merged.is_operational());
    }
}
