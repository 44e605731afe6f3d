//! Error types for feed fetching and merging.

use thiserror::Error;

/// Result alias for aggregation operations.
pub type AggregateResult<T> = Result<T, AggregateError>;

/// Everything that can go wrong between issuing the requests and
/// producing the merged location list.
///
/// Failures surface as-is: there is no retry, no fallback feed, and no
/// partial result on a failed fetch.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// The request never produced an HTTP response (DNS, connect, timeout).
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered, but not with a success status.
    #[error("{url} answered HTTP {status}")]
    UpstreamStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The response body was not the JSON shape the feed promises.
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A component passed the PoP name filter but yielded no code.
    #[error("no parenthesized code in component name {name:?}")]
    MalformedComponentName { name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_component_name_message() {
        let err = AggregateError::MalformedComponentName {
            name: "Sites and Services".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no parenthesized code in component name \"Sites and Services\""
        );
    }

    #[test]
    fn test_upstream_status_message() {
        let err = AggregateError::UpstreamStatus {
            url: "https://example.com/summary.json".to_string(),
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert_eq!(
            err.to_string(),
            "https://example.com/summary.json answered HTTP 500 Internal Server Error"
        );
    }
}
