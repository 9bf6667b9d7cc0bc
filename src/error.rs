use crate::schema::Violation;
use thiserror::Error;

/// Everything that can go wrong between building a client and handing a
/// domain value back to the caller. Each variant maps to one failure class;
/// nothing is swallowed or substituted with a default.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid base URL at construction. The client is never built.
    #[error("invalid client configuration: {0}")]
    Configuration(String),

    /// The caller supplied an invalid argument (blank code, bad date range).
    #[error("invalid argument: {0}")]
    Validation(String),

    /// The server answered with a non-2xx status.
    #[error("request failed with HTTP {status} {text}")]
    Http { status: u16, text: String },

    /// The request never produced a status (DNS, connect, timeout, ...).
    #[error("network error: {0}")]
    Request(#[source] reqwest::Error),

    /// The response body is not valid JSON.
    #[error("could not parse the response body as JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// The response is valid JSON but does not match the expected wire shape.
    /// Carries every violated field path, not just the first.
    #[error("response does not match the expected shape: {}", format_violations(.0))]
    SchemaValidation(Vec<Violation>),

    /// The API reported an error payload of its own (sent with HTTP 200).
    #[error("world bank api error: {0}")]
    Api(String),

    /// A single-country lookup returned no record.
    #[error("no country found for code {code:?}")]
    NotFound { code: String },

    /// A single-country lookup returned more than one record. The upstream
    /// API broke its contract; this is not a condition to recover from.
    #[error("ambiguous lookup: {count} records returned for code {code:?}")]
    AmbiguousLookup { code: String, count: usize },
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
