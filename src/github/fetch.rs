use crate::github::client::{ApiResponse, HostApi};
use serde::de::DeserializeOwned;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    Status(u16),
    Transport(String),
    Decode(String),
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Status(code) => write!(f, "HTTP {code}"),
            Failure::Transport(e) => write!(f, "transport: {e}"),
            Failure::Decode(e) => write!(f, "decode: {e}"),
        }
    }
}

/// Outcome of a typed fetch. Keeps "nothing there" apart from "could not
/// ask" until a caller collapses both into empty data.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetch<T> {
    Success(T),
    Empty,
    TransportFailure(Failure),
}

impl<T> Fetch<T> {
    pub fn success(self) -> Option<T> {
        match self {
            Fetch::Success(data) => Some(data),
            Fetch::Empty | Fetch::TransportFailure(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Fetch<U> {
        match self {
            Fetch::Success(data) => Fetch::Success(f(data)),
            Fetch::Empty => Fetch::Empty,
            Fetch::TransportFailure(e) => Fetch::TransportFailure(e),
        }
    }

    /// Collapses to "no data", logging the failure against `what`.
    pub fn or_empty(self, what: &str) -> T
    where
        T: Default,
    {
        match self {
            Fetch::Success(data) => data,
            Fetch::Empty => T::default(),
            Fetch::TransportFailure(e) => {
                tracing::warn!(what, error = %e, "fetch failed, treating as empty");
                T::default()
            }
        }
    }
}

/// GETs `path` and decodes a JSON array. An empty array is `Empty`.
pub async fn fetch_list<A, T>(api: &A, path: &str) -> Fetch<Vec<T>>
where
    A: HostApi,
    T: DeserializeOwned,
{
    match decode::<Vec<T>>(api.get(path).await) {
        Fetch::Success(items) if items.is_empty() => Fetch::Empty,
        other => other,
    }
}

/// GETs `path` and decodes a JSON object. A `null` body is `Empty`.
pub async fn fetch_object<A, T>(api: &A, path: &str) -> Fetch<T>
where
    A: HostApi,
    T: DeserializeOwned,
{
    decode(api.get(path).await)
}

fn decode<T: DeserializeOwned>(response: crate::error::Result<ApiResponse>) -> Fetch<T> {
    let response = match response {
        Ok(r) => r,
        Err(e) => return Fetch::TransportFailure(Failure::Transport(e.to_string())),
    };
    if !response.is_ok() {
        return Fetch::TransportFailure(Failure::Status(response.status));
    }
    match response.body {
        None | Some(serde_json::Value::Null) => Fetch::Empty,
        Some(value) => match serde_json::from_value(value) {
            Ok(data) => Fetch::Success(data),
            Err(e) => Fetch::TransportFailure(Failure::Decode(e.to_string())),
        },
    }
}
