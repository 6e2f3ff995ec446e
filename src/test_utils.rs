#![cfg(test)]

use crate::error::{RadarError, Result};
use crate::github::client::{ApiResponse, HostApi};
use crate::github::types::{CommitAuthor, CommitDetails, CommitWire};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

enum Route {
    Respond(u16, Value),
    Unreachable,
}

/// In-memory host keyed by request path (query included). Unknown paths
/// answer 404.
#[derive(Default)]
pub struct FakeHost {
    routes: HashMap<String, Route>,
    requests: Mutex<Vec<String>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, path: &str, status: u16, body: Value) -> Self {
        self.routes
            .insert(path.to_string(), Route::Respond(status, body));
        self
    }

    pub fn unreachable(mut self, path: &str) -> Self {
        self.routes.insert(path.to_string(), Route::Unreachable);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn was_requested(&self, path: &str) -> bool {
        self.requests().iter().any(|p| p == path)
    }
}

impl HostApi for FakeHost {
    async fn get(&self, path: &str) -> Result<ApiResponse> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(path.to_string());
        }
        match self.routes.get(path) {
            Some(Route::Respond(status, body)) => Ok(ApiResponse {
                status: *status,
                body: Some(body.clone()),
            }),
            Some(Route::Unreachable) => Err(RadarError::GitHub("connection refused".into())),
            None => Ok(ApiResponse {
                status: 404,
                body: Some(json!({"message": "Not Found"})),
            }),
        }
    }
}

pub fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}

pub fn commit_json(sha: &str, message: &str, date: &str) -> Value {
    json!({
        "sha": sha,
        "commit": {
            "message": message,
            "author": {"name": "Mona", "email": "mona@example.com", "date": date}
        }
    })
}

pub fn commit_wire(sha: &str, message: &str, date: &str) -> CommitWire {
    CommitWire {
        sha: sha.to_string(),
        commit: CommitDetails {
            message: message.to_string(),
            author: Some(CommitAuthor {
                name: "Mona".to_string(),
                date: date.to_string(),
            }),
        },
    }
}
