use crate::config::Config;
use crate::credentials::{Credential, CredentialState};
use crate::dashboard::{build_dashboard, DashboardOptions, DashboardView};
use crate::error::{RadarError, Result};
use crate::github::client::GitHubClient;
use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;

const SETUP_PAGE: &str = r#"<!doctype html>
<html>
<head><title>Repo Radar setup</title></head>
<body>
<h1>Welcome to Repo Radar</h1>
<p>Create a personal access token at
<a href="https://github.com/settings/tokens/new">github.com/settings/tokens/new</a>
with the <code>repo</code> scope, then paste it below.</p>
<form method="post" action="/">
<input type="password" name="github_token" placeholder="GitHub token" autofocus>
<button type="submit">Save</button>
</form>
</body>
</html>
"#;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub credentials: Arc<CredentialState>,
}

#[derive(Deserialize)]
pub struct SetupForm {
    #[serde(default)]
    github_token: String,
}

impl IntoResponse for RadarError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(setup_page).post(save_token))
        .route("/dashboard", get(dashboard))
        .with_state(state)
}

pub async fn serve(state: AppState) -> Result<()> {
    let addr = state.config.bind_addr.clone();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "dashboard listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .map_err(|e| RadarError::Server(e.to_string()))
}

async fn setup_page(State(state): State<AppState>) -> Response {
    if state.credentials.get().is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    Html(SETUP_PAGE).into_response()
}

async fn save_token(
    State(state): State<AppState>,
    Form(form): Form<SetupForm>,
) -> Result<Response> {
    if state.credentials.get().is_some() {
        return Ok(Redirect::to("/dashboard").into_response());
    }
    match Credential::new(&form.github_token) {
        Some(credential) => {
            state.credentials.set(credential)?;
            tracing::info!(path = %state.credentials.store().path().display(), "token saved");
            Ok(Redirect::to("/dashboard").into_response())
        }
        None => Ok(Html(SETUP_PAGE).into_response()),
    }
}

async fn dashboard(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response> {
    let Some(credential) = state.credentials.get() else {
        return Ok(Redirect::to("/").into_response());
    };
    let selected: Vec<String> = params
        .into_iter()
        .filter(|(k, _)| k == "repo_filter")
        .map(|(_, v)| v)
        .collect();

    let client = GitHubClient::new(&credential, &state.config.api_base_url)?;
    let options = DashboardOptions::from_config(&state.config);
    let view: DashboardView =
        build_dashboard(&client, &options, &selected, chrono::Utc::now()).await;
    Ok(Json(view).into_response())
}
