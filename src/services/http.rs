//! HTTP front for the dashboard pages.
//!
//! Each route stands in for one button or form of the old browser pages. The
//! adapter only translates: state lives behind the user service channel, and
//! every answer carries the fixed message the page would have shown, plus
//! the page to navigate to where there is one.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::sync::{mpsc, oneshot};
use tower_http::trace::TraceLayer;

use super::{users::UserRequest, ServiceError};
use crate::repositories::AccountError;

mod actions;
mod users;

pub const DASHBOARD_PAGE: &str = "dashboard.html";
pub const INDEX_PAGE: &str = "index.html";

pub type HttpResponse = (StatusCode, Json<Value>);

#[derive(Clone)]
pub struct AppState {
    user_channel: mpsc::Sender<UserRequest>,
}

impl AppState {
    pub fn new(user_channel: mpsc::Sender<UserRequest>) -> Self {
        Self { user_channel }
    }

    /// Sends one request to the user service and waits for its answer.
    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<T, ServiceError>>) -> UserRequest,
    ) -> Result<T, ServiceError> {
        let (response_tx, response_rx) = oneshot::channel();

        self.user_channel
            .send(build(response_tx))
            .await
            .map_err(|e| ServiceError::Communication("User".to_string(), e.to_string()))?;

        response_rx
            .await
            .map_err(|e| ServiceError::Communication("User".to_string(), e.to_string()))?
    }
}

fn error_response(error: ServiceError) -> HttpResponse {
    let account_error = match error {
        ServiceError::Account(e) => e,
        other => {
            log::error!("{}", other);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"message": "Internal server error."})),
            );
        }
    };

    match account_error {
        AccountError::MissingFields => (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Please fill in all fields."})),
        ),
        AccountError::DuplicateEmail => (
            StatusCode::CONFLICT,
            Json(json!({
                "message": "An account with this email already exists. Please log in."
            })),
        ),
        AccountError::InvalidCredentials => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Incorrect login credentials."})),
        ),
        AccountError::AlreadyCheckedIn(_) => (
            StatusCode::CONFLICT,
            Json(json!({
                "message": "You have already checked in today. Come back tomorrow.",
                "status": "Already checked-in today."
            })),
        ),
        AccountError::NotLoggedIn | AccountError::RecordNotFound(_) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"message": "Please log in.", "redirect": INDEX_PAGE})),
        ),
        AccountError::Storage(e) => {
            log::error!("Storage failure: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"message": "Internal server error."})),
            )
        }
    }
}

/// A form body that is not valid JSON counts as an unfilled form.
fn rejection_response(rejection: JsonRejection) -> HttpResponse {
    log::warn!("Rejected request body: {}", rejection.body_text());
    error_response(AccountError::MissingFields.into())
}

pub fn router(user_channel: mpsc::Sender<UserRequest>) -> Router {
    Router::new()
        .route("/signup", post(users::sign_up))
        .route("/login", post(users::log_in))
        .route("/logout", post(users::log_out))
        .route("/dashboard", get(users::dashboard))
        .route("/calendar", get(users::calendar))
        .route("/checkin", post(users::check_in))
        .route("/withdraw", post(actions::withdraw))
        .route("/messages", post(actions::send_message))
        .route("/referral/copy", post(actions::copy_referral))
        .route("/payid", post(actions::buy_pay_id))
        .route("/health", get(|| async { "OK" }))
        .with_state(AppState::new(user_channel))
        .layer(TraceLayer::new_for_http())
}

pub async fn start_http_server(
    listen: &str,
    user_channel: mpsc::Sender<UserRequest>,
) -> Result<(), anyhow::Error> {
    let app = router(user_channel);

    let listener = tokio::net::TcpListener::bind(listen).await?;
    log::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
