use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::json;

use super::{
    error_response, rejection_response, AppState, HttpResponse, DASHBOARD_PAGE, INDEX_PAGE,
};
use crate::models::users;
use crate::services::users::UserRequest;

pub async fn sign_up(
    State(state): State<AppState>,
    payload: Result<Json<users::NewUser>, JsonRejection>,
) -> HttpResponse {
    let Json(new_user) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };

    let result = state
        .request(|response| UserRequest::SignUp { new_user, response })
        .await;

    match result {
        Ok(user) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Account created.",
                "user_id": user.id,
                "redirect": DASHBOARD_PAGE
            })),
        ),
        Err(e) => error_response(e),
    }
}

pub async fn log_in(
    State(state): State<AppState>,
    payload: Result<Json<users::Credentials>, JsonRejection>,
) -> HttpResponse {
    let Json(credentials) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return rejection_response(rejection),
    };

    let result = state
        .request(|response| UserRequest::LogIn {
            credentials,
            response,
        })
        .await;

    match result {
        Ok(user) => (
            StatusCode::OK,
            Json(json!({
                "message": "Logged in.",
                "user_id": user.id,
                "redirect": DASHBOARD_PAGE
            })),
        ),
        Err(e) => error_response(e),
    }
}

pub async fn log_out(State(state): State<AppState>) -> HttpResponse {
    match state.request(|response| UserRequest::LogOut { response }).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({"message": "Logged out.", "redirect": INDEX_PAGE})),
        ),
        Err(e) => error_response(e),
    }
}

pub async fn dashboard(State(state): State<AppState>) -> HttpResponse {
    match state
        .request(|response| UserRequest::GetDashboard { response })
        .await
    {
        Ok(dashboard) => (StatusCode::OK, Json(json!(dashboard))),
        Err(e) => error_response(e),
    }
}

pub async fn calendar(State(state): State<AppState>) -> HttpResponse {
    match state
        .request(|response| UserRequest::GetCalendar { response })
        .await
    {
        Ok(calendar) => (StatusCode::OK, Json(json!(calendar))),
        Err(e) => error_response(e),
    }
}

pub async fn check_in(State(state): State<AppState>) -> HttpResponse {
    match state.request(|response| UserRequest::CheckIn { response }).await {
        Ok(user) => (
            StatusCode::OK,
            Json(json!({
                "message": "Check-in successful. See calendar updated.",
                "checked_dates": user.checked_dates
            })),
        ),
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;

    use super::*;
    use crate::clock::FixedClock;
    use crate::services::spawn_user_service;
    use crate::storage::{KeyValueStore, MemoryStore};

    fn state() -> AppState {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let clock = Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));

        AppState::new(spawn_user_service(store, clock))
    }

    fn ada() -> users::NewUser {
        users::NewUser {
            name: "Ada".to_string(),
            email: "ada@x.com".to_string(),
            password: "pw1".to_string(),
        }
    }

    #[tokio::test]
    async fn sign_up_then_dashboard() {
        let state = state();

        let (status, Json(body)) = sign_up(State(state.clone()), Ok(Json(ada()))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["redirect"], DASHBOARD_PAGE);

        let (status, Json(body)) = dashboard(State(state.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Ada");
        assert_eq!(body["balance_display"], "₦30,000");
        assert_eq!(body["check_in_status"], "You can check-in once every 24 hours.");

        let (status, _) = sign_up(State(state), Ok(Json(ada()))).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn check_in_twice() {
        let state = state();
        sign_up(State(state.clone()), Ok(Json(ada()))).await;

        let (status, Json(body)) = check_in(State(state.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["checked_dates"], json!(["2024-01-01"]));

        let (status, Json(body)) = check_in(State(state.clone())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(
            body["message"],
            "You have already checked in today. Come back tomorrow."
        );

        let (_, Json(body)) = calendar(State(state)).await;
        assert_eq!(body["days"][0]["checked"], true);
        assert_eq!(body["days"][0]["today"], true);
    }

    #[tokio::test]
    async fn logged_out_pages_redirect_to_index() {
        let state = state();
        sign_up(State(state.clone()), Ok(Json(ada()))).await;

        let (status, Json(body)) = log_out(State(state.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["redirect"], INDEX_PAGE);

        let (status, Json(body)) = dashboard(State(state.clone())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["redirect"], INDEX_PAGE);

        let wrong = users::Credentials {
            email: "ada@x.com".to_string(),
            password: "nope".to_string(),
        };
        let (status, Json(body)) = log_in(State(state.clone()), Ok(Json(wrong))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Incorrect login credentials.");

        let right = users::Credentials {
            email: "ada@x.com".to_string(),
            password: "pw1".to_string(),
        };
        let (status, _) = log_in(State(state.clone()), Ok(Json(right))).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = dashboard(State(state)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn empty_login_form() {
        let (status, Json(body)) =
            log_in(State(state()), Ok(Json(users::Credentials::default()))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Please fill in all fields.");
    }
}
