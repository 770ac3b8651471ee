//! Buttons that only show a message. None of them moves money.

use axum::{extract::State, http::StatusCode, Json};
use serde_json::json;

use super::{error_response, AppState, HttpResponse};
use crate::services::users::UserRequest;

pub const WITHDRAW_MESSAGE: &str = "Please input Pay-ID";
pub const MESSAGE_SENT: &str = "Message delivered successfully";
pub const REFERRAL_MESSAGE: &str = "purchase Pay-ID before receiving bonus";
pub const REFERRAL_NOTE: &str = "NOTE: Purchase referral code before receiving bonus.";
pub const PAY_ID_MESSAGE: &str = "Please complete bank transfer and try again";

pub async fn withdraw() -> HttpResponse {
    (StatusCode::OK, Json(json!({"message": WITHDRAW_MESSAGE})))
}

pub async fn send_message() -> HttpResponse {
    (StatusCode::OK, Json(json!({"message": MESSAGE_SENT})))
}

pub async fn copy_referral() -> HttpResponse {
    (
        StatusCode::OK,
        Json(json!({"message": REFERRAL_MESSAGE, "note": REFERRAL_NOTE})),
    )
}

/// Marks the logged-in user as holding a Pay-ID; without a session only the
/// message is shown.
pub async fn buy_pay_id(State(state): State<AppState>) -> HttpResponse {
    match state.request(|response| UserRequest::BuyPayId { response }).await {
        Ok(user) => (
            StatusCode::OK,
            Json(json!({
                "message": PAY_ID_MESSAGE,
                "has_pay_id": user.is_some_and(|user| user.has_pay_id())
            })),
        ),
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::clock::SystemClock;
    use crate::models::users::NewUser;
    use crate::services::{http::users::sign_up, spawn_user_service};
    use crate::storage::{KeyValueStore, MemoryStore};

    #[tokio::test]
    async fn stub_messages() {
        let (_, Json(body)) = withdraw().await;
        assert_eq!(body["message"], WITHDRAW_MESSAGE);

        let (_, Json(body)) = send_message().await;
        assert_eq!(body["message"], MESSAGE_SENT);

        let (_, Json(body)) = copy_referral().await;
        assert_eq!(body["message"], REFERRAL_MESSAGE);
        assert_eq!(body["note"], REFERRAL_NOTE);
    }

    #[tokio::test]
    async fn buy_pay_id_flags_logged_in_user() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let state = AppState::new(spawn_user_service(store, Arc::new(SystemClock)));

        let (status, Json(body)) = buy_pay_id(State(state.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], PAY_ID_MESSAGE);
        assert_eq!(body["has_pay_id"], false);

        let new_user = NewUser {
            name: "Ada".to_string(),
            email: "ada@x.com".to_string(),
            password: "pw1".to_string(),
        };
        sign_up(State(state.clone()), Ok(Json(new_user))).await;

        let (_, Json(body)) = buy_pay_id(State(state)).await;
        assert_eq!(body["has_pay_id"], true);
    }
}
