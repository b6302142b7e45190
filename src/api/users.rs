//! User registration and token endpoints

use axum::{extract::State, http::StatusCode, routing::post, Router};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::User;
use crate::infrastructure::user::{AccessToken, RegisterUserRequest};

pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/generate_token", post(generate_token))
}

#[derive(Debug, Deserialize)]
pub struct CreateUserBody {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateTokenBody {
    pub email: String,
    pub password: String,
}

/// Public view of a user; never carries the hash
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_string(),
            email: user.email().to_string(),
        }
    }
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateUserBody>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state
        .user_service
        .register(RegisterUserRequest {
            name: body.name,
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// POST /users/generate_token
///
/// Unknown email and wrong password share one response.
pub async fn generate_token(
    State(state): State<AppState>,
    Json(body): Json<GenerateTokenBody>,
) -> Result<Json<AccessToken>, ApiError> {
    state
        .user_service
        .issue_token(&body.email, &body.password)
        .await?
        .map(Json)
        .ok_or_else(|| {
            ApiError::unauthorized("Invalid email or password").with_code("invalid_credentials")
        })
}
