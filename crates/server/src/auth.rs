//! Registration and profile endpoints.

use api_types::user::{RegisterUser, UserRole, UserView};
use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::{Data, ServerError, server::ServerState};
use engine::users;

pub(crate) fn map_role(role: engine::Role) -> UserRole {
    match role {
        engine::Role::Admin => UserRole::Admin,
        engine::Role::Manager => UserRole::Manager,
        engine::Role::Employee => UserRole::Employee,
    }
}

fn map_user(user: engine::User) -> UserView {
    UserView {
        username: user.username,
        full_name: user.full_name,
        email: user.email,
        role: map_role(user.role),
        created_at: user.created_at,
    }
}

/// The only endpoint reachable without credentials.
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<RegisterUser>,
) -> Result<(StatusCode, Json<Data<UserView>>), ServerError> {
    let role = match payload.role {
        UserRole::Admin => engine::Role::Admin,
        UserRole::Manager => engine::Role::Manager,
        UserRole::Employee => engine::Role::Employee,
    };
    let user = state
        .engine
        .register_user(engine::NewUser {
            username: payload.username,
            password: payload.password,
            full_name: payload.full_name,
            email: payload.email,
            role,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(Data::new(map_user(user)))))
}

pub async fn me(
    Extension(user): Extension<users::Model>,
    State(state): State<ServerState>,
) -> Result<Json<Data<UserView>>, ServerError> {
    let profile = state.engine.user_profile(&user.username).await?;
    Ok(Json(Data::new(map_user(profile))))
}
