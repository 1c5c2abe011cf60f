// src/handlers/members.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
    middleware::auth::AuthenticatedUser,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignUserPayload {
    pub user_id: Uuid,
}

#[utoipa::path(
    get,
    path = "/api/teams/{id}/members",
    params(("id" = Uuid, Path, description = "Id da equipe")),
    responses(
        (status = 200, description = "Membros com dados de exibição, ordenados por nome"),
        (status = 404, description = "Equipe não encontrada"),
    ),
    tag = "members"
)]
pub async fn list_team_members(
    State(app_state): State<AppState>,
    Path(team_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let members = app_state
        .membership_service
        .get_team_members(team_id)
        .await?;

    Ok(Json(ApiResponse::ok(
        members,
        "Team members retrieved successfully",
    )))
}

#[utoipa::path(
    post,
    path = "/api/teams/{id}/assign-user",
    params(("id" = Uuid, Path, description = "Id da equipe")),
    request_body = AssignUserPayload,
    responses(
        (status = 201, description = "Vínculo criado"),
        (status = 404, description = "Equipe ou usuário não existe"),
        (status = 409, description = "Usuário já é membro da equipe"),
    ),
    tag = "members"
)]
pub async fn assign_user(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(team_id): Path<Uuid>,
    Json(payload): Json<AssignUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .membership_service
        .assign_user(team_id, payload.user_id, user.0.id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::message_only(
            "User assigned to team successfully",
        )),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/teams/{id}/remove-user/{user_id}",
    params(
        ("id" = Uuid, Path, description = "Id da equipe"),
        ("user_id" = Uuid, Path, description = "Id do usuário"),
    ),
    responses(
        (status = 200, description = "Vínculo removido"),
        (status = 404, description = "Equipe, usuário ou vínculo não existe"),
    ),
    tag = "members"
)]
pub async fn remove_user(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path((team_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .membership_service
        .remove_user(team_id, user_id, user.0.id)
        .await?;

    Ok(Json(ApiResponse::message_only(
        "User removed from team successfully",
    )))
}
