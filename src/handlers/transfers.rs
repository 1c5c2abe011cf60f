// src/handlers/transfers.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::transfer::{ListTransfersQuery, TransferAction},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransferPayload {
    pub user_id: Uuid,
    pub to_team_id: Uuid,
    #[validate(length(max = 500, message = "Reason must be at most 500 characters"))]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProcessTransferPayload {
    pub action: TransferAction,
    #[validate(length(max = 500, message = "Reason must be at most 500 characters"))]
    pub reason: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/teams/{id}/transfer-requests",
    params(("id" = Uuid, Path, description = "Equipe de origem")),
    request_body = CreateTransferPayload,
    responses(
        (status = 201, description = "Solicitação pendente criada"),
        (status = 404, description = "Usuário fora da equipe de origem ou destino inexistente"),
        (status = 409, description = "Já membro do destino ou já existe pendência"),
    ),
    tag = "transfers"
)]
pub async fn create_transfer_request(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(from_team_id): Path<Uuid>,
    Json(payload): Json<CreateTransferPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let view = app_state
        .transfer_service
        .create_transfer_request(
            from_team_id,
            payload.user_id,
            payload.to_team_id,
            payload.reason.as_deref(),
            user.0.id,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(
            view,
            "Transfer request created successfully",
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/teams/{id}/transfer-requests",
    params(("id" = Uuid, Path, description = "Equipe (origem ou destino)"), ListTransfersQuery),
    responses(
        (status = 200, description = "Solicitações em que a equipe é parte, mais recentes primeiro"),
        (status = 404, description = "Chamador não é membro da equipe"),
    ),
    tag = "transfers"
)]
pub async fn list_transfer_requests(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(team_id): Path<Uuid>,
    Query(query): Query<ListTransfersQuery>,
) -> Result<impl IntoResponse, AppError> {
    query.validate()?;

    let page = app_state
        .transfer_service
        .get_transfer_requests(team_id, &query, user.0.id)
        .await?;

    Ok(Json(ApiResponse::ok(
        page,
        "Transfer requests retrieved successfully",
    )))
}

#[utoipa::path(
    post,
    path = "/api/teams/{id}/transfer-requests/{request_id}/process",
    params(
        ("id" = Uuid, Path, description = "Equipe do aprovador (origem ou destino)"),
        ("request_id" = Uuid, Path, description = "Id da solicitação"),
    ),
    request_body = ProcessTransferPayload,
    responses(
        (status = 200, description = "Solicitação aprovada ou rejeitada"),
        (status = 404, description = "Inexistente, já processada ou equipe não é parte"),
    ),
    tag = "transfers"
)]
pub async fn process_transfer_request(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path((team_id, request_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<ProcessTransferPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let view = app_state
        .transfer_service
        .process_transfer_request(
            team_id,
            request_id,
            payload.action,
            payload.reason.as_deref(),
            user.0.id,
        )
        .await?;

    let message = match payload.action {
        TransferAction::Approve => "Transfer request approved successfully",
        TransferAction::Reject => "Transfer request rejected successfully",
    };

    Ok(Json(ApiResponse::ok(view, message)))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}/transfer-history",
    params(("id" = Uuid, Path, description = "Usuário alvo")),
    responses((status = 200, description = "Histórico completo, mais recente primeiro")),
    tag = "transfers"
)]
pub async fn user_transfer_history(
    State(app_state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let history = app_state
        .transfer_service
        .get_user_transfer_history(user_id)
        .await?;

    Ok(Json(ApiResponse::ok(
        history,
        "Transfer history retrieved successfully",
    )))
}
