// src/handlers/teams.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::team::ListTeamsQuery,
};

// ---
// Payloads
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamPayload {
    #[validate(length(min = 2, max = 100, message = "Team name must be between 2 and 100 characters"))]
    pub name: String,
    pub lead_id: Option<Uuid>,
    pub head_id: Option<Uuid>,
    pub manager_id: Option<Uuid>,
}

// Distingue "campo ausente" (não mexe) de "null explícito" (limpa a
// referência): o campo só vira Some(...) se apareceu no JSON.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamPayload {
    #[validate(length(min = 2, max = 100, message = "Team name must be between 2 and 100 characters"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub lead_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub head_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub manager_id: Option<Option<Uuid>>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeletedTeam {
    pub id: Uuid,
}

// ---
// Handlers
// ---
#[utoipa::path(
    post,
    path = "/api/teams",
    request_body = CreateTeamPayload,
    responses(
        (status = 201, description = "Equipe criada"),
        (status = 404, description = "Usuário de liderança referenciado não existe"),
        (status = 409, description = "Já existe equipe com esse nome"),
    ),
    tag = "teams"
)]
pub async fn create_team(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateTeamPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let team = app_state
        .team_service
        .create(
            &payload.name,
            payload.lead_id,
            payload.head_id,
            payload.manager_id,
            user.0.id,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(team, "Team created successfully")),
    ))
}

#[utoipa::path(
    get,
    path = "/api/teams",
    params(ListTeamsQuery),
    responses((status = 200, description = "Página de equipes com filtros e ordenação")),
    tag = "teams"
)]
pub async fn list_teams(
    State(app_state): State<AppState>,
    Query(query): Query<ListTeamsQuery>,
) -> Result<impl IntoResponse, AppError> {
    query.validate()?;

    let page = app_state.team_service.find_all(&query).await?;

    Ok(Json(ApiResponse::ok(page, "Teams retrieved successfully")))
}

#[utoipa::path(
    get,
    path = "/api/teams/stats",
    responses((status = 200, description = "Estatísticas agregadas das equipes")),
    tag = "teams"
)]
pub async fn team_stats(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let stats = app_state.team_service.get_team_stats().await?;

    Ok(Json(ApiResponse::ok(
        stats,
        "Team statistics retrieved successfully",
    )))
}

#[utoipa::path(
    get,
    path = "/api/teams/{id}",
    params(("id" = Uuid, Path, description = "Id da equipe")),
    responses(
        (status = 200, description = "Equipe com membros, projetos e candidatos"),
        (status = 404, description = "Equipe não encontrada"),
    ),
    tag = "teams"
)]
pub async fn get_team(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let team = app_state.team_service.find_one(id).await?;

    Ok(Json(ApiResponse::ok(team, "Team retrieved successfully")))
}

#[utoipa::path(
    patch,
    path = "/api/teams/{id}",
    params(("id" = Uuid, Path, description = "Id da equipe")),
    request_body = UpdateTeamPayload,
    responses(
        (status = 200, description = "Equipe atualizada"),
        (status = 404, description = "Equipe ou usuário referenciado não existe"),
        (status = 409, description = "Novo nome colide com outra equipe"),
    ),
    tag = "teams"
)]
pub async fn update_team(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateTeamPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let team = app_state
        .team_service
        .update(
            id,
            payload.name.as_deref(),
            payload.lead_id,
            payload.head_id,
            payload.manager_id,
            user.0.id,
        )
        .await?;

    Ok(Json(ApiResponse::ok(team, "Team updated successfully")))
}

#[utoipa::path(
    delete,
    path = "/api/teams/{id}",
    params(("id" = Uuid, Path, description = "Id da equipe")),
    responses(
        (status = 200, description = "Equipe removida; vínculos caem em cascata"),
        (status = 404, description = "Equipe não encontrada"),
        (status = 409, description = "Equipe ainda tem projetos ou candidatos"),
    ),
    tag = "teams"
)]
pub async fn delete_team(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let id = app_state.team_service.remove(id, user.0.id).await?;

    Ok(Json(ApiResponse::ok(
        DeletedTeam { id },
        "Team deleted successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_payload_enforces_name_length() {
        let short: CreateTeamPayload =
            serde_json::from_str(r#"{"name": "A"}"#).unwrap();
        assert!(short.validate().is_err());

        let ok: CreateTeamPayload =
            serde_json::from_str(r#"{"name": "Alpha"}"#).unwrap();
        assert!(ok.validate().is_ok());
        assert!(ok.lead_id.is_none());
    }

    #[test]
    fn update_payload_distinguishes_absent_from_null() {
        // Ausente: não mexe na referência.
        let untouched: UpdateTeamPayload = serde_json::from_str(r#"{"name": "Beta"}"#).unwrap();
        assert_eq!(untouched.lead_id, None);

        // null explícito: limpa a referência.
        let cleared: UpdateTeamPayload = serde_json::from_str(r#"{"leadId": null}"#).unwrap();
        assert_eq!(cleared.lead_id, Some(None));

        // Valor: troca a referência.
        let id = Uuid::new_v4();
        let swapped: UpdateTeamPayload =
            serde_json::from_str(&format!(r#"{{"leadId": "{id}"}}"#)).unwrap();
        assert_eq!(swapped.lead_id, Some(Some(id)));
    }
}
