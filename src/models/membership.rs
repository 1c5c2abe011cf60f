// src/models/membership.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// ---
// 1. UserTeam (a "ponte" usuário-equipe)
// ---
// Identidade composta (user_id, team_id); no máximo uma linha por par.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserTeam {
    pub user_id: Uuid,
    pub team_id: Uuid,
    pub created_at: DateTime<Utc>,
}

// ---
// 2. TeamMember (vínculo + campos de exibição do usuário)
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub joined_at: DateTime<Utc>,
}
