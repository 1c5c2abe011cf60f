// src/models/team.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    candidate::Candidate, membership::TeamMember, project::Project,
};

// ---
// 1. Team (a linha da tabela)
// ---
// As três referências de liderança são opcionais e apontam para users.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub lead_id: Option<Uuid>,
    pub head_id: Option<Uuid>,
    pub manager_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ---
// 2. TeamWithRelations (a equipe + suas coleções)
// ---
// É o formato que a API devolve: a equipe junto com membros,
// projetos e candidatos associados.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamWithRelations {
    #[serde(flatten)]
    pub team: Team,
    pub members: Vec<TeamMember>,
    pub projects: Vec<Project>,
    pub candidates: Vec<Candidate>,
}

// ---
// 3. Ordenação (enumeração fechada)
// ---
// Qualquer campo fora desta lista é rejeitado na borda, na
// desserialização da query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum TeamSortBy {
    #[default]
    Name,
    CreatedAt,
    UpdatedAt,
}

impl TeamSortBy {
    pub fn column(self) -> &'static str {
        match self {
            TeamSortBy::Name => "name",
            TeamSortBy::CreatedAt => "created_at",
            TeamSortBy::UpdatedAt => "updated_at",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

// ---
// 4. Paginação
// ---
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        // ceil(total / limit) sem ponto flutuante
        let total_pages = if limit > 0 { (total + limit - 1) / limit } else { 0 };
        Self { page, limit, total, total_pages }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamListPage {
    pub teams: Vec<TeamWithRelations>,
    pub pagination: Pagination,
}

// ---
// 5. Query string da listagem
// ---
fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    10
}

#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListTeamsQuery {
    /// Busca por substring no nome, sem diferenciar maiúsculas.
    pub search: Option<String>,
    pub lead_id: Option<Uuid>,
    pub head_id: Option<Uuid>,
    pub manager_id: Option<Uuid>,
    /// Restringe às equipes das quais este usuário é membro atual.
    pub user_id: Option<Uuid>,
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: i64,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: i64,
    #[serde(default)]
    pub sort_by: TeamSortBy,
    #[serde(default)]
    pub sort_order: SortOrder,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_by_rejects_unknown_fields() {
        // Só os três campos da enumeração passam pela borda.
        assert_eq!(
            serde_json::from_str::<TeamSortBy>("\"name\"").unwrap(),
            TeamSortBy::Name
        );
        assert_eq!(
            serde_json::from_str::<TeamSortBy>("\"createdAt\"").unwrap(),
            TeamSortBy::CreatedAt
        );
        assert_eq!(
            serde_json::from_str::<TeamSortBy>("\"updatedAt\"").unwrap(),
            TeamSortBy::UpdatedAt
        );
        assert!(serde_json::from_str::<TeamSortBy>("\"leadId\"").is_err());
        assert!(serde_json::from_str::<TeamSortBy>("\"id; DROP TABLE teams\"").is_err());
    }

    #[test]
    fn sort_mapping_is_total() {
        assert_eq!(TeamSortBy::Name.column(), "name");
        assert_eq!(TeamSortBy::CreatedAt.column(), "created_at");
        assert_eq!(TeamSortBy::UpdatedAt.column(), "updated_at");
        assert_eq!(SortOrder::Asc.keyword(), "ASC");
        assert_eq!(SortOrder::Desc.keyword(), "DESC");
    }

    #[test]
    fn pagination_rounds_up() {
        assert_eq!(Pagination::new(1, 10, 0).total_pages, 0);
        assert_eq!(Pagination::new(1, 10, 1).total_pages, 1);
        assert_eq!(Pagination::new(1, 10, 10).total_pages, 1);
        assert_eq!(Pagination::new(1, 10, 11).total_pages, 2);
        assert_eq!(Pagination::new(3, 25, 101).total_pages, 5);
    }

    #[test]
    fn list_query_defaults() {
        use validator::Validate;

        let query: ListTeamsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 10);
        assert_eq!(query.sort_by, TeamSortBy::Name);
        assert_eq!(query.sort_order, SortOrder::Asc);
        assert!(query.search.is_none());
        assert!(query.validate().is_ok());
    }

    #[test]
    fn list_query_bounds_are_enforced() {
        use validator::Validate;

        let zero_page: ListTeamsQuery = serde_json::from_str(r#"{"page": 0}"#).unwrap();
        assert!(zero_page.validate().is_err());

        let big_limit: ListTeamsQuery = serde_json::from_str(r#"{"limit": 101}"#).unwrap();
        assert!(big_limit.validate().is_err());
    }
}
