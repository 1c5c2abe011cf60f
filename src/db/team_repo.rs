// src/db/team_repo.rs

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{error::AppError, messages},
    models::{
        candidate::Candidate,
        project::Project,
        team::{ListTeamsQuery, Team},
    },
};

const TEAM_COLUMNS: &str = "id, name, lead_id, head_id, manager_id, created_at, updated_at";

// Filtros opcionais resolvidos no próprio SQL ($n IS NULL OR ...);
// só a ordenação é interpolada, e ela vem de uma enumeração fechada.
const LIST_FILTER: &str = r#"
    WHERE ($1::text IS NULL OR t.name ILIKE '%' || $1 || '%')
      AND ($2::uuid IS NULL OR t.lead_id = $2)
      AND ($3::uuid IS NULL OR t.head_id = $3)
      AND ($4::uuid IS NULL OR t.manager_id = $4)
      AND ($5::uuid IS NULL OR EXISTS (
            SELECT 1 FROM user_teams ut
            WHERE ut.team_id = t.id AND ut.user_id = $5
      ))
"#;

#[derive(Clone)]
pub struct TeamRepository {
    pool: PgPool,
}

impl TeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Team>, AppError> {
        let team = sqlx::query_as::<_, Team>(&format!(
            "SELECT {TEAM_COLUMNS} FROM teams WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(team)
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Team>, AppError> {
        let team = sqlx::query_as::<_, Team>(&format!(
            "SELECT {TEAM_COLUMNS} FROM teams WHERE name = $1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(team)
    }

    pub async fn insert(
        &self,
        name: &str,
        lead_id: Option<Uuid>,
        head_id: Option<Uuid>,
        manager_id: Option<Uuid>,
    ) -> Result<Team, AppError> {
        sqlx::query_as::<_, Team>(&format!(
            r#"
            INSERT INTO teams (name, lead_id, head_id, manager_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {TEAM_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(lead_id)
        .bind(head_id)
        .bind(manager_id)
        .fetch_one(&self.pool)
        .await
        // A UNIQUE em teams.name fecha a janela entre checagem e insert.
        .map_err(|e| AppError::conflict_on_unique(e, messages::team_name_exists(name)))
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: &str,
        lead_id: Option<Uuid>,
        head_id: Option<Uuid>,
        manager_id: Option<Uuid>,
    ) -> Result<Team, AppError> {
        sqlx::query_as::<_, Team>(&format!(
            r#"
            UPDATE teams
            SET name = $2, lead_id = $3, head_id = $4, manager_id = $5, updated_at = now()
            WHERE id = $1
            RETURNING {TEAM_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(name)
        .bind(lead_id)
        .bind(head_id)
        .bind(manager_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::conflict_on_unique(e, messages::team_name_exists(name)))
    }

    // Os vínculos em user_teams caem junto via ON DELETE CASCADE.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Página de equipes + total de linhas que casam com os filtros.
    pub async fn list(&self, query: &ListTeamsQuery) -> Result<(Vec<Team>, i64), AppError> {
        let total = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM teams t {LIST_FILTER}"
        ))
        .bind(query.search.as_deref())
        .bind(query.lead_id)
        .bind(query.head_id)
        .bind(query.manager_id)
        .bind(query.user_id)
        .fetch_one(&self.pool)
        .await?;

        let offset = (query.page - 1) * query.limit;
        let sql = format!(
            r#"
            SELECT t.id, t.name, t.lead_id, t.head_id, t.manager_id, t.created_at, t.updated_at
            FROM teams t
            {LIST_FILTER}
            ORDER BY t.{} {}
            LIMIT $6 OFFSET $7
            "#,
            query.sort_by.column(),
            query.sort_order.keyword(),
        );

        let teams = sqlx::query_as::<_, Team>(&sql)
            .bind(query.search.as_deref())
            .bind(query.lead_id)
            .bind(query.head_id)
            .bind(query.manager_id)
            .bind(query.user_id)
            .bind(query.limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((teams, total))
    }

    pub async fn count_projects(&self, team_id: Uuid) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM projects WHERE team_id = $1",
        )
        .bind(team_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    pub async fn count_candidates(&self, team_id: Uuid) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM candidates WHERE team_id = $1",
        )
        .bind(team_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    /// Projetos das equipes da página, agrupados por equipe.
    pub async fn projects_by_team(
        &self,
        team_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Project>>, AppError> {
        let rows = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, team_id, created_at, updated_at
            FROM projects
            WHERE team_id = ANY($1)
            ORDER BY name ASC
            "#,
        )
        .bind(team_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<Project>> = HashMap::new();
        for project in rows {
            if let Some(team_id) = project.team_id {
                grouped.entry(team_id).or_default().push(project);
            }
        }
        Ok(grouped)
    }

    pub async fn candidates_by_team(
        &self,
        team_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Candidate>>, AppError> {
        let rows = sqlx::query_as::<_, Candidate>(
            r#"
            SELECT id, full_name, email, phone, team_id, created_at, updated_at
            FROM candidates
            WHERE team_id = ANY($1)
            ORDER BY full_name ASC
            "#,
        )
        .bind(team_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<Candidate>> = HashMap::new();
        for candidate in rows {
            if let Some(team_id) = candidate.team_id {
                grouped.entry(team_id).or_default().push(candidate);
            }
        }
        Ok(grouped)
    }
}
