// src/db/membership_repo.rs

use std::collections::HashMap;

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{error::AppError, messages},
    models::membership::{TeamMember, UserTeam},
};

const MEMBER_SELECT: &str = r#"
    SELECT ut.team_id,
           u.id, u.name, u.email, u.phone, u.date_of_birth, u.created_at,
           ut.created_at AS joined_at
    FROM user_teams ut
    JOIN users u ON u.id = ut.user_id
"#;

// Linha do JOIN com a equipe de origem; usada para agrupar por equipe.
#[derive(sqlx::FromRow)]
struct TeamMemberRow {
    team_id: Uuid,
    #[sqlx(flatten)]
    member: TeamMember,
}

#[derive(Clone)]
pub struct MembershipRepository {
    pool: PgPool,
}

impl MembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Verifica se o usuário é membro atual da equipe.
    pub async fn exists(&self, user_id: Uuid, team_id: Uuid) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM user_teams
                WHERE user_id = $1 AND team_id = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(team_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Cria o vínculo. Aceita um executor (pool ou transação) para poder
    /// participar da movimentação atômica de uma transferência aprovada.
    pub async fn insert<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        team_id: Uuid,
    ) -> Result<UserTeam, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, UserTeam>(
            r#"
            INSERT INTO user_teams (user_id, team_id)
            VALUES ($1, $2)
            RETURNING user_id, team_id, created_at
            "#,
        )
        .bind(user_id)
        .bind(team_id)
        .fetch_one(executor)
        .await
        // A PK composta garante no máximo um vínculo por par.
        .map_err(|e| AppError::conflict_on_unique(e, messages::already_assigned(user_id, team_id)))
    }

    /// Remove o vínculo pela chave composta; devolve quantas linhas saíram.
    pub async fn delete<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        team_id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM user_teams WHERE user_id = $1 AND team_id = $2")
            .bind(user_id)
            .bind(team_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    /// Membros de uma equipe com os campos de exibição do usuário,
    /// ordenados por nome.
    pub async fn list_members(&self, team_id: Uuid) -> Result<Vec<TeamMember>, AppError> {
        let rows = sqlx::query_as::<_, TeamMemberRow>(&format!(
            "{MEMBER_SELECT} WHERE ut.team_id = $1 ORDER BY u.name ASC"
        ))
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.member).collect())
    }

    /// Membros das equipes da página, agrupados por equipe.
    pub async fn members_by_team(
        &self,
        team_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<TeamMember>>, AppError> {
        let rows = sqlx::query_as::<_, TeamMemberRow>(&format!(
            "{MEMBER_SELECT} WHERE ut.team_id = ANY($1) ORDER BY u.name ASC"
        ))
        .bind(team_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<TeamMember>> = HashMap::new();
        for row in rows {
            grouped.entry(row.team_id).or_default().push(row.member);
        }
        Ok(grouped)
    }
}
