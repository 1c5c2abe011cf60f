// src/db/stats_repo.rs

use sqlx::PgPool;

use crate::{common::error::AppError, models::stats::StatsSources};

#[derive(Clone)]
pub struct StatsRepository {
    pool: PgPool,
}

impl StatsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Coleta todos os agregados dentro de uma transação, para um
    /// snapshot consistente dos números.
    pub async fn collect(&self) -> Result<StatsSources, AppError> {
        let mut tx = self.pool.begin().await?;

        // A. Totais de equipes e de referências de liderança preenchidas
        let (total_teams, teams_with_lead, teams_with_head, teams_with_manager) =
            sqlx::query_as::<_, (i64, i64, i64, i64)>(
                r#"
                SELECT COUNT(*),
                       COUNT(*) FILTER (WHERE lead_id IS NOT NULL),
                       COUNT(*) FILTER (WHERE head_id IS NOT NULL),
                       COUNT(*) FILTER (WHERE manager_id IS NOT NULL)
                FROM teams
                "#,
            )
            .fetch_one(&mut *tx)
            .await?;

        // B. Contagem de membros por equipe (só equipes com >= 1 membro
        //    aparecem no GROUP BY)
        let member_counts = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM user_teams GROUP BY team_id",
        )
        .fetch_all(&mut *tx)
        .await?;

        // C. Projetos (COUNT DISTINCT ignora team_id nulo)
        let (total_projects, teams_with_projects) = sqlx::query_as::<_, (i64, i64)>(
            "SELECT COUNT(*), COUNT(DISTINCT team_id) FROM projects",
        )
        .fetch_one(&mut *tx)
        .await?;

        // D. Candidatos
        let (total_candidates, teams_with_candidates) = sqlx::query_as::<_, (i64, i64)>(
            "SELECT COUNT(*), COUNT(DISTINCT team_id) FROM candidates",
        )
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(StatsSources {
            total_teams,
            teams_with_lead,
            teams_with_head,
            teams_with_manager,
            member_counts,
            teams_with_projects,
            teams_with_candidates,
            total_projects,
            total_candidates,
        })
    }
}
