// src/db/transfer_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::{error::AppError, messages},
    models::transfer::{
        TeamTransferRequest, TransferRequestRow, TransferRequestView, TransferStatus,
    },
};

const REQUEST_COLUMNS: &str = r#"id, user_id, from_team_id, to_team_id, requested_by,
    reason, status, approved_by, approved_at, created_at, updated_at"#;

// O SELECT "achatado" com todos os dados de exibição das partes.
const VIEW_SELECT: &str = r#"
    SELECT tr.id,
           tr.user_id, u.name AS user_name, u.email AS user_email,
           tr.from_team_id, ft.name AS from_team_name,
           tr.to_team_id, tt.name AS to_team_name,
           tr.requested_by, ru.name AS requester_name, ru.email AS requester_email,
           tr.approved_by, au.name AS approver_name, au.email AS approver_email,
           tr.reason, tr.status, tr.approved_at, tr.created_at, tr.updated_at
    FROM team_transfer_requests tr
    JOIN users u  ON u.id  = tr.user_id
    JOIN teams ft ON ft.id = tr.from_team_id
    JOIN teams tt ON tt.id = tr.to_team_id
    JOIN users ru ON ru.id = tr.requested_by
    LEFT JOIN users au ON au.id = tr.approved_by
"#;

#[derive(Clone)]
pub struct TransferRepository {
    pool: PgPool,
}

impl TransferRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Existe solicitação pendente para o usuário?
    pub async fn has_pending_for_user(&self, user_id: Uuid) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM team_transfer_requests
                WHERE user_id = $1 AND status = 'pending'
            )
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Insere a solicitação com status pendente. Aceita executor para
    /// compartilhar a transação com o evento de outbox.
    pub async fn insert<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        from_team_id: Uuid,
        to_team_id: Uuid,
        requested_by: Uuid,
        reason: Option<&str>,
    ) -> Result<TeamTransferRequest, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, TeamTransferRequest>(&format!(
            r#"
            INSERT INTO team_transfer_requests (user_id, from_team_id, to_team_id, requested_by, reason)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(from_team_id)
        .bind(to_team_id)
        .bind(requested_by)
        .bind(reason)
        .fetch_one(executor)
        .await
        // O índice parcial (user_id WHERE status='pending') fecha a corrida
        // entre duas criações simultâneas.
        .map_err(|e| AppError::conflict_on_unique(e, messages::pending_transfer_exists(user_id)))
    }

    /// "Reivindica" a solicitação em um único UPDATE: só processa se ainda
    /// está pendente E a equipe do chamador é parte dela. Zero linhas
    /// cobre inexistente, já processada e equipe não envolvida de uma vez.
    pub async fn claim_pending<'e, E>(
        &self,
        executor: E,
        request_id: Uuid,
        team_id: Uuid,
        new_status: TransferStatus,
        approver_id: Uuid,
    ) -> Result<Option<TeamTransferRequest>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let claimed = sqlx::query_as::<_, TeamTransferRequest>(&format!(
            r#"
            UPDATE team_transfer_requests
            SET status = $1, approved_by = $2, approved_at = now(), updated_at = now()
            WHERE id = $3
              AND status = 'pending'
              AND (from_team_id = $4 OR to_team_id = $4)
            RETURNING {REQUEST_COLUMNS}
            "#
        ))
        .bind(new_status)
        .bind(approver_id)
        .bind(request_id)
        .bind(team_id)
        .fetch_optional(executor)
        .await?;

        Ok(claimed)
    }

    pub async fn find_view(&self, id: Uuid) -> Result<Option<TransferRequestView>, AppError> {
        let row = sqlx::query_as::<_, TransferRequestRow>(&format!(
            "{VIEW_SELECT} WHERE tr.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(TransferRequestRow::into_view))
    }

    /// Solicitações em que a equipe é origem OU destino, mais recentes
    /// primeiro, com filtro opcional de status.
    pub async fn list_for_team(
        &self,
        team_id: Uuid,
        status: Option<TransferStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<TransferRequestView>, i64), AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM team_transfer_requests tr
            WHERE (tr.from_team_id = $1 OR tr.to_team_id = $1)
              AND ($2::transfer_status IS NULL OR tr.status = $2)
            "#,
        )
        .bind(team_id)
        .bind(status)
        .fetch_one(&self.pool)
        .await?;

        let rows = sqlx::query_as::<_, TransferRequestRow>(&format!(
            r#"
            {VIEW_SELECT}
            WHERE (tr.from_team_id = $1 OR tr.to_team_id = $1)
              AND ($2::transfer_status IS NULL OR tr.status = $2)
            ORDER BY tr.created_at DESC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(team_id)
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let views = rows.into_iter().map(TransferRequestRow::into_view).collect();
        Ok((views, total))
    }

    /// Histórico completo do usuário, qualquer status, mais recente primeiro.
    pub async fn history_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<TransferRequestView>, AppError> {
        let rows = sqlx::query_as::<_, TransferRequestRow>(&format!(
            "{VIEW_SELECT} WHERE tr.user_id = $1 ORDER BY tr.created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TransferRequestRow::into_view).collect())
    }
}
