// src/services/transfer_service.rs

use anyhow::anyhow;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{error::AppError, messages},
    db::{MembershipRepository, OutboxRepository, TeamRepository, TransferRepository},
    models::{
        outbox::MEMBER_TRANSFER_REQUESTED,
        transfer::{ListTransfersQuery, TransferAction, TransferRequestPage, TransferRequestView},
    },
};

// O fluxo de transferência: pending -> approved | rejected (terminais).
// A aprovação move o vínculo de equipe na MESMA transação que muda o
// status; ou tudo entra, ou nada entra.
#[derive(Clone)]
pub struct TransferService {
    transfer_repo: TransferRepository,
    membership_repo: MembershipRepository,
    team_repo: TeamRepository,
    outbox_repo: OutboxRepository,
    pool: PgPool,
}

impl TransferService {
    pub fn new(
        transfer_repo: TransferRepository,
        membership_repo: MembershipRepository,
        team_repo: TeamRepository,
        outbox_repo: OutboxRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            transfer_repo,
            membership_repo,
            team_repo,
            outbox_repo,
            pool,
        }
    }

    pub async fn create_transfer_request(
        &self,
        from_team_id: Uuid,
        user_id: Uuid,
        to_team_id: Uuid,
        reason: Option<&str>,
        requested_by: Uuid,
    ) -> Result<TransferRequestView, AppError> {
        // 1. O usuário precisa ser membro atual da equipe de origem
        if !self.membership_repo.exists(user_id, from_team_id).await? {
            return Err(AppError::NotFound(messages::not_member_of_source_team(
                user_id,
            )));
        }

        // 2. A equipe de destino precisa existir
        if self.team_repo.find_by_id(to_team_id).await?.is_none() {
            return Err(AppError::NotFound(messages::target_team_not_found()));
        }

        // 3. E o usuário ainda não pode ser membro dela
        if self.membership_repo.exists(user_id, to_team_id).await? {
            return Err(AppError::Conflict(messages::already_member_of_target_team(
                user_id,
            )));
        }

        // 4. No máximo uma solicitação pendente por usuário
        if self.transfer_repo.has_pending_for_user(user_id).await? {
            return Err(AppError::Conflict(messages::pending_transfer_exists(
                user_id,
            )));
        }

        // A solicitação e o evento de notificação entram juntos ou não entram.
        let mut tx = self.pool.begin().await?;

        let request = self
            .transfer_repo
            .insert(
                &mut *tx,
                user_id,
                from_team_id,
                to_team_id,
                requested_by,
                reason,
            )
            .await?;

        self.outbox_repo
            .append(
                &mut *tx,
                MEMBER_TRANSFER_REQUESTED,
                &json!({
                    "transferId": request.id,
                    "userId": user_id,
                    "fromTeamId": from_team_id,
                    "toTeamId": to_team_id,
                }),
            )
            .await?;

        tx.commit().await?;

        tracing::info!(
            request_id = %request.id,
            %user_id,
            %from_team_id,
            %to_team_id,
            "solicitação de transferência criada"
        );

        self.transfer_repo
            .find_view(request.id)
            .await?
            .ok_or_else(|| {
                AppError::InternalServerError(anyhow!(
                    "solicitação {} sumiu logo após o insert",
                    request.id
                ))
            })
    }

    pub async fn get_transfer_requests(
        &self,
        team_id: Uuid,
        query: &ListTransfersQuery,
        caller_id: Uuid,
    ) -> Result<TransferRequestPage, AppError> {
        // Só membros da equipe enxergam a fila dela. NotFound de propósito:
        // não vaza a existência das solicitações para quem é de fora.
        if !self.membership_repo.exists(caller_id, team_id).await? {
            return Err(AppError::NotFound(messages::transfer_access_denied()));
        }

        let (views, total) = self
            .transfer_repo
            .list_for_team(team_id, query.status, query.limit, query.offset)
            .await?;

        Ok(TransferRequestPage {
            total,
            count: views.len() as i64,
            offset: query.offset,
            transfer_requests: views,
        })
    }

    pub async fn process_transfer_request(
        &self,
        team_id: Uuid,
        request_id: Uuid,
        action: TransferAction,
        reason: Option<&str>,
        approver_id: Uuid,
    ) -> Result<TransferRequestView, AppError> {
        let mut tx = self.pool.begin().await?;

        // Um único UPDATE decide tudo: existe, ainda está pendente e a
        // equipe do chamador é parte. Zero linhas = 404 sem vazar o motivo.
        let claimed = self
            .transfer_repo
            .claim_pending(
                &mut *tx,
                request_id,
                team_id,
                action.resulting_status(),
                approver_id,
            )
            .await?
            .ok_or_else(|| AppError::NotFound(messages::transfer_not_processable()))?;

        if action == TransferAction::Approve {
            // Movimentação atômica do vínculo: sai da origem, entra no
            // destino. Qualquer falha desfaz também a mudança de status.
            self.membership_repo
                .delete(&mut *tx, claimed.user_id, claimed.from_team_id)
                .await?;
            self.membership_repo
                .insert(&mut *tx, claimed.user_id, claimed.to_team_id)
                .await?;
        }

        tx.commit().await?;

        if let Some(note) = reason {
            // O contrato fixa que rejeição só muda status/aprovador/data;
            // o motivo da decisão vai para o log, não para a linha.
            tracing::info!(request_id = %request_id, approver = %approver_id, note, "motivo da decisão");
        }

        tracing::info!(
            request_id = %request_id,
            approver = %approver_id,
            status = ?claimed.status,
            "solicitação de transferência processada"
        );

        self.transfer_repo
            .find_view(request_id)
            .await?
            .ok_or_else(|| {
                AppError::InternalServerError(anyhow!(
                    "solicitação {} sumiu após o processamento",
                    request_id
                ))
            })
    }

    pub async fn get_user_transfer_history(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<TransferRequestView>, AppError> {
        self.transfer_repo.history_for_user(user_id).await
    }
}
