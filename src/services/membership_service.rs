// src/services/membership_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{error::AppError, messages},
    db::{MembershipRepository, TeamRepository, UserRepository},
    models::membership::TeamMember,
};

#[derive(Clone)]
pub struct MembershipService {
    membership_repo: MembershipRepository,
    team_repo: TeamRepository,
    user_repo: UserRepository,
    pool: PgPool,
}

impl MembershipService {
    pub fn new(
        membership_repo: MembershipRepository,
        team_repo: TeamRepository,
        user_repo: UserRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            membership_repo,
            team_repo,
            user_repo,
            pool,
        }
    }

    pub async fn assign_user(
        &self,
        team_id: Uuid,
        user_id: Uuid,
        actor_id: Uuid,
    ) -> Result<(), AppError> {
        // 1. Equipe existe
        if self.team_repo.find_by_id(team_id).await?.is_none() {
            return Err(AppError::NotFound(messages::team_not_found(team_id)));
        }

        // 2. Usuário existe
        if !self.user_repo.exists(user_id).await? {
            return Err(AppError::NotFound(messages::user_not_found(user_id)));
        }

        // 3. Ainda não é membro
        if self.membership_repo.exists(user_id, team_id).await? {
            return Err(AppError::Conflict(messages::already_assigned(
                user_id, team_id,
            )));
        }

        // 4. Cria o vínculo; a PK composta cobre a corrida entre 3 e cá
        self.membership_repo
            .insert(&self.pool, user_id, team_id)
            .await?;

        tracing::info!(%team_id, %user_id, actor = %actor_id, "usuário vinculado à equipe");
        Ok(())
    }

    pub async fn remove_user(
        &self,
        team_id: Uuid,
        user_id: Uuid,
        actor_id: Uuid,
    ) -> Result<(), AppError> {
        if self.team_repo.find_by_id(team_id).await?.is_none() {
            return Err(AppError::NotFound(messages::team_not_found(team_id)));
        }

        if !self.user_repo.exists(user_id).await? {
            return Err(AppError::NotFound(messages::user_not_found(user_id)));
        }

        let removed = self
            .membership_repo
            .delete(&self.pool, user_id, team_id)
            .await?;

        // Zero linhas = não havia vínculo para remover.
        if removed == 0 {
            return Err(AppError::NotFound(messages::not_assigned(user_id, team_id)));
        }

        tracing::info!(%team_id, %user_id, actor = %actor_id, "usuário desvinculado da equipe");
        Ok(())
    }

    pub async fn get_team_members(&self, team_id: Uuid) -> Result<Vec<TeamMember>, AppError> {
        if self.team_repo.find_by_id(team_id).await?.is_none() {
            return Err(AppError::NotFound(messages::team_not_found(team_id)));
        }

        self.membership_repo.list_members(team_id).await
    }
}
