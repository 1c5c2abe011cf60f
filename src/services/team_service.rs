// src/services/team_service.rs

use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    common::{error::AppError, messages},
    db::{MembershipRepository, StatsRepository, TeamRepository, UserRepository},
    models::{
        stats::TeamStats,
        team::{ListTeamsQuery, Pagination, Team, TeamListPage, TeamWithRelations},
    },
};

#[derive(Clone)]
pub struct TeamService {
    team_repo: TeamRepository,
    membership_repo: MembershipRepository,
    user_repo: UserRepository,
    stats_repo: StatsRepository,
}

impl TeamService {
    pub fn new(
        team_repo: TeamRepository,
        membership_repo: MembershipRepository,
        user_repo: UserRepository,
        stats_repo: StatsRepository,
    ) -> Self {
        Self {
            team_repo,
            membership_repo,
            user_repo,
            stats_repo,
        }
    }

    /// Valida uma referência de liderança: se veio preenchida,
    /// o usuário apontado precisa existir.
    async fn ensure_user_exists(&self, user_id: Uuid) -> Result<(), AppError> {
        if !self.user_repo.exists(user_id).await? {
            return Err(AppError::NotFound(messages::user_not_found(user_id)));
        }
        Ok(())
    }

    pub async fn create(
        &self,
        name: &str,
        lead_id: Option<Uuid>,
        head_id: Option<Uuid>,
        manager_id: Option<Uuid>,
        actor_id: Uuid,
    ) -> Result<TeamWithRelations, AppError> {
        // 1. Nome é globalmente único
        if self.team_repo.find_by_name(name).await?.is_some() {
            return Err(AppError::Conflict(messages::team_name_exists(name)));
        }

        // 2. Cada referência de liderança presente precisa apontar
        //    para um usuário existente
        for user_id in [lead_id, head_id, manager_id].into_iter().flatten() {
            self.ensure_user_exists(user_id).await?;
        }

        // 3. Insere; a UNIQUE no banco cobre a janela entre 1 e cá
        let team = self
            .team_repo
            .insert(name, lead_id, head_id, manager_id)
            .await?;

        tracing::info!(team_id = %team.id, actor = %actor_id, "equipe criada");

        // 4. Equipe recém-criada sai com as coleções vazias
        Ok(TeamWithRelations {
            team,
            members: vec![],
            projects: vec![],
            candidates: vec![],
        })
    }

    pub async fn find_all(&self, query: &ListTeamsQuery) -> Result<TeamListPage, AppError> {
        let (teams, total) = self.team_repo.list(query).await?;
        let teams = self.attach_relations(teams).await?;

        Ok(TeamListPage {
            teams,
            pagination: Pagination::new(query.page, query.limit, total),
        })
    }

    pub async fn find_one(&self, id: Uuid) -> Result<TeamWithRelations, AppError> {
        let team = self
            .team_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(messages::team_not_found(id)))?;

        let mut teams = self.attach_relations(vec![team]).await?;
        Ok(teams.remove(0))
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        lead_id: Option<Option<Uuid>>,
        head_id: Option<Option<Uuid>>,
        manager_id: Option<Option<Uuid>>,
        actor_id: Uuid,
    ) -> Result<TeamWithRelations, AppError> {
        let current = self
            .team_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(messages::team_not_found(id)))?;

        // Renomear re-checa a unicidade, mas só se o nome mudou de fato.
        if let Some(new_name) = name {
            if new_name != current.name && self.team_repo.find_by_name(new_name).await?.is_some() {
                return Err(AppError::Conflict(messages::team_name_exists(new_name)));
            }
        }

        // Campo ausente = "não mexe"; null explícito = "limpa".
        let final_lead = lead_id.unwrap_or(current.lead_id);
        let final_head = head_id.unwrap_or(current.head_id);
        let final_manager = manager_id.unwrap_or(current.manager_id);

        for user_id in [lead_id, head_id, manager_id].into_iter().flatten().flatten() {
            self.ensure_user_exists(user_id).await?;
        }

        let updated = self
            .team_repo
            .update(
                id,
                name.unwrap_or(&current.name),
                final_lead,
                final_head,
                final_manager,
            )
            .await?;

        tracing::info!(team_id = %id, actor = %actor_id, "equipe atualizada");

        let mut teams = self.attach_relations(vec![updated]).await?;
        Ok(teams.remove(0))
    }

    pub async fn remove(&self, id: Uuid, actor_id: Uuid) -> Result<Uuid, AppError> {
        if self.team_repo.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound(messages::team_not_found(id)));
        }

        // A checagem de projetos vem antes da de candidatos.
        let project_count = self.team_repo.count_projects(id).await?;
        if project_count > 0 {
            return Err(AppError::Conflict(messages::cannot_delete_with_projects(
                id,
                project_count,
            )));
        }

        let candidate_count = self.team_repo.count_candidates(id).await?;
        if candidate_count > 0 {
            return Err(AppError::Conflict(messages::cannot_delete_with_candidates(
                id,
                candidate_count,
            )));
        }

        self.team_repo.delete(id).await?;
        tracing::info!(team_id = %id, actor = %actor_id, "equipe removida");

        Ok(id)
    }

    pub async fn get_team_stats(&self) -> Result<TeamStats, AppError> {
        let sources = self.stats_repo.collect().await?;
        Ok(TeamStats::from_sources(sources))
    }

    /// Junta membros, projetos e candidatos às equipes, na ordem recebida.
    async fn attach_relations(
        &self,
        teams: Vec<Team>,
    ) -> Result<Vec<TeamWithRelations>, AppError> {
        let ids: Vec<Uuid> = teams.iter().map(|t| t.id).collect();

        let mut members = if ids.is_empty() {
            HashMap::new()
        } else {
            self.membership_repo.members_by_team(&ids).await?
        };
        let mut projects = if ids.is_empty() {
            HashMap::new()
        } else {
            self.team_repo.projects_by_team(&ids).await?
        };
        let mut candidates = if ids.is_empty() {
            HashMap::new()
        } else {
            self.team_repo.candidates_by_team(&ids).await?
        };

        Ok(teams
            .into_iter()
            .map(|team| {
                let id = team.id;
                TeamWithRelations {
                    team,
                    members: members.remove(&id).unwrap_or_default(),
                    projects: projects.remove(&id).unwrap_or_default(),
                    candidates: candidates.remove(&id).unwrap_or_default(),
                }
            })
            .collect())
    }
}
