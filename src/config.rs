// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        MembershipRepository, OutboxRepository, StatsRepository, TeamRepository,
        TransferRepository, UserRepository,
    },
    services::{MembershipService, TeamService, TransferService},
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub user_repo: UserRepository,
    pub team_service: TeamService,
    pub membership_service: MembershipService,
    pub transfer_service: TransferService,
}

impl AppState {
    // Carrega as configurações, conecta no banco e monta os serviços.
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let user_repo = UserRepository::new(db_pool.clone());
        let team_repo = TeamRepository::new(db_pool.clone());
        let membership_repo = MembershipRepository::new(db_pool.clone());
        let transfer_repo = TransferRepository::new(db_pool.clone());
        let outbox_repo = OutboxRepository::new();
        let stats_repo = StatsRepository::new(db_pool.clone());

        let team_service = TeamService::new(
            team_repo.clone(),
            membership_repo.clone(),
            user_repo.clone(),
            stats_repo,
        );
        let membership_service = MembershipService::new(
            membership_repo.clone(),
            team_repo.clone(),
            user_repo.clone(),
            db_pool.clone(),
        );
        let transfer_service = TransferService::new(
            transfer_repo,
            membership_repo,
            team_repo,
            outbox_repo,
            db_pool.clone(),
        );

        Ok(Self {
            db_pool,
            user_repo,
            team_service,
            membership_service,
            transfer_service,
        })
    }
}
