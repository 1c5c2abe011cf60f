//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::identity_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de equipes (diretório + membros + transferências)
    let team_routes = Router::new()
        .route("/"
               , post(handlers::teams::create_team)
               .get(handlers::teams::list_teams)
        )
        .route("/stats"
               , get(handlers::teams::team_stats)
        )
        .route("/{id}"
               , get(handlers::teams::get_team)
               .patch(handlers::teams::update_team)
               .delete(handlers::teams::delete_team)
        )
        .route("/{id}/members"
               , get(handlers::members::list_team_members)
        )
        .route("/{id}/assign-user"
               , post(handlers::members::assign_user)
        )
        .route("/{id}/remove-user/{user_id}"
               , delete(handlers::members::remove_user)
        )
        .route("/{id}/transfer-requests"
               , post(handlers::transfers::create_transfer_request)
               .get(handlers::transfers::list_transfer_requests)
        )
        .route("/{id}/transfer-requests/{request_id}/process"
               , post(handlers::transfers::process_transfer_request)
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            identity_guard,
        ));

    // Histórico de transferências por usuário
    let user_routes = Router::new()
        .route("/{id}/transfer-history"
               , get(handlers::transfers::user_transfer_history)
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            identity_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/teams", team_routes)
        .nest("/api/users", user_routes)
        .merge(
            SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
