// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Teams ---
        handlers::teams::create_team,
        handlers::teams::list_teams,
        handlers::teams::team_stats,
        handlers::teams::get_team,
        handlers::teams::update_team,
        handlers::teams::delete_team,

        // --- Members ---
        handlers::members::list_team_members,
        handlers::members::assign_user,
        handlers::members::remove_user,

        // --- Transfers ---
        handlers::transfers::create_transfer_request,
        handlers::transfers::list_transfer_requests,
        handlers::transfers::process_transfer_request,
        handlers::transfers::user_transfer_history,
    ),
    components(schemas(
        models::team::Team,
        models::team::TeamWithRelations,
        models::team::Pagination,
        models::team::TeamListPage,
        models::team::TeamSortBy,
        models::team::SortOrder,
        models::user::User,
        models::membership::UserTeam,
        models::membership::TeamMember,
        models::project::Project,
        models::candidate::Candidate,
        models::stats::TeamStats,
        models::transfer::TransferStatus,
        models::transfer::TransferAction,
        models::transfer::TeamTransferRequest,
        models::transfer::TransferRequestView,
        models::transfer::TransferRequestPage,
        models::transfer::PartyRef,
        models::transfer::TeamRef,
        handlers::teams::CreateTeamPayload,
        handlers::teams::UpdateTeamPayload,
        handlers::teams::DeletedTeam,
        handlers::members::AssignUserPayload,
        handlers::transfers::CreateTransferPayload,
        handlers::transfers::ProcessTransferPayload,
    )),
    tags(
        (name = "teams", description = "Diretório de equipes"),
        (name = "members", description = "Vínculos usuário-equipe"),
        (name = "transfers", description = "Fluxo de transferência entre equipes"),
    )
)]
pub struct ApiDoc;
