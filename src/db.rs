pub mod user_repo;
pub use user_repo::UserRepository;
pub mod team_repo;
pub use team_repo::TeamRepository;
pub mod membership_repo;
pub use membership_repo::MembershipRepository;
pub mod transfer_repo;
pub use transfer_repo::TransferRepository;
pub mod outbox_repo;
pub use outbox_repo::OutboxRepository;
pub mod stats_repo;
pub use stats_repo::StatsRepository;
