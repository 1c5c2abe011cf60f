pub mod team_service;
pub use team_service::TeamService;
pub mod membership_service;
pub use membership_service::MembershipService;
pub mod transfer_service;
pub use transfer_service::TransferService;
