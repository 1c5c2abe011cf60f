pub mod user;
pub mod team;
pub mod membership;
pub mod project;
pub mod candidate;
pub mod transfer;
pub mod stats;
pub mod outbox;
