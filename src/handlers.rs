pub mod members;
pub mod teams;
pub mod transfers;
