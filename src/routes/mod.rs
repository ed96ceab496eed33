mod health_check;
pub mod invitations;
pub mod storage;

pub use health_check::*;
