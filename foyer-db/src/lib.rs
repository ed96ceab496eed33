pub mod groups;
pub mod invitations;
