pub mod application;
pub mod routes;
pub mod token;

pub use foyer_shared::error_chain_fmt;
