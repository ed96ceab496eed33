pub mod create;
pub mod delete;
pub mod get_for_group;
pub mod list;
pub mod redeem;
pub mod revoke;
pub mod validate;

pub use create::create;
pub use delete::delete;
pub use get_for_group::get_for_group;
pub use list::list;
pub use redeem::redeem;
pub use revoke::revoke;
pub use validate::validate;
