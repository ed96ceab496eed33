mod delete;
mod get_for_group;
mod list;
mod validate;
