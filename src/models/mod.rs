pub mod activity;
pub mod log_entry;
pub mod user;
