pub mod auth;
pub mod logs;
pub mod pages;
pub mod stats;
