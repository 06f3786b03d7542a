pub mod auth;
pub mod cache;
pub mod chat;
pub mod db;
pub mod handlers;
pub mod lifecycle;
pub mod models;

pub use db::create_pool;
