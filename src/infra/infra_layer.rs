// The infra module contains implementations of core traits
// plus process configuration.

#[path = "config/bot_config.rs"]
pub mod config;

#[path = "registration/http_registrar.rs"]
pub mod registration;
