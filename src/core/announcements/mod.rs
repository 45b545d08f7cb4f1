// Core announcements module - embed building and the publish flow.

pub mod announcement_models;
pub mod announcement_service;

pub use announcement_models::*;
pub use announcement_service::*;
