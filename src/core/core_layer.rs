// The core module contains all business logic.
// Each feature gets its own submodule.

#[path = "announcements/mod.rs"]
pub mod announcements;

#[path = "permissions/permission_gate.rs"]
pub mod permissions;

#[path = "registration/registration_service.rs"]
pub mod registration;

#[path = "lifecycle/lifecycle_state.rs"]
pub mod lifecycle;
