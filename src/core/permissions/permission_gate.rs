// Permission gate - decides whether an invoker may run announcement commands.
//
// Access hinges on a single named role. The role is looked up by name on every
// check (guild roles can be renamed at any time), and a missing role is a
// denial, never a panic.

use async_trait::async_trait;
use thiserror::Error;

/// A platform call failed. Carries the underlying error's message.
#[derive(Debug, Clone, Error)]
#[error("platform call failed: {0}")]
pub struct PlatformError(pub String);

/// Message shown to members who lack the admin role.
pub const REJECTION_MESSAGE: &str = "You don't have the permissions to do that!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleInfo {
    pub id: u64,
    pub name: String,
    pub position: u16,
}

/// Who triggered the interaction, reduced to what the gate needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invoker {
    pub user_id: u64,
    /// `None` when the command was used outside a guild.
    pub guild_id: Option<u64>,
    pub role_ids: Vec<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    NotInGuild,
    /// The configured admin role doesn't exist in this guild.
    RoleNotFound,
    MissingRole,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allowed,
    Denied(DenialReason),
}

/// Source of a guild's roles.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// All roles of the guild. When two roles share a name, the later one in
    /// this list is the one the gate uses.
    async fn guild_roles(&self, guild_id: u64) -> Result<Vec<RoleInfo>, PlatformError>;
}

/// Linear scan for a role by exact name. Last match wins.
pub fn find_role<'a>(roles: &'a [RoleInfo], name: &str) -> Option<&'a RoleInfo> {
    roles.iter().rev().find(|role| role.name == name)
}

pub struct PermissionGate {
    admin_role: String,
}

impl PermissionGate {
    pub fn new(admin_role: impl Into<String>) -> Self {
        Self {
            admin_role: admin_role.into(),
        }
    }

    pub fn admin_role(&self) -> &str {
        &self.admin_role
    }

    /// Check the invoker against the admin role. Performs no side effects
    /// beyond reading the guild's roles.
    pub async fn check<D>(&self, directory: &D, invoker: &Invoker) -> Result<Access, PlatformError>
    where
        D: RoleDirectory + ?Sized,
    {
        let Some(guild_id) = invoker.guild_id else {
            return Ok(Access::Denied(DenialReason::NotInGuild));
        };

        let roles = directory.guild_roles(guild_id).await?;
        let Some(admin) = find_role(&roles, &self.admin_role) else {
            tracing::warn!(
                guild_id,
                role = %self.admin_role,
                "Admin role not found in guild, denying access"
            );
            return Ok(Access::Denied(DenialReason::RoleNotFound));
        };

        if invoker.role_ids.contains(&admin.id) {
            Ok(Access::Allowed)
        } else {
            Ok(Access::Denied(DenialReason::MissingRole))
        }
    }
}
