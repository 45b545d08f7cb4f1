// Command registration - creates our slash commands at startup and removes
// exactly those commands at shutdown.
//
// Only ids returned by `create` are ever deleted, so commands that some other
// process registered on the same application are left alone.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;

// ============================================================================
// MODELS
// ============================================================================

/// Where commands are registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandScope {
    /// Visible in every guild. Propagation can take a while.
    Global,
    /// Visible in one guild only, updates are instant. Meant for testing.
    Guild(u64),
}

impl std::fmt::Display for CommandScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandScope::Global => write!(f, "global"),
            CommandScope::Guild(id) => write!(f, "guild {}", id),
        }
    }
}

/// A command the platform accepted, with the id it assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredCommand {
    pub id: u64,
    pub name: String,
}

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum RegistrarError {
    #[error("Platform rejected the request: {0}")]
    Platform(String),

    #[error("Command has no slash form")]
    NotSlashCommand,
}

#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("Cannot create '{name}' command: {source}")]
    Create {
        name: String,
        #[source]
        source: RegistrarError,
    },

    #[error("Cannot delete '{name}' command ({id}): {source}")]
    Delete {
        name: String,
        id: u64,
        #[source]
        source: RegistrarError,
    },
}

// ============================================================================
// REGISTRAR TRAIT (PORT)
// ============================================================================

/// Creates and deletes application commands on the platform.
#[async_trait]
pub trait CommandRegistrar: Send + Sync {
    /// Platform-specific command definition.
    type Command: Send + Sync;

    fn command_name(command: &Self::Command) -> String;

    async fn create(
        &self,
        scope: CommandScope,
        command: &Self::Command,
    ) -> Result<RegisteredCommand, RegistrarError>;

    async fn delete(&self, scope: CommandScope, command_id: u64) -> Result<(), RegistrarError>;
}

// ============================================================================
// SERVICE
// ============================================================================

struct Registry {
    scope: CommandScope,
    commands: Vec<RegisteredCommand>,
}

/// Remembers what this run registered so teardown can undo exactly that.
pub struct RegistrationService {
    registry: Mutex<Registry>,
}

impl RegistrationService {
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(Registry {
                scope: CommandScope::Global,
                commands: Vec::new(),
            }),
        }
    }

    /// Create every command in order. Stops at the first failure; commands
    /// created before it stay recorded so teardown can still remove them.
    pub async fn register_all<R: CommandRegistrar>(
        &self,
        registrar: &R,
        scope: CommandScope,
        commands: &[R::Command],
    ) -> Result<usize, RegistrationError> {
        let mut registry = self.registry.lock().await;
        registry.scope = scope;

        for command in commands {
            let name = R::command_name(command);
            let created = registrar
                .create(scope, command)
                .await
                .map_err(|source| RegistrationError::Create {
                    name: name.clone(),
                    source,
                })?;

            tracing::debug!(command = %created.name, id = created.id, %scope, "Created command");
            registry.commands.push(created);
        }

        Ok(commands.len())
    }

    /// Delete every command recorded by `register_all`, in creation order.
    /// The first failure aborts the remaining deletions.
    pub async fn remove_registered<R: CommandRegistrar>(
        &self,
        registrar: &R,
    ) -> Result<usize, RegistrationError> {
        let mut registry = self.registry.lock().await;
        let scope = registry.scope;
        let mut removed = 0;

        while let Some(command) = registry.commands.first().cloned() {
            registrar
                .delete(scope, command.id)
                .await
                .map_err(|source| RegistrationError::Delete {
                    name: command.name.clone(),
                    id: command.id,
                    source,
                })?;

            tracing::debug!(command = %command.name, id = command.id, %scope, "Deleted command");
            registry.commands.remove(0);
            removed += 1;
        }

        Ok(removed)
    }

    /// Commands created in this run and not yet removed.
    pub async fn registered(&self) -> Vec<RegisteredCommand> {
        self.registry.lock().await.commands.clone()
    }
}

impl Default for RegistrationService {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
