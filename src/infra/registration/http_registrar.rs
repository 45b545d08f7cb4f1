use crate::core::registration::{
    CommandRegistrar, CommandScope, RegisteredCommand, RegistrarError, RegistrationError,
};
use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use std::sync::Arc;

/// Registers slash commands through Discord's REST API.
///
/// Needs an `Http` whose application id is known, i.e. one taken from a
/// client that has received `Ready`.
pub struct HttpCommandRegistrar {
    http: Arc<serenity::Http>,
}

impl HttpCommandRegistrar {
    pub fn new(http: Arc<serenity::Http>) -> Self {
        Self { http }
    }
}

/// Turn poise command definitions into the builders the REST API takes.
pub fn slash_builders<U, E>(
    commands: &[poise::Command<U, E>],
) -> Result<Vec<(String, serenity::CreateCommand)>, RegistrationError> {
    commands
        .iter()
        .map(|command| {
            command
                .create_as_slash_command()
                .map(|builder| (command.name.clone(), builder))
                .ok_or_else(|| RegistrationError::Create {
                    name: command.name.clone(),
                    source: RegistrarError::NotSlashCommand,
                })
        })
        .collect()
}

#[async_trait]
impl CommandRegistrar for HttpCommandRegistrar {
    type Command = (String, serenity::CreateCommand);

    fn command_name(command: &Self::Command) -> String {
        command.0.clone()
    }

    async fn create(
        &self,
        scope: CommandScope,
        command: &Self::Command,
    ) -> Result<RegisteredCommand, RegistrarError> {
        let (_, builder) = command;
        let http = &self.http;

        let created = match scope {
            CommandScope::Global => {
                serenity::Command::create_global_command(http, builder.clone()).await
            }
            CommandScope::Guild(guild_id) => {
                serenity::GuildId::new(guild_id)
                    .create_command(http, builder.clone())
                    .await
            }
        }
        .map_err(|e| RegistrarError::Platform(e.to_string()))?;

        Ok(RegisteredCommand {
            id: created.id.get(),
            name: created.name,
        })
    }

    async fn delete(&self, scope: CommandScope, command_id: u64) -> Result<(), RegistrarError> {
        let http = &self.http;
        let command_id = serenity::CommandId::new(command_id);

        match scope {
            CommandScope::Global => serenity::Command::delete_global_command(http, command_id).await,
            CommandScope::Guild(guild_id) => {
                serenity::GuildId::new(guild_id)
                    .delete_command(http, command_id)
                    .await
            }
        }
        .map_err(|e| RegistrarError::Platform(e.to_string()))
    }
}
