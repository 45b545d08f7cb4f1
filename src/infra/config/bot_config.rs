// Process configuration.
//
// Every setting is a command-line flag with an environment-variable fallback,
// so a `.env` file (loaded by `dotenv` before parsing) works as well as flags.

use crate::core::registration::CommandScope;
use clap::{ArgAction, Parser};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid guild id '{0}': expected a numeric Discord id")]
    InvalidGuildId(String),

    #[error("Admin role name must not be empty")]
    EmptyAdminRole,
}

#[derive(Clone, Parser)]
#[command(name = "swift-announcer")]
#[command(about = "Discord bot that posts SWIFT announcements as embeds")]
pub struct BotConfig {
    /// Test guild ID. If not passed, commands are registered globally.
    #[arg(long = "guild", env = "DISCORD_GUILD_ID", default_value = "")]
    pub guild: String,

    /// Bot access token.
    #[arg(long = "token", env = "DISCORD_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Remove the registered commands when shutting down.
    #[arg(
        long = "rmcmd",
        env = "REMOVE_COMMANDS",
        default_value_t = true,
        action = ArgAction::Set
    )]
    pub remove_commands: bool,

    /// Name of the role that can use the announcement commands.
    #[arg(long = "admin", env = "ADMIN_ROLE")]
    pub admin_role: String,
}

impl BotConfig {
    /// Empty guild means global registration.
    pub fn command_scope(&self) -> Result<CommandScope, ConfigError> {
        let guild = self.guild.trim();
        if guild.is_empty() {
            return Ok(CommandScope::Global);
        }

        match guild.parse::<u64>() {
            Ok(id) if id > 0 => Ok(CommandScope::Guild(id)),
            _ => Err(ConfigError::InvalidGuildId(guild.to_string())),
        }
    }

    pub fn admin_role(&self) -> Result<&str, ConfigError> {
        let role = self.admin_role.trim();
        if role.is_empty() {
            return Err(ConfigError::EmptyAdminRole);
        }
        Ok(role)
    }
}

// The token never shows up in logs.
impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("guild", &self.guild)
            .field("token", &"<redacted>")
            .field("remove_commands", &self.remove_commands)
            .field("admin_role", &self.admin_role)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> BotConfig {
        let mut argv = vec!["swift-announcer"];
        argv.extend_from_slice(args);
        BotConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_flags_parse() {
        let config = parse(&[
            "--guild",
            "123456789",
            "--token",
            "abc.def.ghi",
            "--rmcmd",
            "false",
            "--admin",
            "Officers",
        ]);

        assert_eq!(config.command_scope(), Ok(CommandScope::Guild(123456789)));
        assert_eq!(config.token, "abc.def.ghi");
        assert!(!config.remove_commands);
        assert_eq!(config.admin_role(), Ok("Officers"));
    }

    #[test]
    fn test_empty_guild_means_global() {
        let config = parse(&["--guild", "", "--token", "t", "--admin", "Officers"]);
        assert_eq!(config.command_scope(), Ok(CommandScope::Global));
    }

    #[test]
    fn test_remove_commands_defaults_to_true() {
        let config = parse(&["--guild", "", "--token", "t", "--admin", "Officers"]);
        assert!(config.remove_commands);
    }

    #[test]
    fn test_bad_guild_id_rejected() {
        let config = parse(&["--guild", "my-server", "--token", "t", "--admin", "Officers"]);
        assert_eq!(
            config.command_scope(),
            Err(ConfigError::InvalidGuildId("my-server".to_string()))
        );
    }

    #[test]
    fn test_blank_admin_role_rejected() {
        let config = parse(&["--guild", "", "--token", "t", "--admin", "   "]);
        assert_eq!(config.admin_role(), Err(ConfigError::EmptyAdminRole));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = parse(&["--guild", "", "--token", "super-secret", "--admin", "Officers"]);
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
