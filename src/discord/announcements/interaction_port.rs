// Discord-side adapter for the announcement flow.
//
// Wraps one poise invocation context and exposes it through the core ports:
// role lookups for the permission gate and the replies the service sends.

use super::formatter::render_embed;
use crate::core::announcements::{EmbedSpec, InteractionResponder};
use crate::core::permissions::{Invoker, PlatformError, RoleDirectory, RoleInfo};
use crate::discord::Context;
use async_trait::async_trait;
use poise::serenity_prelude as serenity;

fn platform_error(e: serenity::Error) -> PlatformError {
    PlatformError(e.to_string())
}

/// Put roles in a stable order: ascending position, then id.
///
/// Guild roles come back as a map, so without this the gate's "last match
/// wins" rule would depend on hash order. With it, the highest-ranked role
/// wins a name collision.
pub fn directory_order(mut roles: Vec<RoleInfo>) -> Vec<RoleInfo> {
    roles.sort_by_key(|role| (role.position, role.id));
    roles
}

fn role_info(role: &serenity::Role) -> RoleInfo {
    RoleInfo {
        id: role.id.get(),
        name: role.name.clone(),
        position: role.position,
    }
}

pub struct PoiseInteractionPort<'a> {
    ctx: Context<'a>,
}

impl<'a> PoiseInteractionPort<'a> {
    pub fn new(ctx: Context<'a>) -> Self {
        Self { ctx }
    }

    /// Snapshot of the invoking member for the permission gate.
    pub async fn invoker(&self) -> Invoker {
        let role_ids = self
            .ctx
            .author_member()
            .await
            .map(|member| member.roles.iter().map(|role| role.get()).collect())
            .unwrap_or_default();

        Invoker {
            user_id: self.ctx.author().id.get(),
            guild_id: self.ctx.guild_id().map(|id| id.get()),
            role_ids,
        }
    }

    async fn reply_ephemeral(&self, message: &str) -> Result<(), PlatformError> {
        self.ctx
            .send(
                poise::CreateReply::default()
                    .content(message)
                    .ephemeral(true),
            )
            .await
            .map(|_| ())
            .map_err(platform_error)
    }
}

#[async_trait]
impl<'a> RoleDirectory for PoiseInteractionPort<'a> {
    async fn guild_roles(&self, guild_id: u64) -> Result<Vec<RoleInfo>, PlatformError> {
        let guild_id = serenity::GuildId::new(guild_id);
        let serenity_ctx = self.ctx.serenity_context();

        // Prefer the gateway cache, fall back to HTTP
        let cached: Option<Vec<RoleInfo>> = serenity_ctx
            .cache
            .guild(guild_id)
            .map(|guild| guild.roles.values().map(role_info).collect());

        let roles = match cached {
            Some(roles) => roles,
            None => {
                tracing::debug!(guild_id = guild_id.get(), "Guild not cached, fetching roles");
                guild_id
                    .roles(serenity_ctx)
                    .await
                    .map_err(platform_error)?
                    .values()
                    .map(role_info)
                    .collect()
            }
        };

        Ok(directory_order(roles))
    }
}

#[async_trait]
impl<'a> InteractionResponder for PoiseInteractionPort<'a> {
    async fn send_to_channel(
        &self,
        channel_id: u64,
        embed: &EmbedSpec,
    ) -> Result<(), PlatformError> {
        serenity::ChannelId::new(channel_id)
            .send_message(
                self.ctx.serenity_context(),
                serenity::CreateMessage::new().embed(render_embed(embed)),
            )
            .await
            .map(|_| ())
            .map_err(platform_error)
    }

    async fn acknowledge(&self, embed: &EmbedSpec) -> Result<(), PlatformError> {
        self.ctx
            .send(poise::CreateReply::default().embed(render_embed(embed)))
            .await
            .map(|_| ())
            .map_err(platform_error)
    }

    async fn reject(&self, message: &str) -> Result<(), PlatformError> {
        self.reply_ephemeral(message).await
    }

    async fn report_failure(&self, message: &str) -> Result<(), PlatformError> {
        self.reply_ephemeral(message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::permissions::find_role;

    fn role(id: u64, name: &str, position: u16) -> RoleInfo {
        RoleInfo {
            id,
            name: name.to_string(),
            position,
        }
    }

    #[test]
    fn test_directory_order_sorts_by_position_then_id() {
        let ordered = directory_order(vec![
            role(30, "Officers", 4),
            role(10, "@everyone", 0),
            role(25, "Member", 1),
            role(20, "Member", 1),
        ]);

        let ids: Vec<u64> = ordered.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![10, 20, 25, 30]);
    }

    #[test]
    fn test_highest_ranked_role_wins_name_collision() {
        let ordered = directory_order(vec![
            role(99, "Officers", 7),
            role(42, "Officers", 2),
        ]);

        assert_eq!(find_role(&ordered, "Officers").map(|r| r.id), Some(99));
    }
}
