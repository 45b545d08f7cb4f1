// Announcement slash commands.
//
// **Notice the pattern:**
// 1. poise hands us typed option values
// 2. We pack them into a core `AnnouncementRequest`
// 3. The core service gates, posts and acknowledges through the port
//
// Anything that goes wrong is logged here, and the user is told only when
// the error says they should be.

use crate::core::announcements::{
    Announcement, AnnouncementRequest, EboardMember, InteractionResponder, PublishOutcome,
};
use crate::discord::announcements::PoiseInteractionPort;
use crate::discord::{Context, Error};
use poise::serenity_prelude as serenity;

/// Announce a new Eboard member
#[poise::command(slash_command, guild_only, rename = "new-eboard")]
pub async fn new_eboard(
    ctx: Context<'_>,
    #[description = "The name of the new eboard member"] name: String,
    #[rename = "discord-handle"]
    #[description = "The Discord user of the new Eboard member"]
    discord_handle: serenity::User,
    #[description = "The position of the new eboard member"] position: String,
    #[description = "The major of the new eboard member"] major: String,
    #[description = "The year of the new eboard member"] year: String,
    #[rename = "announcement-channel"]
    #[description = "Channel to send embed"]
    #[channel_types("Text")]
    announcement_channel: serenity::Channel,
    #[description = "Website of new Eboard member"] website: Option<String>,
    #[description = "LinkedIn of new Eboard member"] linkedin: Option<String>,
    #[rename = "link-to-picture"]
    #[description = "The link to a picture of the new Eboard member"]
    link_to_picture: Option<String>,
) -> Result<(), Error> {
    let request = AnnouncementRequest::NewEboard(EboardMember {
        name,
        handle_user_id: discord_handle.id.get(),
        position,
        major,
        year,
        website,
        linkedin,
        picture: link_to_picture,
    });

    publish(ctx, announcement_channel.id().get(), request).await
}

/// Make an announcement as an embed
#[poise::command(slash_command, guild_only, rename = "announce-embed")]
pub async fn announce_embed(
    ctx: Context<'_>,
    #[description = "The title of the announcement"] title: String,
    #[description = "The content of the announcement"] content: String,
    #[rename = "announcement-channel"]
    #[description = "Channel to send embed"]
    #[channel_types("Text")]
    announcement_channel: serenity::Channel,
    #[rename = "link-to-picture"]
    #[description = "The link to a picture for the announcement"]
    link_to_picture: Option<String>,
) -> Result<(), Error> {
    let request = AnnouncementRequest::AnnounceEmbed(Announcement {
        title,
        content,
        picture: link_to_picture,
    });

    publish(ctx, announcement_channel.id().get(), request).await
}

/// Shared tail of both commands: run the core flow and apply the error policy.
async fn publish(
    ctx: Context<'_>,
    channel_id: u64,
    request: AnnouncementRequest,
) -> Result<(), Error> {
    let command = request.command_name();
    let port = PoiseInteractionPort::new(ctx);
    let invoker = port.invoker().await;

    match ctx
        .data()
        .announcements
        .publish(&port, &invoker, channel_id, &request)
        .await
    {
        Ok(PublishOutcome::Posted { channel_id }) => {
            tracing::info!(command, channel_id, "Announcement posted");
        }
        Ok(PublishOutcome::Denied(_)) => {}
        Err(err) => {
            tracing::error!(command, channel_id, "Announcement failed: {}", err);
            if let Some(message) = err.user_message() {
                if let Err(e) = port.report_failure(message).await {
                    tracing::warn!(command, "Failed to report failure to user: {}", e);
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(command: &poise::Command<crate::discord::Data, Error>) -> Vec<(String, bool)> {
        command
            .parameters
            .iter()
            .map(|p| (p.name.clone(), p.required))
            .collect()
    }

    fn owned(expected: &[(&str, bool)]) -> Vec<(String, bool)> {
        expected
            .iter()
            .map(|(name, required)| (name.to_string(), *required))
            .collect()
    }

    #[test]
    fn test_new_eboard_schema() {
        let command = new_eboard();

        assert_eq!(command.name, "new-eboard");
        assert_eq!(
            command.description.as_deref(),
            Some("Announce a new Eboard member")
        );
        assert!(command.guild_only);
        assert_eq!(
            options(&command),
            owned(&[
                ("name", true),
                ("discord-handle", true),
                ("position", true),
                ("major", true),
                ("year", true),
                ("announcement-channel", true),
                ("website", false),
                ("linkedin", false),
                ("link-to-picture", false),
            ])
        );
        assert!(command.create_as_slash_command().is_some());
    }

    #[test]
    fn test_announce_embed_schema() {
        let command = announce_embed();

        assert_eq!(command.name, "announce-embed");
        assert_eq!(
            command.description.as_deref(),
            Some("Make an announcement as an embed")
        );
        assert_eq!(
            options(&command),
            owned(&[
                ("title", true),
                ("content", true),
                ("announcement-channel", true),
                ("link-to-picture", false),
            ])
        );
    }

    #[test]
    fn test_channel_options_only_accept_text_channels() {
        for command in [new_eboard(), announce_embed()] {
            let channel = command
                .parameters
                .iter()
                .find(|p| p.name == "announcement-channel")
                .expect("announcement-channel option");
            assert_eq!(
                channel.channel_types,
                Some(vec![serenity::ChannelType::Text])
            );
        }
    }

    #[test]
    fn test_required_options_precede_optional_ones() {
        // Discord refuses to register a command otherwise.
        for command in [new_eboard(), announce_embed()] {
            let flags: Vec<bool> = command.parameters.iter().map(|p| p.required).collect();
            let first_optional = flags.iter().position(|r| !r).unwrap_or(flags.len());
            assert!(flags[first_optional..].iter().all(|r| !r), "{}", command.name);
        }
    }
}
