// Announcement service - the flow behind both slash commands.
//
// 1. Run the permission gate (reject + stop when denied)
// 2. Build the embed for the request
// 3. Post it to the target channel
// 4. Echo it back as the interaction's acknowledgment
//
// NO Discord dependencies here. The Discord layer hands us a port that can
// read roles and talk back to the interaction.

use super::announcement_models::AnnouncementRequest;
use super::announcement_models::EmbedSpec;
use crate::core::permissions::{
    Access, DenialReason, Invoker, PermissionGate, PlatformError, RoleDirectory, REJECTION_MESSAGE,
};
use async_trait::async_trait;
use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum AnnounceError {
    #[error("Failed to look up guild roles: {0}")]
    RoleLookup(PlatformError),

    #[error("Failed to send announcement to channel {channel_id}: {source}")]
    ChannelSend {
        channel_id: u64,
        source: PlatformError,
    },

    #[error("Failed to acknowledge interaction: {0}")]
    Acknowledge(PlatformError),
}

impl AnnounceError {
    /// What the invoking user should be told, if anything.
    ///
    /// `None` means log-only: the interaction can't be answered anymore.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            AnnounceError::RoleLookup(_) => {
                Some("Couldn't verify your permissions right now. Please try again.")
            }
            AnnounceError::ChannelSend { .. } => {
                Some("The announcement could not be posted to that channel.")
            }
            AnnounceError::Acknowledge(_) => None,
        }
    }
}

// ============================================================================
// INTERACTION PORT
// ============================================================================

/// Everything the service needs to say back to the platform.
#[async_trait]
pub trait InteractionResponder: Send + Sync {
    /// Post an embed as a regular message in a channel.
    async fn send_to_channel(&self, channel_id: u64, embed: &EmbedSpec)
        -> Result<(), PlatformError>;

    /// Answer the interaction itself with the embed (visible to everyone).
    async fn acknowledge(&self, embed: &EmbedSpec) -> Result<(), PlatformError>;

    /// Answer the interaction with an ephemeral rejection.
    async fn reject(&self, message: &str) -> Result<(), PlatformError>;

    /// Answer the interaction with an ephemeral failure notice.
    async fn report_failure(&self, message: &str) -> Result<(), PlatformError>;
}

/// Marker for adapters that can do both halves of the flow.
pub trait AnnouncementPort: RoleDirectory + InteractionResponder {}

impl<T: RoleDirectory + InteractionResponder> AnnouncementPort for T {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Denied(DenialReason),
    Posted { channel_id: u64 },
}

// ============================================================================
// CORE SERVICE
// ============================================================================

pub struct AnnouncementService {
    gate: PermissionGate,
}

impl AnnouncementService {
    pub fn new(gate: PermissionGate) -> Self {
        Self { gate }
    }

    pub fn gate(&self) -> &PermissionGate {
        &self.gate
    }

    /// Gate, build, post, acknowledge. Each platform call happens at most once.
    pub async fn publish<P>(
        &self,
        port: &P,
        invoker: &Invoker,
        channel_id: u64,
        request: &AnnouncementRequest,
    ) -> Result<PublishOutcome, AnnounceError>
    where
        P: AnnouncementPort + ?Sized,
    {
        let command = request.command_name();

        let access = self
            .gate
            .check(port, invoker)
            .await
            .map_err(AnnounceError::RoleLookup)?;

        if let Access::Denied(reason) = access {
            tracing::info!(
                command,
                user_id = invoker.user_id,
                ?reason,
                "Permission denied"
            );
            // The denial stands even if the rejection can't be delivered.
            if let Err(e) = port.reject(REJECTION_MESSAGE).await {
                tracing::warn!(command, "Failed to send rejection message: {}", e);
            }
            return Ok(PublishOutcome::Denied(reason));
        }

        let embed = request.to_embed();

        tracing::info!(command, channel_id, "Sending embed to channel {}...", channel_id);
        port.send_to_channel(channel_id, &embed)
            .await
            .map_err(|source| AnnounceError::ChannelSend { channel_id, source })?;

        port.acknowledge(&embed)
            .await
            .map_err(AnnounceError::Acknowledge)?;

        Ok(PublishOutcome::Posted { channel_id })
    }
}

// ============================================================================
// TESTS
// ============================================================================
