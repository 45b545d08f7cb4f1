// This is the entry point of the announcement bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `infra/` = Implementations of core traits (Discord REST) and configuration
// - `discord/` = Discord-specific adapters (commands, interaction replies)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Set up the Discord framework and register commands
// 4. Wait for Ctrl+C, then tear everything down in order

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "discord/discord_layer.rs"]
mod discord;
#[path = "infra/infra_layer.rs"]
mod infra;

use crate::core::announcements::AnnouncementService;
use crate::core::lifecycle::{Lifecycle, LifecycleState};
use crate::core::permissions::PermissionGate;
use crate::core::registration::{CommandScope, RegistrationError, RegistrationService};
use crate::discord::{Data, Error};
use crate::infra::config::BotConfig;
use crate::infra::registration::{slash_builders, HttpCommandRegistrar};
use anyhow::{anyhow, Context as _};
use clap::Parser;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};

type GatewayHandle = JoinHandle<Result<(), serenity::Error>>;

/// Progress reported from the framework setup hook to the driver.
enum StartupEvent {
    Connected { user: String },
    CommandsRegistered { count: usize },
    RegistrationFailed(RegistrationError),
}

/// Builds the poise framework. Setup runs once on `Ready`: it registers the
/// slash commands and reports the outcome on `startup_tx`.
fn build_framework(
    data: Data,
    scope: CommandScope,
    registration: Arc<RegistrationService>,
    startup_tx: mpsc::UnboundedSender<StartupEvent>,
) -> poise::Framework<Data, Error> {
    poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: discord::commands::all(),
            on_error: |error| Box::pin(discord::on_error(error)),
            pre_command: |ctx| {
                Box::pin(async move {
                    info!(
                        command = %ctx.command().qualified_name,
                        user = %ctx.author().name,
                        "Command invoked"
                    );
                })
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as: {}", ready.user.tag());
                let _ = startup_tx.send(StartupEvent::Connected {
                    user: ready.user.tag(),
                });

                info!(%scope, "Adding commands...");
                let registrar = HttpCommandRegistrar::new(ctx.http.clone());
                let outcome = match slash_builders(&framework.options().commands) {
                    Ok(builders) => registration.register_all(&registrar, scope, &builders).await,
                    Err(e) => Err(e),
                };

                match outcome {
                    Ok(count) => {
                        let _ = startup_tx.send(StartupEvent::CommandsRegistered { count });
                        Ok(data)
                    }
                    Err(e) => {
                        let message = e.to_string();
                        let _ = startup_tx.send(StartupEvent::RegistrationFailed(e));
                        Err(message.into())
                    }
                }
            })
        })
        .build()
}

fn gateway_exit_error(result: Result<Result<(), serenity::Error>, tokio::task::JoinError>) -> anyhow::Error {
    match result {
        Ok(Ok(())) => anyhow!("Gateway connection closed unexpectedly"),
        Ok(Err(e)) => anyhow!("Cannot open the session: {}", e),
        Err(e) => anyhow!("Gateway task failed: {}", e),
    }
}

/// Stop every shard and wait for the client task to finish.
async fn close_connection(shard_manager: &Arc<serenity::ShardManager>, gateway: GatewayHandle) {
    shard_manager.shutdown_all().await;
    if let Err(e) = gateway.await {
        error!("Gateway task ended abnormally: {}", e);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists) before parsing,
    // so every flag can fall back to it.
    dotenv::dotenv().ok();

    let config = BotConfig::parse();
    let scope = config.command_scope()?;
    let admin_role = config.admin_role()?.to_string();
    ::serenity::utils::validate_token(&config.token)
        .map_err(|e| anyhow!("Invalid bot parameters: {}", e))?;

    let mut lifecycle = Lifecycle::new();

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================

    let announcements = Arc::new(AnnouncementService::new(PermissionGate::new(admin_role)));
    info!(
        admin_role = %announcements.gate().admin_role(),
        "Announcement commands restricted to role"
    );
    let data = Data {
        announcements: Arc::clone(&announcements),
    };
    let registration = Arc::new(RegistrationService::new());

    // ========================================================================
    // DISCORD FRAMEWORK SETUP
    // ========================================================================

    let (startup_tx, mut startup_rx) = mpsc::unbounded_channel();
    let framework = build_framework(data, scope, Arc::clone(&registration), startup_tx);

    // Roles come from the guild cache, which needs GUILDS.
    let intents = serenity::GatewayIntents::GUILDS;

    let mut client = serenity::ClientBuilder::new(&config.token, intents)
        .framework(framework)
        .await
        .context("Error creating client")?;

    let http = Arc::clone(&client.http);
    let shard_manager = Arc::clone(&client.shard_manager);
    let mut gateway: GatewayHandle = tokio::spawn(async move { client.start().await });

    // ========================================================================
    // STARTUP: wait for Ready and command registration
    // ========================================================================

    loop {
        tokio::select! {
            event = startup_rx.recv() => match event {
                Some(StartupEvent::Connected { user }) => {
                    info!(%user, "Connected to Discord");
                    lifecycle.advance(LifecycleState::Connected)?;
                }
                Some(StartupEvent::CommandsRegistered { count }) => {
                    let names: Vec<String> = registration
                        .registered()
                        .await
                        .into_iter()
                        .map(|command| command.name)
                        .collect();
                    info!(count, %scope, commands = ?names, "Commands registered");
                    lifecycle.advance(LifecycleState::CommandsRegistered)?;
                    break;
                }
                Some(StartupEvent::RegistrationFailed(e)) => {
                    error!("{}", e);
                    close_connection(&shard_manager, gateway).await;
                    return Err(e.into());
                }
                None => {
                    close_connection(&shard_manager, gateway).await;
                    return Err(anyhow!("Framework setup ended without registering commands"));
                }
            },
            result = &mut gateway => {
                let e = gateway_exit_error(result);
                error!(state = ?lifecycle.state(), "{}", e);
                return Err(e);
            }
        }
    }

    // ========================================================================
    // LISTENING
    // ========================================================================

    lifecycle.advance(LifecycleState::Listening)?;
    info!("Press Ctrl+C to exit");

    let gateway_finished = tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                error!("Failed to listen for the interrupt signal: {}", e);
            }
            false
        }
        result = &mut gateway => {
            error!("{}", gateway_exit_error(result));
            true
        }
    };

    // ========================================================================
    // SHUTDOWN
    // ========================================================================

    lifecycle.advance(LifecycleState::ShuttingDown)?;

    let mut teardown: anyhow::Result<()> = Ok(());
    if config.remove_commands {
        info!("Removing commands...");
        let registrar = HttpCommandRegistrar::new(http);
        match registration.remove_registered(&registrar).await {
            Ok(count) => info!(count, "Commands removed"),
            Err(e) => {
                error!("{}", e);
                teardown = Err(e.into());
            }
        }
    }

    if gateway_finished {
        shard_manager.shutdown_all().await;
    } else {
        close_connection(&shard_manager, gateway).await;
    }
    lifecycle.advance(LifecycleState::Closed)?;

    info!("Gracefully shutting down.");
    teardown
}
