//! Component interaction handler for the SOS launch button.
//!
//! The launch menu posted in each network channel carries a single button.
//! Pressing it is the whole launch flow from the member's side: the
//! interaction is deferred ephemerally, the SOS is created and broadcast,
//! and the outcome comes back as an ephemeral followup only the presser
//! sees.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serenity::all::{
    ComponentInteraction, Context, CreateInteractionResponse,
    CreateInteractionResponseFollowup, CreateInteractionResponseMessage, Interaction,
};

use crate::data::ServerListingRepository;
use crate::error::AppError;
use crate::gateway::DiscordGateway;
use crate::service::guild_setup::LAUNCH_SOS_BUTTON_ID;
use crate::service::sos::SosService;
use crate::sos::lifecycle::{CreateSosParams, SosLifecycle};
use crate::sos::registry::SosRegistry;
use crate::sos::render::SosAttributes;

/// Handles component and command interactions.
pub async fn handle_interaction_create(
    db: &DatabaseConnection,
    registry: &Arc<SosRegistry>,
    ctx: Context,
    interaction: Interaction,
) {
    let Interaction::Component(component) = interaction else {
        return;
    };

    if component.data.custom_id != LAUNCH_SOS_BUTTON_ID {
        return;
    }

    if let Err(e) = component
        .create_response(
            &ctx.http,
            CreateInteractionResponse::Defer(
                CreateInteractionResponseMessage::new().ephemeral(true),
            ),
        )
        .await
    {
        tracing::error!("Failed to defer SOS launch interaction: {}", e);
        return;
    }

    let reply = match launch_sos(db, registry, &ctx, &component).await {
        Ok(channel_name) => format!(
            "SOS broadcast to the alliance. Your voice channel **{}** is ready; \
             it stands down after a minute of inactivity.",
            channel_name
        ),
        Err(AppError::MissingPermissions(missing)) => format!(
            "I can't launch an SOS here: I'm missing the {} permission(s). \
             Please ask a server admin to fix my role.",
            missing
        ),
        Err(e) => {
            tracing::error!("Failed to launch SOS: {}", e);
            "Something went wrong launching your SOS. Please try again in a moment.".to_string()
        }
    };

    if let Err(e) = component
        .create_followup(
            &ctx.http,
            CreateInteractionResponseFollowup::new()
                .content(reply)
                .ephemeral(true),
        )
        .await
    {
        tracing::error!("Failed to send SOS launch followup: {}", e);
    }
}

async fn launch_sos(
    db: &DatabaseConnection,
    registry: &Arc<SosRegistry>,
    ctx: &Context,
    component: &ComponentInteraction,
) -> Result<String, AppError> {
    let guild_id = component
        .guild_id
        .ok_or_else(|| AppError::NotFound("SOS launched outside a guild".to_string()))?
        .get();

    let listing = ServerListingRepository::new(db)
        .find_by_guild_id(guild_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Guild {} is not listed", guild_id)))?;

    let category_id = listing
        .category_id
        .as_ref()
        .and_then(|id| id.parse::<u64>().ok());

    let initiator_name = component
        .member
        .as_ref()
        .map(|member| member.display_name().to_string())
        .unwrap_or_else(|| component.user.name.clone());

    let lifecycle = Arc::new(SosLifecycle::new(
        DiscordGateway::new(ctx),
        registry.clone(),
    ));

    let created = SosService::new(db, lifecycle)
        .launch(CreateSosParams {
            initiator_id: component.user.id.get(),
            initiator_name,
            attributes: SosAttributes::default(),
            host_guild_id: guild_id,
            host_guild_name: listing.guild_name,
            host_category_id: category_id,
        })
        .await?;

    Ok(created.channel_name)
}
