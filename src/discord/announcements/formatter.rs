use crate::core::announcements::EmbedSpec;
use poise::serenity_prelude::CreateEmbed;

/// Render a core embed into serenity's builder.
///
/// Discord decides the displayed image size itself, so only the image url is
/// carried over.
pub fn render_embed(spec: &EmbedSpec) -> CreateEmbed {
    let embed = CreateEmbed::new()
        .title(spec.title.as_str())
        .description(spec.description.as_str())
        .color(spec.color);

    match &spec.image {
        Some(image) => embed.image(image.url.as_str()),
        None => embed,
    }
}
