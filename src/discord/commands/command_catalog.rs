// Discord commands module.
// Each feature gets its own command file.

use crate::discord::{Data, Error};

pub mod announcements;

/// Every command the bot registers, in registration order.
pub fn all() -> Vec<poise::Command<Data, Error>> {
    vec![announcements::new_eboard(), announcements::announce_embed()]
}
