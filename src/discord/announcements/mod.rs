// Discord glue for announcements: embed rendering and the interaction adapter.

pub mod formatter;
pub mod interaction_port;

pub use interaction_port::PoiseInteractionPort;
