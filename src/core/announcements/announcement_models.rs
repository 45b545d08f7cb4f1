// Domain models for announcements.
//
// These are plain structs - no serenity types. The Discord layer turns an
// `EmbedSpec` into a real embed right before sending it.

/// Every announcement title starts with this prefix.
pub const TITLE_PREFIX: &str = "SWIFT • ";

/// Title used for new eboard member introductions.
pub const EBOARD_TITLE: &str = "SWIFT • Meet the New Eboard";

/// Warm orange accent shared by all announcement embeds.
pub const ACCENT_COLOR: u32 = 16_755_520;

/// Picture shown when a new eboard member has no photo.
pub const DEFAULT_PICTURE_URL: &str = "https://www.calpolyswift.org/assets/images/swift.png";

pub const IMAGE_SIZE: u32 = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSpec {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

impl ImageSpec {
    /// A square image at the standard announcement size.
    pub fn square(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            width: IMAGE_SIZE,
            height: IMAGE_SIZE,
        }
    }
}

/// A rich embed, built once per invocation and sent as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedSpec {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub image: Option<ImageSpec>,
}

/// Everything `/new-eboard` collects about the new member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EboardMember {
    pub name: String,
    /// Discord user id, rendered as a mention.
    pub handle_user_id: u64,
    pub position: String,
    pub major: String,
    pub year: String,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub picture: Option<String>,
}

/// Free-form announcement from `/announce-embed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub title: String,
    pub content: String,
    pub picture: Option<String>,
}

/// The closed set of things the bot can announce.
/// Each variant knows how to build its own embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnouncementRequest {
    NewEboard(EboardMember),
    AnnounceEmbed(Announcement),
}

impl AnnouncementRequest {
    /// Slash command name this request came from.
    pub fn command_name(&self) -> &'static str {
        match self {
            AnnouncementRequest::NewEboard(_) => "new-eboard",
            AnnouncementRequest::AnnounceEmbed(_) => "announce-embed",
        }
    }

    pub fn to_embed(&self) -> EmbedSpec {
        match self {
            AnnouncementRequest::NewEboard(member) => eboard_embed(member),
            AnnouncementRequest::AnnounceEmbed(announcement) => announcement_embed(announcement),
        }
    }
}

// ============================================================================
// EMBED BUILDERS
// ============================================================================

/// Build the "Meet the New Eboard" embed.
///
/// Field order is fixed: name + mention, position, major, year, then an
/// optional links block.
pub fn eboard_embed(member: &EboardMember) -> EmbedSpec {
    let mut description = String::from("**About:**\n");
    description.push_str(&format!(
        " •  Name: {} | <@{}>\n",
        member.name, member.handle_user_id
    ));
    description.push_str(&format!(" •  Position: {}\n", member.position));
    description.push_str(&format!(" •  Major: {}\n", member.major));
    description.push_str(&format!(" •  Year: {}\n", member.year));

    let mut links = String::new();
    if let Some(website) = &member.website {
        links.push_str(&format!(" •  [Website]({})\n", website));
    }
    if let Some(linkedin) = &member.linkedin {
        links.push_str(&format!(" •  [LinkedIn]({})\n", linkedin));
    }
    if !links.is_empty() {
        description.push_str("\n**Links:**\n");
        description.push_str(&links);
    }

    let picture = member
        .picture
        .clone()
        .unwrap_or_else(|| DEFAULT_PICTURE_URL.to_string());

    EmbedSpec {
        title: EBOARD_TITLE.to_string(),
        description,
        color: ACCENT_COLOR,
        image: Some(ImageSpec::square(picture)),
    }
}

/// Build a general announcement embed.
///
/// Slash command inputs can't hold newlines, so users type a literal `\n`.
/// That escape is only expanded when no picture is attached; with a picture
/// the content goes out untouched.
pub fn announcement_embed(announcement: &Announcement) -> EmbedSpec {
    let title = format!("{}{}", TITLE_PREFIX, announcement.title);

    match &announcement.picture {
        Some(picture) => EmbedSpec {
            title,
            description: announcement.content.clone(),
            color: ACCENT_COLOR,
            image: Some(ImageSpec::square(picture.clone())),
        },
        None => EmbedSpec {
            title,
            description: announcement.content.replace("\\n", "\n"),
            color: ACCENT_COLOR,
            image: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> EboardMember {
        EboardMember {
            name: "Ada Lovelace".to_string(),
            handle_user_id: 1234567890,
            position: "President".to_string(),
            major: "Computer Science".to_string(),
            year: "Senior".to_string(),
            website: Some("https://ada.dev".to_string()),
            linkedin: Some("https://linkedin.com/in/ada".to_string()),
            picture: None,
        }
    }

    #[test]
    fn test_eboard_description_field_order() {
        let embed = eboard_embed(&member());
        let d = &embed.description;

        let positions: Vec<usize> = [
            "Ada Lovelace",
            "<@1234567890>",
            "President",
            "Computer Science",
            "Senior",
            "**Links:**",
            "https://ada.dev",
            "https://linkedin.com/in/ada",
        ]
        .iter()
        .map(|needle| d.find(needle).expect("field missing from description"))
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", d);
    }

    #[test]
    fn test_eboard_exact_description() {
        let embed = eboard_embed(&member());
        assert_eq!(
            embed.description,
            "**About:**\n \
             •  Name: Ada Lovelace | <@1234567890>\n \
             •  Position: President\n \
             •  Major: Computer Science\n \
             •  Year: Senior\n\
             \n**Links:**\n \
             •  [Website](https://ada.dev)\n \
             •  [LinkedIn](https://linkedin.com/in/ada)\n"
        );
        assert_eq!(embed.title, "SWIFT • Meet the New Eboard");
        assert_eq!(embed.color, 0xFFAB40);
    }

    #[test]
    fn test_eboard_without_links_has_no_links_section() {
        let mut m = member();
        m.website = None;
        m.linkedin = None;

        let embed = eboard_embed(&m);
        assert!(!embed.description.contains("Links"));
        assert!(embed.description.ends_with(" •  Year: Senior\n"));
    }

    #[test]
    fn test_eboard_single_link() {
        let mut m = member();
        m.website = None;

        let embed = eboard_embed(&m);
        assert!(embed.description.contains("**Links:**"));
        assert!(!embed.description.contains("[Website]"));
        assert!(embed.description.contains("[LinkedIn](https://linkedin.com/in/ada)"));
    }

    #[test]
    fn test_eboard_default_picture() {
        let embed = eboard_embed(&member());
        let image = embed.image.expect("eboard embeds always carry an image");
        assert_eq!(
            image.url,
            "https://www.calpolyswift.org/assets/images/swift.png"
        );
        assert_eq!((image.width, image.height), (500, 500));
    }

    #[test]
    fn test_eboard_custom_picture() {
        let mut m = member();
        m.picture = Some("https://example.com/ada.png".to_string());

        let embed = eboard_embed(&m);
        assert_eq!(embed.image.unwrap().url, "https://example.com/ada.png");
    }

    #[test]
    fn test_announcement_expands_newlines_without_picture() {
        let embed = announcement_embed(&Announcement {
            title: "Meeting".to_string(),
            content: "Line1\\nLine2".to_string(),
            picture: None,
        });

        assert_eq!(embed.title, "SWIFT • Meeting");
        assert_eq!(embed.description, "Line1\nLine2");
        assert!(embed.image.is_none());
    }

    #[test]
    fn test_announcement_keeps_content_with_picture() {
        let embed = announcement_embed(&Announcement {
            title: "Meeting".to_string(),
            content: "Line1\\nLine2".to_string(),
            picture: Some("https://example.com/flyer.png".to_string()),
        });

        assert_eq!(embed.description, "Line1\\nLine2");
        assert_eq!(
            embed.image,
            Some(ImageSpec::square("https://example.com/flyer.png"))
        );
    }

    #[test]
    fn test_request_dispatches_to_variant_builder() {
        let request = AnnouncementRequest::NewEboard(member());
        assert_eq!(request.command_name(), "new-eboard");
        assert_eq!(request.to_embed(), eboard_embed(&member()));

        let announcement = Announcement {
            title: "Hi".to_string(),
            content: "there".to_string(),
            picture: None,
        };
        let request = AnnouncementRequest::AnnounceEmbed(announcement.clone());
        assert_eq!(request.command_name(), "announce-embed");
        assert_eq!(request.to_embed(), announcement_embed(&announcement));
    }
}
