use crate::catalog::{ChannelEntry, ChannelStatus};
use crate::resolver::FALLBACK_CHANNEL;

/// Whether new blueprints may be posted into `entry`.
///
/// The channel must exist, must not be `general`, must be active and must
/// accept joins.
pub fn is_channel_postable(entry: Option<&ChannelEntry>) -> bool {
    entry.is_some_and(|entry| {
        entry.slug != FALLBACK_CHANNEL
            && entry.status == ChannelStatus::Active
            && entry.is_join_enabled
    })
}

/// Look up `slug` in `catalog` and apply [`is_channel_postable`].
pub fn is_slug_postable(slug: &str, catalog: &[ChannelEntry]) -> bool {
    is_channel_postable(catalog.iter().find(|entry| entry.slug == slug))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(slug: &str, status: ChannelStatus, join: bool) -> ChannelEntry {
        ChannelEntry {
            slug: slug.to_string(),
            tag_slug: slug.to_string(),
            aliases: Vec::new(),
            priority: 1,
            status,
            is_join_enabled: join,
            display_name: None,
            description: None,
        }
    }

    #[test]
    fn requires_active_joinable_non_general() {
        let catalog = vec![
            entry("general", ChannelStatus::Active, true),
            entry("open", ChannelStatus::Active, true),
            entry("closed", ChannelStatus::Active, false),
            entry("soon", ChannelStatus::ComingSoon, true),
        ];
        assert!(is_slug_postable("open", &catalog));
        assert!(!is_slug_postable("general", &catalog));
        assert!(!is_slug_postable("closed", &catalog));
        assert!(!is_slug_postable("soon", &catalog));
        assert!(!is_slug_postable("missing", &catalog));
    }
}
