//! Sequential naming for reserved SOS voice channels.

/// Prefix shared by every reserved SOS voice channel.
pub const CHANNEL_PREFIX: &str = "SOS QRF#";

/// Derives the next free channel name from the names currently in use.
///
/// Returns `SOS QRF#<max existing suffix + 1>`, or `SOS QRF#1` when no
/// channel with the prefix exists. Names whose suffix is not a number are
/// ignored. Pure function of the input; callers must pass a fresh listing on
/// every allocation because teardown frees names concurrently.
///
/// Channel names are external input: members can rename or create channels
/// with any suffix, so values at the integer ceiling are dropped rather than
/// incremented past it.
pub fn next_channel_name(existing: &[String]) -> String {
    let next = existing
        .iter()
        .filter_map(|name| name.strip_prefix(CHANNEL_PREFIX))
        .filter_map(|suffix| suffix.parse::<u64>().ok())
        .filter(|suffix| *suffix < u64::MAX)
        .max()
        .unwrap_or(0)
        + 1;

    format!("{}{}", CHANNEL_PREFIX, next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_channel_when_none_exist() {
        assert_eq!(next_channel_name(&[]), "SOS QRF#1");
    }

    #[test]
    fn increments_past_highest_suffix() {
        let existing = vec![
            "SOS QRF#1".to_string(),
            "SOS QRF#3".to_string(),
            "SOS QRF#foo".to_string(),
        ];

        assert_eq!(next_channel_name(&existing), "SOS QRF#4");
    }

    #[test]
    fn ignores_unrelated_channels() {
        let existing = vec!["General".to_string(), "AFK".to_string()];

        assert_eq!(next_channel_name(&existing), "SOS QRF#1");
    }

    #[test]
    fn gaps_are_not_reused() {
        let existing = vec!["SOS QRF#5".to_string()];

        assert_eq!(next_channel_name(&existing), "SOS QRF#6");
    }

    #[test]
    fn huge_suffixes_do_not_overflow() {
        let existing = vec![format!("SOS QRF#{}", u32::MAX)];

        assert_eq!(next_channel_name(&existing), "SOS QRF#4294967296");
    }

    #[test]
    fn ceiling_suffix_is_ignored() {
        let existing = vec![format!("SOS QRF#{}", u64::MAX), "SOS QRF#2".to_string()];

        assert_eq!(next_channel_name(&existing), "SOS QRF#3");
    }
}
