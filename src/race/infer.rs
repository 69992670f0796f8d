use std::sync::LazyLock;

use regex::Regex;

use super::definition::RaceType;

/// "(2000m"-style marker: an opening parenthesis, 3-4 digits, then `m`.
/// First match wins; titles carry stray digits and other parentheticals.
static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\((\d{3,4})m").unwrap());

pub const DEFAULT_DURATION_METERS: u32 = 2000;

pub fn duration_meters(event_title: &str) -> u32 {
    DURATION_RE
        .captures(event_title)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(DEFAULT_DURATION_METERS)
}

/// Any-case "relay" in the title makes it a relay; everything else races as
/// individuals.
pub fn race_type(event_title: &str) -> RaceType {
    if event_title.to_lowercase().contains("relay") {
        RaceType::Relay
    } else {
        RaceType::Individual
    }
}

// ── Tests ──
