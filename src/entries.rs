use std::sync::LazyLock;

use reqwest::Client;
use scraper::{Html, Selector};
use tracing::warn;

use crate::error::ScrapeError;
use crate::fetch;

/// Marker class on the cells whose hover tooltip carries the lineup.
static LINEUP_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".lineupTooltip").unwrap());
static TABLE_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table").unwrap());
static TBODY_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tbody").unwrap());

/// The tooltip packs several lines separated by literal `<br>` markers; only
/// the first line names the entry, behind a fixed-width seat/bow label.
const LINE_BREAK: &str = "<br>";
const SEAT_PREFIX_CHARS: usize = 3;

/// Fetch one event's entry page and return its competitor names, in document
/// order (which is lane order downstream). A failed fetch is an error for
/// the caller to catch at the event boundary; a page without the expected
/// table just means zero entries.
pub async fn fetch_entries(
    client: &Client,
    base_url: &str,
    event_link: &str,
) -> Result<Vec<String>, ScrapeError> {
    let url = format!("{base_url}{event_link}");
    let body = fetch::text(client, &url).await?;
    Ok(parse_entries(&body, &url))
}

pub(crate) fn parse_entries(body: &str, url: &str) -> Vec<String> {
    let doc = Html::parse_document(body);

    let tbody = doc
        .select(&TABLE_SEL)
        .next()
        .and_then(|table| table.select(&TBODY_SEL).next());
    let Some(tbody) = tbody else {
        warn!(
            "{}",
            ScrapeError::PageStructure {
                url: url.to_string(),
                what: "entry table body",
            }
        );
        return Vec::new();
    };

    tbody
        .select(&LINEUP_SEL)
        .filter_map(|cell| cell.value().attr("title"))
        .map(competitor_name)
        .collect()
}

/// First tooltip line minus the 3-character seat label. The label width is
/// fixed on the site; segments shorter than the label yield an empty name.
fn competitor_name(tooltip: &str) -> String {
    let first = tooltip.split(LINE_BREAK).next().unwrap_or("");
    first
        .char_indices()
        .nth(SEAT_PREFIX_CHARS)
        .map(|(i, _)| first[i..].to_string())
        .unwrap_or_default()
}

// ── Tests ──
