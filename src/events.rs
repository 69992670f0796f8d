use std::sync::LazyLock;

use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{info, warn};

use crate::error::ScrapeError;
use crate::fetch;

/// The regatta home URL splits at this segment to build the entries index URL.
const REGATTA_SEGMENT: &str = "/regatta";
/// The site appends a fixed-width branding tail to every page title.
const TITLE_SUFFIX_CHARS: usize = 10;
const UNKNOWN_TITLE: &str = "Unknown Title";

static TITLE_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
static TABLE_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table").unwrap());
static TBODY_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tbody").unwrap());
static ANCHOR_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

/// One event row on the entries index: display title plus the site-relative
/// link to its entry list.
#[derive(Debug, Clone)]
pub struct EventRef {
    pub title: String,
    pub link: String,
}

pub struct EventListing {
    pub regatta_title: String,
    pub events: Vec<EventRef>,
}

/// Fetch the regatta's entries index and list every event on it, in document
/// order, duplicates included. A malformed URL or a failed fetch is fatal
/// (without the index there is nothing to process). A structurally
/// unexpected page is not: it degrades to zero events, title still
/// extracted when present.
pub async fn list_events(client: &Client, regatta_home_url: &str) -> Result<EventListing, ScrapeError> {
    let url = entries_index_url(regatta_home_url)?;

    info!("Fetching entries index: {}", url);
    let body = fetch::text(client, &url).await?;

    let listing = parse_index(&body, &url);
    info!(
        "Found {} events for {:?}",
        listing.events.len(),
        listing.regatta_title
    );
    Ok(listing)
}

/// Reinsert `/regatta/entries` between the halves of the home URL.
fn entries_index_url(regatta_home_url: &str) -> Result<String, ScrapeError> {
    let (front, back) = regatta_home_url
        .split_once(REGATTA_SEGMENT)
        .ok_or_else(|| ScrapeError::MalformedUrl(regatta_home_url.to_string()))?;
    Ok(format!("{front}{REGATTA_SEGMENT}/entries{back}"))
}

pub(crate) fn parse_index(body: &str, url: &str) -> EventListing {
    let doc = Html::parse_document(body);

    let regatta_title = doc
        .select(&TITLE_SEL)
        .next()
        .map(|t| strip_branding(&t.text().collect::<String>()))
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string());

    let tbody = doc
        .select(&TABLE_SEL)
        .next()
        .and_then(|table| table.select(&TBODY_SEL).next());
    let Some(tbody) = tbody else {
        warn!(
            "{}",
            ScrapeError::PageStructure {
                url: url.to_string(),
                what: "event table body",
            }
        );
        return EventListing {
            regatta_title,
            events: Vec::new(),
        };
    };

    let events = tbody
        .select(&ANCHOR_SEL)
        .filter_map(|a| {
            let link = a.value().attr("href")?;
            let text = a.text().collect::<String>();
            let title = text.trim();
            if title.is_empty() {
                return None;
            }
            Some(EventRef {
                title: title.to_string(),
                link: link.to_string(),
            })
        })
        .collect();

    EventListing {
        regatta_title,
        events,
    }
}

/// Drop the fixed branding tail (character count, not bytes) and trim.
/// Short titles collapse to an empty string rather than panicking.
fn strip_branding(page_title: &str) -> String {
    let total = page_title.chars().count();
    let keep = total.saturating_sub(TITLE_SUFFIX_CHARS);
    let trimmed: String = page_title.chars().take(keep).collect();
    trimmed.trim().to_string()
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_home_url_to_entries_index() {
        let url = entries_index_url("https://www.regattacentral.com/regatta?job_id=5793").unwrap();
        assert_eq!(
            url,
            "https://www.regattacentral.com/regatta/entries?job_id=5793"
        );
    }

    #[test]
    fn rewrite_keeps_path_tail() {
        let url = entries_index_url("https://www.regattacentral.com/regatta/12345/home").unwrap();
        assert_eq!(
            url,
            "https://www.regattacentral.com/regatta/entries/12345/home"
        );
    }

    #[test]
    fn url_without_segment_is_malformed() {
        let err = entries_index_url("https://www.example.com/results").unwrap_err();
        assert!(matches!(err, ScrapeError::MalformedUrl(_)));
    }

    #[test]
    fn index_fixture_lists_events_in_document_order() {
        let html = std::fs::read_to_string("tests/fixtures/entries_index.html").unwrap();
        let listing = parse_index(&html, "test://index");

        assert_eq!(listing.regatta_title, "Erg Sprints 2025");

        let titles: Vec<&str> = listing.events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Men's 2000m Singles",
                "Varsity Relay (500m)",
                "Open 8+",
                "Men's 2000m Singles",
            ],
            "trimmed titles, duplicates kept, textless/hrefless anchors skipped"
        );
        assert_eq!(listing.events[0].link, "/regatta/entries/5793/event/101");
    }

    #[test]
    fn second_table_is_ignored() {
        let html = std::fs::read_to_string("tests/fixtures/entries_index.html").unwrap();
        let listing = parse_index(&html, "test://index");
        assert!(listing.events.iter().all(|e| e.link != "/elsewhere"));
    }

    #[test]
    fn missing_table_degrades_to_zero_events_with_title() {
        let html = "<html><head><title>Spring Duel | RC Site</title></head><body><p>maintenance</p></body></html>";
        let listing = parse_index(html, "test://index");
        assert_eq!(listing.regatta_title, "Spring Duel");
        assert!(listing.events.is_empty());
    }

    #[test]
    fn missing_title_yields_sentinel() {
        let html = "<html><body><p>nothing here</p></body></html>";
        let listing = parse_index(html, "test://index");
        assert_eq!(listing.regatta_title, "Unknown Title");
    }

    #[test]
    fn short_title_strips_to_empty() {
        assert_eq!(strip_branding("short"), "");
    }
}
