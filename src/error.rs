use thiserror::Error;

/// Failure modes of the extraction pipeline.
///
/// `MalformedUrl` ends the run (the entries index cannot be located).
/// `Network` is terminal for the page it occurred on; the caller logs it and
/// moves on to the next event. `PageStructure` never crosses a module
/// boundary as an error: the fetchers catch it, warn, and degrade to zero
/// results for that page.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("regatta URL has no /regatta segment: {0}")]
    MalformedUrl(String),

    #[error("fetch failed for {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{what} not found in {url}")]
    PageStructure { url: String, what: &'static str },
}
