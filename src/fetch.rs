use reqwest::Client;

use crate::error::ScrapeError;

/// One GET, body as text. Non-2xx statuses and transport failures both come
/// back as `ScrapeError::Network`. No retries.
pub async fn text(client: &Client, url: &str) -> Result<String, ScrapeError> {
    let net = |source: reqwest::Error| ScrapeError::Network {
        url: url.to_string(),
        source,
    };
    let response = client.get(url).send().await.map_err(net)?;
    let response = response.error_for_status().map_err(net)?;
    response.text().await.map_err(net)
}
