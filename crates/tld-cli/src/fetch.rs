use std::time::Duration;

/// IANA root zone TLD list.
pub const IANA_TLD_URL: &str = "http://data.iana.org/TLD/tlds-alpha-by-domain.txt";

const USER_AGENT: &str = concat!("tld-regex/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Download a suffix list. A single attempt; any non-200 status is an error.
pub fn fetch_suffix_list(url: &str) -> Result<String, String> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| format!("Failed to start tokio runtime: {}", e))?;
    runtime.block_on(fetch_suffix_list_async(url))
}

async fn fetch_suffix_list_async(url: &str) -> Result<String, String> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| format!("Failed to build HTTP client: {}", e))?;

    log::debug!("GET {}", url);
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| format!("Failed to fetch '{}': {}", url, e))?;

    let status = response.status();
    if status != reqwest::StatusCode::OK {
        return Err(format!("Failed to fetch '{}': HTTP {}", url, status));
    }

    response
        .text()
        .await
        .map_err(|e| format!("Failed to read response from '{}': {}", url, e))
}
