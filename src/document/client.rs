// src/document/client.rs
use crate::utils::error::DocumentError;
use reqwest::header;
use std::time::Duration;

// Identify ourselves to report servers; some government hosts reject
// requests without a User-Agent.
const DOWNLOAD_USER_AGENT: &str = "figure_scanner/0.1 (report analysis tool)";
// Small delay before each request to stay polite toward public servers.
const DOWNLOAD_DELAY_MS: u64 = 150;

/// Creates a reqwest client configured for document downloads.
fn build_download_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(DOWNLOAD_USER_AGENT)
        .timeout(Duration::from_secs(120))
        .build()
}

/// Downloads a report document from its URL into memory.
pub async fn download_document(url: &str) -> Result<Vec<u8>, DocumentError> {
    let client = build_download_client()?; // Propagate client build error if any

    tracing::info!("Downloading document from: {}", url);

    tokio::time::sleep(Duration::from_millis(DOWNLOAD_DELAY_MS)).await;

    let response = client
        .get(url)
        .header(header::ACCEPT, "application/pdf,application/octet-stream,*/*")
        .send()
        .await?; // Propagates reqwest::Error as DocumentError::Network

    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DocumentError::DocNotFound(url.to_string()));
        }
        return Err(DocumentError::Http(status));
    }

    let body = response.bytes().await?;
    tracing::debug!("Successfully downloaded {} bytes from {}", body.len(), url);

    Ok(body.to_vec())
}

/// Whether an input argument names a remote document rather than a
/// local file path.
pub fn is_remote_input(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_inputs_are_urls_only() {
        assert!(is_remote_input("https://example.gov/reports/fy25.pdf"));
        assert!(is_remote_input("http://example.gov/fy25.pdf"));
        assert!(!is_remote_input("./reports/fy25.pdf"));
        assert!(!is_remote_input("C:/reports/fy25.pdf"));
    }
}
