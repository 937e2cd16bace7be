use crate::error::{OnsError, OnsResult};
use crate::models::NftMetadata;
use reqwest::Client;

/// Placeholder returned when avatar metadata cannot be fetched or parsed
pub const FALLBACK_AVATAR_URL: &str = "https://ons.money/img/avatar.png";

/// NFT metadata fetcher
pub struct MetadataFetcher {
    client: Client,
}

impl MetadataFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Fetch metadata JSON from the URI held by the NFT resolver
    pub async fn fetch(&self, uri: &str) -> OnsResult<NftMetadata> {
        tracing::debug!(uri, "fetching NFT metadata");

        if uri.starts_with("ipfs://") {
            self.fetch_from_ipfs(uri).await
        } else if uri.starts_with("http://") || uri.starts_with("https://") {
            self.fetch_from_http(uri).await
        } else {
            Err(OnsError::MetadataError(format!(
                "Unsupported URI format: {}",
                uri
            )))
        }
    }

    /// Fetch metadata from IPFS via public gateways
    async fn fetch_from_ipfs(&self, uri: &str) -> OnsResult<NftMetadata> {
        let cid = uri
            .strip_prefix("ipfs://")
            .ok_or_else(|| OnsError::MetadataError("Invalid IPFS URI".to_string()))?;

        let gateways = [
            format!("https://ipfs.io/ipfs/{}", cid),
            format!("https://gateway.pinata.cloud/ipfs/{}", cid),
            format!("https://cloudflare-ipfs.com/ipfs/{}", cid),
        ];

        let mut last_error = None;

        for gateway_url in &gateways {
            match self.fetch_from_http(gateway_url).await {
                Ok(metadata) => return Ok(metadata),
                Err(e) => {
                    tracing::warn!("IPFS gateway {} failed: {}", gateway_url, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            OnsError::MetadataError("All IPFS gateways failed".to_string())
        }))
    }

    /// Fetch metadata from an HTTP(S) URL
    async fn fetch_from_http(&self, url: &str) -> OnsResult<NftMetadata> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(OnsError::NetworkError(format!(
                "HTTP {}: Failed to fetch metadata",
                response.status()
            )));
        }

        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| OnsError::ParseError(format!("Failed to parse metadata JSON: {}", e)))
    }
}

impl Default for MetadataFetcher {
    fn default() -> Self {
        Self::new()
    }
}
