// src/fetch/http.rs

use reqwest::blocking::Client;
use tracing::{debug, instrument};
use url::Url;

use super::{parse::parse_records, SheetId, SheetSource};
use crate::config::FetchConfig;
use crate::error::ConvertError;

/// Build the CSV export URL for `id` under `export_base`.
pub fn build_export_url(export_base: &str, id: &SheetId) -> Result<Url, ConvertError> {
    let raw = format!("{}/{}/export?format=csv", export_base.trim_end_matches('/'), id);
    Url::parse(&raw).map_err(|source| ConvertError::ExportUrl { url: raw, source })
}

/// Retrieves sheets over HTTP from the public CSV export endpoint.
pub struct HttpSheetSource {
    client: Client,
    config: FetchConfig,
}

impl HttpSheetSource {
    pub fn new(config: FetchConfig) -> Result<Self, ConvertError> {
        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|source| ConvertError::Transport {
            url: config.export_base.clone(),
            source,
        })?;
        Ok(Self { client, config })
    }

    /// Use a caller-built client (proxy, TLS or pool settings) with `config`'s endpoint.
    pub fn with_client(client: Client, config: FetchConfig) -> Self {
        Self { client, config }
    }
}

impl SheetSource for HttpSheetSource {
    #[instrument(level = "debug", skip(self, id), fields(id = %id))]
    fn fetch_records(&self, id: &SheetId) -> Result<Vec<Vec<String>>, ConvertError> {
        let url = build_export_url(&self.config.export_base, id)?;
        debug!(%url, "requesting CSV export");

        let resp = self
            .client
            .get(url.clone())
            .send()
            .map_err(|source| ConvertError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ConvertError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Buffer the whole body so a transport failure mid-body never yields partial rows.
        let body = resp.bytes().map_err(|source| ConvertError::Transport {
            url: url.to_string(),
            source,
        })?;
        debug!(bytes = body.len(), "export downloaded");

        parse_records(&body[..])
    }
}
