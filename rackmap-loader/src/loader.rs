use std::sync::Arc;

use rackmap_core::{
    compare, parse, sample_positions, Diagnostics, LayoutConfig, ParseOptions, Position,
    TracingDiagnostics,
};
use tracing::{debug, instrument, warn};

use crate::error::LoadError;
use crate::source::SourceRef;

/// Fetches location exports and runs them through the parsing engine.
pub struct Loader {
    http: reqwest::Client,
    options: ParseOptions,
    layout: LayoutConfig,
    diagnostics: Arc<dyn Diagnostics>,
}

impl Loader {
    /// Creates a loader with its own HTTP client.
    pub fn new(options: ParseOptions, layout: LayoutConfig) -> Self {
        Self::with_client(reqwest::Client::new(), options, layout)
    }

    /// Creates a loader that shares an existing HTTP client.
    pub fn with_client(http: reqwest::Client, options: ParseOptions, layout: LayoutConfig) -> Self {
        Self {
            http,
            options,
            layout,
            diagnostics: Arc::new(TracingDiagnostics),
        }
    }

    /// Routes pipeline stage counts to `diagnostics` instead of `tracing`.
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Reads the raw text behind `source`.
    #[instrument(skip_all, fields(source = %source))]
    pub async fn fetch_text(&self, source: &SourceRef) -> Result<String, LoadError> {
        match source {
            SourceRef::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| LoadError::Io {
                        path: path.clone(),
                        source: e,
                    })
            }
            SourceRef::Url(url) => {
                debug!("Fetching location export");
                let response = self.http.get(url).send().await?;

                let status = response.status();
                if !status.is_success() {
                    return Err(LoadError::Status {
                        url: url.clone(),
                        status: status.as_u16(),
                        reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                    });
                }

                Ok(response.text().await?)
            }
        }
    }

    /// Parses raw text with this loader's options and layout.
    pub fn parse_text(&self, text: &str) -> Vec<Position> {
        parse(text, &self.options, &self.layout, self.diagnostics.as_ref())
    }

    /// Loads one snapshot.
    #[instrument(skip_all, fields(source = %source))]
    pub async fn load(&self, source: &SourceRef) -> Result<Vec<Position>, LoadError> {
        let text = self.fetch_text(source).await?;
        let positions = self.parse_text(&text);
        debug!(positions = positions.len(), "Loaded snapshot");
        Ok(positions)
    }

    /// Loads a baseline and a target snapshot concurrently.
    ///
    /// Fails if either source cannot be read.
    #[instrument(skip_all, fields(baseline = %baseline, target = %target))]
    pub async fn load_pair(
        &self,
        baseline: &SourceRef,
        target: &SourceRef,
    ) -> Result<(Vec<Position>, Vec<Position>), LoadError> {
        tokio::try_join!(self.load(baseline), self.load(target))
    }

    /// Loads two snapshots and merges them, see [`compare`].
    pub async fn load_with_comparison(
        &self,
        baseline: &SourceRef,
        target: &SourceRef,
        show_target: bool,
    ) -> Result<Vec<Position>, LoadError> {
        let (base, next) = self.load_pair(baseline, target).await?;
        Ok(compare(&base, &next, show_target, &self.layout))
    }

    /// The built-in sample dataset laid out with this loader's layout.
    pub fn sample(&self) -> Vec<Position> {
        sample_positions(&self.layout)
    }

    /// Loads `source`, substituting the sample dataset when the source
    /// cannot be read or holds no location codes.
    pub async fn load_or_sample(&self, source: &SourceRef) -> Vec<Position> {
        match self.load(source).await {
            Ok(positions) if !positions.is_empty() => positions,
            Ok(_) => {
                warn!(%source, "No location codes found, using sample data");
                self.sample()
            }
            Err(e) => {
                warn!(%source, error = %e, "Could not load locations, using sample data");
                self.sample()
            }
        }
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new(ParseOptions::default(), LayoutConfig::default())
    }
}
