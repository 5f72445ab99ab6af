use std::path::PathBuf;

use reqwest::Url;

use crate::{PushError, PushResult};

/// Index used when `--index` is not given.
pub const DEFAULT_INDEX: &str = "fennec";

/// Everything a push run needs, resolved from the command line.
#[derive(Debug, Clone)]
pub struct PushConfig {
    pub es_url: Url,
    pub archive: PathBuf,
    pub index: String,
}

impl PushConfig {
    pub fn new(es_url: &str, archive: impl Into<PathBuf>, index: impl Into<String>) -> PushResult<Self> {
        let es_url = parse_es_url(es_url)?;
        let index = index.into();
        if index.trim().is_empty() {
            return Err(PushError::Config("index name must not be empty".into()));
        }
        Ok(PushConfig { es_url, archive: archive.into(), index })
    }

    /// Datastore URL without credentials or trailing slash, safe to print.
    pub fn display_url(&self) -> String {
        let mut url = self.es_url.clone();
        let _ = url.set_username("");
        let _ = url.set_password(None);
        url.as_str().trim_end_matches('/').to_string()
    }
}

fn parse_es_url(raw: &str) -> PushResult<Url> {
    let url = Url::parse(raw).map_err(|e| PushError::Config(format!("invalid datastore URL '{raw}': {e}")))?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(url),
        _ => Err(PushError::Config(format!(
            "invalid datastore URL '{raw}': expected http(s)://<host>[:<port>]"
        ))),
    }
}
