//! API client
//!
//! Wires config, transport, encoder and dispatcher together and holds the
//! table of known endpoints.
//!
//! ```rust,ignore
//! use igdb_query::{Client, ClientConfig, QueryOption};
//!
//! let client = Client::new(ClientConfig::new("your-key"))?;
//! let games = client.resource::<serde_json::Value>("games")?;
//! let hits = games.search("zelda", &[QueryOption::fields(["name"])]).await?;
//! ```

use crate::config::ClientConfig;
use crate::dispatch::Dispatcher;
use crate::encode::{encoder_for, QueryEncoder};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::options::QueryOption;
use crate::pagination::Pagination;
use crate::resource::Resource;
use crate::transport::Transport;
use crate::types::Endpoint;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Known resources as `(name, endpoint path)`
pub const ENDPOINTS: &[(&str, &str)] = &[
    ("characters", "characters"),
    ("collections", "collections"),
    ("companies", "companies"),
    ("credits", "credits"),
    ("game_engines", "game_engines"),
    ("feeds", "feeds"),
    ("franchises", "franchises"),
    ("games", "games"),
    ("game_modes", "game_modes"),
    ("genres", "genres"),
    ("keywords", "keywords"),
    ("pages", "pages"),
    ("people", "people"),
    ("player_perspectives", "player_perspectives"),
    ("platforms", "platforms"),
    ("pulses", "pulses"),
    ("pulse_groups", "pulse_groups"),
    ("pulse_sources", "pulse_sources"),
    ("release_dates", "release_dates"),
    ("reviews", "reviews"),
    ("themes", "themes"),
    ("titles", "titles"),
    ("game_versions", "game_versions"),
    ("test_dummies", "test_dummies"),
];

/// Entry point to the API
#[derive(Debug, Clone)]
pub struct Client {
    config: ClientConfig,
    dispatcher: Dispatcher,
    registry: HashMap<&'static str, Endpoint>,
}

impl Client {
    /// Create a client speaking HTTP with the given config
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::with_config(config.to_http_config())?;
        Ok(Self::with_transport(config, Arc::new(http)))
    }

    /// Create a client over any transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let encoder: Arc<dyn QueryEncoder> = Arc::from(encoder_for(config.wire_format));
        let dispatcher = Dispatcher::new(transport, encoder, config.tier);
        let registry = ENDPOINTS
            .iter()
            .map(|&(name, path)| (name, Endpoint::new(path)))
            .collect();

        debug!(
            tier = ?config.tier,
            wire_format = ?config.wire_format,
            "client created"
        );

        Self {
            config,
            dispatcher,
            registry,
        }
    }

    /// Config this client was built from
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Shared dispatcher
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Names of the known resources, sorted
    pub fn endpoints(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.registry.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Look up the endpoint registered under `name`
    pub fn endpoint(&self, name: &str) -> Result<&Endpoint> {
        self.registry.get(name).ok_or_else(|| Error::UnknownResource {
            name: name.to_string(),
        })
    }

    /// Typed handle on a known resource
    pub fn resource<T: DeserializeOwned>(&self, name: &str) -> Result<Resource<T>> {
        let endpoint = self.endpoint(name)?.clone();
        Ok(Resource::new(self.dispatcher.clone(), endpoint))
    }

    /// Typed handle on an arbitrary endpoint path
    pub fn resource_at<T: DeserializeOwned>(&self, endpoint: impl Into<Endpoint>) -> Resource<T> {
        Resource::new(self.dispatcher.clone(), endpoint.into())
    }

    /// Start a pagination over a known resource
    pub fn paginate(
        &self,
        name: &str,
        limit: i64,
        options: &[QueryOption],
    ) -> Result<Pagination> {
        let endpoint = self.endpoint(name)?.clone();
        Pagination::new(self.dispatcher.clone(), endpoint, limit, options.to_vec())
    }
}
