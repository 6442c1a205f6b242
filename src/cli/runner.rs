//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat, QueryArgs};
use crate::client::Client;
use crate::config::ClientConfig;
use crate::error::{Error, Result, ResultExt};
use serde_json::{json, Value};
use std::time::Instant;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Endpoints => self.endpoints(),
            Commands::Get {
                resource,
                ids,
                query,
            } => self.get(resource, ids, query).await,
            Commands::Index { resource, query } => self.index(resource, query).await,
            Commands::Search {
                resource,
                term,
                query,
            } => self.search(resource, term, query).await,
            Commands::Count { resource, query } => self.count(resource, query).await,
            Commands::Fields { resource } => self.fields(resource).await,
            Commands::Page {
                resource,
                page_size,
                max_pages,
                query,
            } => self.page(resource, *page_size, *max_pages, query).await,
        }
    }

    /// Resolve the client config: file (or defaults), then environment,
    /// then command-line flags
    pub fn build_config(&self) -> Result<ClientConfig> {
        let config = match &self.cli.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => ClientConfig::default(),
        };
        let mut config = config
            .with_env_overrides()
            .context("Invalid IGDB_* environment")?;

        if let Some(key) = &self.cli.api_key {
            config.api_key = Some(key.clone());
        }
        if let Some(tier) = self.cli.tier {
            config.tier = tier;
        }
        if let Some(format) = self.cli.wire_format {
            config.wire_format = format;
        }

        config.validate()?;
        Ok(config)
    }

    fn client(&self) -> Result<Client> {
        let config = self.build_config()?;
        if config.api_key.is_none() {
            return Err(Error::config(
                "No API key (use --api-key or set IGDB_API_KEY)",
            ));
        }
        Client::new(config)
    }

    /// List known resources. Needs no API key.
    fn endpoints(&self) -> Result<()> {
        let client = Client::new(self.build_config()?)?;
        self.output_message(&json!({
            "type": "ENDPOINTS",
            "endpoints": client.endpoints()
        }))
    }

    async fn get(&self, resource: &str, ids: &[i64], query: &QueryArgs) -> Result<()> {
        let client = self.client()?;
        let options = query.to_options()?;
        let records = no_results_as_empty(
            client
                .resource::<Value>(resource)?
                .list(ids, &options)
                .await,
        )?;
        self.output_records(resource, records)
    }

    async fn index(&self, resource: &str, query: &QueryArgs) -> Result<()> {
        let client = self.client()?;
        let options = query.to_options()?;
        let records =
            no_results_as_empty(client.resource::<Value>(resource)?.index(&options).await)?;
        self.output_records(resource, records)
    }

    async fn search(&self, resource: &str, term: &str, query: &QueryArgs) -> Result<()> {
        let client = self.client()?;
        let options = query.to_options()?;
        let records = no_results_as_empty(
            client
                .resource::<Value>(resource)?
                .search(term, &options)
                .await,
        )?;
        self.output_records(resource, records)
    }

    async fn count(&self, resource: &str, query: &QueryArgs) -> Result<()> {
        let client = self.client()?;
        let options = query.to_options()?;
        let count = client.resource::<Value>(resource)?.count(&options).await?;
        self.output_message(&json!({
            "type": "COUNT",
            "resource": resource,
            "count": count
        }))
    }

    async fn fields(&self, resource: &str) -> Result<()> {
        let client = self.client()?;
        let fields = client.resource::<Value>(resource)?.fields().await?;
        self.output_message(&json!({
            "type": "FIELDS",
            "resource": resource,
            "fields": fields
        }))
    }

    async fn page(
        &self,
        resource: &str,
        page_size: i64,
        max_pages: Option<u64>,
        query: &QueryArgs,
    ) -> Result<()> {
        let client = self.client()?;
        let options = query.to_options()?;
        let mut pagination = client.paginate(resource, page_size, &options)?;
        let start = Instant::now();

        loop {
            if max_pages.is_some_and(|max| pagination.pages_read() >= max) {
                debug!(resource, "page limit reached");
                break;
            }

            let offset = pagination.offset();
            let page = pagination.fetch_page::<Value>().await?;
            if !page.is_empty() {
                self.output_message(&json!({
                    "type": "PAGE",
                    "resource": resource,
                    "offset": offset,
                    "records": page.items
                }))?;
            }
            if !page.more_items {
                break;
            }
        }

        self.output_message(&json!({
            "type": "SUMMARY",
            "resource": resource,
            "pages": pagination.pages_read(),
            "records": pagination.total_read(),
            "exhausted": pagination.is_exhausted(),
            "duration_ms": start.elapsed().as_millis() as u64
        }))
    }

    fn output_records(&self, resource: &str, records: Vec<Value>) -> Result<()> {
        self.output_message(&json!({
            "type": "RECORDS",
            "resource": resource,
            "count": records.len(),
            "records": records
        }))
    }

    /// Output a JSON message
    fn output_message(&self, msg: &Value) -> Result<()> {
        let text = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(msg)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(msg)?,
        };
        println!("{text}");
        Ok(())
    }
}

/// Treat "nothing matched" as an empty result for display
fn no_results_as_empty(result: Result<Vec<Value>>) -> Result<Vec<Value>> {
    match result {
        Err(Error::NoResults) => Ok(Vec::new()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_flags_override_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "api_key: from-file\ntier: standard").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let cli = Cli::parse_from([
            "igdb",
            "-C",
            path.as_str(),
            "--api-key",
            "from-flag",
            "--tier",
            "pro",
            "endpoints",
        ]);
        let config = Runner::new(cli).build_config().unwrap();

        assert_eq!(config.api_key.as_deref(), Some("from-flag"));
        assert_eq!(config.tier, crate::types::Tier::Pro);
    }

    #[test]
    fn test_no_results_as_empty() {
        assert!(no_results_as_empty(Err(Error::NoResults)).unwrap().is_empty());
        assert!(no_results_as_empty(Err(Error::EmptyIds)).is_err());
    }
}
