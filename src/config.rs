// src/config.rs
use crate::api::ClientConfig;
use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_MAX_DEPTH, DEFAULT_MAX_NODES, DEFAULT_NOTION_VERSION,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SEARCH_LIMIT, DEFAULT_SITE_BASE_URL,
    DEFAULT_TITLE_PROPERTY, MAX_DEPTH_LIMIT, MAX_NODES_LIMIT,
};
use crate::converter::ConverterConfig;
use crate::error::AppError;
use crate::types::{ApiKey, BaseUrl, DatabaseId, NotionId, PageId, ValidationError};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable holding the integration token.
pub const API_KEY_ENV_VAR: &str = "NOTION_API_KEY";

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about = "Convert Notion pages into Markdown", long_about = None)]
pub struct CommandLineInput {
    #[command(subcommand)]
    pub command: CliCommand,

    /// Levels of nested children to expand below each page (0 = none)
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Maximum number of blocks fetched per page
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_NODES)]
    pub max_nodes: usize,

    /// Site that page links point at
    #[arg(long, global = true, default_value = DEFAULT_SITE_BASE_URL)]
    pub site_base: String,

    /// Base URL of the Notion REST API
    #[arg(long, global = true, default_value = DEFAULT_API_BASE_URL)]
    pub api_base: String,

    /// Notion-Version header sent with every request
    #[arg(long, global = true, default_value = DEFAULT_NOTION_VERSION)]
    pub notion_version: String,

    /// Per-request timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Overall deadline for the whole command in seconds
    #[arg(long, global = true)]
    pub deadline: Option<u64>,

    /// Write the Markdown to this file instead of stdout
    #[arg(short, long, global = true)]
    pub output_file: Option<String>,

    /// Leave the Properties section out of page output
    #[arg(long = "no-properties", global = true, action = clap::ArgAction::SetTrue)]
    pub no_properties: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

/// What to convert.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Convert one page, given its URL or ID
    Page { target: String },

    /// Convert the first page matching a search query
    Find { query: String },

    /// Convert the pages matching a search query
    Search {
        query: String,

        /// Maximum number of pages to convert (0 = no limit)
        #[arg(long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: usize,
    },

    /// Convert the row pages of a database, given its URL or ID
    Database {
        target: String,

        /// Only rows whose title contains this text
        #[arg(long)]
        query: Option<String>,

        /// Title property the query filters on
        #[arg(long, default_value = DEFAULT_TITLE_PROPERTY)]
        title_property: String,

        /// Maximum number of rows to convert (0 = no limit)
        #[arg(long, default_value_t = 0)]
        limit: usize,
    },
}

/// A command with its targets validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Page(PageId),
    Find(String),
    Search {
        query: String,
        limit: usize,
    },
    Database {
        id: DatabaseId,
        query: Option<String>,
        title_property: String,
        limit: usize,
    },
}

/// Resolved configuration, validated and ready to drive the pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub api_key: ApiKey,
    pub client: ClientConfig,
    pub converter: ConverterConfig,
    pub command: Command,
    pub output_file: Option<PathBuf>,
    pub include_properties: bool,
    pub deadline: Option<Duration>,
    pub verbose: bool,
}

impl PipelineConfig {
    /// Resolves a complete configuration from CLI input and the environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let api_key = std::env::var(API_KEY_ENV_VAR).map_err(|_| {
            AppError::MissingConfiguration(format!(
                "{} environment variable not set",
                API_KEY_ENV_VAR
            ))
        })?;
        Self::resolve_with_key(cli, api_key)
    }

    /// Resolves a configuration using an explicitly supplied API key.
    pub fn resolve_with_key(
        cli: CommandLineInput,
        api_key: impl Into<String>,
    ) -> Result<Self, AppError> {
        let api_key = ApiKey::new(api_key)?;

        let max_depth = within(cli.max_depth, 0, MAX_DEPTH_LIMIT)?;
        let max_nodes = within(cli.max_nodes, 1, MAX_NODES_LIMIT)?;
        if cli.timeout == 0 {
            return Err(ValidationError::OutOfBounds {
                value: 0,
                min: 1,
                max: usize::MAX,
            }
            .into());
        }

        let client = ClientConfig::new(BaseUrl::parse(&cli.api_base)?)
            .with_notion_version(cli.notion_version)
            .with_timeout(Duration::from_secs(cli.timeout));
        let converter = ConverterConfig {
            max_depth,
            max_nodes,
            site_base: BaseUrl::parse(&cli.site_base)?,
        };

        Ok(PipelineConfig {
            api_key,
            client,
            converter,
            command: resolve_command(cli.command)?,
            output_file: cli.output_file.map(PathBuf::from),
            include_properties: !cli.no_properties,
            deadline: cli.deadline.map(Duration::from_secs),
            verbose: cli.verbose,
        })
    }
}

fn resolve_command(command: CliCommand) -> Result<Command, AppError> {
    Ok(match command {
        CliCommand::Page { target } => Command::Page(PageId::from(&NotionId::parse(&target)?)),
        CliCommand::Find { query } => Command::Find(non_empty(query, "query")?),
        CliCommand::Search { query, limit } => Command::Search {
            query: non_empty(query, "query")?,
            limit,
        },
        CliCommand::Database {
            target,
            query,
            title_property,
            limit,
        } => Command::Database {
            id: DatabaseId::from(&NotionId::parse(&target)?),
            query: query.filter(|q| !q.trim().is_empty()),
            title_property: non_empty(title_property, "title property")?,
            limit,
        },
    })
}

fn within(value: usize, min: usize, max: usize) -> Result<usize, ValidationError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::OutOfBounds { value, min, max })
    }
}

fn non_empty(value: String, field: &'static str) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyField(field))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "secret_abcdefghijklmnopqrstuvwxyz";

    fn parse(args: &[&str]) -> CommandLineInput {
        let mut argv = vec!["notion2markdown"];
        argv.extend_from_slice(args);
        CommandLineInput::try_parse_from(argv).unwrap()
    }

    #[test]
    fn page_command_accepts_urls() {
        let cli = parse(&[
            "page",
            "https://www.notion.so/acme/Roadmap-0123456789abcdef0123456789abcdef",
        ]);
        let config = PipelineConfig::resolve_with_key(cli, KEY).unwrap();
        assert_eq!(
            config.command,
            Command::Page(PageId::new("01234567-89ab-cdef-0123-456789abcdef"))
        );
        assert_eq!(config.converter, ConverterConfig::default());
        assert!(config.include_properties);
        assert!(config.deadline.is_none());
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = parse(&[
            "search",
            "docs",
            "--limit",
            "3",
            "--max-depth",
            "1",
            "--no-properties",
            "--deadline",
            "20",
        ]);
        let config = PipelineConfig::resolve_with_key(cli, KEY).unwrap();
        assert_eq!(
            config.command,
            Command::Search {
                query: "docs".to_string(),
                limit: 3
            }
        );
        assert_eq!(config.converter.max_depth, 1);
        assert!(!config.include_properties);
        assert_eq!(config.deadline, Some(Duration::from_secs(20)));
    }

    #[test]
    fn database_defaults_title_property() {
        let cli = parse(&["database", "0123456789abcdef0123456789abcdef", "--query", "q3"]);
        let config = PipelineConfig::resolve_with_key(cli, KEY).unwrap();
        match config.command {
            Command::Database {
                query,
                title_property,
                limit,
                ..
            } => {
                assert_eq!(query.as_deref(), Some("q3"));
                assert_eq!(title_property, "Name");
                assert_eq!(limit, 0);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn rejects_out_of_bounds_limits() {
        let cli = parse(&["find", "docs", "--max-nodes", "0"]);
        let err = PipelineConfig::resolve_with_key(cli, KEY).unwrap_err();
        assert!(matches!(
            err,
            AppError::ValidationError(ValidationError::OutOfBounds { value: 0, .. })
        ));
    }

    #[test]
    fn rejects_blank_queries_and_bad_ids() {
        let cli = parse(&["find", "  "]);
        assert!(PipelineConfig::resolve_with_key(cli, KEY).is_err());

        let cli = parse(&["page", "not-an-id"]);
        assert!(PipelineConfig::resolve_with_key(cli, KEY).is_err());
    }

    #[test]
    fn rejects_malformed_api_keys() {
        let cli = parse(&["find", "docs"]);
        assert!(PipelineConfig::resolve_with_key(cli, "short").is_err());
    }
}
