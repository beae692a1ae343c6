// src/config.rs
use crate::constants::{DEFAULT_INDENT_UNIT, DEFAULT_OUTPUT_PATH, DEFAULT_STATE_PATH};
use crate::error::AppError;
use crate::types::{ApiKey, NotionId};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Environment variables consulted for the integration token, in order.
const TOKEN_VARS: [&str; 2] = ["NOTION_TOKEN", "NOTION_API_KEY"];

/// Environment variable naming the root page or database.
const ROOT_VAR: &str = "PAGE_ID";

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    #[command(subcommand)]
    pub command: Command,

    /// Notion integration token (defaults to NOTION_TOKEN or NOTION_API_KEY)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Crawl a page or database tree into the text corpus
    Crawl(CrawlArgs),
    /// List every page the integration can see
    ListPages,
}

#[derive(Args, Debug, Default)]
pub struct CrawlArgs {
    /// Root page/database URL or ID (defaults to PAGE_ID)
    pub root: Option<String>,

    /// Corpus file to write
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// File holding the ids processed by earlier runs
    #[arg(long, default_value = DEFAULT_STATE_PATH)]
    pub state: PathBuf,

    /// Write each line to disk immediately instead of once at the end
    #[arg(long, default_value_t = false)]
    pub write_through: bool,

    /// Append to an existing corpus instead of replacing it
    #[arg(long, default_value_t = false)]
    pub append: bool,

    /// Ignore the processed ids of earlier runs
    #[arg(long, default_value_t = false)]
    pub fresh: bool,

    /// Spaces written per depth unit
    #[arg(long, default_value_t = DEFAULT_INDENT_UNIT)]
    pub indent_unit: usize,
}

/// Resolved crawl configuration, validated before any request is made.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    pub api_key: ApiKey,
    pub root: NotionId,
    pub output_path: PathBuf,
    pub state_path: PathBuf,
    pub write_through: bool,
    pub append: bool,
    pub fresh: bool,
    pub indent_unit: usize,
}

impl HarvestConfig {
    /// Resolves a crawl configuration from CLI input and the environment.
    pub fn resolve(token: Option<String>, args: CrawlArgs) -> Result<Self, AppError> {
        Self::resolve_with(token, args, |name| std::env::var(name).ok())
    }

    /// Same as [`HarvestConfig::resolve`] with an explicit variable lookup.
    pub fn resolve_with(
        token: Option<String>,
        args: CrawlArgs,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let api_key = resolve_api_key_with(token, &env)?;

        let raw_root = args
            .root
            .or_else(|| env(ROOT_VAR))
            .filter(|root| !root.trim().is_empty())
            .ok_or_else(|| {
                AppError::MissingConfiguration(format!(
                    "no root given; pass a page/database URL or ID or set {}",
                    ROOT_VAR
                ))
            })?;
        let root = NotionId::parse(&raw_root)?;

        Ok(HarvestConfig {
            api_key,
            root,
            output_path: args.output,
            state_path: args.state,
            write_through: args.write_through,
            append: args.append,
            fresh: args.fresh,
            indent_unit: args.indent_unit,
        })
    }
}

/// Resolves and validates the integration token.
pub fn resolve_api_key(token: Option<String>) -> Result<ApiKey, AppError> {
    resolve_api_key_with(token, &|name: &str| std::env::var(name).ok())
}

fn resolve_api_key_with(
    token: Option<String>,
    env: &dyn Fn(&str) -> Option<String>,
) -> Result<ApiKey, AppError> {
    let raw = token
        .or_else(|| TOKEN_VARS.iter().find_map(|name| env(*name)))
        .ok_or_else(|| {
            AppError::MissingConfiguration(format!(
                "no Notion token; pass --token or set {}",
                TOKEN_VARS.join(" or ")
            ))
        })?;
    Ok(ApiKey::new(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const TOKEN: &str = "secret_abcdefghijklmnopqrstuvwxyz";
    const ROOT: &str = "550e8400e29b41d4a716446655440000";

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    fn args(root: Option<&str>) -> CrawlArgs {
        CrawlArgs {
            root: root.map(str::to_string),
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
            state: PathBuf::from(DEFAULT_STATE_PATH),
            indent_unit: DEFAULT_INDENT_UNIT,
            ..Default::default()
        }
    }

    #[test]
    fn root_and_token_come_from_environment() {
        let config = HarvestConfig::resolve_with(
            None,
            args(None),
            env(&[("NOTION_API_KEY", TOKEN), ("PAGE_ID", ROOT)]),
        )
        .unwrap();
        assert_eq!(config.root.as_str(), "550e8400-e29b-41d4-a716-446655440000");
        assert_eq!(config.api_key.as_str(), TOKEN);
        assert_eq!(config.state_path, PathBuf::from(DEFAULT_STATE_PATH));
    }

    #[test]
    fn explicit_values_win_over_environment() {
        let other_token = "ntn_zyxwvutsrqponmlkjihgfedcba";
        let config = HarvestConfig::resolve_with(
            Some(other_token.to_string()),
            args(Some(format!("https://www.notion.so/Team-Wiki-{}", ROOT).as_str())),
            env(&[("NOTION_TOKEN", TOKEN), ("PAGE_ID", "not-an-id")]),
        )
        .unwrap();
        assert_eq!(config.api_key.as_str(), other_token);
        assert_eq!(config.root.to_compact(), ROOT);
    }

    #[test]
    fn missing_pieces_are_configuration_errors() {
        let err = HarvestConfig::resolve_with(None, args(Some(ROOT)), env(&[])).unwrap_err();
        assert!(matches!(err, AppError::MissingConfiguration(_)));

        let err = HarvestConfig::resolve_with(None, args(None), env(&[("NOTION_TOKEN", TOKEN)]))
            .unwrap_err();
        assert!(matches!(err, AppError::MissingConfiguration(_)));

        let err = HarvestConfig::resolve_with(
            Some("bogus".to_string()),
            args(Some(ROOT)),
            env(&[]),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn cli_parses_crawl_flags() {
        let cli = CommandLineInput::try_parse_from([
            "notion-harvest",
            "crawl",
            ROOT,
            "--write-through",
            "--indent-unit",
            "2",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Command::Crawl(args) => {
                assert_eq!(args.root.as_deref(), Some(ROOT));
                assert!(args.write_through);
                assert!(!args.append);
                assert_eq!(args.indent_unit, 2);
                assert_eq!(args.output, PathBuf::from(DEFAULT_OUTPUT_PATH));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
