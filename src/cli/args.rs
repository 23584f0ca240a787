use clap::{Args, Subcommand};

use crate::api::types::SearchKind;
use crate::api::ApiType;

/// Lookup arguments (used directly, without a subcommand)
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search key: corporate number(s), comma-separated, or corporate name
    pub search_key: Option<String>,

    /// Search type: number or name
    #[arg(short = 't', long = "type", value_parser = parse_search_kind)]
    pub kind: Option<SearchKind>,

    /// Backend: mof (National Tax Agency) or meti (gBizINFO)
    #[arg(short, long, default_value = "mof", value_parser = parse_api_type)]
    pub api: ApiType,

    /// Response format (mof: csv-sjis, csv, xml; meti: json)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Search options as a JSON object, e.g. '{"history":"1"}' or '{"detail":true}'
    #[arg(short, long, default_value = "{}")]
    pub options: String,
}

/// Configuration command arguments
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the resolved settings for both backends (credentials masked)
    Show,

    /// Show configuration file path
    Path,

    /// Create an empty configuration file
    Init,
}

fn parse_search_kind(s: &str) -> Result<SearchKind, String> {
    SearchKind::from_str(s)
        .ok_or_else(|| format!("invalid search type '{}' (valid: number, name)", s))
}

fn parse_api_type(s: &str) -> Result<ApiType, String> {
    ApiType::from_str(s).ok_or_else(|| format!("invalid API '{}' (valid: mof, meti)", s))
}
