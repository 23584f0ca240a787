use log::info;
use std::io::{self, Write};

use crate::api::client::Payload;
use crate::api::types::{NameSearchOptions, NumberOptions, SearchKind};
use crate::api::CompanyInfoClient;
use crate::cli::args::SearchArgs;
use crate::config::Config;
use crate::error::{CompanyInfoError, Result};
use crate::output;
use crate::progress::{messages, LookupProgress, ProgressManager};

/// Execute a lookup and write the payload to stdout
pub async fn execute(args: SearchArgs, pretty: bool, quiet: bool, verbose: bool) -> Result<()> {
    let search_key = args
        .search_key
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| {
            CompanyInfoError::InvalidInput(
                "No search key provided. Use 'company-info --type number <NUMBER>'".to_string(),
            )
        })?;
    let kind = args.kind.ok_or_else(|| {
        CompanyInfoError::InvalidInput("--type is required (number or name)".to_string())
    })?;

    Config::load_env_files();
    let config = Config::load()?.resolve(args.api, args.format.as_deref())?;
    info!(
        "Using {} API v{} at {}",
        config.api_type,
        config.version,
        config.base_url()
    );

    let client = CompanyInfoClient::new(config)?;
    let progress_manager = ProgressManager::new(quiet, verbose);

    let payload = match kind {
        SearchKind::Number => {
            let options = NumberOptions::from_json(args.api, &args.options).map_err(invalid_options)?;
            search_number(&client, &search_key, &options, &progress_manager).await?
        }
        SearchKind::Name => {
            let options: NameSearchOptions =
                serde_json::from_str(&args.options).map_err(|e| invalid_options(e.into()))?;
            let progress = LookupProgress::new(
                &progress_manager,
                &messages::searching_name(args.api.display_name(), &search_key),
            );
            let payload = client.search_by_name(&search_key, &options).await?;
            progress.finish_and_clear();
            payload
        }
    };

    let out = output::render(&payload, pretty)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(&out)?;
    stdout.flush()?;
    Ok(())
}

async fn search_number(
    client: &CompanyInfoClient,
    number: &str,
    options: &NumberOptions,
    progress_manager: &ProgressManager,
) -> Result<Payload> {
    let progress = LookupProgress::new(
        progress_manager,
        &messages::searching_number(client.api_type().display_name(), number),
    );
    if let NumberOptions::Meti(meti) = options {
        if meti.detail {
            progress.set_message(&messages::fetching_details(8));
        }
    }

    let payload = client.search_by_number(number, options).await?;
    progress.finish_and_clear();
    Ok(payload)
}

fn invalid_options(e: CompanyInfoError) -> CompanyInfoError {
    CompanyInfoError::InvalidInput(format!("invalid --options: {}", e))
}
