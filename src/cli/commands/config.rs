use crate::api::ApiType;
use crate::cli::args::{ConfigArgs, ConfigCommand};
use crate::config::Config;
use crate::error::Result;

/// Execute config command
pub async fn execute(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Show => {
            Config::load_env_files();
            let config = Config::load()?;
            for api in [ApiType::Mof, ApiType::Meti] {
                println!("[{}] {}", api, api.display_name());
                match config.resolve(api, None) {
                    Ok(resolved) => {
                        println!("  credential: {}", mask_value(&resolved.credential));
                        println!("  version:    {}", resolved.version);
                        println!("  base URL:   {}", resolved.base_url());
                        println!("  format:     {:?}", resolved.response_type);
                    }
                    Err(e) => println!("  not configured: {}", e),
                }
            }
            Ok(())
        }
        ConfigCommand::Path => {
            let path = Config::config_file_path()?;
            println!("Configuration file: {}", path.display());
            Ok(())
        }
        ConfigCommand::Init => {
            let path = Config::initialize()?;
            println!("✅ Configuration initialized: {}", path.display());
            println!();
            println!("Set your credentials in that file, or in .env / .env.local:");
            println!("  MOF_APPLICATION_ID=...   (https://www.houjin-bangou.nta.go.jp/webapi/)");
            println!("  METI_API_TOKEN=...       (https://info.gbiz.go.jp/api/)");
            Ok(())
        }
    }
}

/// Mask sensitive values for display
fn mask_value(value: &str) -> String {
    let count = value.chars().count();
    if count > 5 {
        let prefix: String = value.chars().take(5).collect();
        format!("{}...({} characters)", prefix, count)
    } else {
        "*".repeat(count)
    }
}
