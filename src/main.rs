//! fireweb command line entry point

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fireweb_api::models::{self, Accounts, RecordReceipt, TagsAndCategories, Transactions, UserSettings};
use fireweb_app::{App, IconSet};
use fireweb_config::{Config, ConfigError};
use fireweb_router::Navigation;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::io::Read;
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "fireweb")]
#[command(version = "0.1.0")]
#[command(about = "Client for the Firefly III transaction bridge", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Override api.base_url from the config file
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a default configuration file
    InitConfig,
    #[command(flatten)]
    Client(ClientCommand),
}

/// Commands that need a bootstrapped app
#[derive(Subcommand, Debug)]
enum ClientCommand {
    /// Send raw text to the server-side transaction parser
    Parse {
        /// Text to parse; reads stdin when omitted or "-"
        text: Option<String>,
    },
    /// Record transactions from a JSON file ("-" for stdin)
    Record { file: PathBuf },
    /// List the latest transactions
    Transactions {
        /// Print the response body as returned
        #[arg(long)]
        raw: bool,
    },
    /// List accounts
    Accounts {
        #[arg(long)]
        raw: bool,
    },
    /// Show the default account settings
    DefaultAccount,
    /// Update default account settings, e.g. default_expense=1
    SetDefault {
        #[arg(required = true)]
        pairs: Vec<String>,
    },
    /// List known tags and categories
    Tags,
    /// Resolve a browser location to a view
    Resolve { location: String },
    /// List client-side routes
    Routes,
    /// List registered icon components
    Icons,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let command = match args.command {
        Command::InitConfig => {
            print!("{}", Config::generate_default());
            return Ok(());
        }
        Command::Client(command) => command,
    };

    let (mut config, missing) = load_config(&args.config)?;
    if let Some(url) = &args.api_url {
        config.api.base_url = url.clone();
        config.validate()?;
    }

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    if missing {
        log::warn!("Config file {} not found, using defaults", args.config.display());
    }

    let mut app = App::start(&config, &IconSet::builtin()).context("Failed to start app")?;
    let rt = Runtime::new()?;
    rt.block_on(run(&mut app, command))
}

/// A missing file falls back to defaults; any other config problem is fatal
fn load_config(path: &Path) -> Result<(Config, bool)> {
    match Config::load(path) {
        Ok(config) => Ok((config, false)),
        Err(ConfigError::FileNotFound { .. }) => Ok((Config::default(), true)),
        Err(e) => Err(anyhow::anyhow!("{}", e.to_details())),
    }
}

async fn run(app: &mut App, command: ClientCommand) -> Result<()> {
    match command {
        ClientCommand::Parse { text } => {
            let text = match text.as_deref() {
                None | Some("-") => read_stdin()?,
                Some(text) => text.to_string(),
            };
            print_json(&app.api().parse_transactions(&text).await?)
        }
        ClientCommand::Record { file } => {
            let content = if file.as_os_str() == "-" {
                read_stdin()?
            } else {
                std::fs::read_to_string(&file)
                    .with_context(|| format!("Failed to read {}", file.display()))?
            };
            let transactions: Value =
                serde_json::from_str(&content).context("Transactions file is not valid JSON")?;
            let ack = app.api().record_transactions(&transactions).await?;
            render::<RecordReceipt>(ack, false, |receipt| {
                println!("{}", receipt.message);
                if let Some(result) = &receipt.result {
                    println!("{}", serde_json::to_string_pretty(result).unwrap_or_default());
                }
            })
        }
        ClientCommand::Transactions { raw } => {
            let payload = app.api().get_transactions().await?;
            render::<Transactions>(payload, raw, |transactions| {
                for (id, t) in transactions {
                    println!(
                        "{:>6}  {:<25}  {:>12}  {:<14}  {}",
                        id,
                        t.date.as_deref().unwrap_or("-"),
                        t.amount.as_deref().unwrap_or("-"),
                        t.category_name.as_deref().unwrap_or("-"),
                        t.description.as_deref().unwrap_or(""),
                    );
                }
            })
        }
        ClientCommand::Accounts { raw } => {
            let payload = app.api().get_accounts().await?;
            render::<Accounts>(payload, raw, |accounts| {
                for (id, a) in accounts {
                    println!(
                        "{:>6}  {:<10}  {:<30}  {}",
                        id,
                        a.account_type,
                        a.name,
                        a.current_balance.as_deref().unwrap_or(""),
                    );
                }
            })
        }
        ClientCommand::DefaultAccount => {
            let payload = app.api().get_default_account().await?;
            render::<UserSettings>(payload, false, |settings| {
                println!("default_expense: {}", settings.default_expense.as_deref().unwrap_or("-"));
                println!("default_revenue: {}", settings.default_revenue.as_deref().unwrap_or("-"));
                if let Some(version) = &settings.version {
                    println!("server version:  {}", version);
                }
                if let Some(url) = &settings.firefly_iii_url {
                    println!("firefly url:     {}", url);
                }
                for (key, value) in &settings.extra {
                    println!("{}: {}", key, value);
                }
            })
        }
        ClientCommand::SetDefault { pairs } => {
            let data = parse_pairs(&pairs)?;
            print_json(&app.api().update_default_account(&data).await?)
        }
        ClientCommand::Tags => {
            let payload = app.api().get_tags_and_categories().await?;
            render::<TagsAndCategories>(payload, false, |found| {
                println!("categories: {}", found.categories.join(", "));
                println!("tags:       {}", found.tags.join(", "));
            })
        }
        ClientCommand::Resolve { location } => {
            let path = app.router().location_to_path(&location);
            match app.navigate(&path).await? {
                Navigation::Resolved { route, view, .. } => {
                    println!("{} -> {} ({})", path, view.id, route);
                    Ok(())
                }
                Navigation::Unresolved => anyhow::bail!("No route for {}", path),
            }
        }
        ClientCommand::Routes => {
            let router = app.router();
            for route in router.routes() {
                let strategy = if route.loader().is_loaded() { "eager" } else { "lazy" };
                println!(
                    "{:<22}  {:<20}  {:<6}  {}",
                    route.path(),
                    route.name(),
                    strategy,
                    router.href(route.path())
                );
            }
            Ok(())
        }
        ClientCommand::Icons => {
            for name in app.registry().names() {
                println!("{}", name);
            }
            Ok(())
        }
    }
}

/// `key=value` pairs to a JSON object; values that parse as JSON keep their type
fn parse_pairs(pairs: &[String]) -> Result<Map<String, Value>> {
    let mut data = Map::new();
    for pair in pairs {
        let (key, value) = pair
            .split_once('=')
            .with_context(|| format!("Expected key=value, got '{}'", pair))?;
        let key = key.trim();
        if key.is_empty() {
            anyhow::bail!("Empty key in '{}'", pair);
        }
        let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
        data.insert(key.to_string(), value);
    }
    Ok(data)
}

/// Print a payload through its typed view, or as JSON when `raw` is set or the shape is unexpected
fn render<T: DeserializeOwned>(payload: Value, raw: bool, show: impl FnOnce(&T)) -> Result<()> {
    if raw {
        return print_json(&payload);
    }
    match models::from_value::<T>(payload.clone()) {
        Ok(typed) => {
            show(&typed);
            Ok(())
        }
        Err(e) => {
            log::warn!("Unexpected payload shape ({}), printing as-is", e);
            print_json(&payload)
        }
    }
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_pairs() {
        let data = parse_pairs(&["default_expense=1".to_string(), "note=lunch money".to_string()]).unwrap();
        assert_eq!(Value::Object(data), json!({"default_expense": 1, "note": "lunch money"}));

        assert!(parse_pairs(&["novalue".to_string()]).is_err());
        assert!(parse_pairs(&["=3".to_string()]).is_err());
    }

    #[test]
    fn test_command_line_shapes() {
        let args = Args::try_parse_from(["fireweb", "init-config"]).unwrap();
        assert!(matches!(args.command, Command::InitConfig));

        let args = Args::try_parse_from(["fireweb", "--config", "x.yaml", "resolve", "/static/"]).unwrap();
        assert_eq!(args.config, PathBuf::from("x.yaml"));
        assert!(matches!(
            args.command,
            Command::Client(ClientCommand::Resolve { ref location }) if location == "/static/"
        ));

        assert!(Args::try_parse_from(["fireweb", "set-default"]).is_err());
    }

    #[test]
    fn test_missing_config_falls_back() {
        let (config, missing) = load_config(Path::new("/no/such/fireweb.yaml")).unwrap();
        assert!(missing);
        assert_eq!(config.api.timeout_secs, 100);
    }
}
