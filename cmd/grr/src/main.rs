use anyhow::Context;
use clap::{Parser, Subcommand};
use pkg_constants::mimir::{
    DEFAULT_MIMIR_ADDRESS, DEFAULT_TIMEOUT_SECS, ENV_ADDRESS, ENV_API_KEY, ENV_TENANT,
};
use pkg_constants::paths::{DEFAULT_CONFIG, DEFAULT_FILETYPE};
use pkg_constants::resource::PROMETHEUS_RULE_GROUP_KIND;
use pkg_handlers::{Registry, RuleHandler};
use pkg_mimir::HttpRulesClient;
use pkg_mimir::http::HttpRulesConfig;
use pkg_types::config::{MimirConfigFile, load_config_file};
use pkg_types::resource::Resource;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "grr", about = "Manage Prometheus rule groups as code")]
struct Cli {
    /// Path to YAML config file
    #[arg(long, short, default_value = DEFAULT_CONFIG)]
    config: String,

    /// Ruler address, e.g. https://mimir.example.com
    #[arg(long, env = ENV_ADDRESS)]
    address: Option<String>,

    /// Tenant ID sent as X-Scope-OrgID
    #[arg(long, env = ENV_TENANT)]
    tenant: Option<String>,

    /// API key for basic auth
    #[arg(long, env = ENV_API_KEY, hide_env_values = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the UIDs of every remote resource
    List {
        /// Only list this kind
        #[arg(long, short)]
        kind: Option<String>,
    },
    /// Print one remote resource as YAML
    Get {
        /// Composite UID, e.g. team-a.latency
        uid: String,
        #[arg(long, short, default_value = PROMETHEUS_RULE_GROUP_KIND)]
        kind: String,
    },
    /// Push every resource in a YAML file
    Apply {
        #[arg(long, short)]
        file: String,
    },
    /// Write every remote resource to disk
    Pull {
        #[arg(long, short, default_value = ".")]
        dir: String,
    },
}

/// Merge: CLI args / env > config file > defaults.
fn resolve_config(cli: &Cli, file_cfg: MimirConfigFile) -> HttpRulesConfig {
    let address = cli
        .address
        .clone()
        .or(file_cfg.address)
        .unwrap_or_else(|| DEFAULT_MIMIR_ADDRESS.to_string());
    let mut config = HttpRulesConfig::new(&address);
    config.tenant_id = cli.tenant.clone().or(file_cfg.tenant_id);
    config.api_key = cli.api_key.clone().or(file_cfg.api_key);
    config.timeout = Duration::from_secs(file_cfg.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
    config
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    // Load config file (returns defaults if file not found)
    let file_cfg: MimirConfigFile = load_config_file(&cli.config)?;
    let config = resolve_config(&cli, file_cfg);
    info!("Ruler: {}", config.address);
    if let Some(ref tenant) = config.tenant_id {
        info!("Tenant: {}", tenant);
    }

    let client = Arc::new(HttpRulesClient::new(config)?);
    let mut registry = Registry::new();
    registry.register(Arc::new(RuleHandler::new(client)));

    match &cli.command {
        Commands::List { kind } => {
            let kinds: Vec<String> = match kind {
                Some(k) => vec![k.clone()],
                None => registry.kinds().map(String::from).collect(),
            };
            for kind in kinds {
                let handler = registry.get(&kind)?;
                let uids = handler.list_remote().await?;
                if uids.is_empty() {
                    println!("(no {} resources)", kind);
                }
                for uid in uids {
                    println!("{:<24} {}", kind, uid);
                }
            }
        }
        Commands::Get { uid, kind } => {
            let handler = registry.get(kind)?;
            let resource = handler.get_by_uid(uid).await?;
            print!("{}", resource.to_yaml()?);
        }
        Commands::Apply { file } => {
            let content = tokio::fs::read_to_string(file)
                .await
                .with_context(|| format!("failed to read {}", file))?;
            let resources = Resource::from_yaml_documents(&content)
                .with_context(|| format!("failed to parse {}", file))?;
            for resource in &resources {
                let applied = registry.apply(resource).await?;
                println!("{} {} {}", resource.kind, applied.uid, applied.outcome);
            }
        }
        Commands::Pull { dir } => {
            let kinds: Vec<String> = registry.kinds().map(String::from).collect();
            for kind in kinds {
                let handler = registry.get(&kind)?;
                for uid in handler.list_remote().await? {
                    let resource = handler.get_by_uid(&uid).await?;
                    let path =
                        Path::new(dir).join(handler.resource_file_path(&resource, DEFAULT_FILETYPE));
                    if let Some(parent) = path.parent() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                    tokio::fs::write(&path, resource.to_yaml()?).await?;
                    println!("{} {} -> {}", kind, uid, path.display());
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_flags_win_over_file() {
        let cli = parse(&["grr", "--address", "http://cli:9009", "--tenant", "cli-t", "list"]);
        let file_cfg = MimirConfigFile {
            address: Some("http://file:9009".to_string()),
            tenant_id: Some("file-t".to_string()),
            api_key: Some("file-key".to_string()),
            timeout_secs: Some(3),
        };
        let config = resolve_config(&cli, file_cfg);
        assert_eq!(config.address, "http://cli:9009");
        assert_eq!(config.tenant_id.as_deref(), Some("cli-t"));
        assert_eq!(config.api_key.as_deref(), Some("file-key"));
        assert_eq!(config.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let cli = Cli {
            config: DEFAULT_CONFIG.to_string(),
            address: None,
            tenant: None,
            api_key: None,
            command: Commands::Pull {
                dir: ".".to_string(),
            },
        };
        let config = resolve_config(&cli, MimirConfigFile::default());
        assert_eq!(config.address, DEFAULT_MIMIR_ADDRESS);
        assert!(config.tenant_id.is_none());
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_get_defaults_to_rule_groups() {
        let cli = parse(&["grr", "get", "team-a.latency"]);
        match cli.command {
            Commands::Get { uid, kind } => {
                assert_eq!(uid, "team-a.latency");
                assert_eq!(kind, PROMETHEUS_RULE_GROUP_KIND);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
