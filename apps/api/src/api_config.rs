use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use steward_core::AppError;
use steward_infrastructure::HttpPushConfig;
use tracing_subscriber::EnvFilter;

/// Entry point selected by the first command-line argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCommand {
    Serve,
    Migrate,
    SetAdminClaim(String),
}

impl ApiCommand {
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self, AppError> {
        match args.next().as_deref() {
            None | Some("serve") => Ok(Self::Serve),
            Some("migrate") => Ok(Self::Migrate),
            Some("set-admin-claim") => args.next().map(Self::SetAdminClaim).ok_or_else(|| {
                AppError::Configuration("usage: steward-api set-admin-claim <uid>".to_owned())
            }),
            Some(other) => Err(AppError::Configuration(format!(
                "unknown command '{other}', expected 'serve', 'migrate' or 'set-admin-claim'"
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub enum PushProviderConfig {
    Console,
    Fcm(HttpPushConfig),
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub command: ApiCommand,
    pub database_url: Option<String>,
    pub redis_url: Option<String>,
    pub api_host: String,
    pub api_port: u16,
    pub cors_allowed_origin: Option<String>,
    pub id_token_secret: String,
    pub id_token_audience: Option<String>,
    pub trigger_shared_secret: String,
    pub push_provider: PushProviderConfig,
    pub push_timeout_ms: u64,
    pub delivery_ledger_ttl_seconds: u64,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let command = ApiCommand::from_args(env::args().skip(1))?;

        let database_url = optional_non_empty_env("DATABASE_URL");
        let redis_url = optional_non_empty_env("REDIS_URL");
        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);
        let cors_allowed_origin = optional_non_empty_env("CORS_ALLOWED_ORIGIN");

        let id_token_secret = required_non_empty_env("ID_TOKEN_SECRET")?;
        if id_token_secret.len() < 32 {
            return Err(AppError::Configuration(
                "ID_TOKEN_SECRET must be at least 32 characters".to_owned(),
            ));
        }
        let id_token_audience = optional_non_empty_env("ID_TOKEN_AUDIENCE");
        let trigger_shared_secret = required_non_empty_env("TRIGGER_SHARED_SECRET")?;

        let push_provider = match env::var("PUSH_PROVIDER")
            .unwrap_or_else(|_| "console".to_owned())
            .as_str()
        {
            "console" => PushProviderConfig::Console,
            "fcm" => PushProviderConfig::Fcm(HttpPushConfig {
                base_url: env::var("FCM_BASE_URL")
                    .unwrap_or_else(|_| "https://fcm.googleapis.com".to_owned()),
                project_id: required_non_empty_env("FCM_PROJECT_ID")?,
                access_token: required_non_empty_env("FCM_ACCESS_TOKEN")?,
            }),
            other => {
                return Err(AppError::Configuration(format!(
                    "PUSH_PROVIDER must be either 'console' or 'fcm', got '{other}'"
                )));
            }
        };

        let push_timeout_ms = parse_u64_env("PUSH_TIMEOUT_MS", 10_000)?;
        let delivery_ledger_ttl_seconds = parse_u64_env("DELIVERY_LEDGER_TTL_SECONDS", 86_400)?;

        Ok(Self {
            command,
            database_url,
            redis_url,
            api_host,
            api_port,
            cors_allowed_origin,
            id_token_secret,
            id_token_audience,
            trigger_shared_secret,
            push_provider,
            push_timeout_ms,
            delivery_ledger_ttl_seconds,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Configuration(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }

    pub fn required_database_url(&self) -> Result<&str, AppError> {
        self.database_url
            .as_deref()
            .ok_or_else(|| AppError::Configuration("DATABASE_URL is required".to_owned()))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn optional_non_empty_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    optional_non_empty_env(name)
        .ok_or_else(|| AppError::Configuration(format!("{name} is required")))
}

fn parse_u64_env(name: &str, default: u64) -> Result<u64, AppError> {
    match optional_non_empty_env(name) {
        Some(value) => value
            .parse::<u64>()
            .map_err(|error| AppError::Configuration(format!("invalid {name}: {error}"))),
        None => Ok(default),
    }
}
