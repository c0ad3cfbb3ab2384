//! Command line and environment configuration.

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use chrono::TimeDelta;
use clap::Parser;
use todo_models::db::config::DbConfig;
use todo_web::auth_token::TokenService;

/// Every flag falls back to the environment variable named next to it. A
/// `.env` file in the working directory is loaded before parsing.
#[derive(Parser, Clone)]
#[command(name = "todod")]
#[command(about = "Authenticated todo list backend")]
pub struct Config {
    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Secret signing access tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Secret signing refresh tokens
    #[arg(long, env = "JWT_REFRESH_SECRET", hide_env_values = true)]
    pub jwt_refresh_secret: String,

    /// MongoDB connection string; without it data is kept in memory
    #[arg(long, env = "MONGODB_URI", hide_env_values = true)]
    pub mongodb_uri: Option<String>,

    #[arg(long, env = "MONGODB_DATABASE", default_value = "todo")]
    pub mongodb_database: String,

    /// Deadline for a single store operation
    #[arg(long, env = "QUERY_TIMEOUT_SECS", default_value_t = 100)]
    pub query_timeout_secs: u64,

    #[arg(
        long,
        env = "ACCESS_TOKEN_HOURS",
        default_value_t = 24,
        value_parser = clap::value_parser!(i64).range(1..=87_600)
    )]
    pub access_token_hours: i64,

    #[arg(
        long,
        env = "REFRESH_TOKEN_HOURS",
        default_value_t = 168,
        value_parser = clap::value_parser!(i64).range(1..=87_600)
    )]
    pub refresh_token_hours: i64,
}

impl Config {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            mongodb_uri: self.mongodb_uri.clone(),
            database: self.mongodb_database.clone(),
            query_timeout: Duration::from_secs(self.query_timeout_secs),
        }
    }

    pub fn token_service(&self) -> TokenService {
        TokenService::new(
            self.jwt_secret.as_bytes(),
            self.jwt_refresh_secret.as_bytes(),
            TimeDelta::hours(self.access_token_hours),
            TimeDelta::hours(self.refresh_token_hours),
        )
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("listen", &self.socket_addr())
            .field("store", &self.db_config().to_string())
            .field("query_timeout_secs", &self.query_timeout_secs)
            .field("access_token_hours", &self.access_token_hours)
            .field("refresh_token_hours", &self.refresh_token_hours)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [&str; 5] = [
        "todod",
        "--jwt-secret",
        "access-secret",
        "--jwt-refresh-secret",
        "refresh-secret",
    ];

    #[test]
    fn test_explicit_flags() {
        let args = REQUIRED.into_iter().chain([
            "--port",
            "9000",
            "--host",
            "127.0.0.1",
            "--mongodb-uri",
            "mongodb://user:pw@db:27017",
            "--query-timeout-secs",
            "5",
        ]);
        let config = Config::try_parse_from(args).unwrap();
        assert_eq!(config.socket_addr(), "127.0.0.1:9000".parse().unwrap());
        assert_eq!(config.db_config().query_timeout, Duration::from_secs(5));

        let debug = format!("{config:?}");
        assert!(!debug.contains("access-secret"));
        assert!(!debug.contains("pw@db"));
    }

    #[test]
    fn test_rejects_zero_ttl() {
        let args = REQUIRED.into_iter().chain(["--access-token-hours", "0"]);
        assert!(Config::try_parse_from(args).is_err());
    }
}
