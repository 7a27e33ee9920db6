//! Bot configuration loaded from the environment.
//!
//! `BOT_TOKEN` and `ADMIN_CHAT` are required; `DATABASE_URL`, `LOG_FILE` and
//! `TELEGRAM_API_URL` / `TELOXIDE_API_URL` are optional.

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:./fliegerbier.db";
pub const DEFAULT_LOG_FILE: &str = "logs/fliegerbier.log";

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    /// Chat whose members act as administrators; also receives authorization requests.
    pub admin_chat: i64,
    pub database_url: String,
    pub log_file: String,
    pub telegram_api_url: Option<String>,
}

impl TelegramConfig {
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Like [`TelegramConfig::from_env`], but `token` (e.g. from the command line) overrides `BOT_TOKEN`.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let admin_chat = env::var("ADMIN_CHAT")
            .map_err(|_| anyhow::anyhow!("ADMIN_CHAT not set"))?
            .trim()
            .parse::<i64>()
            .context("ADMIN_CHAT must be a numeric chat id")?;
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        Ok(Self {
            bot_token,
            admin_chat,
            database_url,
            log_file,
            telegram_api_url,
        })
    }

    /// Uses the given token and admin chat; everything else at its default.
    pub fn with_token(bot_token: String, admin_chat: i64) -> Self {
        Self {
            bot_token,
            admin_chat,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            log_file: DEFAULT_LOG_FILE.to_string(),
            telegram_api_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "BOT_TOKEN",
            "ADMIN_CHAT",
            "DATABASE_URL",
            "LOG_FILE",
            "TELEGRAM_API_URL",
            "TELOXIDE_API_URL",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_with_token() {
        let config = TelegramConfig::with_token("test_token".to_string(), -100);
        assert_eq!(config.bot_token, "test_token");
        assert_eq!(config.admin_chat, -100);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert!(config.telegram_api_url.is_none());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        env::set_var("BOT_TOKEN", "test_token");
        env::set_var("ADMIN_CHAT", "-100123");

        let config = TelegramConfig::from_env().unwrap();

        assert_eq!(config.bot_token, "test_token");
        assert_eq!(config.admin_chat, -100123);
        assert_eq!(config.database_url, "sqlite:./fliegerbier.db");
        assert_eq!(config.log_file, "logs/fliegerbier.log");
        assert!(config.telegram_api_url.is_none());
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_custom_values() {
        clear_env();
        env::set_var("BOT_TOKEN", "custom_token");
        env::set_var("ADMIN_CHAT", " 42 ");
        env::set_var("DATABASE_URL", "sqlite::memory:");
        env::set_var("LOG_FILE", "/tmp/fb.log");
        env::set_var("TELOXIDE_API_URL", "http://localhost:8081");

        let config = TelegramConfig::from_env().unwrap();

        assert_eq!(config.admin_chat, 42);
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.log_file, "/tmp/fb.log");
        assert_eq!(
            config.telegram_api_url.as_deref(),
            Some("http://localhost:8081")
        );
        clear_env();
    }

    #[test]
    #[serial]
    fn test_load_token_override() {
        clear_env();
        env::set_var("ADMIN_CHAT", "-1");

        assert!(TelegramConfig::from_env().is_err());
        let config = TelegramConfig::load(Some("cli_token".to_string())).unwrap();
        assert_eq!(config.bot_token, "cli_token");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_requires_admin_chat() {
        clear_env();
        env::set_var("BOT_TOKEN", "t");
        assert!(TelegramConfig::from_env().is_err());

        env::set_var("ADMIN_CHAT", "fliegerbier");
        let err = TelegramConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("ADMIN_CHAT"));
        clear_env();
    }
}
