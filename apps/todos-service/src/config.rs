//! # Todo Service 設定
//!
//! 環境変数から Todo Service サーバーの設定を読み込む。

use std::env;

use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DATABASE_URL: &str = "sqlite://todos.sqlite?mode=rwc";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// 設定読み込みエラー
#[derive(Debug, Error)]
pub enum ConfigError {
   #[error("{name} の値が不正です: {value:?}")]
   InvalidValue { name: &'static str, value: String },
}

/// Todo Service サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoConfig {
   /// バインドアドレス
   pub host: String,
   /// ポート番号
   pub port: u16,
   /// データベース接続 URL
   pub database_url: String,
   /// 接続プールの最大接続数
   pub database_max_connections: u32,
}

impl TodoConfig {
   /// 環境変数から設定を読み込む
   ///
   /// | 変数名 | デフォルト |
   /// |--------|-----------|
   /// | `TODO_HOST` | `0.0.0.0` |
   /// | `TODO_PORT` | `8000` |
   /// | `DATABASE_URL` | `sqlite://todos.sqlite?mode=rwc` |
   /// | `DATABASE_MAX_CONNECTIONS` | `5` |
   pub fn from_env() -> Result<Self, ConfigError> {
      Self::from_lookup(|name| env::var(name).ok())
   }

   /// 任意の変数ソースから設定を読み込む
   pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
      Ok(Self {
         host: lookup("TODO_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
         port: parse_or("TODO_PORT", lookup("TODO_PORT"), DEFAULT_PORT)?,
         database_url: lookup("DATABASE_URL")
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
         database_max_connections: parse_or(
            "DATABASE_MAX_CONNECTIONS",
            lookup("DATABASE_MAX_CONNECTIONS"),
            DEFAULT_MAX_CONNECTIONS,
         )?,
      })
   }
}

fn parse_or<T: std::str::FromStr>(
   name: &'static str,
   value: Option<String>,
   default: T,
) -> Result<T, ConfigError> {
   match value {
      None => Ok(default),
      Some(value) => value
         .parse()
         .map_err(|_| ConfigError::InvalidValue { name, value }),
   }
}

#[cfg(test)]
mod tests {
   use std::collections::HashMap;

   use pretty_assertions::assert_eq;

   use super::*;

   fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
      let vars: HashMap<String, String> = vars
         .iter()
         .map(|(k, v)| (k.to_string(), v.to_string()))
         .collect();
      move |name| vars.get(name).cloned()
   }

   #[test]
   fn test_未設定の場合はデフォルト値を使う() {
      let config = TodoConfig::from_lookup(lookup_from(&[])).unwrap();

      assert_eq!(
         config,
         TodoConfig {
            host: "0.0.0.0".to_string(),
            port: 8000,
            database_url: "sqlite://todos.sqlite?mode=rwc".to_string(),
            database_max_connections: 5,
         }
      );
   }

   #[test]
   fn test_環境変数の値が優先される() {
      let config = TodoConfig::from_lookup(lookup_from(&[
         ("TODO_HOST", "127.0.0.1"),
         ("TODO_PORT", "3000"),
         ("DATABASE_URL", "sqlite::memory:"),
         ("DATABASE_MAX_CONNECTIONS", "1"),
      ]))
      .unwrap();

      assert_eq!(config.host, "127.0.0.1");
      assert_eq!(config.port, 3000);
      assert_eq!(config.database_url, "sqlite::memory:");
      assert_eq!(config.database_max_connections, 1);
   }

   #[test]
   fn test_不正なポート番号はエラーになる() {
      let result = TodoConfig::from_lookup(lookup_from(&[("TODO_PORT", "http")]));

      assert!(matches!(
         result,
         Err(ConfigError::InvalidValue { name: "TODO_PORT", .. })
      ));
   }
}
