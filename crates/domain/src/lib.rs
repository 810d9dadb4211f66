//! # Todos ドメイン層
//!
//! Todo API の中核となるドメインモデルを定義する。
//!
//! ## 依存関係の方向
//!
//! ```text
//! service → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、HTTP）には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`todo`] - Todo エンティティと値オブジェクト
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`clock`] - 時刻プロバイダ
//!
//! ## 使用例
//!
//! ```rust
//! use todos_domain::{DomainError, todo::TodoName};
//!
//! let name = TodoName::new("牛乳を買う").unwrap();
//! assert_eq!(name.as_str(), "牛乳を買う");
//!
//! let error = TodoName::new("   ").unwrap_err();
//! assert!(matches!(error, DomainError::Validation(_)));
//! ```

pub mod clock;
pub mod error;
pub mod todo;

pub use error::DomainError;
