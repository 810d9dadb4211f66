//! # Todo Service ライブラリ
//!
//! Todo API のユースケース・ハンドラ・ルーターを公開する。
//! バイナリ（`main.rs`）と統合テストの両方から利用する。

pub mod app;
pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;
