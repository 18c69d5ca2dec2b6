//! # Adapter Layer (Infrastructure)
//!
//! 外部システムとの統合を担当
//!
//! ## 構成要素
//!
//! - **config**: 認証情報ファイルの読み込み
//! - **connect**: リモートサービス（HTTP / dry-run）
//! - **logging**: 観測結果のログ出力
//! - **repositories**: ファイルシステム上のパス解決

pub mod config;
pub mod connect;
pub mod logging;
pub mod repositories;
