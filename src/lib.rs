//! # gupload
//!
//! ワークアウトファイル（.fit / .gpx / .tcx）をアクティビティサービスにアップロードするツール
//!
//! このプロジェクトはクリーンアーキテクチャを採用しており、以下の4層で構成されています：
//!
//! - **Domain層**: エンティティ、リポジトリトレイト、パス分類などのドメインサービス（外部依存なし）
//! - **Application層**: バッチ解決とアップロードのユースケース
//! - **Adapter層**: 外部システムとの統合（ファイルシステム, HTTP, 認証情報ファイル, ログ）
//! - **Driver層**: CLI、依存性注入、レポート出力

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
// カバレッジ計測時にネットワーク依存コードを除外するために使用
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

// Domain層（純粋なビジネスロジック）
pub mod domain;

// Application層（ユースケース）
pub mod application;

// Adapter層（Infrastructure）
pub mod adapter;

// Driver層（Presentation）
pub mod driver;
