//! # Domain Services
//!
//! エンティティ単体に属さないビジネスルール
//!
//! - **FileClassifier**: パスの分類
//! - **DeduplicationService**: 重複ジョブの除外（任意）
//! - **diagnostics**: 観測結果の出力ポート

pub mod deduplication;
pub mod diagnostics;
pub mod file_classifier;
