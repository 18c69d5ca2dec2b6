//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **UploadJob / BatchResult**: アップロードジョブとその順序付きバッチ
//! - **JobStatus**: ジョブごとの実行結果
//! - **ClassifiedPath**: パスの分類結果
//! - **Credentials**: ログイン情報

pub mod classified_path;
pub mod credentials;
pub mod job_status;
pub mod upload_job;
