//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **ResolveBatchUseCase**: 引数からアップロードジョブのバッチを組み立てる
//! - **UploadWorkoutsUseCase**: ログインしてバッチを順にアップロードする

pub mod resolve_batch;
pub mod upload_workouts;
