//! Remote Service Adapter Modules
//!
//! アップロード先リモートサービスのアダプターモジュール

pub mod client;
pub mod dry_run;
pub mod models;
