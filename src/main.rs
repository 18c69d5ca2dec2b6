//! gupload - Workout File Uploader
//!
//! ワークアウトファイルをアクティビティサービスにアップロード

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;

use gupload::adapter::logging::init_logger;
use gupload::driver::{Args, UploadWorkflow};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logger(args.verbose);

    // Create workflow with injected dependencies
    let workflow = UploadWorkflow::new();

    workflow.execute(args).await
}
