//! Logging Adapter
//!
//! `Diagnostic` を `log` クレートのレコードに変換する

use log::{Level, LevelFilter};

use crate::domain::services::diagnostics::{Diagnostic, DiagnosticSink, Severity};

/// `log` ファサードに転送するシンク
///
/// ターゲットは `gupload::<component>` になる
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnosticSink;

impl LogDiagnosticSink {
    pub fn new() -> Self {
        Self
    }

    pub fn level(severity: Severity) -> Level {
        match severity {
            Severity::Debug => Level::Debug,
            Severity::Info => Level::Info,
            Severity::Warn => Level::Warn,
        }
    }
}

impl DiagnosticSink for LogDiagnosticSink {
    fn emit(&self, diagnostic: Diagnostic) {
        let target = format!("gupload::{}", diagnostic.component().as_str());
        log::log!(
            target: &target,
            Self::level(diagnostic.severity()),
            "{}",
            diagnostic
        );
    }
}

/// `-v` の値からログレベルを決める
///
/// 1=DEBUG 2=INFO 3=WARNING 4=ERROR 5=CRITICAL（ERRORとして扱う）
pub fn level_filter(verbosity: u8) -> LevelFilter {
    match verbosity {
        1 => LevelFilter::Debug,
        2 => LevelFilter::Info,
        4 | 5 => LevelFilter::Error,
        _ => LevelFilter::Warn,
    }
}

/// ロガーを初期化する
///
/// `RUST_LOG` が設定されている場合はそちらを優先する
#[cfg_attr(coverage_nightly, coverage(off))]
pub fn init_logger(verbosity: u8) {
    env_logger::Builder::new()
        .filter_level(level_filter(verbosity))
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
