//! # Diagnostics Port
//!
//! 各コンポーネントが運用者向けの観測結果を出力するためのポート
//!
//! コンポーネントはグローバルなロガーを直接呼ばず、注入された `DiagnosticSink` に
//! 構造化された `Diagnostic` を渡す。ログへの変換はAdapter層で行う。

use std::fmt;
use std::path::PathBuf;

use crate::domain::entities::classified_path::ActivityFormat;
use crate::domain::entities::job_status::JobStatus;

/// 出力元コンポーネント
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Classifier,
    Resolver,
    Orchestrator,
}

impl Component {
    pub fn as_str(self) -> &'static str {
        match self {
            Component::Classifier => "classifier",
            Component::Resolver => "resolver",
            Component::Orchestrator => "orchestrator",
        }
    }
}

/// 重要度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Debug,
    Info,
    Warn,
}

/// 注釈付けの対象項目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationField {
    Name,
    Type,
}

impl fmt::Display for AnnotationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationField::Name => f.write_str("name"),
            AnnotationField::Type => f.write_str("type"),
        }
    }
}

/// 観測結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// 存在しないパス
    PathMissing { path: PathBuf },
    /// 通常ファイルではない（ディレクトリなど）
    NotRegularFile { path: PathBuf },
    /// 拡張子が受け付け対象外
    UnsupportedExtension { path: PathBuf, extension: String },
    /// アクティビティファイルとして受理
    ActivityFileAccepted { path: PathBuf, format: ActivityFormat },
    /// マニフェストとして受理
    ManifestAccepted { path: PathBuf },
    /// グロブパターンが何にも一致しなかった
    PatternUnmatched { pattern: String },
    /// ディレクトリを列挙できなかった
    DirectoryUnreadable { path: PathBuf, error: String },
    /// マニフェストを読めなかった
    ManifestUnreadable { path: PathBuf, error: String },
    /// マニフェストの行を解釈できなかった
    ManifestRowRejected {
        path: PathBuf,
        line: usize,
        error: String,
    },
    /// 複数ファイルのため名前の指定を無視した
    NameOverrideDropped { name: String, activity_files: usize },
    /// 重複ジョブを除外した
    DuplicatesRemoved { removed: usize },
    /// バッチの解決が完了した
    BatchResolved { jobs: usize },
    /// ログインに成功した
    LoginSucceeded { username: String },
    /// アップロードに失敗した
    UploadFailed { path: PathBuf, detail: String },
    /// 名前・種別の設定に失敗した
    AnnotationFailed {
        path: PathBuf,
        remote_id: String,
        field: AnnotationField,
        detail: Option<String>,
    },
    /// ジョブが完了した（成否問わず）
    JobFinished { status: JobStatus },
}

impl Diagnostic {
    pub fn component(&self) -> Component {
        match self {
            Diagnostic::PathMissing { .. }
            | Diagnostic::NotRegularFile { .. }
            | Diagnostic::UnsupportedExtension { .. }
            | Diagnostic::ActivityFileAccepted { .. }
            | Diagnostic::ManifestAccepted { .. } => Component::Classifier,
            Diagnostic::PatternUnmatched { .. }
            | Diagnostic::DirectoryUnreadable { .. }
            | Diagnostic::ManifestUnreadable { .. }
            | Diagnostic::ManifestRowRejected { .. }
            | Diagnostic::NameOverrideDropped { .. }
            | Diagnostic::DuplicatesRemoved { .. }
            | Diagnostic::BatchResolved { .. } => Component::Resolver,
            Diagnostic::LoginSucceeded { .. }
            | Diagnostic::UploadFailed { .. }
            | Diagnostic::AnnotationFailed { .. }
            | Diagnostic::JobFinished { .. } => Component::Orchestrator,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::ActivityFileAccepted { .. } | Diagnostic::JobFinished { .. } => {
                Severity::Debug
            }
            Diagnostic::ManifestAccepted { .. }
            | Diagnostic::DuplicatesRemoved { .. }
            | Diagnostic::BatchResolved { .. }
            | Diagnostic::LoginSucceeded { .. } => Severity::Info,
            _ => Severity::Warn,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::PathMissing { path } => {
                write!(f, "file does not exist, skipping path={:?}", path)
            }
            Diagnostic::NotRegularFile { path } => {
                write!(f, "not a regular file, skipping path={:?}", path)
            }
            Diagnostic::UnsupportedExtension { path, extension } => write!(
                f,
                "file extension is not valid, skipping path={:?} extension={:?}",
                path, extension
            ),
            Diagnostic::ActivityFileAccepted { path, format } => write!(
                f,
                "activity file accepted path={:?} format={}",
                path, format
            ),
            Diagnostic::ManifestAccepted { path } => {
                write!(f, "list file will be processed path={:?}", path)
            }
            Diagnostic::PatternUnmatched { pattern } => {
                write!(f, "pattern matched nothing pattern={:?}", pattern)
            }
            Diagnostic::DirectoryUnreadable { path, error } => write!(
                f,
                "directory could not be read, skipping path={:?} error={:?}",
                path, error
            ),
            Diagnostic::ManifestUnreadable { path, error } => write!(
                f,
                "list file could not be read, skipping path={:?} error={:?}",
                path, error
            ),
            Diagnostic::ManifestRowRejected { path, line, error } => write!(
                f,
                "list file row could not be parsed, skipping path={:?} line={} error={:?}",
                path, line, error
            ),
            Diagnostic::NameOverrideDropped {
                name,
                activity_files,
            } => write!(
                f,
                "name option valid only when one fitness file given, ignoring name={:?} activity_files={}",
                name, activity_files
            ),
            Diagnostic::DuplicatesRemoved { removed } => {
                write!(f, "duplicate jobs removed removed={}", removed)
            }
            Diagnostic::BatchResolved { jobs } => write!(f, "batch resolved jobs={}", jobs),
            Diagnostic::LoginSucceeded { username } => {
                write!(f, "login successful username={:?}", username)
            }
            Diagnostic::UploadFailed { path, detail } => write!(
                f,
                "upload failed path={:?} detail={:?}",
                path, detail
            ),
            Diagnostic::AnnotationFailed {
                path,
                remote_id,
                field,
                detail,
            } => {
                write!(
                    f,
                    "setting activity {} failed path={:?} remote_id={:?}",
                    field, path, remote_id
                )?;
                if let Some(detail) = detail {
                    write!(f, " detail={:?}", detail)?;
                }
                Ok(())
            }
            Diagnostic::JobFinished { status } => write!(
                f,
                "job finished path={:?} remote_id={:?} upload={} name={} type={}",
                status.source_path,
                status.remote_id,
                status.upload_outcome,
                status.name_outcome,
                status.type_outcome
            ),
        }
    }
}

/// 観測結果の出力先
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diagnostic: Diagnostic);
}

/// 出力された観測結果をメモリに保持するシンク（テスト用）
#[cfg(test)]
#[derive(Default)]
pub struct RecordingSink {
    events: std::sync::Mutex<Vec<Diagnostic>>,
}

#[cfg(test)]
impl RecordingSink {
    pub fn events(&self) -> Vec<Diagnostic> {
        self.events.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl DiagnosticSink for RecordingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        self.events.lock().unwrap().push(diagnostic);
    }
}
