//! # JobStatus Entity
//!
//! ジョブ1件ごとのアップロード・注釈付けの結果

use serde::{Serialize, Serializer};
use std::fmt;
use std::path::PathBuf;

/// 試行しなかった項目・IDがない場合の表示
pub const NOT_APPLICABLE: &str = "N/A";

/// 注釈付けに失敗した場合の表示
pub const FAILED_MARKER: &str = "FAIL!";

/// Display実装をそのまま文字列としてシリアライズ
///
/// レポートのJSON出力をテキスト出力と同じ表記に揃えるために使用
fn serialize_as_display<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: fmt::Display,
    S: Serializer,
{
    serializer.collect_str(value)
}

/// アップロード呼び出しの結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    Success,
    Failure,
}

impl UploadOutcome {
    pub fn is_success(self) -> bool {
        self == UploadOutcome::Success
    }
}

impl fmt::Display for UploadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadOutcome::Success => f.write_str("SUCCESS"),
            UploadOutcome::Failure => f.write_str("FAIL"),
        }
    }
}

/// 名前・種別設定の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationOutcome {
    /// 設定に成功した値
    Applied(String),
    /// 設定を試みたが失敗
    Failed,
    /// 試行していない
    NotAttempted,
}

impl fmt::Display for AnnotationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationOutcome::Applied(value) => f.write_str(value),
            AnnotationOutcome::Failed => f.write_str(FAILED_MARKER),
            AnnotationOutcome::NotAttempted => f.write_str(NOT_APPLICABLE),
        }
    }
}

/// ジョブの実行結果
///
/// 成否にかかわらず、投入された全ジョブについて1件ずつ生成される
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobStatus {
    pub source_path: PathBuf,
    /// リモートID（アップロード失敗時はエラー内容の場合がある）
    pub remote_id: String,
    #[serde(rename = "upload", serialize_with = "serialize_as_display")]
    pub upload_outcome: UploadOutcome,
    #[serde(rename = "name", serialize_with = "serialize_as_display")]
    pub name_outcome: AnnotationOutcome,
    #[serde(rename = "type", serialize_with = "serialize_as_display")]
    pub type_outcome: AnnotationOutcome,
}

impl JobStatus {
    /// アップロードに失敗したジョブの結果を作成
    pub fn failed_upload(source_path: PathBuf, remote_id: String) -> Self {
        Self {
            source_path,
            remote_id,
            upload_outcome: UploadOutcome::Failure,
            name_outcome: AnnotationOutcome::NotAttempted,
            type_outcome: AnnotationOutcome::NotAttempted,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "File: {}    ID: {}    Status: {}    Name: {}    Type: {}",
            self.source_path.display(),
            self.remote_id,
            self.upload_outcome,
            self.name_outcome,
            self.type_outcome
        )
    }
}
