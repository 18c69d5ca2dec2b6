//! # UploadJob Entity / BatchResult Value Object
//!
//! アップロード1件分の作業単位（ワークアウト）と、その順序付きコレクション

use std::path::{Path, PathBuf};

/// アップロードジョブ
///
/// アクティビティファイル1件と、任意の表示名・アクティビティ種別
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadJob {
    source_path: PathBuf,
    display_name: Option<String>,
    activity_type: Option<String>,
}

impl UploadJob {
    /// 新しいジョブを作成
    ///
    /// 空文字列の名前・種別は未指定として扱う
    ///
    /// # Arguments
    ///
    /// * `source_path` - アクティビティファイルのパス
    /// * `display_name` - リモート上の表示名
    /// * `activity_type` - リモート上のアクティビティ種別
    pub fn new(
        source_path: impl Into<PathBuf>,
        display_name: Option<String>,
        activity_type: Option<String>,
    ) -> Self {
        Self {
            source_path: source_path.into(),
            display_name: display_name.filter(|name| !name.is_empty()),
            activity_type: activity_type.filter(|kind| !kind.is_empty()),
        }
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn activity_type(&self) -> Option<&str> {
        self.activity_type.as_deref()
    }
}

/// 解決済みバッチ
///
/// 直接指定・ディレクトリ展開分が先、マニフェスト由来分が後に並ぶ。
/// 重複パスは除外しない。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    jobs: Vec<UploadJob>,
}

impl BatchResult {
    /// 新しいバッチを作成
    ///
    /// # Arguments
    ///
    /// * `jobs` - ジョブのベクター
    pub fn new(jobs: Vec<UploadJob>) -> Self {
        Self { jobs }
    }

    /// バッチ内のジョブ数を返す
    #[inline]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// バッチが空かどうかを返す
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// ジョブへの参照を返す
    pub fn jobs(&self) -> &[UploadJob] {
        &self.jobs
    }

    /// ジョブの所有権を移動して返す
    pub fn into_jobs(self) -> Vec<UploadJob> {
        self.jobs
    }

    /// 末尾にジョブを追加
    pub fn push(&mut self, job: UploadJob) {
        self.jobs.push(job);
    }
}

impl From<Vec<UploadJob>> for BatchResult {
    fn from(jobs: Vec<UploadJob>) -> Self {
        Self::new(jobs)
    }
}

impl From<BatchResult> for Vec<UploadJob> {
    fn from(batch: BatchResult) -> Self {
        batch.into_jobs()
    }
}

impl<'a> IntoIterator for &'a BatchResult {
    type Item = &'a UploadJob;
    type IntoIter = std::slice::Iter<'a, UploadJob>;

    fn into_iter(self) -> Self::IntoIter {
        self.jobs.iter()
    }
}
