//! # Deduplication Service
//!
//! 重複排除サービス
//!
//! バッチ解決自体は重複を残す。重複を除きたい場合に、解決後のバッチへ適用する。

use std::collections::HashSet;
use std::path::PathBuf;

use crate::domain::entities::upload_job::BatchResult;

/// 重複排除サービス
///
/// 同じファイルを指すジョブを1件にまとめるビジネスロジック
pub struct DeduplicationService;

impl DeduplicationService {
    /// 重複を除外したバッチを返す
    ///
    /// 同じ `source_path` を持つジョブのうち最初の1件だけを残し、順序は保つ
    ///
    /// # Arguments
    ///
    /// * `batch` - フィルタリング対象のバッチ
    /// * `enabled` - 重複排除が有効かどうか
    ///
    /// # Returns
    ///
    /// 重複が除外されたバッチ
    pub fn filter_duplicates(batch: BatchResult, enabled: bool) -> BatchResult {
        if !enabled {
            return batch;
        }

        let mut seen = HashSet::new();
        batch
            .into_jobs()
            .into_iter()
            .filter(|job| seen.insert(job.source_path().to_path_buf()))
            .collect::<Vec<_>>()
            .into()
    }

    /// ジョブのパスリストを抽出
    pub fn extract_paths(batch: &BatchResult) -> Vec<PathBuf> {
        batch
            .jobs()
            .iter()
            .map(|job| job.source_path().to_path_buf())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::upload_job::UploadJob;

    fn create_test_job(path: &str, name: Option<&str>) -> UploadJob {
        UploadJob::new(path, name.map(str::to_string), None)
    }

    #[test]
    fn test_filter_duplicates_keeps_first() {
        let batch = BatchResult::new(vec![
            create_test_job("/rides/a.fit", None),
            create_test_job("/rides/b.fit", None),
            create_test_job("/rides/a.fit", Some("Lake Loop")),
        ]);

        let result = DeduplicationService::filter_duplicates(batch, true);

        assert_eq!(result.len(), 2);
        assert_eq!(
            DeduplicationService::extract_paths(&result),
            vec![PathBuf::from("/rides/a.fit"), PathBuf::from("/rides/b.fit")]
        );
        assert!(result.jobs()[0].display_name().is_none());
    }

    #[test]
    fn test_filter_duplicates_disabled() {
        let batch = BatchResult::new(vec![
            create_test_job("a.fit", None),
            create_test_job("a.fit", None),
        ]);

        let result = DeduplicationService::filter_duplicates(batch, false);

        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_filter_duplicates_no_duplicates() {
        let batch = BatchResult::new(vec![
            create_test_job("a.fit", None),
            create_test_job("b.tcx", None),
        ]);

        let result = DeduplicationService::filter_duplicates(batch.clone(), true);

        assert_eq!(result, batch);
    }

    #[test]
    fn test_extract_paths_empty() {
        let paths = DeduplicationService::extract_paths(&BatchResult::default());
        assert_eq!(paths.len(), 0);
    }
}
