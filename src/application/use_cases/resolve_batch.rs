//! # Resolve Batch Use Case
//!
//! コマンドライン引数からアップロードジョブのバッチを組み立てるユースケース

use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::application::dto::resolve_request::{CandidateCheck, ResolveRequest};
use crate::domain::entities::classified_path::ClassifiedPath;
use crate::domain::entities::upload_job::{BatchResult, UploadJob};
use crate::domain::errors::UploadError;
use crate::domain::repositories::path_repository::PathRepository;
use crate::domain::services::diagnostics::{Diagnostic, DiagnosticSink};
use crate::domain::services::file_classifier::FileClassifier;

/// 引数を分類した中間結果
#[derive(Debug, Default)]
struct ClassifiedArgs {
    activity_files: Vec<PathBuf>,
    directories: Vec<PathBuf>,
    manifest_files: Vec<PathBuf>,
}

/// 絶対パスにし、`.` と `..` を字句的に畳み込む
fn normalize_absolute(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            // ルートより上には出ない
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// バッチ解決ユースケース
///
/// ファイル・ディレクトリ・グロブ・マニフェストを展開し、順序付きのジョブ列にする
pub struct ResolveBatchUseCase<P: PathRepository> {
    path_repository: Arc<P>,
    classifier: FileClassifier<P>,
    sink: Arc<dyn DiagnosticSink>,
}

impl<P: PathRepository> ResolveBatchUseCase<P> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `path_repository` - パスリポジトリ
    /// * `sink` - 観測結果の出力先
    pub fn new(path_repository: Arc<P>, sink: Arc<dyn DiagnosticSink>) -> Self {
        let classifier = FileClassifier::new(path_repository.clone(), sink.clone());
        Self {
            path_repository,
            classifier,
            sink,
        }
    }

    /// バッチを解決する
    ///
    /// # Arguments
    ///
    /// * `request` - 解決要求
    ///
    /// # Returns
    ///
    /// 直接指定・ディレクトリ展開分、続いてマニフェスト由来分の順に並んだバッチ
    ///
    /// # Errors
    ///
    /// 有効なジョブが1件もない場合に `UploadError::EmptyBatch` を返す
    pub fn execute(&self, request: &ResolveRequest) -> Result<BatchResult, UploadError> {
        let mut args = self.classify_args(request);

        // ディレクトリは直下のみ。マニフェストは探さない
        for dir in &args.directories {
            args.activity_files.extend(self.expand_directory(dir));
        }

        let name_override = match &request.name_override {
            Some(name) if args.activity_files.len() != 1 => {
                self.sink.emit(Diagnostic::NameOverrideDropped {
                    name: name.clone(),
                    activity_files: args.activity_files.len(),
                });
                None
            }
            other => other.clone(),
        };

        let mut batch = BatchResult::default();
        for path in args.activity_files {
            batch.push(UploadJob::new(
                path,
                name_override.clone(),
                request.type_override.clone(),
            ));
        }

        for manifest in &args.manifest_files {
            self.append_manifest_jobs(manifest, &mut batch);
        }

        if batch.is_empty() {
            return Err(UploadError::EmptyBatch);
        }

        self.sink
            .emit(Diagnostic::BatchResolved { jobs: batch.len() });
        Ok(batch)
    }

    fn classify_args(&self, request: &ResolveRequest) -> ClassifiedArgs {
        let mut args = ClassifiedArgs::default();

        for arg in &request.paths {
            let candidates = self.path_repository.expand(arg);
            if candidates.is_empty() {
                self.sink.emit(Diagnostic::PatternUnmatched {
                    pattern: arg.clone(),
                });
                continue;
            }

            for candidate in candidates {
                let classified = match request.candidate_check {
                    CandidateCheck::Expanded => self.classifier.classify(&candidate),
                    CandidateCheck::OriginalArgument => {
                        self.classifier.classify_as(Path::new(arg), &candidate)
                    }
                };

                match classified {
                    ClassifiedPath::ActivityFile(path, _) => args.activity_files.push(path),
                    ClassifiedPath::ManifestFile(path) => args.manifest_files.push(path),
                    ClassifiedPath::Directory(path) => {
                        args.directories.push(normalize_absolute(&path));
                    }
                    ClassifiedPath::Invalid => {}
                }
            }
        }

        args
    }

    fn expand_directory(&self, dir: &Path) -> Vec<PathBuf> {
        match self.path_repository.list_dir(dir) {
            Ok(children) => children
                .into_iter()
                .filter(|child| self.classifier.check_activity_file(child).is_some())
                .collect(),
            Err(e) => {
                self.sink.emit(Diagnostic::DirectoryUnreadable {
                    path: dir.to_path_buf(),
                    error: format!("{:#}", e),
                });
                Vec::new()
            }
        }
    }

    fn append_manifest_jobs(&self, manifest: &Path, batch: &mut BatchResult) {
        let contents = match self.path_repository.read_manifest(manifest) {
            Ok(contents) => contents,
            Err(e) => {
                self.sink.emit(Diagnostic::ManifestUnreadable {
                    path: manifest.to_path_buf(),
                    error: format!("{:#}", e),
                });
                return;
            }
        };

        for (line, error) in contents.rejected {
            self.sink.emit(Diagnostic::ManifestRowRejected {
                path: manifest.to_path_buf(),
                line,
                error,
            });
        }

        for row in contents.rows {
            let path = PathBuf::from(&row.filename);
            if self.classifier.check_activity_file(&path).is_some() {
                batch.push(UploadJob::new(path, row.name, row.activity_type));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::collections::HashMap;

    use crate::domain::repositories::path_repository::{ManifestContents, ManifestRow, PathKind};
    use crate::domain::services::diagnostics::RecordingSink;

    #[derive(Default)]
    struct MockPathRepository {
        globs: HashMap<String, Vec<PathBuf>>,
        kinds: HashMap<PathBuf, PathKind>,
        dirs: HashMap<PathBuf, Vec<PathBuf>>,
        manifests: HashMap<PathBuf, ManifestContents>,
    }

    impl MockPathRepository {
        /// 存在するファイルを登録（グロブとしても自分自身に一致する）
        fn file(mut self, path: &str) -> Self {
            self.kinds.insert(PathBuf::from(path), PathKind::File);
            self.globs
                .insert(path.to_string(), vec![PathBuf::from(path)]);
            self
        }

        fn dir(mut self, path: &str, children: &[&str]) -> Self {
            self.kinds.insert(PathBuf::from(path), PathKind::Directory);
            self.globs
                .insert(path.to_string(), vec![PathBuf::from(path)]);
            self.dirs.insert(
                PathBuf::from(path),
                children.iter().map(PathBuf::from).collect(),
            );
            self
        }

        fn glob(mut self, pattern: &str, matches: &[&str]) -> Self {
            self.globs.insert(
                pattern.to_string(),
                matches.iter().map(PathBuf::from).collect(),
            );
            self
        }

        fn manifest(mut self, path: &str, rows: &[(&str, &str, &str)]) -> Self {
            let rows = rows
                .iter()
                .map(|(filename, name, kind)| ManifestRow {
                    filename: filename.to_string(),
                    name: Some(name.to_string()),
                    activity_type: Some(kind.to_string()),
                })
                .collect();
            self.manifests.insert(
                PathBuf::from(path),
                ManifestContents {
                    rows,
                    rejected: vec![],
                },
            );
            self.file(path)
        }
    }

    impl PathRepository for MockPathRepository {
        fn expand(&self, pattern: &str) -> Vec<PathBuf> {
            self.globs.get(pattern).cloned().unwrap_or_default()
        }

        fn kind(&self, path: &Path) -> PathKind {
            self.kinds.get(path).copied().unwrap_or(PathKind::Missing)
        }

        fn list_dir(&self, dir: &Path) -> Result<Vec<PathBuf>> {
            self.dirs
                .get(dir)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("permission denied"))
        }

        fn read_manifest(&self, path: &Path) -> Result<ManifestContents> {
            self.manifests
                .get(path)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("cannot open"))
        }
    }

    fn create_use_case(
        repo: MockPathRepository,
    ) -> (ResolveBatchUseCase<MockPathRepository>, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::default());
        (ResolveBatchUseCase::new(Arc::new(repo), sink.clone()), sink)
    }

    fn request(paths: &[&str], name: Option<&str>, kind: Option<&str>) -> ResolveRequest {
        ResolveRequest::new(
            paths.iter().map(|p| p.to_string()).collect(),
            name.map(str::to_string),
            kind.map(str::to_string),
        )
    }

    fn paths_of(batch: &BatchResult) -> Vec<PathBuf> {
        batch
            .jobs()
            .iter()
            .map(|job| job.source_path().to_path_buf())
            .collect()
    }

    #[test]
    fn test_single_file_keeps_name_override() {
        let (use_case, _) = create_use_case(MockPathRepository::default().file("ride.fit"));

        let batch = use_case
            .execute(&request(&["ride.fit"], Some("Morning Ride"), None))
            .unwrap();

        assert_eq!(batch.len(), 1);
        assert_eq!(batch.jobs()[0].display_name(), Some("Morning Ride"));
    }

    #[test]
    fn test_multiple_files_drop_name_override() {
        let (use_case, sink) = create_use_case(
            MockPathRepository::default()
                .file("ride.fit")
                .file("run.fit"),
        );

        let batch = use_case
            .execute(&request(&["ride.fit", "run.fit"], Some("X"), None))
            .unwrap();

        assert_eq!(batch.len(), 2);
        assert!(batch.jobs().iter().all(|job| job.display_name().is_none()));
        assert!(sink.events().contains(&Diagnostic::NameOverrideDropped {
            name: "X".to_string(),
            activity_files: 2,
        }));
    }

    #[test]
    fn test_type_override_applies_to_every_file_but_not_manifest_rows() {
        let (use_case, _) = create_use_case(
            MockPathRepository::default()
                .file("ride.fit")
                .file("run.gpx")
                .file("a.tcx")
                .manifest("batch.csv", &[("a.tcx", "Lake Loop", "cycling")]),
        );

        let batch = use_case
            .execute(&request(
                &["ride.fit", "batch.csv", "run.gpx"],
                None,
                Some("running"),
            ))
            .unwrap();

        let jobs = batch.jobs();
        assert_eq!(jobs.len(), 3);
        assert_eq!(jobs[0].activity_type(), Some("running"));
        assert_eq!(jobs[1].activity_type(), Some("running"));
        assert_eq!(jobs[2].source_path(), Path::new("a.tcx"));
        assert_eq!(jobs[2].activity_type(), Some("cycling"));
    }

    #[test]
    fn test_manifest_rows_do_not_count_for_name_override() {
        let (use_case, _) = create_use_case(
            MockPathRepository::default()
                .file("ride.fit")
                .file("a.tcx")
                .manifest("batch.csv", &[("a.tcx", "Lake Loop", "cycling")]),
        );

        let batch = use_case
            .execute(&request(&["ride.fit", "batch.csv"], Some("Solo"), None))
            .unwrap();

        assert_eq!(batch.jobs()[0].display_name(), Some("Solo"));
        assert_eq!(batch.jobs()[1].display_name(), Some("Lake Loop"));
    }

    #[test]
    fn test_manifest_skips_invalid_rows() {
        let (use_case, sink) = create_use_case(
            MockPathRepository::default().file("a.tcx").manifest(
                "batch.csv",
                &[
                    ("a.tcx", "Lake Loop", "cycling"),
                    ("missing.fit", "Ghost", "running"),
                ],
            ),
        );

        let batch = use_case.execute(&request(&["batch.csv"], None, None)).unwrap();

        assert_eq!(batch.len(), 1);
        let job = &batch.jobs()[0];
        assert_eq!(job.source_path(), Path::new("a.tcx"));
        assert_eq!(job.display_name(), Some("Lake Loop"));
        assert_eq!(job.activity_type(), Some("cycling"));
        assert!(sink.events().contains(&Diagnostic::PathMissing {
            path: PathBuf::from("missing.fit")
        }));
    }

    #[test]
    fn test_directory_expansion_keeps_valid_children_in_order() {
        let (use_case, _) = create_use_case(
            MockPathRepository::default()
                .dir(
                    "/rides",
                    &["/rides/b.fit", "/rides/notes.txt", "/rides/list.csv", "/rides/a.GPX"],
                )
                .file("/rides/b.fit")
                .file("/rides/notes.txt")
                .file("/rides/list.csv")
                .file("/rides/a.GPX"),
        );

        let batch = use_case.execute(&request(&["/rides"], None, None)).unwrap();

        assert_eq!(
            paths_of(&batch),
            vec![PathBuf::from("/rides/b.fit"), PathBuf::from("/rides/a.GPX")]
        );
    }

    #[test]
    fn test_direct_files_precede_directory_files_and_duplicates_remain() {
        let (use_case, _) = create_use_case(
            MockPathRepository::default()
                .dir("/rides", &["/rides/a.fit"])
                .file("/rides/a.fit")
                .file("/other/z.tcx"),
        );

        let batch = use_case
            .execute(&request(&["/rides", "/rides/a.fit", "/other/z.tcx"], None, None))
            .unwrap();

        assert_eq!(
            paths_of(&batch),
            vec![
                PathBuf::from("/rides/a.fit"),
                PathBuf::from("/other/z.tcx"),
                PathBuf::from("/rides/a.fit"),
            ]
        );
    }

    #[test]
    fn test_unreadable_directory_is_skipped() {
        let mut repo = MockPathRepository::default().file("ride.fit");
        repo.kinds
            .insert(PathBuf::from("/locked"), PathKind::Directory);
        repo.globs
            .insert("/locked".to_string(), vec![PathBuf::from("/locked")]);
        let (use_case, sink) = create_use_case(repo);

        let batch = use_case
            .execute(&request(&["/locked", "ride.fit"], None, None))
            .unwrap();

        assert_eq!(batch.len(), 1);
        assert!(sink
            .events()
            .iter()
            .any(|e| matches!(e, Diagnostic::DirectoryUnreadable { .. })));
    }

    #[test]
    fn test_glob_expands_to_activity_files() {
        let (use_case, _) = create_use_case(
            MockPathRepository::default()
                .file("a.fit")
                .file("b.fit")
                .glob("*.fit", &["a.fit", "b.fit"]),
        );

        let batch = use_case.execute(&request(&["*.fit"], None, None)).unwrap();

        assert_eq!(
            paths_of(&batch),
            vec![PathBuf::from("a.fit"), PathBuf::from("b.fit")]
        );
    }

    #[test]
    fn test_original_argument_check_rejects_glob_activity_files() {
        let (use_case, _) = create_use_case(
            MockPathRepository::default()
                .file("a.fit")
                .file("b.fit")
                .glob("*.fit", &["a.fit", "b.fit"]),
        );

        let result = use_case.execute(
            &request(&["*.fit"], None, None)
                .with_candidate_check(CandidateCheck::OriginalArgument),
        );

        assert!(matches!(result, Err(UploadError::EmptyBatch)));
    }

    #[test]
    fn test_original_argument_check_accepts_plain_file() {
        let (use_case, _) = create_use_case(MockPathRepository::default().file("ride.fit"));

        let batch = use_case
            .execute(
                &request(&["ride.fit"], None, None)
                    .with_candidate_check(CandidateCheck::OriginalArgument),
            )
            .unwrap();

        assert_eq!(paths_of(&batch), vec![PathBuf::from("ride.fit")]);
    }

    #[test]
    fn test_unmatched_pattern_is_dropped() {
        let (use_case, sink) = create_use_case(MockPathRepository::default().file("ride.fit"));

        let batch = use_case
            .execute(&request(&["nothing*.fit", "ride.fit"], None, None))
            .unwrap();

        assert_eq!(batch.len(), 1);
        assert_eq!(
            sink.events()[0],
            Diagnostic::PatternUnmatched {
                pattern: "nothing*.fit".to_string()
            }
        );
    }

    #[test]
    fn test_empty_arguments_fail() {
        let (use_case, _) = create_use_case(MockPathRepository::default());

        let result = use_case.execute(&request(&[], None, None));

        assert!(matches!(result, Err(UploadError::EmptyBatch)));
    }

    #[test]
    fn test_only_invalid_files_fail() {
        let (use_case, _) = create_use_case(MockPathRepository::default().file("notes.txt"));

        let result = use_case.execute(&request(&["notes.txt"], None, None));

        assert!(matches!(result, Err(UploadError::EmptyBatch)));
    }

    #[test]
    fn test_unreadable_manifest_is_skipped() {
        let (use_case, sink) = create_use_case(
            MockPathRepository::default()
                .file("ride.fit")
                .file("broken.csv"),
        );

        let batch = use_case
            .execute(&request(&["broken.csv", "ride.fit"], None, None))
            .unwrap();

        assert_eq!(batch.len(), 1);
        assert!(sink
            .events()
            .iter()
            .any(|e| matches!(e, Diagnostic::ManifestUnreadable { .. })));
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let (use_case, _) = create_use_case(
            MockPathRepository::default()
                .dir("/rides", &["/rides/a.fit", "/rides/b.tcx"])
                .file("/rides/a.fit")
                .file("/rides/b.tcx")
                .file("x.gpx")
                .manifest("batch.csv", &[("x.gpx", "Hill", "hiking")]),
        );
        let req = request(&["/rides", "batch.csv", "x.gpx"], Some("N"), Some("T"));

        let first = use_case.execute(&req).unwrap();
        let second = use_case.execute(&req).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_normalize_absolute_collapses_parent_dirs() {
        let root = std::path::absolute("/").unwrap();

        assert_eq!(
            normalize_absolute(&root.join("data/rides/../rides/./2024")),
            root.join("data/rides/2024")
        );
        assert_eq!(normalize_absolute(&root.join("../rides")), root.join("rides"));
    }

    #[test]
    fn test_normalize_absolute_relative_path() {
        let cwd = std::env::current_dir().unwrap();

        assert_eq!(normalize_absolute(Path::new("rides/../rides")), cwd.join("rides"));
    }
}
