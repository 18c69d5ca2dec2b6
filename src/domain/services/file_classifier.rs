//! # File Classifier Service
//!
//! パス1件がアクティビティファイル・マニフェスト・ディレクトリのどれに当たるかを判定する

use std::path::Path;
use std::sync::Arc;

use crate::domain::entities::classified_path::{
    display_extension, is_manifest_path, ActivityFormat, ClassifiedPath,
};
use crate::domain::repositories::path_repository::{PathKind, PathRepository};
use crate::domain::services::diagnostics::{Diagnostic, DiagnosticSink};

/// ファイル分類サービス
///
/// 判定の失敗はエラーではなく `ClassifiedPath::Invalid` として返す
pub struct FileClassifier<P: PathRepository> {
    paths: Arc<P>,
    sink: Arc<dyn DiagnosticSink>,
}

impl<P: PathRepository> FileClassifier<P> {
    /// 新しいサービスを作成
    ///
    /// # Arguments
    ///
    /// * `paths` - パスリポジトリ
    /// * `sink` - 観測結果の出力先
    pub fn new(paths: Arc<P>, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { paths, sink }
    }

    /// アクティビティファイルとして有効か検査する
    ///
    /// 通常ファイルとして存在し、拡張子が受け付け対象であれば形式を返す。
    /// 無効な場合は理由を警告として出力する。
    pub fn check_activity_file(&self, path: &Path) -> Option<ActivityFormat> {
        match self.probe_activity_file(path) {
            Ok(format) => {
                self.sink.emit(Diagnostic::ActivityFileAccepted {
                    path: path.to_path_buf(),
                    format,
                });
                Some(format)
            }
            Err(reason) => {
                self.sink.emit(reason);
                None
            }
        }
    }

    /// マニフェストとして有効か検査する
    pub fn check_manifest(&self, path: &Path) -> bool {
        is_manifest_path(path) && self.paths.kind(path) == PathKind::File
    }

    /// パスを分類する
    ///
    /// 判定順はアクティビティファイル、マニフェスト、ディレクトリ
    pub fn classify(&self, path: &Path) -> ClassifiedPath {
        self.classify_as(path, path)
    }

    /// アクティビティファイルの判定だけ別のパスで行って分類する
    ///
    /// # Arguments
    ///
    /// * `activity_probe` - アクティビティファイル判定に使うパス（結果にもこのパスが入る）
    /// * `candidate` - マニフェスト・ディレクトリ判定に使うパス
    pub fn classify_as(&self, activity_probe: &Path, candidate: &Path) -> ClassifiedPath {
        let activity = self.probe_activity_file(activity_probe);
        if let Ok(format) = activity {
            self.sink.emit(Diagnostic::ActivityFileAccepted {
                path: activity_probe.to_path_buf(),
                format,
            });
            return ClassifiedPath::ActivityFile(activity_probe.to_path_buf(), format);
        }

        if self.check_manifest(candidate) {
            self.sink.emit(Diagnostic::ManifestAccepted {
                path: candidate.to_path_buf(),
            });
            return ClassifiedPath::ManifestFile(candidate.to_path_buf());
        }

        if self.paths.kind(candidate) == PathKind::Directory {
            return ClassifiedPath::Directory(candidate.to_path_buf());
        }

        if let Err(reason) = activity {
            self.sink.emit(reason);
        }
        ClassifiedPath::Invalid
    }

    fn probe_activity_file(&self, path: &Path) -> Result<ActivityFormat, Diagnostic> {
        match self.paths.kind(path) {
            PathKind::Missing => Err(Diagnostic::PathMissing {
                path: path.to_path_buf(),
            }),
            PathKind::Directory => Err(Diagnostic::NotRegularFile {
                path: path.to_path_buf(),
            }),
            PathKind::File => {
                ActivityFormat::from_path(path).ok_or_else(|| Diagnostic::UnsupportedExtension {
                    path: path.to_path_buf(),
                    extension: display_extension(path),
                })
            }
        }
    }
}
