//! # ClassifiedPath Value Object
//!
//! コマンドライン引数1件の分類結果と、受け付けるファイル形式

use std::fmt;
use std::path::{Path, PathBuf};

/// マニフェスト(リストファイル)の拡張子
pub const MANIFEST_EXTENSION: &str = "csv";

/// アップロード可能なアクティビティファイルの形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityFormat {
    Fit,
    Gpx,
    Tcx,
}

impl ActivityFormat {
    /// 受け付ける全形式
    pub const ALL: [ActivityFormat; 3] = [ActivityFormat::Fit, ActivityFormat::Gpx, ActivityFormat::Tcx];

    /// 拡張子（ドットなし、小文字）
    pub fn extension(self) -> &'static str {
        match self {
            ActivityFormat::Fit => "fit",
            ActivityFormat::Gpx => "gpx",
            ActivityFormat::Tcx => "tcx",
        }
    }

    /// 拡張子から形式を判定する（大文字小文字は区別しない）
    ///
    /// ```
    /// use gupload::domain::entities::classified_path::ActivityFormat;
    ///
    /// assert_eq!(ActivityFormat::from_extension("FIT"), Some(ActivityFormat::Fit));
    /// assert_eq!(ActivityFormat::from_extension("csv"), None);
    /// ```
    pub fn from_extension(extension: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.extension().eq_ignore_ascii_case(extension))
    }

    /// パスの拡張子から形式を判定する
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

impl fmt::Display for ActivityFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.extension())
    }
}

/// パスの拡張子がマニフェストのものか
pub fn is_manifest_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(MANIFEST_EXTENSION))
}

/// 小文字化した拡張子（ドット付き、ない場合は空文字列）
pub fn display_extension(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}

/// パス1件の分類結果
///
/// FileClassifierが生成し、BatchResolverが即座に消費する
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedPath {
    /// アップロード可能なアクティビティファイル
    ActivityFile(PathBuf, ActivityFormat),
    /// CSVマニフェスト
    ManifestFile(PathBuf),
    /// ディレクトリ（直下のファイルのみ展開対象）
    Directory(PathBuf),
    /// どれにも該当しない
    Invalid,
}

impl ClassifiedPath {
    /// 有効な分類かどうか
    pub fn is_valid(&self) -> bool {
        !matches!(self, ClassifiedPath::Invalid)
    }
}
