//! # Path Repository Trait
//!
//! グロブ展開、ファイル種別の判定、ディレクトリ列挙、マニフェスト読み込みを抽象化

use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// ファイルシステム上のパスの種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// 通常ファイル
    File,
    /// ディレクトリ
    Directory,
    /// 存在しない（またはどちらでもない）
    Missing,
}

/// マニフェスト1行分
///
/// `filename`, `name`, `type` 列を持つ。それ以外の列は無視する。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ManifestRow {
    pub filename: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub activity_type: Option<String>,
}

/// マニフェストの読み込み結果
///
/// 解釈できなかった行は `rejected` に行番号とエラー内容を残す
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestContents {
    pub rows: Vec<ManifestRow>,
    pub rejected: Vec<(usize, String)>,
}

/// パスリポジトリ
///
/// BatchResolverが参照するファイルシステム操作。全て同期処理。
pub trait PathRepository: Send + Sync {
    /// グロブパターンを展開する
    ///
    /// 一致しない・不正なパターンの場合は空のリストを返す
    fn expand(&self, pattern: &str) -> Vec<PathBuf>;

    /// パスの種別を判定する
    fn kind(&self, path: &Path) -> PathKind;

    /// ディレクトリ直下のエントリを列挙する（再帰しない）
    ///
    /// # Errors
    ///
    /// ディレクトリの読み取りに失敗した場合にエラーを返す
    fn list_dir(&self, dir: &Path) -> Result<Vec<PathBuf>>;

    /// マニフェストを読み込む
    ///
    /// # Errors
    ///
    /// ファイルを開けない、ヘッダーを読めない場合にエラーを返す
    fn read_manifest(&self, path: &Path) -> Result<ManifestContents>;
}
