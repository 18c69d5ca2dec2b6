//! Filesystem Path Repository Implementation
//!
//! PathRepositoryのファイルシステム実装

use anyhow::{Context, Result};
use glob::MatchOptions;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::domain::repositories::path_repository::{
    ManifestContents, ManifestRow, PathKind, PathRepository,
};

/// ファイルシステムベースのパスリポジトリ
pub struct FsPathRepository;

impl FsPathRepository {
    /// 新しいリポジトリを作成
    pub fn new() -> Self {
        Self
    }

    /// グロブパターンを展開する（内部実装）
    fn expand_internal(pattern: &str) -> Vec<PathBuf> {
        let expanded = shellexpand::tilde(pattern);

        // シェルと同様に、先頭の `.` はパターンに明示した場合だけ一致させる
        let options = MatchOptions {
            require_literal_leading_dot: true,
            ..MatchOptions::new()
        };

        let mut matches = match glob::glob_with(&expanded, options) {
            Ok(paths) => paths
                .filter_map(|entry| match entry {
                    Ok(path) => Some(path),
                    Err(e) => {
                        warn!("Failed to read glob match for {}: {}", pattern, e);
                        None
                    }
                })
                .collect(),
            Err(e) => {
                debug!("Invalid glob pattern {}: {}", pattern, e);
                Vec::new()
            }
        };

        // パターンとして解釈できない文字（`[` など）を含む実在パス
        let literal = Path::new(expanded.as_ref());
        if matches.is_empty() && literal.exists() {
            matches.push(literal.to_path_buf());
        }

        matches
    }

    /// ディレクトリ直下のエントリを列挙する（内部実装）
    fn list_dir_internal(dir: &Path) -> Result<Vec<PathBuf>> {
        let mut children = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            match entry {
                Ok(entry) => children.push(entry.path().to_path_buf()),
                Err(e) if e.depth() == 0 => {
                    return Err(e)
                        .context(format!("Failed to read directory: {}", dir.display()));
                }
                Err(e) => warn!("Failed to read entry in {}: {}", dir.display(), e),
            }
        }

        debug!("Found {} entries in {}", children.len(), dir.display());

        Ok(children)
    }

    /// マニフェストを読み込む（内部実装）
    fn read_manifest_internal(path: &Path) -> Result<ManifestContents> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .context(format!("Failed to open list file: {}", path.display()))?;

        let mut contents = ManifestContents::default();

        for (index, record) in reader.deserialize::<ManifestRow>().enumerate() {
            match record {
                Ok(row) => contents.rows.push(row),
                Err(e) => {
                    // ヘッダー行の分だけずらす
                    let line = e
                        .position()
                        .map(|pos| pos.line() as usize)
                        .unwrap_or(index + 2);
                    contents.rejected.push((line, e.to_string()));
                }
            }
        }

        Ok(contents)
    }
}

impl PathRepository for FsPathRepository {
    fn expand(&self, pattern: &str) -> Vec<PathBuf> {
        Self::expand_internal(pattern)
    }

    fn kind(&self, path: &Path) -> PathKind {
        match fs::metadata(path) {
            Ok(metadata) if metadata.is_file() => PathKind::File,
            Ok(metadata) if metadata.is_dir() => PathKind::Directory,
            _ => PathKind::Missing,
        }
    }

    fn list_dir(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        Self::list_dir_internal(dir)
    }

    fn read_manifest(&self, path: &Path) -> Result<ManifestContents> {
        Self::read_manifest_internal(path)
    }
}

impl Default for FsPathRepository {
    fn default() -> Self {
        Self::new()
    }
}
