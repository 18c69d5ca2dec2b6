//! Credential Configuration
//!
//! コマンドライン、カレントディレクトリ、ホームディレクトリの順に認証情報を探す

use config::{Config, File as ConfigFile, FileFormat};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::entities::credentials::Credentials;
use crate::domain::errors::UploadError;
use crate::domain::repositories::credential_repository::CredentialSource;

/// 認証情報ファイル名
#[cfg(windows)]
pub const CONFIG_FILE_NAME: &str = "gupload.ini";
#[cfg(not(windows))]
pub const CONFIG_FILE_NAME: &str = ".guploadrc";

#[derive(Debug, Deserialize)]
struct CredentialFile {
    #[serde(alias = "Credentials")]
    credentials: CredentialSection,
}

#[derive(Debug, Deserialize)]
struct CredentialSection {
    username: String,
    password: String,
}

/// INI形式の認証情報ファイルを読み込む
///
/// ```ini
/// [Credentials]
/// username=rider
/// password=secret
/// ```
pub fn load_credential_file(path: &Path) -> Result<Credentials, UploadError> {
    let to_error = |e: config::ConfigError| UploadError::CredentialFile {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let file: CredentialFile = Config::builder()
        .add_source(ConfigFile::from(path).format(FileFormat::Ini))
        .build()
        .map_err(to_error)?
        .try_deserialize()
        .map_err(to_error)?;

    Ok(Credentials::new(
        file.credentials.username,
        file.credentials.password,
    ))
}

/// 優先順位付きの認証情報取得元
///
/// 1. コマンドラインでユーザー名とパスワードの両方が指定された場合
/// 2. カレントディレクトリの認証情報ファイル
/// 3. ホームディレクトリの認証情報ファイル
pub struct LayeredCredentialSource {
    command_line: Option<Credentials>,
    cwd: PathBuf,
    home: PathBuf,
}

impl LayeredCredentialSource {
    pub fn new(username: Option<String>, password: Option<String>) -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let home = PathBuf::from(shellexpand::tilde("~").as_ref());
        Self::with_directories(username, password, cwd, home)
    }

    pub fn with_directories(
        username: Option<String>,
        password: Option<String>,
        cwd: PathBuf,
        home: PathBuf,
    ) -> Self {
        let command_line = match (username, password) {
            (Some(username), Some(password)) => Some(Credentials::new(username, password)),
            _ => None,
        };

        Self {
            command_line,
            cwd,
            home,
        }
    }
}

impl CredentialSource for LayeredCredentialSource {
    fn credentials(&self) -> Result<Credentials, UploadError> {
        if let Some(credentials) = &self.command_line {
            debug!("Using credentials from command line.");
            return Ok(credentials.clone());
        }

        for dir in [&self.cwd, &self.home] {
            let path = dir.join(CONFIG_FILE_NAME);
            if path.is_file() {
                debug!("Using credentials from '{}'.", path.display());
                return load_credential_file(&path);
            }
        }

        Err(UploadError::MissingCredentials {
            config_file: CONFIG_FILE_NAME.to_string(),
            cwd: self.cwd.clone(),
            home: self.home.clone(),
        })
    }
}
