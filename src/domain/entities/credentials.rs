//! # Credentials Value Object
//!
//! リモートサービスのログイン情報

use std::fmt;

/// ログイン情報
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// ログ出力用に伏せ字にしたパスワード
    ///
    /// 先頭と末尾の文字だけを残す。2文字の場合は2文字目のみ残す。
    ///
    /// ```
    /// use gupload::domain::entities::credentials::Credentials;
    ///
    /// assert_eq!(Credentials::new("user", "secret").obscured_password(), "s****t");
    /// assert_eq!(Credentials::new("user", "ab").obscured_password(), "b*");
    /// assert_eq!(Credentials::new("user", "x").obscured_password(), "*");
    /// ```
    pub fn obscured_password(&self) -> String {
        let chars: Vec<char> = self.password.chars().collect();
        match chars.len() {
            0 => String::new(),
            1 => "*".to_string(),
            2 => format!("{}*", chars[1]),
            n => {
                let mut obscured = String::with_capacity(n);
                obscured.push(chars[0]);
                obscured.extend(std::iter::repeat('*').take(n - 2));
                obscured.push(chars[n - 1]);
                obscured
            }
        }
    }
}

// パスワードを平文でDebug出力しない
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.obscured_password())
            .finish()
    }
}
