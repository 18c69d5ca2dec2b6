//! # Resolve Request DTO
//!
//! バッチ解決要求のData Transfer Object

/// アクティビティファイル判定をどのパスに対して行うか
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CandidateCheck {
    /// グロブ展開後の候補パスで判定する
    #[default]
    Expanded,
    /// 展開前の引数で判定する（旧バージョン互換）
    ///
    /// 展開前の引数がそのままジョブのパスになる。ワイルドカードを含む引数は
    /// アクティビティファイルとして受理されない。
    OriginalArgument,
}

/// バッチ解決要求
///
/// コマンドラインから受け取ったパス引数と上書き指定
#[derive(Debug, Clone, Default)]
pub struct ResolveRequest {
    /// ファイル・ディレクトリ・グロブ・マニフェストのパス（指定順）
    pub paths: Vec<String>,
    /// 表示名（アクティビティファイルが1件の場合のみ適用）
    pub name_override: Option<String>,
    /// アクティビティ種別（マニフェスト以外の全ジョブに適用）
    pub type_override: Option<String>,
    pub candidate_check: CandidateCheck,
}

impl ResolveRequest {
    /// 新しい解決要求を作成します。
    ///
    /// # 例
    ///
    /// ```
    /// use gupload::application::dto::resolve_request::{CandidateCheck, ResolveRequest};
    ///
    /// let request = ResolveRequest::new(
    ///     vec!["ride.fit".to_string()],
    ///     Some("Morning Ride".to_string()),
    ///     None,
    /// );
    ///
    /// assert_eq!(request.paths.len(), 1);
    /// assert_eq!(request.candidate_check, CandidateCheck::Expanded);
    /// ```
    pub fn new(
        paths: Vec<String>,
        name_override: Option<String>,
        type_override: Option<String>,
    ) -> Self {
        Self {
            paths,
            name_override,
            type_override,
            candidate_check: CandidateCheck::default(),
        }
    }

    /// 判定対象を切り替える
    pub fn with_candidate_check(mut self, candidate_check: CandidateCheck) -> Self {
        self.candidate_check = candidate_check;
        self
    }
}
