//! MentorLink person directory client for Rust
//!
//! This crate provides access to the person-directory service and the
//! identity reconciliation step that collapses the mentor-sourced and
//! learner-sourced profile lists into a single canonical user list.

use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod reconcile;

pub use reconcile::{reconcile, CanonicalUser, ProfileSource};

/// 結果型
pub type Result<T> = std::result::Result<T, DirectoryError>;

/// エラー型
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),
}

/// 役割
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Mentor,
    Learner,
}

/// ディレクトリサービスが返す生のプロフィールレコード
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProfile {
    /// レコード自身が宣言する役割
    pub role: Role,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub role_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    pub year_level: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub sex: Option<String>,
}

/// ディレクトリクライアント
pub struct DirectoryClient {
    base_url: String,
    api_key: String,
    http_client: Client,
}

impl DirectoryClient {
    /// 新しいディレクトリクライアントを作成
    pub fn new(base_url: &str, api_key: &str, http_client: Client) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            http_client,
        }
    }

    /// メンター側のプロフィール一覧を取得
    pub async fn fetch_mentor_profiles(&self) -> Result<Vec<RawProfile>> {
        self.fetch_profiles("mentors").await
    }

    /// ラーナー側のプロフィール一覧を取得
    pub async fn fetch_learner_profiles(&self) -> Result<Vec<RawProfile>> {
        self.fetch_profiles("learners").await
    }

    /// 両リストを取得して正規ユーザー一覧へ照合
    ///
    /// 管理ダッシュボードの読み込みごとに一度呼ばれる。結果は呼び出し側が
    /// 所有し、次回の取得で破棄される。
    pub async fn fetch_canonical_users(&self) -> Result<Vec<CanonicalUser>> {
        let mentors = self.fetch_mentor_profiles().await?;
        let learners = self.fetch_learner_profiles().await?;

        let users = reconcile(&mentors, &learners);
        debug!(
            "reconciled {} mentor and {} learner profiles into {} canonical users",
            mentors.len(),
            learners.len(),
            users.len()
        );

        Ok(users)
    }

    async fn fetch_profiles(&self, segment: &str) -> Result<Vec<RawProfile>> {
        let url = format!("{}/directory/v1/{}", self.base_url, segment);

        let response = self
            .http_client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", &self.api_key))
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(DirectoryError::ApiError(error_text));
        }

        let profiles = response.json::<Vec<RawProfile>>().await?;

        Ok(profiles)
    }
}
