//! MentorLink preset schedule client for Rust
//!
//! This crate manages a mentor's recurring weekly session templates:
//! listing, creating, updating and deleting them against the preset-schedule
//! service. A mentor holds at most three live templates; the cap is enforced
//! locally before any remote call is attempted.

use log::{debug, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// 結果型
pub type Result<T> = std::result::Result<T, PresetError>;

/// メンター1人が同時に持てるテンプレートの上限数
pub const MAX_PRESETS_PER_MENTOR: usize = 3;

/// エラー型
#[derive(Error, Debug)]
pub enum PresetError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Preset limit reached: a mentor may hold at most {0} preset schedules")]
    CapacityExceeded(usize),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),
}

/// 登録済み参加者への参照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
}

/// 毎週繰り返すセッションテンプレート
///
/// `participants` はサービス側が所有する。ローカルでは `list` の結果を
/// 保持するだけで、更新操作では書き換えない。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetSchedule {
    pub id: String,
    pub mentor_id: String,
    pub days: Vec<String>,
    pub time: String,
    pub subject: String,
    pub specialization: String,
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default)]
    pub participants: Vec<Participant>,
}

/// 作成/更新用のドラフト
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetDraft {
    pub days: Vec<String>,
    pub time: String,
    pub subject: String,
    pub specialization: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
}

impl PresetDraft {
    /// 空のドラフトを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 曜日を設定
    pub fn with_days(mut self, days: &[&str]) -> Self {
        self.days = days.iter().map(|day| day.to_string()).collect();
        self
    }

    /// 時刻を設定
    pub fn with_time(mut self, time: &str) -> Self {
        self.time = time.to_string();
        self
    }

    /// 科目を設定
    pub fn with_subject(mut self, subject: &str) -> Self {
        self.subject = subject.to_string();
        self
    }

    /// 専門分野を設定
    pub fn with_specialization(mut self, specialization: &str) -> Self {
        self.specialization = specialization.to_string();
        self
    }

    /// コースを設定
    pub fn with_course(mut self, course: &str) -> Self {
        self.course = Some(course.to_string());
        self
    }
}

/// ドラフトの必須項目を検証
fn validate_draft(draft: &PresetDraft) -> Result<()> {
    if draft.days.is_empty() {
        return Err(PresetError::Validation(
            "days must not be empty".to_string(),
        ));
    }
    if draft.time.trim().is_empty() {
        return Err(PresetError::Validation(
            "time must not be empty".to_string(),
        ));
    }
    if draft.subject.trim().is_empty() {
        return Err(PresetError::Validation(
            "subject must not be empty".to_string(),
        ));
    }
    if draft.specialization.trim().is_empty() {
        return Err(PresetError::Validation(
            "specialization must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// プリセットスケジュールサービスのクライアント
pub struct PresetScheduleClient {
    base_url: String,
    api_key: String,
    http_client: Client,
}

impl PresetScheduleClient {
    /// 新しいプリセットスケジュールクライアントを作成
    pub fn new(base_url: &str, api_key: &str, http_client: Client) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            http_client,
        }
    }

    /// メンターのテンプレート一覧を取得
    pub async fn list(&self, mentor_id: &str) -> Result<Vec<PresetSchedule>> {
        let url = format!(
            "{}/presets/v1/schedules?mentorId={}",
            self.base_url, mentor_id
        );

        let response = self
            .http_client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", &self.api_key))
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(PresetError::ApiError(error_text));
        }

        let schedules = response.json::<Vec<PresetSchedule>>().await?;

        Ok(schedules)
    }

    /// テンプレートを作成
    pub async fn create(&self, mentor_id: &str, draft: &PresetDraft) -> Result<PresetSchedule> {
        let url = format!("{}/presets/v1/schedules", self.base_url);

        let mut payload = serde_json::to_value(draft)?;
        payload["mentorId"] = json!(mentor_id);

        let response = self
            .http_client
            .post(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", &self.api_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(PresetError::ApiError(error_text));
        }

        let schedule = response.json::<PresetSchedule>().await?;

        Ok(schedule)
    }

    /// テンプレートを更新
    pub async fn update(&self, preset_id: &str, draft: &PresetDraft) -> Result<PresetSchedule> {
        let url = format!("{}/presets/v1/schedules/{}", self.base_url, preset_id);

        let response = self
            .http_client
            .put(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", &self.api_key))
            .header("Content-Type", "application/json")
            .json(draft)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(PresetError::ApiError(error_text));
        }

        let schedule = response.json::<PresetSchedule>().await?;

        Ok(schedule)
    }

    /// テンプレートを削除
    pub async fn delete(&self, preset_id: &str) -> Result<()> {
        let url = format!("{}/presets/v1/schedules/{}", self.base_url, preset_id);

        let response = self
            .http_client
            .delete(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", &self.api_key))
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(PresetError::ApiError(error_text));
        }

        Ok(())
    }
}

/// メンター1人分のテンプレートを管理するマネージャ
///
/// サービスが常に正であり、ローカル状態はページ滞在中のキャッシュに過ぎ
/// ない。検証と上限チェックはリモート呼び出しの前に行うため、ローカルで
/// 弾かれた操作とリモートで失敗した操作はどちらも状態を変えない。
pub struct PresetScheduleManager {
    client: PresetScheduleClient,
    mentor_id: String,
    schedules: Vec<PresetSchedule>,
}

impl PresetScheduleManager {
    /// 新しいマネージャを作成
    pub fn new(client: PresetScheduleClient, mentor_id: &str) -> Self {
        Self {
            client,
            mentor_id: mentor_id.to_string(),
            schedules: Vec::new(),
        }
    }

    /// 現在保持しているテンプレート一覧
    pub fn schedules(&self) -> &[PresetSchedule] {
        &self.schedules
    }

    /// サービスから一覧を取得してローカル状態を丸ごと置き換える
    pub async fn refresh(&mut self) -> Result<&[PresetSchedule]> {
        let schedules = self.client.list(&self.mentor_id).await?;
        self.schedules = schedules;
        Ok(&self.schedules)
    }

    /// テンプレートを作成する
    ///
    /// 必須項目の検証と上限チェックはリモート呼び出しの前に行う。上限到達
    /// 時は `CapacityExceeded` でリクエストを送らずに拒否する。
    pub async fn create(&mut self, draft: &PresetDraft) -> Result<PresetSchedule> {
        validate_draft(draft)?;
        if self.schedules.len() >= MAX_PRESETS_PER_MENTOR {
            return Err(PresetError::CapacityExceeded(MAX_PRESETS_PER_MENTOR));
        }

        let created = self.client.create(&self.mentor_id, draft).await?;
        info!("created preset schedule {}", created.id);

        self.schedules.push(created.clone());
        Ok(created)
    }

    /// テンプレートを更新する
    ///
    /// 成功時は id の一致するローカル項目をその場で置き換える。参加者一覧
    /// はサービス側の所有なので書き換えず、次回の `refresh` に任せる。
    pub async fn update(&mut self, preset_id: &str, draft: &PresetDraft) -> Result<PresetSchedule> {
        validate_draft(draft)?;

        let updated = self.client.update(preset_id, draft).await?;
        info!("updated preset schedule {}", preset_id);

        match self
            .schedules
            .iter_mut()
            .find(|schedule| schedule.id == preset_id)
        {
            Some(slot) => {
                let participants = std::mem::take(&mut slot.participants);
                *slot = updated.clone();
                slot.participants = participants;
            }
            None => {
                debug!("update target {} is not held locally", preset_id);
            }
        }

        Ok(updated)
    }

    /// テンプレートを削除する
    ///
    /// 削除されたテンプレートの参加者はサービス側で登録解除される。既に
    /// ローカルに無い場合は何もしない。
    pub async fn delete(&mut self, preset_id: &str) -> Result<()> {
        if preset_id.trim().is_empty() {
            return Err(PresetError::Validation(
                "preset id must not be empty".to_string(),
            ));
        }

        self.client.delete(preset_id).await?;
        info!("deleted preset schedule {}", preset_id);

        let before = self.schedules.len();
        self.schedules.retain(|schedule| schedule.id != preset_id);
        if self.schedules.len() == before {
            debug!("delete already applied for preset {}", preset_id);
        }

        Ok(())
    }
}
