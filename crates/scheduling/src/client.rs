use log::debug;
use reqwest::Client;
use serde_json::json;

use crate::error::{Result, SchedulingError};
use crate::session::Session;

/// スケジューリングサービスのクライアント
///
/// 各操作はセッション id に対してちょうど1回のHTTPリクエストを行う。
/// 自動リトライはしない。
pub struct SchedulingClient {
    base_url: String,
    api_key: String,
    http_client: Client,
}

impl SchedulingClient {
    /// 新しいスケジューリングクライアントを作成
    pub fn new(base_url: &str, api_key: &str, http_client: Client) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            http_client,
        }
    }

    /// 今日のセッション一覧を取得
    pub async fn fetch_today_sessions(&self, mentor_id: &str) -> Result<Vec<Session>> {
        self.fetch_sessions(mentor_id, "today").await
    }

    /// 今後のセッション一覧を取得
    pub async fn fetch_upcoming_sessions(&self, mentor_id: &str) -> Result<Vec<Session>> {
        self.fetch_sessions(mentor_id, "upcoming").await
    }

    /// リマインダーを送信
    pub async fn send_reminder(&self, session_id: &str) -> Result<()> {
        let url = format!(
            "{}/schedule/v1/sessions/{}/remind",
            self.base_url, session_id
        );
        debug!("sending reminder for session {}", session_id);

        let response = self
            .http_client
            .post(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", &self.api_key))
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(SchedulingError::ApiError(error_text));
        }

        Ok(())
    }

    /// 日付と時刻を変更
    pub async fn reschedule(&self, session_id: &str, new_date: &str, new_time: &str) -> Result<()> {
        let url = format!(
            "{}/schedule/v1/sessions/{}/schedule",
            self.base_url, session_id
        );
        debug!(
            "rescheduling session {} to {} {}",
            session_id, new_date, new_time
        );

        let payload = json!({
            "date": new_date,
            "time": new_time,
        });

        let response = self
            .http_client
            .patch(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", &self.api_key))
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(SchedulingError::ApiError(error_text));
        }

        Ok(())
    }

    /// セッションをキャンセル
    pub async fn cancel(&self, session_id: &str) -> Result<()> {
        let url = format!("{}/schedule/v1/sessions/{}", self.base_url, session_id);
        debug!("cancelling session {}", session_id);

        let response = self
            .http_client
            .delete(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", &self.api_key))
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await?;
            return Err(SchedulingError::ApiError(error_text));
        }

        Ok(())
    }

    async fn fetch_sessions(&self, mentor_id: &str, bucket: &str) -> Result<Vec<Session>> {
        let url = format!(
            "{}/schedule/v1/sessions?mentorId={}&bucket={}",
            self.base_url, mentor_id, bucket
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
            return Err(SchedulingError::ApiError(error_text));
        }

        let sessions = response.json::<Vec<Session>>().await?;

        Ok(sessions)
    }
}
