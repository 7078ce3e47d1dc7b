use std::collections::HashSet;

use log::{debug, warn};

use crate::client::SchedulingClient;
use crate::error::{Result, SchedulingError};
use crate::session::{Session, SessionType};
use crate::store::SessionStore;

/// セッションに対するユーザー操作の種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Remind,
    Reschedule,
    Cancel,
}

/// 確認ダイアログへ渡す保留中アクションの内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfirmation {
    pub action: SessionAction,
    pub session_id: String,
    pub subject: String,
    pub counterpart: String,
}

/// セッション操作を検証・リモート呼び出し・反映の3フェーズで調停する
///
/// ローカル状態 (`SessionStore`) を書き換えるのはリモート操作が成功した
/// 後だけ。失敗時はストアに触れず、保留中の確認内容だけを破棄する。
/// 同じ id への操作は busy セットで直列化し、出口がどちらでも必ず解放する。
pub struct ActionCoordinator {
    client: SchedulingClient,
    store: SessionStore,
    busy: HashSet<String>,
    pending: Option<PendingConfirmation>,
}

impl ActionCoordinator {
    /// 新しいコーディネータを作成
    pub fn new(client: SchedulingClient) -> Self {
        Self {
            client,
            store: SessionStore::new(),
            busy: HashSet::new(),
            pending: None,
        }
    }

    /// ローカルストアへの読み取りアクセス
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// 保留中の確認内容
    pub fn pending_confirmation(&self) -> Option<&PendingConfirmation> {
        self.pending.as_ref()
    }

    /// 両バケットをサービスから取得してストアを置き換える
    ///
    /// ページやタブの切り替えごとに一度呼ぶ。取得結果のバケット割り当てが
    /// 常に正であり、ローカルの古い状態はここで修正される。
    pub async fn refresh(&mut self, mentor_id: &str) -> Result<()> {
        if mentor_id.trim().is_empty() {
            return Err(SchedulingError::Validation(
                "mentor id must not be empty".to_string(),
            ));
        }

        let today = self.client.fetch_today_sessions(mentor_id).await?;
        let upcoming = self.client.fetch_upcoming_sessions(mentor_id).await?;
        debug!(
            "loaded {} today and {} upcoming sessions for mentor {}",
            today.len(),
            upcoming.len(),
            mentor_id
        );

        self.store.load(today, upcoming);
        Ok(())
    }

    /// 確認ダイアログ用に保留中アクションの内容を組み立てる
    ///
    /// 対象セッションの科目と相手の表示名を控え、リモート呼び出しの前段と
    /// して保持する。アクションの完了時には成否にかかわらず破棄される。
    pub fn begin_confirmation(
        &mut self,
        action: SessionAction,
        session_id: &str,
    ) -> Result<&PendingConfirmation> {
        let session = self.store.find(session_id).ok_or_else(|| {
            SchedulingError::Validation(format!("session {} is not loaded", session_id))
        })?;

        let confirmation = PendingConfirmation {
            action,
            session_id: session.id.clone(),
            subject: session.subject.clone(),
            counterpart: counterpart_name(session),
        };

        Ok(self.pending.insert(confirmation))
    }

    /// リマインダーを送信する
    ///
    /// 成功してもローカル状態は変わらない。
    pub async fn send_reminder(&mut self, session_id: &str) -> Result<()> {
        self.ensure_dispatchable(session_id)?;

        self.busy.insert(session_id.to_string());
        let result = self.client.send_reminder(session_id).await;
        self.finish(session_id);

        result
    }

    /// セッションの日付と時刻を変更する
    ///
    /// リモートが成功した場合のみストアへ反映する。対象がローカルに無い
    /// 場合は既に反映済みとみなして何もしない。
    pub async fn reschedule(
        &mut self,
        session_id: &str,
        new_date: &str,
        new_time: &str,
    ) -> Result<()> {
        if new_date.trim().is_empty() {
            return Err(SchedulingError::Validation(
                "date must not be empty".to_string(),
            ));
        }
        if new_time.trim().is_empty() {
            return Err(SchedulingError::Validation(
                "time must not be empty".to_string(),
            ));
        }
        self.ensure_dispatchable(session_id)?;

        self.busy.insert(session_id.to_string());
        let result = self.client.reschedule(session_id, new_date, new_time).await;
        self.finish(session_id);

        result?;
        self.store.apply_reschedule(session_id, new_date, new_time);
        Ok(())
    }

    /// セッションをキャンセルする
    ///
    /// リモートが成功した場合のみ両バケットから取り除く。
    pub async fn cancel(&mut self, session_id: &str) -> Result<()> {
        self.ensure_dispatchable(session_id)?;

        self.busy.insert(session_id.to_string());
        let result = self.client.cancel(session_id).await;
        self.finish(session_id);

        result?;
        self.store.apply_cancel(session_id);
        Ok(())
    }

    fn ensure_dispatchable(&self, session_id: &str) -> Result<()> {
        if session_id.trim().is_empty() {
            return Err(SchedulingError::Validation(
                "session id must not be empty".to_string(),
            ));
        }
        if self.busy.contains(session_id) {
            warn!("rejected duplicate action for session {}", session_id);
            return Err(SchedulingError::ActionInFlight(session_id.to_string()));
        }
        Ok(())
    }

    // Releases the busy id and drops the pending confirmation. Must run on
    // every exit path of a dispatched action.
    fn finish(&mut self, session_id: &str) {
        self.busy.remove(session_id);
        self.pending = None;
    }
}

/// 確認ダイアログに出す相手の表示名
fn counterpart_name(session: &Session) -> String {
    match session.session_type {
        SessionType::OneOnOne => session
            .learners
            .first()
            .map(|learner| learner.name.clone())
            .unwrap_or_default(),
        SessionType::Group => session
            .learners
            .iter()
            .map(|learner| learner.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Participant;

    fn group_session() -> Session {
        Session {
            id: "s1".to_string(),
            subject: "Physics".to_string(),
            date: "2026-08-05".to_string(),
            time: "10:00".to_string(),
            location: "Lab".to_string(),
            session_type: SessionType::Group,
            mentor: Participant {
                id: "m1".to_string(),
                name: "Alice".to_string(),
            },
            learners: vec![
                Participant {
                    id: "l1".to_string(),
                    name: "Bob".to_string(),
                },
                Participant {
                    id: "l2".to_string(),
                    name: "Carol".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_counterpart_name_for_group_lists_all_learners() {
        assert_eq!(counterpart_name(&group_session()), "Bob, Carol");
    }

    #[test]
    fn test_counterpart_name_for_one_on_one_uses_first_learner() {
        let mut session = group_session();
        session.session_type = SessionType::OneOnOne;
        assert_eq!(counterpart_name(&session), "Bob");
    }
}
