use log::debug;

use crate::session::Session;

/// 今日/今後の2バケットでセッションを保持するローカルストア
///
/// バケットの割り当ては一覧を返すサービス側が行う。リスケジュールで日付が
/// 変わってもローカルでは移動させず、次回の `load` が常に正となる。
#[derive(Debug, Default)]
pub struct SessionStore {
    today: Vec<Session>,
    upcoming: Vec<Session>,
}

impl SessionStore {
    /// 空のストアを作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 両バケットを丸ごと置き換える
    pub fn load(&mut self, today: Vec<Session>, upcoming: Vec<Session>) {
        self.today = today;
        self.upcoming = upcoming;
    }

    /// 今日のセッション一覧
    pub fn today(&self) -> &[Session] {
        &self.today
    }

    /// 今後のセッション一覧
    pub fn upcoming(&self) -> &[Session] {
        &self.upcoming
    }

    /// id でセッションを検索
    pub fn find(&self, session_id: &str) -> Option<&Session> {
        self.today
            .iter()
            .chain(self.upcoming.iter())
            .find(|session| session.id == session_id)
    }

    /// キャンセル成功を反映し、両バケットから該当セッションを取り除く
    ///
    /// 既に存在しない場合は何もしない。重複した成功通知が届いても状態は
    /// 変わらないため、戻り値の `false` はエラーではない。
    pub fn apply_cancel(&mut self, session_id: &str) -> bool {
        let before = self.today.len() + self.upcoming.len();
        self.today.retain(|session| session.id != session_id);
        self.upcoming.retain(|session| session.id != session_id);

        let removed = self.today.len() + self.upcoming.len() < before;
        if !removed {
            debug!("cancel already applied for session {}", session_id);
        }
        removed
    }

    /// リスケジュール成功を反映し、日付と時刻をその場で書き換える
    ///
    /// セッションが入っているバケットは変更しない。新しい日付なら upcoming
    /// に移るべきでも、次回の `load` までは元のバケットに留まる。
    pub fn apply_reschedule(&mut self, session_id: &str, new_date: &str, new_time: &str) -> bool {
        let slot = self
            .today
            .iter_mut()
            .chain(self.upcoming.iter_mut())
            .find(|session| session.id == session_id);

        match slot {
            Some(session) => {
                session.date = new_date.to_string();
                session.time = new_time.to_string();
                true
            }
            None => {
                debug!("reschedule target {} is not loaded", session_id);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Participant, SessionType};

    fn session(id: &str, date: &str) -> Session {
        Session {
            id: id.to_string(),
            subject: "Algebra".to_string(),
            date: date.to_string(),
            time: "14:00".to_string(),
            location: "Room 2".to_string(),
            session_type: SessionType::OneOnOne,
            mentor: Participant {
                id: "m1".to_string(),
                name: "Alice".to_string(),
            },
            learners: vec![Participant {
                id: "l1".to_string(),
                name: "Bob".to_string(),
            }],
        }
    }

    #[test]
    fn test_load_replaces_both_buckets() {
        let mut store = SessionStore::new();
        store.load(vec![session("s1", "2026-08-05")], vec![]);
        store.load(
            vec![session("s2", "2026-08-05")],
            vec![session("s3", "2026-08-12")],
        );

        assert_eq!(store.today().len(), 1);
        assert_eq!(store.today()[0].id, "s2");
        assert_eq!(store.upcoming().len(), 1);
    }

    #[test]
    fn test_cancel_removes_from_containing_bucket() {
        let mut store = SessionStore::new();
        store.load(
            vec![session("s1", "2026-08-05")],
            vec![session("s2", "2026-08-12")],
        );

        assert!(store.apply_cancel("s2"));
        assert_eq!(store.today().len(), 1);
        assert!(store.upcoming().is_empty());
    }

    #[test]
    fn test_cancel_twice_is_a_noop() {
        let mut store = SessionStore::new();
        store.load(vec![session("s1", "2026-08-05")], vec![]);

        assert!(store.apply_cancel("s1"));
        // 重複した成功通知: 2回目は何も変えない
        assert!(!store.apply_cancel("s1"));
        assert!(store.today().is_empty());
        assert!(store.upcoming().is_empty());
    }

    #[test]
    fn test_reschedule_updates_fields_but_keeps_bucket() {
        let mut store = SessionStore::new();
        store.load(vec![session("s1", "2026-08-05")], vec![]);

        // 未来の日付へ変更しても today に留まる
        assert!(store.apply_reschedule("s1", "2026-09-01", "09:30"));

        assert_eq!(store.today().len(), 1);
        assert_eq!(store.today()[0].date, "2026-09-01");
        assert_eq!(store.today()[0].time, "09:30");
        assert!(store.upcoming().is_empty());
    }

    #[test]
    fn test_reschedule_missing_session_is_a_noop() {
        let mut store = SessionStore::new();
        store.load(vec![session("s1", "2026-08-05")], vec![]);

        assert!(!store.apply_reschedule("missing", "2026-09-01", "09:30"));
        assert_eq!(store.today()[0].date, "2026-08-05");
    }
}
