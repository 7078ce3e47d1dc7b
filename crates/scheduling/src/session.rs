use serde::{Deserialize, Serialize};

/// セッション種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionType {
    #[serde(rename = "one-on-one")]
    OneOnOne,
    #[serde(rename = "group")]
    Group,
}

/// 参加者への参照 (所有するのは id と表示名のみ)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
}

/// 予定されたセッション
///
/// `id` はサービス側が割り当てる不変の識別子。`date` と `time` だけが
/// リスケジュールの反映で書き換わる。today/upcoming のどちらに属するかは
/// セッション自身は持たず、ストア側のどの列に入っているかで決まる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub subject: String,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub location: String,
    pub session_type: SessionType,
    pub mentor: Participant,
    #[serde(default)]
    pub learners: Vec<Participant>,
}
