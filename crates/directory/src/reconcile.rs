//! Identity reconciliation
//!
//! Collapses the mentor-sourced and learner-sourced profile lists into one
//! canonical user list keyed by a derived identity string. A person who
//! registered both a mentor and a learner profile survives as exactly one
//! entry.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{RawProfile, Role};

/// プロフィールの取得元リスト
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileSource {
    Mentor,
    Learner,
}

/// 照合済みの正規ユーザー
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalUser {
    pub key: String,
    pub role: Role,
    pub profile_type: ProfileSource,
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

// A profile tagged with the list it came from, used during the fold.
#[derive(Debug, Clone, Copy)]
struct SourcedProfile<'a> {
    source: ProfileSource,
    profile: &'a RawProfile,
}

impl SourcedProfile<'_> {
    /// キーを導出 (userId、roleId、email の順で最初の非空値)
    fn key(&self) -> String {
        [
            self.profile.user_id.as_deref(),
            self.profile.role_id.as_deref(),
            self.profile.email.as_deref(),
        ]
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .unwrap_or_default()
        .to_string()
    }

    // A record is native when its declared role matches the list it came from.
    fn is_native(&self) -> bool {
        matches!(
            (self.profile.role, self.source),
            (Role::Mentor, ProfileSource::Mentor) | (Role::Learner, ProfileSource::Learner)
        )
    }
}

/// メンター/ラーナー両リストを正規ユーザー一覧へ畳み込む
///
/// 同一キーのレコードが複数ある場合、自身の取得元リストと宣言役割が一致する
/// レコードが、一致しないレコードを置き換える。それ以外は先に現れた方が残る。
/// 入力順が同じなら出力の順序と内容は常に同じになる。
pub fn reconcile(
    mentor_profiles: &[RawProfile],
    learner_profiles: &[RawProfile],
) -> Vec<CanonicalUser> {
    let tagged = mentor_profiles
        .iter()
        .map(|profile| SourcedProfile {
            source: ProfileSource::Mentor,
            profile,
        })
        .chain(learner_profiles.iter().map(|profile| SourcedProfile {
            source: ProfileSource::Learner,
            profile,
        }));

    // Insertion-ordered fold: the slot vector keeps first-seen key order, the
    // index map resolves collisions.
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut slots: Vec<(String, SourcedProfile)> = Vec::new();

    for record in tagged {
        let key = record.key();
        match index.get(&key).copied() {
            Some(slot) => {
                let (_, stored) = &slots[slot];
                if record.is_native() && !stored.is_native() {
                    slots[slot].1 = record;
                }
            }
            None => {
                index.insert(key.clone(), slots.len());
                slots.push((key, record));
            }
        }
    }

    slots.into_iter().map(project).collect()
}

/// 表示に必要な属性だけを投影して正規ユーザーを作る
fn project((key, record): (String, SourcedProfile)) -> CanonicalUser {
    CanonicalUser {
        key,
        role: record.profile.role,
        profile_type: record.source,
        name: record.profile.name.clone(),
        program: record.profile.program.clone(),
        year_level: record.profile.year_level.clone(),
        phone: record.profile.phone.clone(),
        address: record.profile.address.clone(),
        sex: record.profile.sex.clone(),
    }
}
