use mentorlink_rust::directory::{ProfileSource, Role};
use mentorlink_rust::error::Error;
use mentorlink_rust::scheduling::SessionAction;
use mentorlink_rust::MentorLink;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// ディレクトリ、スケジューリング、プリセットの統合テスト
#[tokio::test]
async fn test_directory_scheduling_preset_integration() {
    // モックサーバーの起動
    let mock_server = MockServer::start().await;
    let mentor_id = Uuid::new_v4().to_string();

    // 1. ディレクトリ: 同一人物のメンター/ラーナープロフィール
    Mock::given(method("GET"))
        .and(path("/directory/v1/mentors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "role": "mentor", "userId": "u1", "name": "Alice", "program": "BSCS" }
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/directory/v1/learners"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "role": "learner", "userId": "u1", "name": "Alice" },
            { "role": "learner", "userId": "u2", "name": "Bob" }
        ])))
        .mount(&mock_server)
        .await;

    // 2. スケジューリング: 今日1件、今後1件
    Mock::given(method("GET"))
        .and(path("/schedule/v1/sessions"))
        .and(query_param("mentorId", mentor_id.as_str()))
        .and(query_param("bucket", "today"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "s1",
            "subject": "Algebra",
            "date": "2026-08-05",
            "time": "14:00",
            "location": "Room 2",
            "sessionType": "one-on-one",
            "mentor": { "id": "u1", "name": "Alice" },
            "learners": [{ "id": "u2", "name": "Bob" }]
        }])))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/schedule/v1/sessions"))
        .and(query_param("mentorId", mentor_id.as_str()))
        .and(query_param("bucket", "upcoming"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/schedule/v1/sessions/s1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    // 3. プリセット: 既に上限の3件
    Mock::given(method("GET"))
        .and(path("/presets/v1/schedules"))
        .and(query_param("mentorId", mentor_id.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "p1", "mentorId": mentor_id, "days": ["monday"], "time": "14:00",
                "subject": "Algebra", "specialization": "math", "participants": []
            },
            {
                "id": "p2", "mentorId": mentor_id, "days": ["tuesday"], "time": "14:00",
                "subject": "Geometry", "specialization": "math", "participants": []
            },
            {
                "id": "p3", "mentorId": mentor_id, "days": ["friday"], "time": "14:00",
                "subject": "Calculus", "specialization": "math", "participants": []
            }
        ])))
        .mount(&mock_server)
        .await;

    let mentorlink = MentorLink::new(&mock_server.uri(), "test_key");

    // ディレクトリ: u1 はメンタープロフィールが勝ち、u2 はそのまま残る
    let users = mentorlink.directory().fetch_canonical_users().await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].key, "u1");
    assert_eq!(users[0].role, Role::Mentor);
    assert_eq!(users[0].profile_type, ProfileSource::Mentor);
    assert_eq!(users[1].key, "u2");

    // スケジューリング: 確認内容を組み立ててからキャンセル
    let mut coordinator = mentorlink.scheduling();
    coordinator.refresh(&mentor_id).await.unwrap();
    assert_eq!(coordinator.store().today().len(), 1);

    let confirmation = coordinator
        .begin_confirmation(SessionAction::Cancel, "s1")
        .unwrap();
    assert_eq!(confirmation.subject, "Algebra");
    assert_eq!(confirmation.counterpart, "Bob");

    coordinator.cancel("s1").await.unwrap();
    assert!(coordinator.store().today().is_empty());
    assert!(coordinator.pending_confirmation().is_none());

    // プリセット: 4件目の作成はリモート呼び出しなしで拒否される
    let mut presets = mentorlink.presets(&mentor_id);
    presets.refresh().await.unwrap();
    assert_eq!(presets.schedules().len(), 3);

    let draft = mentorlink_rust::presets::PresetDraft::new()
        .with_days(&["saturday"])
        .with_time("09:00")
        .with_subject("Statistics")
        .with_specialization("math");

    let result = presets.create(&draft).await;
    assert!(result.is_err());
    assert_eq!(presets.schedules().len(), 3);
}

/// 各サービスのエラーが統一エラー型へ変換されること
#[tokio::test]
async fn test_service_errors_convert_into_unified_error() {
    // モックサーバーの起動
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/directory/v1/mentors"))
        .respond_with(ResponseTemplate::new(503).set_body_string("directory down"))
        .mount(&mock_server)
        .await;

    let mentorlink = MentorLink::new(&mock_server.uri(), "test_key");

    // アプリケーション側の ? 伝播を模す
    async fn load_users(mentorlink: &MentorLink) -> Result<usize, Error> {
        let users = mentorlink.directory().fetch_canonical_users().await?;
        Ok(users.len())
    }

    let result = load_users(&mentorlink).await;

    assert!(matches!(result, Err(Error::Directory(_))));
}

#[test]
fn test_from_env_requires_variables() {
    // 環境変数が無い場合は設定エラーになる
    std::env::remove_var("MENTORLINK_URL");
    std::env::remove_var("MENTORLINK_KEY");

    let result = MentorLink::from_env();

    assert!(matches!(result, Err(Error::Config(_))));
}
