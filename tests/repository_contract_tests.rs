//! Behaviour every repository backend must share. The in-memory backend
//! always runs; MongoDB runs too when `MONGO_TEST_CONN_STRING` is set.

use std::{collections::BTreeMap, env};

use chrono::{Duration, Utc};

use tutor_server::{
    config::Config,
    db::Database,
    models::domain::{
        Difficulty, Emotion, EmotionSession, Explanation, LearningStyle, QuestionType,
        QuizAttempt, QuizOption, QuizQuestion, RefreshToken, SkillGap, Topic, User, UserProfile,
    },
    repositories::Repositories,
};

async fn backends() -> Vec<(&'static str, Repositories)> {
    let mut backends = vec![("memory", Repositories::in_memory())];

    if let Ok(conn) = env::var("MONGO_TEST_CONN_STRING") {
        let mut config = Config::test_config();
        config.mongo_conn_string = conn;
        config.mongo_db_name = format!("tutor-contract-{}", uuid::Uuid::new_v4().simple());

        let db = Database::connect(&config).await.expect("connect to test MongoDB");
        eprintln!("running repository contracts against {}", db.db_name());
        let repos = Repositories::mongo(&db);
        repos.ensure_indexes().await.expect("create indexes");
        backends.push(("mongodb", repos));
    }

    backends
}

fn make_user(username: &str) -> User {
    User::new(
        username,
        &format!("{}@example.com", username),
        "Test",
        "User",
        "hash".to_string(),
    )
}

fn make_question(id: &str, topic_id: &str, text: &str) -> QuizQuestion {
    QuizQuestion {
        id: id.to_string(),
        topic_id: topic_id.to_string(),
        question_text: text.to_string(),
        question_type: QuestionType::TrueFalse,
        difficulty_level: Difficulty::INTERMEDIATE,
        points: 2,
        options: vec![QuizOption::new("True", true), QuizOption::new("False", false)],
    }
}

fn minutes_ago(minutes: i64) -> chrono::DateTime<Utc> {
    Utc::now() - Duration::minutes(minutes)
}

#[tokio::test]
async fn users_are_unique_by_username_and_email() {
    for (backend, repos) in backends().await {
        let alice = repos.users.create(make_user("alice")).await.expect("create alice");

        let again = repos.users.create(make_user("alice")).await;
        assert!(again.is_err(), "{}: duplicate username accepted", backend);

        let mut same_email = make_user("alicia");
        same_email.email = alice.email.clone();
        assert!(repos.users.create(same_email).await.is_err(), "{}", backend);

        let by_id = repos.users.find_by_id(&alice.id).await.unwrap();
        assert_eq!(by_id.map(|u| u.username).as_deref(), Some("alice"), "{}", backend);
        assert!(repos.users.find_by_email("alice@example.com").await.unwrap().is_some());
        assert!(repos.users.find_by_username("nobody").await.unwrap().is_none());
    }
}

#[tokio::test]
async fn profile_upsert_replaces_existing_profile() {
    for (backend, repos) in backends().await {
        assert!(repos.profiles.find_by_user("u-1").await.unwrap().is_none());

        repos
            .profiles
            .upsert(UserProfile::default_for("u-1"))
            .await
            .unwrap();
        repos
            .profiles
            .upsert(UserProfile::new("u-1", LearningStyle::Reading, Difficulty::ADVANCED))
            .await
            .unwrap();

        let profile = repos.profiles.find_by_user("u-1").await.unwrap().unwrap();
        assert_eq!(profile.learning_style, LearningStyle::Reading, "{}", backend);
        assert_eq!(profile.preferred_difficulty, Difficulty::ADVANCED, "{}", backend);
    }
}

#[tokio::test]
async fn topics_are_unique_by_name_and_listed_by_name() {
    for (backend, repos) in backends().await {
        let topic = |name: &str| Topic::new(name, "", "General", Difficulty::BEGINNER);
        repos.topics.create(topic("Rust")).await.unwrap();
        repos.topics.create(topic("Go")).await.unwrap();

        assert!(repos.topics.create(topic("Rust")).await.is_err(), "{}", backend);

        let names: Vec<String> = repos
            .topics
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["Go", "Rust"], "{}", backend);
        assert!(repos.topics.find_by_name("Rust").await.unwrap().is_some());
    }
}

#[tokio::test]
async fn question_upsert_is_keyed_by_id() {
    for (backend, repos) in backends().await {
        repos
            .questions
            .upsert(make_question("q-1", "t-1", "Original"))
            .await
            .unwrap();
        repos
            .questions
            .upsert(make_question("q-1", "t-1", "Revised"))
            .await
            .unwrap();
        repos
            .questions
            .upsert(make_question("q-2", "t-2", "Other topic"))
            .await
            .unwrap();

        let in_topic = repos.questions.find_by_topic("t-1").await.unwrap();
        assert_eq!(in_topic.len(), 1, "{}", backend);
        assert_eq!(in_topic[0].question_text, "Revised", "{}", backend);
        assert!(repos.questions.find_by_id("missing").await.unwrap().is_none());
    }
}

#[tokio::test]
async fn attempts_come_back_newest_first() {
    for (backend, repos) in backends().await {
        let question = make_question("q-1", "t-1", "Q");
        let other = make_question("q-2", "t-2", "Q");
        let record = |q: &QuizQuestion, correct: bool, minutes: i64| {
            let mut attempt = QuizAttempt::record("u-1", q, None, None, correct, 10);
            attempt.created_at = minutes_ago(minutes);
            attempt
        };

        repos.attempts.create(record(&question, false, 30)).await.unwrap();
        repos.attempts.create(record(&question, true, 10)).await.unwrap();
        repos.attempts.create(record(&other, true, 20)).await.unwrap();
        repos.attempts.create(record(&other, false, 60 * 26)).await.unwrap();

        let all = repos.attempts.find_by_user("u-1").await.unwrap();
        let topics: Vec<&str> = all.iter().map(|a| a.topic_id.as_str()).collect();
        assert_eq!(topics, vec!["t-1", "t-2", "t-1", "t-2"], "{}", backend);
        assert!(
            all.windows(2).all(|pair| pair[0].created_at >= pair[1].created_at),
            "{}",
            backend
        );

        let in_topic = repos
            .attempts
            .find_by_user_and_topic("u-1", "t-1")
            .await
            .unwrap();
        let outcomes: Vec<bool> = in_topic.iter().map(|a| a.is_correct).collect();
        assert_eq!(outcomes, vec![true, false], "{}", backend);
    }
}

#[tokio::test]
async fn explanations_report_latest_and_respect_limit() {
    for (backend, repos) in backends().await {
        let explain = |user_id: &str, topic_id: &str, minutes: i64| {
            let mut explanation = Explanation::new(user_id, topic_id, LearningStyle::Visual);
            explanation.created_at = minutes_ago(minutes);
            explanation.explanation_text = format!("{} {} minutes ago", topic_id, minutes);
            explanation
        };
        for (topic_id, minutes) in [("t-1", 30), ("t-1", 10), ("t-1", 20), ("t-2", 5), ("t-2", 40)] {
            repos.explanations.create(explain("u-1", topic_id, minutes)).await.unwrap();
        }
        repos.explanations.create(explain("u-2", "t-1", 1)).await.unwrap();

        let latest = repos
            .explanations
            .latest_for_user_topic("u-1", "t-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(latest.explanation_text, "t-1 10 minutes ago", "{}", backend);

        let recent = repos.explanations.recent_for_user("u-1", 3).await.unwrap();
        let texts: Vec<&str> = recent.iter().map(|e| e.explanation_text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["t-2 5 minutes ago", "t-1 10 minutes ago", "t-1 20 minutes ago"],
            "{}",
            backend
        );

        let everything = repos.explanations.recent_for_user("u-1", 50).await.unwrap();
        assert_eq!(everything.len(), 5, "{}", backend);
        assert_eq!(everything[4].explanation_text, "t-2 40 minutes ago", "{}", backend);
        assert!(everything.iter().all(|e| e.user_id == "u-1"), "{}", backend);

        assert!(
            repos.explanations.recent_for_user("u-1", 0).await.unwrap().is_empty(),
            "{}: zero limit returned rows",
            backend
        );
        assert!(repos
            .explanations
            .latest_for_user_topic("u-3", "t-1")
            .await
            .unwrap()
            .is_none());
    }
}

#[tokio::test]
async fn stored_timestamps_read_back_unchanged() {
    for (backend, repos) in backends().await {
        let explanation = Explanation::new("u-1", "t-1", LearningStyle::Visual);
        let created_at = explanation.created_at;
        repos.explanations.create(explanation).await.unwrap();

        let stored = repos
            .explanations
            .latest_for_user_topic("u-1", "t-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.created_at, created_at, "{}", backend);
    }
}

#[tokio::test]
async fn skill_gap_upsert_keeps_one_row_per_topic() {
    for (backend, repos) in backends().await {
        let gap = |topic_id: &str, proficiency: f64| SkillGap {
            user_id: "u-1".to_string(),
            topic_id: topic_id.to_string(),
            proficiency,
            total_attempts: 4,
            correct_attempts: (proficiency * 4.0) as i64,
            last_updated: Utc::now(),
        };

        repos.skill_gaps.upsert(gap("t-1", 0.25)).await.unwrap();
        repos.skill_gaps.upsert(gap("t-1", 0.75)).await.unwrap();
        repos.skill_gaps.upsert(gap("t-2", 0.5)).await.unwrap();

        let mut gaps = repos.skill_gaps.find_by_user("u-1").await.unwrap();
        gaps.sort_by(|a, b| a.topic_id.cmp(&b.topic_id));
        assert_eq!(gaps.len(), 2, "{}", backend);
        assert_eq!(gaps[0].proficiency, 0.75, "{}", backend);
    }
}

#[tokio::test]
async fn emotion_sessions_are_stored_per_user() {
    for (backend, repos) in backends().await {
        let session = EmotionSession::new("u-1", "default", Emotion::Happy, 0.9, BTreeMap::new());
        repos.emotion_sessions.create(session).await.unwrap();

        let sessions = repos.emotion_sessions.find_by_user("u-1").await.unwrap();
        assert_eq!(sessions.len(), 1, "{}", backend);
        assert_eq!(sessions[0].detected_emotion, Emotion::Happy, "{}", backend);
        assert!(repos.emotion_sessions.find_by_user("u-2").await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn refresh_tokens_are_consumed_once() {
    for (backend, repos) in backends().await {
        let token = RefreshToken::new("u-1", "rotating", Utc::now() + Duration::hours(1));
        let hash = token.token_hash.clone();
        repos.refresh_tokens.create(token).await.unwrap();

        let stolen = repos.refresh_tokens.consume(&hash, "u-2").await.unwrap();
        assert!(stolen.is_none(), "{}: consumed by another user", backend);

        let first = repos.refresh_tokens.consume(&hash, "u-1").await.unwrap();
        assert!(first.is_some(), "{}", backend);
        let second = repos.refresh_tokens.consume(&hash, "u-1").await.unwrap();
        assert!(second.is_none(), "{}: consumed twice", backend);

        let stored = repos
            .refresh_tokens
            .find_by_token_hash(&hash)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.revoked, "{}", backend);
    }
}

#[tokio::test]
async fn refresh_tokens_revoke_and_expire() {
    for (backend, repos) in backends().await {
        let live = RefreshToken::new("u-1", "live", Utc::now() + Duration::hours(1));
        let stale = RefreshToken::new("u-1", "stale", Utc::now() - Duration::hours(1));
        let live_hash = live.token_hash.clone();
        let stale_hash = stale.token_hash.clone();
        repos.refresh_tokens.create(live).await.unwrap();
        repos.refresh_tokens.create(stale).await.unwrap();

        assert!(
            repos.refresh_tokens.consume(&stale_hash, "u-1").await.unwrap().is_none(),
            "{}: expired token consumed",
            backend
        );

        assert!(repos.refresh_tokens.revoke(&live_hash).await.unwrap(), "{}", backend);
        assert!(!repos.refresh_tokens.revoke("unknown").await.unwrap(), "{}", backend);
        assert!(
            repos.refresh_tokens.consume(&live_hash, "u-1").await.unwrap().is_none(),
            "{}: revoked token consumed",
            backend
        );

        let removed = repos.refresh_tokens.delete_expired().await.unwrap();
        assert_eq!(removed, 1, "{}", backend);
        assert!(repos
            .refresh_tokens
            .find_by_token_hash(&stale_hash)
            .await
            .unwrap()
            .is_none());
        assert!(repos
            .refresh_tokens
            .find_by_token_hash(&live_hash)
            .await
            .unwrap()
            .is_some());
    }
}
