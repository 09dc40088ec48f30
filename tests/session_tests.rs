//! セッション層の統合テスト
//!
//! 入力検証・送信中ガード・失敗時の扱いを、描画環境なしで検証する。

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use valocoach::{
    api::{CoachingResponder, HenrikStatsClient, MockCoach, MockStatsProvider, StatsProvider},
    ChatMessage, ChatRole, ChatSession, DashboardSession, LoadState, PlayerIdentity,
    PlayerStats, ProviderError, ProviderResult, SessionError, ValidationError,
};

/// 呼び出し回数を数えるだけのプロバイダー
#[derive(Default)]
struct CountingProvider {
    calls: AtomicUsize,
}

#[async_trait]
impl StatsProvider for CountingProvider {
    async fn player_stats(&self, _identity: &PlayerIdentity) -> ProviderResult<PlayerStats> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ProviderError::NotFound)
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

/// 常に失敗するコーチ
#[derive(Default)]
struct FailingCoach {
    calls: AtomicUsize,
}

#[async_trait]
impl CoachingResponder for FailingCoach {
    async fn coaching_reply(
        &self,
        _username: &str,
        _region: &str,
        _message: &str,
        _history: &[ChatMessage],
    ) -> ProviderResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ProviderError::Status(500))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

/// 受け取った履歴の長さを返すコーチ
struct HistoryEcho;

#[async_trait]
impl CoachingResponder for HistoryEcho {
    async fn coaching_reply(
        &self,
        _username: &str,
        _region: &str,
        _message: &str,
        history: &[ChatMessage],
    ) -> ProviderResult<String> {
        Ok(history.len().to_string())
    }

    fn name(&self) -> &'static str {
        "history-echo"
    }
}

#[test]
fn test_blank_input_rejected_before_any_call() {
    assert!(matches!(
        DashboardSession::open("", "NA"),
        Err(ValidationError::EmptyUsername)
    ));
    assert!(matches!(
        DashboardSession::open("   ", "NA"),
        Err(ValidationError::EmptyUsername)
    ));
    assert!(matches!(
        DashboardSession::open("Swift728", " "),
        Err(ValidationError::EmptyRegion)
    ));
    assert!(matches!(
        DashboardSession::open("Swift728", "OCE"),
        Err(ValidationError::UnknownRegion(_))
    ));
}

fn henrik_client() -> HenrikStatsClient {
    // 到達不能なアドレス。リクエスト前に検証で弾かれる
    HenrikStatsClient::new("http://127.0.0.1:9", None, 1, Duration::from_millis(50)).unwrap()
}

#[test]
fn test_untagged_username_rejected_for_henrik() {
    let result = DashboardSession::open_for("Swift728", "AP", &henrik_client());

    let err = result.unwrap_err();
    assert!(matches!(
        err,
        SessionError::Validation(ValidationError::MissingTag(ref name)) if name == "Swift728"
    ));
    assert_eq!(err.user_notice(), "Username 'Swift728' is missing a '#tag' suffix");

    assert!(DashboardSession::open_for("Swift728#OC", "AP", &henrik_client()).is_ok());
    assert!(DashboardSession::open_for("Swift728", "AP", &MockStatsProvider::default()).is_ok());
}

#[tokio::test]
async fn test_load_rejects_untagged_username_without_calling_provider() {
    let mut session = DashboardSession::open("Swift728", "AP").unwrap();

    let state = session.load(&henrik_client()).await.clone();
    assert_eq!(
        state,
        LoadState::Failed("Username 'Swift728' is missing a '#tag' suffix".to_string())
    );
}

#[tokio::test(start_paused = true)]
async fn test_load_transitions_to_loaded() {
    let mut session = DashboardSession::open("Swift728", "EU").unwrap();
    assert!(session.is_loading());
    assert!(session.stats().is_none());

    let state = session.load(&MockStatsProvider::default()).await;
    assert!(matches!(state, LoadState::Loaded(_)));

    let stats = session.stats().unwrap();
    assert_eq!(stats.username, "Swift728");
    assert!(!session.is_loading());
}

#[tokio::test]
async fn test_failure_is_surfaced_without_retry() {
    let provider = CountingProvider::default();
    let mut session = DashboardSession::open("Swift728", "NA").unwrap();

    let state = session.load(&provider).await.clone();
    assert_eq!(
        state,
        LoadState::Failed("Failed to get a response. Please try again.".to_string())
    );

    // 同じセッションで再度loadしてもプロバイダーは呼ばれない
    session.load(&provider).await;
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_session_starts_with_greeting() {
    let session = ChatSession::open("Swift728", "AP").unwrap();
    let transcript = session.transcript();

    assert_eq!(transcript.len(), 1);
    let greeting = transcript.last().unwrap();
    assert_eq!(greeting.role, ChatRole::Assistant);
    assert!(greeting.content.starts_with("Hey Swift728! I'm your AI Valorant coach."));
}

#[test]
fn test_blank_identity_rejected() {
    assert!(matches!(
        ChatSession::open(" ", "AP"),
        Err(ValidationError::EmptyUsername)
    ));
    assert!(matches!(
        ChatSession::open("Swift728", ""),
        Err(ValidationError::EmptyRegion)
    ));
}

#[tokio::test]
async fn test_empty_message_rejected_before_call() {
    let session = ChatSession::open("Swift728", "AP").unwrap();
    let coach = FailingCoach::default();

    for input in ["", "   ", "\n\t"] {
        let result = session.send(input, &coach).await;
        assert!(matches!(
            result,
            Err(SessionError::Validation(ValidationError::EmptyMessage))
        ));
    }

    assert_eq!(coach.calls.load(Ordering::SeqCst), 0);
    assert_eq!(session.transcript().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_send_appends_user_and_assistant_messages() {
    let session = ChatSession::open("Swift728", "AP").unwrap();
    let coach = MockCoach::default();

    let reply = session
        .send("Tips for ranking up?", &coach)
        .await
        .unwrap();
    assert!(reply.starts_with("To climb from Diamond 2:"));

    let transcript = session.transcript();
    let roles: Vec<_> = transcript.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![ChatRole::Assistant, ChatRole::User, ChatRole::Assistant]
    );
    assert_eq!(transcript.as_slice()[1].content, "Tips for ranking up?");
    assert_eq!(transcript.last().unwrap().content, reply);
    assert!(!session.is_busy());
}

#[tokio::test]
async fn test_history_excludes_the_new_message() {
    let session = ChatSession::open("Swift728", "AP").unwrap();

    // 挨拶のみ
    assert_eq!(session.send("first", &HistoryEcho).await.unwrap(), "1");
    // 挨拶 + 1通目 + 返信
    assert_eq!(session.send("second", &HistoryEcho).await.unwrap(), "3");
}

#[tokio::test(start_paused = true)]
async fn test_overlapping_send_is_rejected() {
    let session = ChatSession::open("Swift728", "NA").unwrap();
    let coach = MockCoach::default();

    let (first, second) = tokio::join!(
        session.send("How can I improve?", &coach),
        session.send("Which agent?", &coach)
    );

    assert!(first.is_ok());
    assert!(matches!(second, Err(SessionError::Busy)));

    // 挨拶 + ユーザー発言1件 + 返信1件
    assert_eq!(session.transcript().len(), 3);
    assert!(!session.is_busy());
}

#[tokio::test]
async fn test_provider_failure_keeps_user_message() {
    let session = ChatSession::open("Swift728", "NA").unwrap();
    let coach = FailingCoach::default();

    let err = session.send("hello", &coach).await.unwrap_err();
    assert!(matches!(err, SessionError::Provider(ProviderError::Status(500))));
    assert_eq!(err.user_notice(), "Failed to get a response. Please try again.");

    let transcript = session.transcript();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript.last().unwrap().role, ChatRole::User);
    assert_eq!(coach.calls.load(Ordering::SeqCst), 1);

    // ガード解除済み。次の送信はプロバイダーに届く
    let _ = session.send("hello again", &coach).await;
    assert_eq!(coach.calls.load(Ordering::SeqCst), 2);
}
