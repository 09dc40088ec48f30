use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

use crate::api::CoachingResponder;
use crate::chat::{greeting, ChatMessage, Transcript};
use crate::error::{SessionError, SessionResult, ValidationError};
use crate::models::PlayerIdentity;

/// 送信中フラグのガード（ドロップ時に解除）
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// チャット画面のセッション
///
/// 会話履歴は追記のみ。同時に送信できるのは1件だけで、送信中の2件目は
/// プロバイダーを呼ばずに `SessionError::Busy` になる。
#[derive(Debug)]
pub struct ChatSession {
    id: Uuid,
    identity: PlayerIdentity,
    transcript: Mutex<Transcript>,
    in_flight: AtomicBool,
}

impl ChatSession {
    /// 挨拶メッセージを先頭に積んだセッションを作成
    pub fn new(identity: PlayerIdentity) -> Self {
        let mut transcript = Transcript::new();
        transcript.push(ChatMessage::assistant(greeting(
            &identity.username,
            identity.region,
        )));

        Self {
            id: Uuid::new_v4(),
            identity,
            transcript: Mutex::new(transcript),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn open(username: &str, region: &str) -> Result<Self, ValidationError> {
        Ok(Self::new(PlayerIdentity::parse(username, region)?))
    }

    /// メッセージを送信して返信を履歴に追加する
    ///
    /// プロバイダーには追加前の履歴を渡す。失敗した場合、ユーザーの発言は
    /// 履歴に残り、返信は追加されない（リトライなし）。
    pub async fn send(&self, input: &str, coach: &dyn CoachingResponder) -> SessionResult<String> {
        if input.trim().is_empty() {
            return Err(ValidationError::EmptyMessage.into());
        }

        let Some(_guard) = InFlight::acquire(&self.in_flight) else {
            tracing::warn!(session_id = %self.id, "⏳ Send rejected, reply still pending");
            return Err(SessionError::Busy);
        };

        let history = {
            let mut transcript = self.transcript.lock();
            let history = transcript.as_slice().to_vec();
            transcript.push(ChatMessage::user(input));
            history
        };

        tracing::debug!(
            session_id = %self.id,
            provider = coach.name(),
            history_len = history.len(),
            "💬 Sending chat message"
        );

        let region = self.identity.region.to_string();
        match coach
            .coaching_reply(&self.identity.username, &region, input, &history)
            .await
        {
            Ok(reply) => {
                self.transcript
                    .lock()
                    .push(ChatMessage::assistant(reply.clone()));
                Ok(reply)
            }
            Err(e) => {
                tracing::error!(session_id = %self.id, "❌ Chat request failed: {}", e);
                Err(e.into())
            }
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn identity(&self) -> &PlayerIdentity {
        &self.identity
    }

    /// 現在の履歴のスナップショット
    pub fn transcript(&self) -> Transcript {
        self.transcript.lock().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}
