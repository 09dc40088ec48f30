use uuid::Uuid;

use crate::api::StatsProvider;
use crate::error::{SessionError, SessionResult, ValidationError};
use crate::models::{PlayerIdentity, PlayerStats};

/// 統計の読み込み状態
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Loaded(PlayerStats),
    /// ユーザー向けの通知メッセージ
    Failed(String),
}

/// ダッシュボード画面のセッション
#[derive(Debug, Clone)]
pub struct DashboardSession {
    id: Uuid,
    identity: PlayerIdentity,
    state: LoadState,
}

impl DashboardSession {
    pub fn new(identity: PlayerIdentity) -> Self {
        Self {
            id: Uuid::new_v4(),
            identity,
            state: LoadState::Loading,
        }
    }

    /// 入力を検証してセッションを開く（プロバイダーはまだ呼ばない）
    pub fn open(username: &str, region: &str) -> Result<Self, ValidationError> {
        Ok(Self::new(PlayerIdentity::parse(username, region)?))
    }

    /// `open` に加えて、プロバイダー固有の入力チェックも通す
    ///
    /// henrik バックエンドでは `#tag` のないユーザー名がここで弾かれる。
    pub fn open_for(
        username: &str,
        region: &str,
        provider: &dyn StatsProvider,
    ) -> SessionResult<Self> {
        let identity = PlayerIdentity::parse(username, region)?;
        provider.validate(&identity)?;
        Ok(Self::new(identity))
    }

    /// 統計を1回だけ読み込む
    ///
    /// 既に読み込み済み（成功・失敗とも）の場合はプロバイダーを呼ばずに現在の状態を返す。
    /// 失敗時はログに記録し、リトライはしない。
    /// プロバイダーの入力チェックに通らない場合は呼び出し前に `Failed` になる。
    pub async fn load(&mut self, provider: &dyn StatsProvider) -> &LoadState {
        if !matches!(self.state, LoadState::Loading) {
            return &self.state;
        }

        if let Err(e) = provider.validate(&self.identity) {
            tracing::warn!(session_id = %self.id, "⚠️ Stats request rejected: {}", e);
            self.state = LoadState::Failed(e.to_string());
            return &self.state;
        }

        tracing::info!(
            session_id = %self.id,
            provider = provider.name(),
            username = %self.identity.username,
            region = %self.identity.region,
            "📊 Loading player stats"
        );

        self.state = match provider.player_stats(&self.identity).await {
            Ok(stats) => {
                tracing::debug!(
                    session_id = %self.id,
                    matches = stats.recent_matches.len(),
                    "✅ Player stats loaded"
                );
                LoadState::Loaded(stats)
            }
            Err(e) => {
                tracing::error!(session_id = %self.id, "❌ Failed to load stats: {}", e);
                LoadState::Failed(SessionError::from(e).user_notice())
            }
        };

        &self.state
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn identity(&self) -> &PlayerIdentity {
        &self.identity
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    pub fn stats(&self) -> Option<&PlayerStats> {
        match &self.state {
            LoadState::Loaded(stats) => Some(stats),
            _ => None,
        }
    }
}
