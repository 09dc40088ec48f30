pub mod henrik; // HenrikDev APIクライアント
pub mod mock; // 固定データ・キーワード応答のモック
pub mod provider; // プロバイダートレイト

pub use henrik::HenrikStatsClient;
pub use mock::{MockCoach, MockStatsProvider, SimulatedLatency};
pub use provider::{CoachingResponder, StatsProvider};

use std::sync::Arc;

use crate::config::{Backend, ProviderConfig};
use crate::error::ProviderResult;

/// 設定に応じた統計プロバイダーを生成
pub fn build_stats_provider(config: &ProviderConfig) -> ProviderResult<Arc<dyn StatsProvider>> {
    match config.backend {
        Backend::Mock => Ok(Arc::new(MockStatsProvider::from_config(config))),
        Backend::Henrik => {
            if config.api_key().is_none() {
                tracing::warn!(
                    env = %config.api_key_env,
                    "⚠️ No HenrikDev API key set, requests will likely be rejected"
                );
            }
            Ok(Arc::new(HenrikStatsClient::from_config(config)?))
        }
    }
}

/// コーチは常にモック（実際の言語モデル連携は行わない）
pub fn build_coach(config: &ProviderConfig) -> Arc<dyn CoachingResponder> {
    Arc::new(MockCoach::from_config(config))
}
