//! セッション状態
//!
//! 画面ごとの状態（統計の読み込み状態・チャット履歴・送信中フラグ）を明示的な
//! オブジェクトとして保持し、プロバイダー呼び出しの境界で受け渡す。
//! グローバル状態は持たないため、描画環境なしでテストできる。

pub mod chat;
pub mod dashboard;

pub use chat::ChatSession;
pub use dashboard::{DashboardSession, LoadState};
