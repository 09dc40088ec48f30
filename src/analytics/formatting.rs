//! 表示用の数値フォーマット
//!
//! パーセンテージ・比率・戦績ラベルなど、ダッシュボードで使う単純な計算のみを扱う。

use chrono::{DateTime, Utc};

/// 小数点以下1桁に丸める
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// 小数点以下2桁に丸める
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 割合を0〜100のパーセンテージで返す（小数点以下1桁）
///
/// 分母が0の場合は0を返す。
pub fn percentage(part: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    clamp_percent(round1(part as f64 / total as f64 * 100.0))
}

/// パーセンテージを[0, 100]に収める（NaNは0扱い）
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// 比率（分母は最低1として扱う）
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    round2(numerator / denominator.max(1.0))
}

/// KDA文字列: (kills + assists) / deaths を2桁で整形
pub fn kda_string(kills: u32, deaths: u32, assists: u32) -> String {
    format!("{:.2}", (kills + assists) as f64 / deaths.max(1) as f64)
}

/// 戦績ラベル（例: "8W - 2L"）
pub fn record_label(wins: u32, losses: u32) -> String {
    format!("{}W - {}L", wins, losses)
}

/// 相対日付ラベル（例: "1d ago"）
pub fn relative_date(started_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(started_at);

    if elapsed.num_days() >= 1 {
        format!("{}d ago", elapsed.num_days())
    } else if elapsed.num_hours() >= 1 {
        format!("{}h ago", elapsed.num_hours())
    } else if elapsed.num_minutes() >= 1 {
        format!("{}m ago", elapsed.num_minutes())
    } else {
        "just now".to_string()
    }
}
