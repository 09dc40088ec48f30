// ログ初期化

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{project_dirs, LogConfig};

/// ファイル出力先ディレクトリを決定（設定値 > XDGデータディレクトリ）
pub fn resolve_log_dir(config: &LogConfig) -> Option<PathBuf> {
    if !config.enable_file_logging {
        return None;
    }

    config.log_dir.clone().or_else(|| {
        project_dirs()
            .ok()
            .map(|dirs| dirs.data_local_dir().join("logs"))
    })
}

/// ログを初期化
///
/// `RUST_LOG` が設定されていればそれを優先し、なければ設定ファイルのレベルを使う。
/// ファイル出力が有効な場合は日次ローテーションのファイルにも書き込み、
/// 返される `WorkerGuard` が生きている間だけフラッシュされる。
pub fn init_logging(config: &LogConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .or_else(|_| EnvFilter::try_new("info"))?;

    let (file_layer, guard) = match resolve_log_dir(config) {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            let file_appender = tracing_appender::rolling::daily(&dir, "valocoach.log");
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_dir_disabled_by_default() {
        assert_eq!(resolve_log_dir(&LogConfig::default()), None);
    }

    #[test]
    fn test_explicit_log_dir_wins() {
        let config = LogConfig {
            enable_file_logging: true,
            log_dir: Some(PathBuf::from("/tmp/valocoach-logs")),
            ..LogConfig::default()
        };
        assert_eq!(
            resolve_log_dir(&config),
            Some(PathBuf::from("/tmp/valocoach-logs"))
        );
    }
}
