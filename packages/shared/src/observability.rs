//! # Observability 基盤
//!
//! トレーシング初期化とログ出力形式の設定を提供する。
//!
//! ログレベルと出力形式は設定スナップショットから決める。
//! `RUST_LOG` が設定されている場合はそちらが優先される。

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// JSON 形式（本番環境向け）
    Json,
    /// 人間が読みやすい形式（開発環境向け）
    #[default]
    Pretty,
}

impl LogFormat {
    /// 実行環境名からログ形式を決める
    ///
    /// `production` のみ [`Json`](LogFormat::Json)、それ以外は
    /// [`Pretty`](LogFormat::Pretty)。
    pub fn for_environment(environment: &str) -> Self {
        match environment {
            "production" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// サービス名（JSON ログの `span.service` フィールドに出力）
    pub service_name:      String,
    /// ログ出力形式
    pub log_format:        LogFormat,
    /// `RUST_LOG` 未設定時に使うフィルタ
    pub default_directive: String,
}

impl TracingConfig {
    /// 新しい設定を作成する
    ///
    /// `log_level` が空の場合は `info` として扱う。
    pub fn new(service_name: impl Into<String>, log_format: LogFormat, log_level: &str) -> Self {
        let level = if log_level.is_empty() { "info" } else { log_level };
        Self {
            service_name:      service_name.into(),
            log_format,
            default_directive: format!("{level},modi=debug"),
        }
    }
}

/// トレーシングを初期化する
///
/// JSON モードでは以下のフィールドがトップレベルに出力される:
/// - `timestamp`, `level`, `target`, `message`
///
/// サービス名は呼び出し元で `tracing::info_span!("app", service = "...")` を設定することで
/// `span.service` として JSON に含まれる。
#[cfg(feature = "observability")]
pub fn init_tracing(config: &TracingConfig) {
    use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.default_directive.as_str().into());

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_target(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_for_environment_productionでjsonを返す() {
        assert_eq!(LogFormat::for_environment("production"), LogFormat::Json);
    }

    #[test]
    fn test_for_environment_それ以外でprettyを返す() {
        assert_eq!(LogFormat::for_environment("development"), LogFormat::Pretty);
        assert_eq!(LogFormat::for_environment("staging"), LogFormat::Pretty);
        assert_eq!(LogFormat::for_environment(""), LogFormat::Pretty);
    }

    #[test]
    fn test_defaultでprettyを返す() {
        assert_eq!(LogFormat::default(), LogFormat::Pretty);
    }

    #[test]
    fn test_newでフィールドが正しく設定される() {
        let config = TracingConfig::new("modi-api", LogFormat::Json, "warn");

        assert_eq!(config.service_name, "modi-api");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.default_directive, "warn,modi=debug");
    }

    #[test]
    fn test_newでログレベルが空ならinfoを使う() {
        let config = TracingConfig::new("modi-api", LogFormat::Pretty, "");

        assert_eq!(config.default_directive, "info,modi=debug");
    }
}
