//! # アプリケーション設定
//!
//! 環境変数とローカルの設定ファイル（`.env`）から設定スナップショットを読み込む。
//!
//! ## 優先順位
//!
//! 1. プロセスの環境変数（空文字列は未設定とみなす）
//! 2. `.env` ファイルの値
//! 3. デフォルト値
//!
//! `.env` にあって環境変数に無いキーは、プロセスの環境変数にも書き込む。
//! ファイルが存在しない・読めない場合はエラーにせず、環境変数のみで続行する。
//!
//! ## 環境変数一覧
//!
//! | 変数名 | デフォルト | 説明 |
//! |--------|------------|------|
//! | `PORT` | `8080` | 待ち受けポート |
//! | `ENV` | `development` | 実行環境（`production` で JSON ログ） |
//! | `DATABASE_URL` | （空） | PostgreSQL 接続 URL。空ならデータベースなしで起動 |
//! | `REDIS_URL` | （空） | Redis 接続 URL。空なら Redis なしで起動 |
//! | `JWT_SECRET` | （空） | 認証用シークレット（未使用） |
//! | `LOG_LEVEL` | `info` | `RUST_LOG` 未設定時のログレベル |
//!
//! 値の検証は行わない。不正な URL やポート番号はそのまま通り、
//! 接続時・待ち受け時に初めてエラーになる。
//!
//! ## `.env` の書式
//!
//! 1 行 1 エントリの `KEY=VALUE`。値は書かれたとおりに扱い、
//! エスケープ・複数行の値・変数展開（`$VAR`）・行末コメントはサポートしない。
//!
//! - 前後の空白は取り除く
//! - 空行と `#` で始まる行は無視する
//! - 値全体を囲む 1 組の引用符（`"` / `'`）は外す
//! - `=` を含まない行は読み飛ばし、トレーシング初期化後にデバッグログに出す
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use modi_api::config::Settings;
//!
//! let loaded = Settings::load();
//! // init_tracing(...)
//! loaded.log_skipped_lines();
//! println!("ポート: {}", loaded.settings.port);
//! ```

use std::{
    env, fmt, fs,
    path::{Path, PathBuf},
};

/// ローカル設定ファイルの既定のパス
pub const SETTINGS_FILE: &str = ".env";

/// 設定スナップショット
///
/// 起動時に一度だけ構築し、各コンポーネントに参照で渡す。
/// 構築後に環境変数を読み直すコンポーネントは存在しない。
///
/// `Debug` 出力では接続 URL をマスクし、シークレットを伏せる。
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    /// 待ち受けポート（検証しない）
    pub port:         String,
    /// 実行環境（`development`, `staging`, `production`）
    pub environment:  String,
    /// PostgreSQL 接続 URL（空なら未設定）
    pub database_url: String,
    /// Redis 接続 URL（空なら未設定）
    pub redis_url:    String,
    pub jwt_secret:   String,
    pub log_level:    String,
}

/// 設定の読み込み結果
///
/// 読み込みはトレーシング初期化より前に行うため、読み飛ばした行は
/// ここに残しておき、初期化後に [`log_skipped_lines`](Self::log_skipped_lines) で出力する。
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub settings:      Settings,
    /// 読み込んだ設定ファイルのパス
    pub source:        PathBuf,
    /// 読み飛ばした行の行番号（1 始まり）
    pub skipped_lines: Vec<usize>,
}

impl LoadedSettings {
    /// 読み飛ばした行をデバッグログに出す
    pub fn log_skipped_lines(&self) {
        for line in &self.skipped_lines {
            tracing::debug!(
                file = %self.source.display(),
                line,
                "設定ファイルの行を読み飛ばしました"
            );
        }
    }
}

impl Settings {
    /// カレントディレクトリの `.env` と環境変数から設定を読み込む
    pub fn load() -> LoadedSettings {
        Self::load_from(SETTINGS_FILE)
    }

    /// 指定したファイルと環境変数から設定を読み込む
    ///
    /// ファイルにあって環境変数に無い（または空の）キーを環境変数に書き込むため、
    /// 他のスレッドが環境変数を読み書きしていない時点（ランタイム起動前）で呼ぶこと。
    pub fn load_from(path: impl AsRef<Path>) -> LoadedSettings {
        let path = path.as_ref();
        let file = SettingsFile::read(path);

        for (key, value) in &file.entries {
            if lookup_env(key).is_none() {
                // SAFETY: 呼び出し側の前提により、この時点で環境変数に触れるスレッドは他にない。
                // キーが空でないこと、`=` と NUL を含まないことは parse_entry が保証する
                unsafe { env::set_var(key, value) };
            }
        }

        LoadedSettings {
            settings:      Self::resolve(lookup_env),
            source:        path.to_path_buf(),
            skipped_lines: file.skipped_lines,
        }
    }

    /// 環境変数と設定ファイルの内容から設定を組み立てる
    ///
    /// 環境変数を優先し、無いキーだけ `file` の値を使う。環境変数は書き換えない。
    pub fn resolve_with_file(
        env_lookup: impl Fn(&str) -> Option<String>,
        file: &[(String, String)],
    ) -> Self {
        Self::resolve(|key| {
            env_lookup(key).filter(|v| !v.is_empty()).or_else(|| {
                file.iter()
                    .find(|(k, _)| k == key)
                    .map(|(_, v)| v.clone())
            })
        })
    }

    /// キーから値を引く関数を元に設定を組み立てる
    ///
    /// 値が無い・空のキーはデフォルト値になる。
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            port:         get("PORT", "8080"),
            environment:  get("ENV", "development"),
            database_url: get("DATABASE_URL", ""),
            redis_url:    get("REDIS_URL", ""),
            jwt_secret:   get("JWT_SECRET", ""),
            log_level:    get("LOG_LEVEL", "info"),
        }
    }

    /// 待ち受けアドレス（全インターフェース）
    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secret = if self.jwt_secret.is_empty() {
            "(not set)"
        } else {
            "[REDACTED]"
        };
        f.debug_struct("Settings")
            .field("port", &self.port)
            .field("environment", &self.environment)
            .field("database_url", &mask_url(&self.database_url))
            .field("redis_url", &mask_url(&self.redis_url))
            .field("jwt_secret", &secret)
            .field("log_level", &self.log_level)
            .finish()
    }
}

/// ログ出力用に URL をマスクする
///
/// 空なら `(not set)`、20 文字を超える場合は先頭 10 文字と末尾 10 文字だけ残す。
pub fn mask_url(url: &str) -> String {
    if url.is_empty() {
        return "(not set)".to_string();
    }

    let chars: Vec<char> = url.chars().collect();
    if chars.len() > 20 {
        let head: String = chars[..10].iter().collect();
        let tail: String = chars[chars.len() - 10..].iter().collect();
        format!("{head}...{tail}")
    } else {
        url.to_string()
    }
}

/// `.env` 形式の設定ファイルの内容
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsFile {
    /// `KEY=VALUE` のエントリ（ファイル内の順序）
    pub entries:       Vec<(String, String)>,
    /// 読み飛ばした行の行番号（1 始まり）
    pub skipped_lines: Vec<usize>,
}

impl SettingsFile {
    /// ファイルを読む
    ///
    /// ファイルが無い・読めない（UTF-8 でない場合を含む）ときは空を返す。
    pub fn read(path: &Path) -> Self {
        fs::read_to_string(path)
            .map(|content| Self::parse(&content))
            .unwrap_or_default()
    }

    /// ファイルの内容をパースする
    pub fn parse(content: &str) -> Self {
        let mut file = Self::default();

        for (index, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match parse_entry(line) {
                Some(entry) => file.entries.push(entry),
                None => file.skipped_lines.push(index + 1),
            }
        }

        file
    }
}

/// `KEY=VALUE` を 1 組パースする
///
/// 環境変数に書き込めないエントリ（キーが空、NUL を含む）は `None`。
fn parse_entry(line: &str) -> Option<(String, String)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = unquote(value.trim());

    if key.is_empty() || key.contains('\0') || value.contains('\0') {
        return None;
    }
    Some((key.to_string(), value.to_string()))
}

/// 値全体を囲む 1 組の引用符を外す
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn lookup_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}
