//! 환경 변수 기반 설정. `.env`는 라이브러리 로드 시 읽힌다.

use std::env;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Env {
    Local,
    Prod,
}

impl Env {
    /// 알 수 없는 값은 prod로 취급
    pub fn parse(value: &str) -> Self {
        match value {
            "local" => Env::Local,
            _ => Env::Prod,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickhouseConfig {
    pub host: String,
    pub port: String,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl ClickhouseConfig {
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// 요청마다 저장소 호출에 적용되는 마감 시간
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub env: Env,
    pub clickhouse: ClickhouseConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// `lookup`이 None 또는 빈 문자열을 주면 기본값을 쓴다
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let port = get("SERVER_PORT", "8080");
        let port = port.trim_start_matches(':').parse().unwrap_or(8080);
        let timeout = parse_duration(&get("TIMEOUT", "10s")).unwrap_or(DEFAULT_TIMEOUT);

        Self {
            env: Env::parse(&get("ENV", "prod")),
            clickhouse: ClickhouseConfig {
                host: get("CLICKHOUSE_HOST", "localhost"),
                port: get("CLICKHOUSE_PORT", "8123"),
                user: get("CLICKHOUSE_ADMIN_USER", "clickhouse"),
                password: get("CLICKHOUSE_ADMIN_PASSWORD", "clickhouse"),
                database: get("CLICKHOUSE_DATABASE", "default"),
            },
            server: ServerConfig { port, timeout },
        }
    }
}

/// "500ms", "10s", "2m", "1h" 또는 단위 없는 초
pub fn parse_duration(value: &str) -> Option<Duration> {
    let value = value.trim();
    let split = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    let (amount, unit) = value.split_at(split);
    let amount: u64 = amount.parse().ok()?;

    match unit {
        "ms" => Some(Duration::from_millis(amount)),
        "" | "s" => Some(Duration::from_secs(amount)),
        "m" => Some(Duration::from_secs(amount * 60)),
        "h" => Some(Duration::from_secs(amount * 3600)),
        _ => None,
    }
}
