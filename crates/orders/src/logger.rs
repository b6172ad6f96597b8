use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const LOG_DIR: &str = "logs";
const LOG_FILE: &str = "orders.log";

/// stdout + 일별 롤링 파일 로거 초기화.
/// 반환된 가드는 프로세스가 끝날 때까지 들고 있어야 버퍼가 flush 된다.
pub fn init_tracing(debug: bool) -> Vec<WorkerGuard> {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let (stdout_writer, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());
    let file_appender = tracing_appender::rolling::daily(LOG_DIR, LOG_FILE);
    let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(stdout_writer).with_target(false))
        .with(fmt::layer().with_writer(file_writer).with_ansi(false))
        .try_init();

    // 테스트 등에서 이미 초기화된 경우는 무시
    if let Err(e) = result {
        eprintln!("tracing already initialized: {}", e);
    }

    vec![stdout_guard, file_guard]
}
