use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use color_eyre::eyre;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::record::ClickHouseOrderRecordRepository;
use crate::scope::OperationScope;
use crate::server::{create_router, AppState};
use crate::service::OrderService;

/// 종료 신호 이후 진행 중인 요청을 기다리는 최대 시간
const SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

pub struct App {
    config: AppConfig,
    db: clickhouse::Client,
    scope: OperationScope,
    router: Router,
}

impl App {
    /// ClickHouse 연결, 스키마 준비, 서비스/라우터 구성
    pub async fn new(config: AppConfig) -> eyre::Result<Self> {
        let db = clickhouse::Client::default()
            .with_url(config.clickhouse.url())
            .with_user(&config.clickhouse.user)
            .with_password(&config.clickhouse.password)
            .with_database(&config.clickhouse.database)
            .with_option("max_execution_time", "60");

        let repository = ClickHouseOrderRecordRepository::new(db.clone())
            .await
            .map_err(|e| eyre::eyre!("주문 기록 저장소 초기화 실패: {}", e))?;

        info!(
            env = ?config.env,
            url = %config.clickhouse.url(),
            database = %config.clickhouse.database,
            "Connected to ClickHouse"
        );

        let scope = OperationScope::root();
        let service = OrderService::new(Arc::new(repository), config.server.timeout);
        let router = create_router(AppState::new(service, scope.clone()));

        Ok(Self {
            config,
            db,
            scope,
            router,
        })
    }

    /// 종료 신호를 받을 때까지 HTTP 서버 실행.
    /// 신호 이후 최대 SHUTDOWN_GRACE 동안 요청을 마무리하고 루트 범위를 취소한다.
    pub async fn run(self) -> eyre::Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.server.port));
        let listener = TcpListener::bind(addr).await?;
        info!(%addr, timeout = ?self.config.server.timeout, "Listening");

        let drain = CancellationToken::new();
        let server = axum::serve(listener, self.router).with_graceful_shutdown({
            let drain = drain.clone();
            async move { drain.cancelled().await }
        });
        let mut server = tokio::spawn(server.into_future());

        tokio::select! {
            res = &mut server => {
                // 신호 없이 서버가 끝난 경우
                self.scope.cancel();
                res??;
                return Ok(());
            }
            _ = shutdown_signal() => {
                info!("Received shutdown signal");
            }
        }

        drain.cancel();
        match tokio::time::timeout(SHUTDOWN_GRACE, &mut server).await {
            Ok(Ok(Ok(()))) => info!("Server drained"),
            Ok(Ok(Err(e))) => error!(error = %e, "Server error while draining"),
            Ok(Err(e)) => error!(error = %e, "Server task failed"),
            Err(_) => {
                warn!(grace = ?SHUTDOWN_GRACE, "Shutdown grace period elapsed, aborting");
                server.abort();
            }
        }

        self.scope.cancel();
        drop(self.db);
        info!("ClickHouse client released");

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
