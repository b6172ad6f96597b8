use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use interface::{Client, Depth, History};

use crate::record::{OrderRecordRepository, RecordError};
use crate::scope::OperationScope;

/// 전송 계층과 저장소 사이의 얇은 조율 계층.
///
/// 호출마다 호출자 범위에서 자식 범위를 파생하고(설정된 timeout을 마감으로 사용),
/// 저장소 결과를 그대로 돌려준 뒤 자식 범위를 해제한다. 호출 간 상태는 없다.
#[derive(Clone)]
pub struct OrderService {
    repository: Arc<dyn OrderRecordRepository>,
    timeout: Duration,
}

impl OrderService {
    pub fn new(repository: Arc<dyn OrderRecordRepository>, timeout: Duration) -> Self {
        Self {
            repository,
            timeout,
        }
    }

    /// timeout이 0이면 마감 없이 취소만 전파한다
    fn derive(&self, parent: &OperationScope) -> OperationScope {
        if self.timeout.is_zero() {
            parent.child()
        } else {
            parent.child_with_timeout(self.timeout)
        }
    }

    pub async fn get_order_book(
        &self,
        scope: &OperationScope,
        exchange_name: &str,
        pair: &str,
    ) -> Result<Vec<Depth>, RecordError> {
        let scope = self.derive(scope);
        let _release = scope.release_on_drop();

        self.repository
            .read_order_book(&scope, exchange_name, pair)
            .await
            .inspect_err(|e| warn!(exchange_name, pair, error = %e, "Failed to read order book"))
    }

    pub async fn save_order_book(
        &self,
        scope: &OperationScope,
        exchange_name: &str,
        pair: &str,
        depth: &[Depth],
    ) -> Result<(), RecordError> {
        let scope = self.derive(scope);
        let _release = scope.release_on_drop();

        self.repository
            .write_order_book(&scope, exchange_name, pair, depth)
            .await
            .inspect_err(|e| {
                warn!(
                    exchange_name,
                    pair,
                    levels = depth.len(),
                    error = %e,
                    "Failed to save order book"
                )
            })
    }

    pub async fn get_order_history(
        &self,
        scope: &OperationScope,
        client: &Client,
    ) -> Result<Vec<History>, RecordError> {
        let scope = self.derive(scope);
        let _release = scope.release_on_drop();

        self.repository
            .read_history(&scope, client)
            .await
            .inspect_err(|e| warn!(?client, error = %e, "Failed to read order history"))
    }

    pub async fn save_order(
        &self,
        scope: &OperationScope,
        client: &Client,
        history: Option<&History>,
    ) -> Result<(), RecordError> {
        let scope = self.derive(scope);
        let _release = scope.release_on_drop();

        self.repository
            .write_history(&scope, client, history)
            .await
            .inspect_err(|e| warn!(?client, error = %e, "Failed to save order history"))
    }
}
