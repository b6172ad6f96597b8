//! 테스트용 인메모리 저장소

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use interface::{Client, Depth, History};

use super::{OrderRecordRepository, RecordError};
use crate::scope::OperationScope;

#[derive(Default)]
pub(crate) struct MemoryOrderRecordRepository {
    books: Mutex<HashMap<(String, String), Vec<Depth>>>,
    histories: Mutex<HashMap<Client, Vec<History>>>,
    /// 설정되면 모든 호출이 이 시간만큼 지연된다
    latency: Option<Duration>,
    /// 설정되면 모든 호출이 백엔드 에러로 실패한다
    failing: bool,
    /// 마지막 호출에 전달된 범위
    last_scope: Mutex<Option<OperationScope>>,
}

impl MemoryOrderRecordRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    pub(crate) fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Default::default()
        }
    }

    pub(crate) fn last_scope(&self) -> Option<OperationScope> {
        self.last_scope.lock().unwrap().clone()
    }

    async fn enter(&self, scope: &OperationScope) -> Result<(), RecordError> {
        *self.last_scope.lock().unwrap() = Some(scope.clone());

        scope
            .run(async {
                if let Some(latency) = self.latency {
                    tokio::time::sleep(latency).await;
                }
                if self.failing {
                    return Err(RecordError::Other("backend unavailable".to_string()));
                }
                Ok(())
            })
            .await
    }
}

#[async_trait]
impl OrderRecordRepository for MemoryOrderRecordRepository {
    async fn read_order_book(
        &self,
        scope: &OperationScope,
        exchange_name: &str,
        pair: &str,
    ) -> Result<Vec<Depth>, RecordError> {
        self.enter(scope).await?;
        let books = self.books.lock().unwrap();
        Ok(books
            .get(&(exchange_name.to_string(), pair.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn write_order_book(
        &self,
        scope: &OperationScope,
        exchange_name: &str,
        pair: &str,
        depth: &[Depth],
    ) -> Result<(), RecordError> {
        self.enter(scope).await?;
        self.books
            .lock()
            .unwrap()
            .entry((exchange_name.to_string(), pair.to_string()))
            .or_default()
            .extend_from_slice(depth);
        Ok(())
    }

    async fn read_history(
        &self,
        scope: &OperationScope,
        client: &Client,
    ) -> Result<Vec<History>, RecordError> {
        self.enter(scope).await?;
        let histories = self.histories.lock().unwrap();
        Ok(histories.get(client).cloned().unwrap_or_default())
    }

    async fn write_history(
        &self,
        scope: &OperationScope,
        client: &Client,
        history: Option<&History>,
    ) -> Result<(), RecordError> {
        let history = history.ok_or(RecordError::RecordMissing)?;
        self.enter(scope).await?;

        let stored = History {
            time_placed: Some(Utc::now()),
            ..history.clone().with_client(client.clone())
        };
        self.histories
            .lock()
            .unwrap()
            .entry(client.clone())
            .or_default()
            .push(stored);
        Ok(())
    }
}
