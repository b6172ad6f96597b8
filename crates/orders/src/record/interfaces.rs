use async_trait::async_trait;

use interface::{Client, Depth, History};

use crate::scope::OperationScope;

/// 호가창 / 주문 기록 저장소 인터페이스
/// 백엔드를 교체하거나 테스트 대역을 끼울 수 있도록 트레이트로 정의
#[async_trait]
pub trait OrderRecordRepository: Send + Sync {
    /// 거래소+페어의 호가 레벨 조회. 저장된 스냅샷이 없으면 빈 Vec.
    async fn read_order_book(
        &self,
        scope: &OperationScope,
        exchange_name: &str,
        pair: &str,
    ) -> Result<Vec<Depth>, RecordError>;

    /// 호가 레벨 전체를 한 번의 배치로 추가 저장
    async fn write_order_book(
        &self,
        scope: &OperationScope,
        exchange_name: &str,
        pair: &str,
        depth: &[Depth],
    ) -> Result<(), RecordError>;

    /// 클라이언트 네 필드가 모두 일치하는 주문 기록 조회
    async fn read_history(
        &self,
        scope: &OperationScope,
        client: &Client,
    ) -> Result<Vec<History>, RecordError>;

    /// 주문 기록 한 건 추가 저장. `history`가 없으면 [`RecordError::RecordMissing`].
    async fn write_history(
        &self,
        scope: &OperationScope,
        client: &Client,
        history: Option<&History>,
    ) -> Result<(), RecordError>;
}

/// 기록 저장소 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("order not provided")]
    RecordMissing,

    #[error("Database error: {0}")]
    Database(#[from] clickhouse::error::Error),

    #[error("operation cancelled")]
    Cancelled,

    #[error("operation deadline exceeded")]
    DeadlineExceeded,

    #[error("Other error: {0}")]
    Other(String),
}
