//! 쓰기 요청의 필수 필드 검증. 저장소 호출 전에 실행된다.

use interface::{Client, Depth, History};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("exchange not provided")]
    ExchangeNameMissing,

    #[error("pair not provided")]
    PairMissing,

    #[error("depth not provided")]
    DepthMissing,

    #[error("client not provided")]
    ClientMissing,

    #[error("order history not provided")]
    HistoryMissing,
}

/// 거래소 → 페어 → 호가 순서로 검사하고 처음 실패한 항목을 반환한다
pub fn validate_order_book(
    exchange_name: &str,
    pair: &str,
    depth: &[Depth],
) -> Result<(), ValidationError> {
    if exchange_name.is_empty() {
        return Err(ValidationError::ExchangeNameMissing);
    }
    if pair.is_empty() {
        return Err(ValidationError::PairMissing);
    }
    if depth.is_empty() {
        return Err(ValidationError::DepthMissing);
    }
    Ok(())
}

/// 클라이언트가 없거나 비어 있으면 history 내용과 무관하게 `ClientMissing`
pub fn validate_client_history(
    client: Option<&Client>,
    history: Option<&History>,
) -> Result<(), ValidationError> {
    match client {
        Some(client) if !client.is_zero() => {}
        _ => return Err(ValidationError::ClientMissing),
    }
    match history {
        Some(history) if !history.is_zero() => Ok(()),
        _ => Err(ValidationError::HistoryMissing),
    }
}
