//! 요청 단위 작업 범위(operation scope).
//!
//! 부모 범위가 취소되면 파생된 모든 자식 범위도 취소된다. 마감 시각은 부모에서 상속되며
//! 자식은 더 짧게만 줄일 수 있다.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::record::RecordError;

#[derive(Debug, Clone)]
pub struct OperationScope {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl OperationScope {
    /// 프로세스 수명 동안 유지되는 최상위 범위
    pub fn root() -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: None,
        }
    }

    /// 취소만 전파되는 자식 범위
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    /// `timeout` 뒤에 만료되는 자식 범위. 부모의 마감이 더 이르면 그것을 따른다.
    pub fn child_with_timeout(&self, timeout: Duration) -> Self {
        let candidate = Instant::now() + timeout;
        let deadline = match self.deadline {
            Some(parent) if parent < candidate => parent,
            _ => candidate,
        };

        Self {
            token: self.token.child_token(),
            deadline: Some(deadline),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// 반환된 가드가 drop 되면 이 범위가 취소된다
    pub fn release_on_drop(&self) -> DropGuard {
        self.token.clone().drop_guard()
    }

    /// `fut`를 이 범위 안에서 실행한다.
    /// 취소되거나 마감이 지나면 `fut`는 drop 되어 진행 중인 I/O도 중단된다.
    pub async fn run<F, T>(&self, fut: F) -> Result<T, RecordError>
    where
        F: Future<Output = Result<T, RecordError>>,
    {
        if self.is_cancelled() {
            return Err(RecordError::Cancelled);
        }

        match self.deadline {
            Some(deadline) => tokio::select! {
                biased;
                _ = self.token.cancelled() => Err(RecordError::Cancelled),
                _ = tokio::time::sleep_until(deadline) => Err(RecordError::DeadlineExceeded),
                res = fut => res,
            },
            None => tokio::select! {
                biased;
                _ = self.token.cancelled() => Err(RecordError::Cancelled),
                res = fut => res,
            },
        }
    }
}
