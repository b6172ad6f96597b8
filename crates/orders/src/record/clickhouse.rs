use async_trait::async_trait;
use clickhouse::Client as ClickHouseClient;
use tracing::{debug, info};

use interface::{Client, Depth, History};

use super::entities::{order_book, order_history};
use super::{OrderRecordRepository, RecordError};
use crate::scope::OperationScope;

/// ClickHouse 기반 호가창 / 주문 기록 저장소.
/// `clickhouse::Client`는 내부 커넥션 풀을 공유하므로 복제해서 써도 된다.
#[derive(Clone)]
pub struct ClickHouseOrderRecordRepository {
    db: ClickHouseClient,
}

impl ClickHouseOrderRecordRepository {
    /// 공유 커넥션을 받아 저장소를 만들고 테이블을 준비한다
    pub async fn new(db: ClickHouseClient) -> Result<Self, RecordError> {
        let repo = Self { db };
        repo.ensure_schema().await?;
        Ok(repo)
    }

    /// 스키마 생성 없이 저장소만 만든다
    pub fn from_client(db: ClickHouseClient) -> Self {
        Self { db }
    }

    /// 테이블 생성 (IF NOT EXISTS)
    pub async fn ensure_schema(&self) -> Result<(), RecordError> {
        self.db.query(order_book::CREATE_TABLE).execute().await?;
        self.db.query(order_history::CREATE_TABLE).execute().await?;

        info!("Order book / order history tables initialized");
        Ok(())
    }
}

#[async_trait]
impl OrderRecordRepository for ClickHouseOrderRecordRepository {
    async fn read_order_book(
        &self,
        scope: &OperationScope,
        exchange_name: &str,
        pair: &str,
    ) -> Result<Vec<Depth>, RecordError> {
        scope
            .run(async {
                let mut cursor = self
                    .db
                    .query(order_book::SELECT_BY_EXCHANGE_PAIR)
                    .bind(exchange_name)
                    .bind(pair)
                    .fetch::<order_book::AsksModel>()?;

                let mut asks = Vec::new();
                while let Some(row) = cursor.next().await? {
                    asks.push(Depth::from(row));
                }

                debug!(exchange_name, pair, rows = asks.len(), "order book fetched");
                Ok::<_, RecordError>(asks)
            })
            .await
    }

    async fn write_order_book(
        &self,
        scope: &OperationScope,
        exchange_name: &str,
        pair: &str,
        depth: &[Depth],
    ) -> Result<(), RecordError> {
        if depth.is_empty() {
            return Ok(());
        }

        scope
            .run(async {
                let mut insert = self.db.insert::<order_book::Model>(order_book::TABLE)?;
                for level in depth {
                    insert
                        .write(&order_book::Model::new(exchange_name, pair, level))
                        .await?;
                }
                insert.end().await?;

                debug!(exchange_name, pair, rows = depth.len(), "order book batch sent");
                Ok::<_, RecordError>(())
            })
            .await
    }

    async fn read_history(
        &self,
        scope: &OperationScope,
        client: &Client,
    ) -> Result<Vec<History>, RecordError> {
        scope
            .run(async {
                let mut cursor = self
                    .db
                    .query(order_history::SELECT_BY_CLIENT)
                    .bind(client.client_name.as_str())
                    .bind(client.exchange_name.as_str())
                    .bind(client.label.as_str())
                    .bind(client.pair.as_str())
                    .fetch::<order_history::Model>()?;

                let mut histories = Vec::new();
                while let Some(row) = cursor.next().await? {
                    histories.push(row.into_history(client)?);
                }

                debug!(
                    client_name = %client.client_name,
                    label = %client.label,
                    pair = %client.pair,
                    rows = histories.len(),
                    "order history fetched"
                );
                Ok::<_, RecordError>(histories)
            })
            .await
    }

    async fn write_history(
        &self,
        scope: &OperationScope,
        client: &Client,
        history: Option<&History>,
    ) -> Result<(), RecordError> {
        let history = history.ok_or(RecordError::RecordMissing)?;

        scope
            .run(async {
                let mut insert = self
                    .db
                    .insert::<order_history::ActiveModel>(order_history::TABLE)?;
                insert
                    .write(&order_history::ActiveModel::new(client, history))
                    .await?;
                insert.end().await?;

                debug!(
                    client_name = %client.client_name,
                    label = %client.label,
                    pair = %client.pair,
                    "order history saved"
                );
                Ok::<_, RecordError>(())
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clickhouse::test::{self, handlers};
    use std::time::Duration;

    fn mock_repository(mock: &test::Mock) -> ClickHouseOrderRecordRepository {
        ClickHouseOrderRecordRepository::from_client(
            ClickHouseClient::default().with_url(mock.url()),
        )
    }

    #[tokio::test]
    async fn test_write_order_book_packs_tuples() {
        let mock = test::Mock::new();
        let repo = mock_repository(&mock);
        let recording = mock.add(handlers::record::<order_book::Model>());

        let depth = vec![Depth::new(0.01, 0.01), Depth::new(0.02, 5.0)];
        repo.write_order_book(&OperationScope::root(), "some-exchange", "A_B", &depth)
            .await
            .unwrap();

        let rows: Vec<order_book::Model> = recording.collect().await;
        assert_eq!(
            rows,
            vec![
                order_book::Model {
                    exchange: "some-exchange".to_string(),
                    pair: "A_B".to_string(),
                    asks: (0.01, 0.01),
                },
                order_book::Model {
                    exchange: "some-exchange".to_string(),
                    pair: "A_B".to_string(),
                    asks: (0.02, 5.0),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_read_order_book_unpacks_tuples() {
        let mock = test::Mock::new();
        let repo = mock_repository(&mock);
        mock.add(handlers::provide(vec![
            order_book::AsksModel { asks: (0.5, 1.0) },
            order_book::AsksModel { asks: (0.6, 2.0) },
        ]));

        let depth = repo
            .read_order_book(&OperationScope::root(), "some-exchange", "A_B")
            .await
            .unwrap();

        assert_eq!(depth, vec![Depth::new(0.5, 1.0), Depth::new(0.6, 2.0)]);
    }

    #[tokio::test]
    async fn test_read_order_book_empty() {
        let mock = test::Mock::new();
        let repo = mock_repository(&mock);
        mock.add(handlers::provide(Vec::<order_book::AsksModel>::new()));

        let depth = repo
            .read_order_book(&OperationScope::root(), "never-written", "X_Y")
            .await
            .unwrap();

        assert!(depth.is_empty());
    }

    #[tokio::test]
    async fn test_backend_failure_passes_through() {
        let mock = test::Mock::new();
        let repo = mock_repository(&mock);
        mock.add(handlers::failure(test::status::INTERNAL_SERVER_ERROR));

        let res = repo
            .read_order_book(&OperationScope::root(), "some-exchange", "A_B")
            .await;

        assert!(matches!(res, Err(RecordError::Database(_))));
    }

    #[tokio::test]
    async fn test_write_history_row() {
        let mock = test::Mock::new();
        let repo = mock_repository(&mock);
        let recording = mock.add(handlers::record::<order_history::ActiveModel>());

        let client = Client::new("client", "exchange", "label", "A_B");
        let history = History {
            side: "buy".to_string(),
            order_type: "market".to_string(),
            base_qty: 1.0,
            price: 0.1,
            algorithm_name_placed: "algo".to_string(),
            lowest_sell_prc: 0.09,
            highest_buy_prc: 0.11,
            commission_quote_qty: 0.001,
            ..Default::default()
        };

        repo.write_history(&OperationScope::root(), &client, Some(&history))
            .await
            .unwrap();

        let rows: Vec<order_history::ActiveModel> = recording.collect().await;
        assert_eq!(rows, vec![order_history::ActiveModel::new(&client, &history)]);
    }

    #[tokio::test]
    async fn test_write_history_without_record() {
        let mock = test::Mock::new();
        let repo = mock_repository(&mock);

        let res = repo
            .write_history(
                &OperationScope::root(),
                &Client::new("client", "exchange", "label", "A_B"),
                None,
            )
            .await;

        assert!(matches!(res, Err(RecordError::RecordMissing)));
    }

    #[tokio::test]
    async fn test_read_history_fills_identity() {
        let mock = test::Mock::new();
        let repo = mock_repository(&mock);
        mock.add(handlers::provide(vec![order_history::Model {
            side: "sell".to_string(),
            order_type: "limit".to_string(),
            base_qty: 3.0,
            price: 10.0,
            algorithm_name_placed: "twap".to_string(),
            lowest_sell_prc: 9.9,
            highest_buy_prc: 10.1,
            commission_quote_qty: 0.03,
            time_placed: 1_704_070_861_000,
        }]));

        let client = Client::new("client", "exchange", "label", "A_B");
        let histories = repo
            .read_history(&OperationScope::root(), &client)
            .await
            .unwrap();

        assert_eq!(histories.len(), 1);
        assert_eq!(histories[0].client, client);
        assert_eq!(histories[0].algorithm_name_placed, "twap");
        assert!(histories[0].time_placed.is_some());
    }

    #[tokio::test]
    async fn test_cancelled_scope_skips_backend() {
        let mock = test::Mock::new();
        let repo = mock_repository(&mock);

        let scope = OperationScope::root();
        scope.cancel();

        let res = repo.read_order_book(&scope, "some-exchange", "A_B").await;
        assert!(matches!(res, Err(RecordError::Cancelled)));
    }

    // 실제 ClickHouse가 필요한 테스트. `cargo test -- --ignored`로 실행한다.
    fn live_repository() -> Option<ClickHouseClient> {
        match std::env::var("CLICKHOUSE_TEST_URL") {
            Ok(url) => {
                let user = std::env::var("CLICKHOUSE_ADMIN_USER")
                    .unwrap_or_else(|_| "clickhouse".to_string());
                let password = std::env::var("CLICKHOUSE_ADMIN_PASSWORD")
                    .unwrap_or_else(|_| "clickhouse".to_string());
                Some(
                    ClickHouseClient::default()
                        .with_url(url)
                        .with_user(user)
                        .with_password(password),
                )
            }
            Err(_) => {
                println!("Skipping test: CLICKHOUSE_TEST_URL not set");
                None
            }
        }
    }

    fn unique(prefix: &str) -> String {
        let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
        format!("{}-{}", prefix, nanos)
    }

    #[tokio::test]
    #[ignore = "requires a running ClickHouse (CLICKHOUSE_TEST_URL)"]
    async fn test_live_order_book_round_trip_is_append_only() {
        let Some(db) = live_repository() else {
            return;
        };
        let repo = ClickHouseOrderRecordRepository::new(db).await.unwrap();
        let scope = OperationScope::root().child_with_timeout(Duration::from_secs(10));
        let exchange = unique("some-exchange");
        let depth = vec![Depth::new(0.01, 0.01)];

        assert!(repo.read_order_book(&scope, &exchange, "A_B").await.unwrap().is_empty());

        repo.write_order_book(&scope, &exchange, "A_B", &depth).await.unwrap();
        assert_eq!(repo.read_order_book(&scope, &exchange, "A_B").await.unwrap(), depth);

        // 같은 스냅샷을 다시 쓰면 덮어쓰지 않고 추가된다
        repo.write_order_book(&scope, &exchange, "A_B", &depth).await.unwrap();
        assert_eq!(repo.read_order_book(&scope, &exchange, "A_B").await.unwrap().len(), 2);
    }

    #[tokio::test]
    #[ignore = "requires a running ClickHouse (CLICKHOUSE_TEST_URL)"]
    async fn test_live_history_round_trip() {
        let Some(db) = live_repository() else {
            return;
        };
        let repo = ClickHouseOrderRecordRepository::new(db).await.unwrap();
        let scope = OperationScope::root().child_with_timeout(Duration::from_secs(10));
        let client = Client::new(unique("client"), "exchange", "label", "A_B");
        let history = History {
            side: "buy".to_string(),
            order_type: "market".to_string(),
            base_qty: 1.0,
            price: 0.1,
            algorithm_name_placed: "algo".to_string(),
            lowest_sell_prc: 0.09,
            highest_buy_prc: 1.0,
            commission_quote_qty: 0.005,
            ..Default::default()
        };

        repo.write_history(&scope, &client, Some(&history)).await.unwrap();

        let stored = repo.read_history(&scope, &client).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert!(stored[0].time_placed.is_some());
        assert_eq!(
            History {
                time_placed: None,
                ..stored[0].clone()
            },
            history.with_client(client)
        );
    }
}
