/// 호가창 테이블 모듈
pub mod order_book {
    use clickhouse::Row;
    use serde::{Deserialize, Serialize};

    use interface::Depth;

    pub const TABLE: &str = "order_book";

    pub const CREATE_TABLE: &str = r"
        CREATE TABLE IF NOT EXISTS order_book (
            exchange String,
            pair     String,
            asks     Tuple(Float64, Float64)
        )
        ENGINE = MergeTree
        ORDER BY (exchange, pair)";

    pub const SELECT_BY_EXCHANGE_PAIR: &str =
        "SELECT asks FROM order_book WHERE exchange = ? AND pair = ?";

    /// 저장용 행. (price, base_qty)를 튜플 컬럼 하나에 담는다.
    #[derive(Debug, Clone, PartialEq, Row, Serialize, Deserialize)]
    pub struct Model {
        pub exchange: String,
        pub pair: String,
        pub asks: (f64, f64),
    }

    impl Model {
        pub fn new(exchange: &str, pair: &str, depth: &Depth) -> Self {
            Self {
                exchange: exchange.to_string(),
                pair: pair.to_string(),
                asks: (depth.price, depth.base_qty),
            }
        }
    }

    /// 조회용 행
    #[derive(Debug, Clone, PartialEq, Row, Serialize, Deserialize)]
    pub struct AsksModel {
        pub asks: (f64, f64),
    }

    impl From<AsksModel> for Depth {
        fn from(model: AsksModel) -> Self {
            let (price, base_qty) = model.asks;
            Depth { price, base_qty }
        }
    }
}

/// 주문 기록 테이블 모듈
pub mod order_history {
    use chrono::DateTime;
    use clickhouse::Row;
    use serde::{Deserialize, Serialize};

    use interface::{Client, History};

    use crate::record::RecordError;

    pub const TABLE: &str = "order_history";

    pub const CREATE_TABLE: &str = r"
        CREATE TABLE IF NOT EXISTS order_history (
            client_name           String,
            exchange_name         String,
            label                 String,
            pair                  String,
            side                  String,
            type                  String,
            base_qty              Float64,
            price                 Float64,
            algorithm_name_placed String,
            lowest_sell_prc       Float64,
            highest_buy_prc       Float64,
            commission_quote_qty  Float64,
            time_placed           DateTime64(3) DEFAULT now64(3)
        )
        ENGINE = MergeTree
        ORDER BY (client_name, exchange_name, label, pair, time_placed)";

    // 컬럼 순서는 Model 필드 순서와 같아야 한다 (RowBinary)
    pub const SELECT_BY_CLIENT: &str = r"
        SELECT
            side,
            type,
            base_qty,
            price,
            algorithm_name_placed,
            lowest_sell_prc,
            highest_buy_prc,
            commission_quote_qty,
            toUnixTimestamp64Milli(time_placed)
        FROM order_history
        WHERE client_name = ? AND exchange_name = ? AND label = ? AND pair = ?";

    /// 저장용 행. time_placed는 DB 기본값(now64)으로 채워진다.
    #[derive(Debug, Clone, PartialEq, Row, Serialize, Deserialize)]
    pub struct ActiveModel {
        pub client_name: String,
        pub exchange_name: String,
        pub label: String,
        pub pair: String,
        pub side: String,
        #[serde(rename = "type")]
        pub order_type: String,
        pub base_qty: f64,
        pub price: f64,
        pub algorithm_name_placed: String,
        pub lowest_sell_prc: f64,
        pub highest_buy_prc: f64,
        pub commission_quote_qty: f64,
    }

    impl ActiveModel {
        pub fn new(client: &Client, history: &History) -> Self {
            Self {
                client_name: client.client_name.clone(),
                exchange_name: client.exchange_name.clone(),
                label: client.label.clone(),
                pair: client.pair.clone(),
                side: history.side.clone(),
                order_type: history.order_type.clone(),
                base_qty: history.base_qty,
                price: history.price,
                algorithm_name_placed: history.algorithm_name_placed.clone(),
                lowest_sell_prc: history.lowest_sell_prc,
                highest_buy_prc: history.highest_buy_prc,
                commission_quote_qty: history.commission_quote_qty,
            }
        }
    }

    /// 조회용 행
    #[derive(Debug, Clone, PartialEq, Row, Serialize, Deserialize)]
    pub struct Model {
        pub side: String,
        #[serde(rename = "type")]
        pub order_type: String,
        pub base_qty: f64,
        pub price: f64,
        pub algorithm_name_placed: String,
        pub lowest_sell_prc: f64,
        pub highest_buy_prc: f64,
        pub commission_quote_qty: f64,
        /// UTC 밀리초
        pub time_placed: i64,
    }

    impl Model {
        /// 조회에 사용한 클라이언트를 식별 정보로 채워 History로 변환
        pub fn into_history(self, client: &Client) -> Result<History, RecordError> {
            let time_placed = DateTime::from_timestamp_millis(self.time_placed).ok_or_else(|| {
                RecordError::Other(format!(
                    "Failed to parse time_placed: {}",
                    self.time_placed
                ))
            })?;

            Ok(History {
                client: client.clone(),
                side: self.side,
                order_type: self.order_type,
                base_qty: self.base_qty,
                price: self.price,
                algorithm_name_placed: self.algorithm_name_placed,
                lowest_sell_prc: self.lowest_sell_prc,
                highest_buy_prc: self.highest_buy_prc,
                commission_quote_qty: self.commission_quote_qty,
                time_placed: Some(time_placed),
            })
        }
    }
}
