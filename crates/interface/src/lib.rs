use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// JSON `null`을 필드가 빠진 것과 같이 기본값으로 읽는다
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// 호가창의 한 가격 레벨
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Depth {
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub base_qty: f64, // 0 이상
}

impl Depth {
    pub fn new(price: f64, base_qty: f64) -> Self {
        Self { price, base_qty }
    }
}

/// 주문 기록의 소유자 식별 정보.
/// 네 필드가 모두 같아야 같은 클라이언트로 본다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Client {
    #[serde(deserialize_with = "null_as_default")]
    pub client_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub exchange_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pair: String,
}

impl Client {
    pub fn new(
        client_name: impl Into<String>,
        exchange_name: impl Into<String>,
        label: impl Into<String>,
        pair: impl Into<String>,
    ) -> Self {
        Self {
            client_name: client_name.into(),
            exchange_name: exchange_name.into(),
            label: label.into(),
            pair: pair.into(),
        }
    }

    /// 모든 필드가 비어 있으면 "입력되지 않음"으로 취급한다
    pub fn is_zero(&self) -> bool {
        self.client_name.is_empty()
            && self.exchange_name.is_empty()
            && self.label.is_empty()
            && self.pair.is_empty()
    }
}

/// 체결된 주문 하나의 기록
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct History {
    #[serde(flatten)]
    pub client: Client,
    #[serde(default, deserialize_with = "null_as_default")]
    pub side: String,
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub order_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub base_qty: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub algorithm_name_placed: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lowest_sell_prc: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub highest_buy_prc: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub commission_quote_qty: f64,
    /// 저장 시 DB가 부여하고, 조회 시 채워진다
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_placed: Option<DateTime<Utc>>,
}

impl History {
    /// 식별 정보(Client)를 제외한 필드가 모두 기본값인지 확인
    pub fn is_zero(&self) -> bool {
        self.side.is_empty()
            && self.order_type.is_empty()
            && self.base_qty == 0.0
            && self.price == 0.0
            && self.algorithm_name_placed.is_empty()
            && self.lowest_sell_prc == 0.0
            && self.highest_buy_prc == 0.0
            && self.commission_quote_qty == 0.0
            && self.time_placed.is_none()
    }

    /// 같은 기록을 다른 클라이언트 소유로 복사
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }
}
