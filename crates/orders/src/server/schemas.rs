use serde::{Deserialize, Serialize};

use interface::{null_as_default, Client, Depth, History};

/// POST /orders 요청 본문
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderBookCreate {
    #[serde(deserialize_with = "null_as_default")]
    pub exchange_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub pair: String,
    #[serde(deserialize_with = "null_as_default")]
    pub depth: Vec<Depth>,
}

/// POST /orders/history 요청 본문. 빠진 필드는 None.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientHistoryCreate {
    pub client: Option<Client>,
    pub order_history: Option<History>,
}

/// GET /orders/history/... 쿼리 파라미터
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HistoryQuery {
    pub label: String,
    pub pair: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderBookResponse {
    pub depth_orders: Vec<Depth>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderHistoryResponse {
    pub order_history: Vec<History>,
}
