pub mod clickhouse;
pub mod entities;
pub mod interfaces;
#[cfg(test)]
pub(crate) mod memory;

pub use self::clickhouse::ClickHouseOrderRecordRepository;
pub use interfaces::{OrderRecordRepository, RecordError};
