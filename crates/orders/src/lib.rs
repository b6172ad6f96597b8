pub mod app;
pub mod config;
pub mod logger;
pub mod record;
pub mod scope;
pub mod server;
pub mod service;
pub mod validate;

// 라이브러리 로드 시 .env 자동 로드
#[ctor::ctor]
fn init() {
    dotenv::dotenv().ok();
}
