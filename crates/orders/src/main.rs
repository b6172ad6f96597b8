use color_eyre::eyre;
use structopt::StructOpt;
use tracing::info;

use orders::app::App;
use orders::config::AppConfig;

// lib.rs에서 자동으로 dotenv가 로드됨

#[derive(Debug, StructOpt)]
#[structopt(name = "orders", about = "호가창 / 주문 기록 저장 API 서버")]
struct Opt {
    /// debug 레벨 로그 출력
    #[structopt(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let opt = Opt::from_args();

    // init error reporting
    color_eyre::install()?;

    // init logging
    let _guards = orders::logger::init_tracing(opt.debug);

    let config = AppConfig::from_env();
    info!(env = ?config.env, port = config.server.port, "Starting orders service");

    App::new(config).await?.run().await?;

    info!("Orders service stopped");
    Ok(())
}
