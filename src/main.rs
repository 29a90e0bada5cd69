use anyhow::Result;
use vocab_definer::utils::logging;
use vocab_definer::{App, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env()?;

    // 初始化并运行应用
    App::initialize(config)?.run().await?;

    Ok(())
}
