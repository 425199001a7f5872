use dotenv::dotenv;

use chat_relay::{config::Config, supervisor};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(std::io::Error::other)?;
    supervisor::run(config).await
}
