use voxelcast_logger::log::log;
use voxelcast_logger::severity::LogSeverity::{Error, Info};
use voxelcast_server::config::ServerConfig;
use voxelcast_server::server;

#[tokio::main]
async fn main() {
    log("Voxelcast init".to_owned(), Info);
    let config = ServerConfig::from_env();
    if let Err(err) = server::run(config).await {
        log(format!("Server terminated: {}", err), Error);
    }
}
