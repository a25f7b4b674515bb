//! RAX FTP Client - Entry Point
//!
//! Connects to the configured server, prints the working directory and a
//! listing, then disconnects.
//!
//! Usage: `rax-ftp-client [DIR]` with the server taken from `config.toml`
//! or `RAX_FTP__HOST`, `RAX_FTP__USER`, ...

use log::{error, info};

use rax_ftp_client::error::handlers::handle_error;
use rax_ftp_client::utils::setup_logging;
use rax_ftp_client::{ClientConfig, FtpClient, FtpResult};

#[tokio::main]
async fn main() {
    setup_logging();

    let config = match ClientConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    let dir = std::env::args().nth(1);
    let client = FtpClient::new(config.host, config.options);

    info!("Connecting to {}...", client.host());
    let outcome = run(&client, dir.as_deref()).await;
    client.close().await;

    if let Err(e) = outcome {
        handle_error(&e);
        std::process::exit(1);
    }
}

async fn run(client: &FtpClient, dir: Option<&str>) -> FtpResult<()> {
    client.connect().await?;
    println!("Working directory: {}", client.cwd().await?);
    for name in client.list(dir).await? {
        println!("{}", name);
    }
    Ok(())
}
