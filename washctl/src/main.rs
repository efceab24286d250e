use clap::Parser;

use washctl::client::ReceiptUploader;
use washctl::config::{Args, Command, Config};
use washctl::{Application, telemetry};

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::load(&args)?;

    telemetry::init_telemetry();

    match args.command {
        Command::Serve => {
            let shutdown = shutdown_signal();
            Application::new(config).await?.serve(shutdown).await
        }
        Command::UploadReceipt {
            payment_id,
            file,
            base_url,
        } => {
            let uploader = ReceiptUploader::new(base_url.unwrap_or(config.base_url));
            // The outcome ends at the log either way; a failed upload still
            // exits cleanly.
            uploader.upload_and_log(payment_id, file.as_deref()).await;
            Ok(())
        }
    }
}
