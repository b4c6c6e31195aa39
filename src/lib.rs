pub mod cli;
pub mod llm;
pub mod models;
pub mod server;

use cli::Args;
use llm::OllamaClient;
use log::info;
use server::Server;
use std::error::Error;
use std::time::Duration;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("--- Core Configuration ---");
    info!("Server Address: {}", args.server_addr);
    info!("Ollama URL: {}", args.ollama_url);
    info!("Fallback Model: {}", args.fallback_model);
    info!("Discovery Timeout: {}s", args.discovery_timeout_secs);
    info!("Completion Timeout: {}s", args.completion_timeout_secs);
    info!("-------------------------");

    let client = OllamaClient::new(
        args.ollama_url.clone(),
        args.fallback_model.clone(),
        Duration::from_secs(args.discovery_timeout_secs),
        Duration::from_secs(args.completion_timeout_secs),
    );

    let server = Server::new(args, client);
    server.run().await
}
