pub mod cli;
pub mod llm;
pub mod models;
pub mod server;
pub mod view;

use cli::{Args, Command};
use llm::ollama::OllamaClient;
use llm::ChatClient;
use log::info;
use server::Server;
use std::error::Error;
use std::sync::Arc;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    match args.command {
        Command::Serve {
            server_addr,
            ollama_url,
            model,
        } => {
            let client = Arc::new(OllamaClient::new(ollama_url, model));

            info!("--- Core Configuration ---");
            info!("Server Address: {}", server_addr);
            info!("Ollama URL: {}", client.base_url());
            info!("Chat Model: {}", client.model());
            info!("-------------------------");

            info!("Starting server on: {}", server_addr);
            let server = Server::new(server_addr, client);
            server.run().await
        }
        Command::Chat { endpoint } => view::run_chat(&endpoint).await,
    }
}
