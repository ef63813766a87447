use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Chat relay for a local Ollama server", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the chat relay HTTP server
    Serve {
        /// Host address and port for the server to listen on.
        #[arg(long, env = "SERVER_ADDR", default_value = "127.0.0.1:3000")]
        server_addr: String,

        /// Base URL of the Ollama inference server (e.g., http://localhost:11434)
        #[arg(long, env = "OLLAMA_URL")] // No default, the client falls back if None
        ollama_url: Option<String>,

        /// Model name for chat completion (e.g., tinyllama:latest)
        #[arg(long, env = "CHAT_MODEL")] // No default, the client falls back if None
        model: Option<String>,
    },

    /// Enter interactive terminal chat against a running relay
    Chat {
        /// URL of the relay chat endpoint.
        #[arg(
            long,
            env = "RELAY_ENDPOINT",
            default_value = "http://127.0.0.1:3000/api/chat"
        )]
        endpoint: String,
    },
}
