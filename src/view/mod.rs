pub mod render;

use std::error::Error;
use std::io::{self, Write};

use log::info;
use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::json;

use crate::models::chat::{Message, Role};

#[derive(Deserialize)]
struct RelayReply {
    content: String,
}

/// Owns the conversation for one session. Messages are append-only and
/// only mutated from within the view's own methods; the awaiting-reply
/// flag gates submission so at most one turn is in flight.
pub struct ChatView {
    http: HttpClient,
    endpoint: String,
    messages: Vec<Message>,
    awaiting_reply: bool,
}

impl ChatView {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            endpoint: endpoint.into(),
            messages: Vec::new(),
            awaiting_reply: false,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    /// Submits one user turn: appends the user message, sends the full
    /// conversation to the relay, appends the assistant reply. A failed
    /// round trip becomes an assistant-role error bubble instead of an
    /// error return, and the awaiting-reply flag always clears.
    ///
    /// Returns false when the trimmed input is empty or a turn is already
    /// in flight; nothing is appended and no call is issued.
    pub async fn submit_turn(&mut self, input: &str) -> bool {
        let text = input.trim();
        if text.is_empty() || self.awaiting_reply {
            return false;
        }

        self.messages.push(Message::user(text));
        self.awaiting_reply = true;

        let reply = match self.request_reply().await {
            Ok(content) => content,
            Err(detail) => format!("Error: Could not get response from Ollama. {}", detail),
        };
        self.messages.push(Message::assistant(reply));

        self.awaiting_reply = false;
        true
    }

    async fn request_reply(&self) -> Result<String, String> {
        let res = self
            .http
            .post(&self.endpoint)
            .json(&json!({ "messages": self.messages }))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !res.status().is_success() {
            return Err(format!("API error: {}", res.status().as_u16()));
        }

        res.json::<RelayReply>()
            .await
            .map(|reply| reply.content)
            .map_err(|e| e.to_string())
    }
}

pub async fn run_chat(endpoint: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
    info!("Connecting to relay at: {}", endpoint);
    let mut view = ChatView::new(endpoint);

    println!("--- Ollama Terminal Chat ---");
    println!("Type /exit to quit.");
    println!("----------------------------");

    loop {
        print!("\nYou> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let text = input.trim();

        if text.is_empty() {
            continue;
        }
        if text == "/exit" || text == "/quit" {
            break;
        }

        println!("Ollama is thinking…");
        view.submit_turn(text).await;

        if let Some(reply) = view.messages().last() {
            if reply.role == Role::Assistant {
                println!("Ollama> {}", render::render_content(&reply.content));
            }
        }
    }

    Ok(())
}
