pub mod api;

use std::error::Error;
use std::sync::Arc;

use crate::llm::ChatClient;

pub struct Server {
    addr: String,
    client: Arc<dyn ChatClient>,
}

impl Server {
    pub fn new(addr: String, client: Arc<dyn ChatClient>) -> Self {
        Self { addr, client }
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        api::start_http_server(&self.addr, self.client.clone()).await
    }
}
