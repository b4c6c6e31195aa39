pub mod api;

use crate::cli::Args;
use crate::llm::OllamaClient;
use std::error::Error;

pub struct Server {
    args: Args,
    client: OllamaClient,
}

impl Server {
    pub fn new(args: Args, client: OllamaClient) -> Self {
        Self { args, client }
    }

    pub async fn run(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        api::start_http_server(&self.args, self.client.clone()).await
    }
}
