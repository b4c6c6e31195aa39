use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Host address and port for the relay to listen on.
    #[arg(long, env = "SERVER_ADDR", default_value = "0.0.0.0:5001")]
    pub server_addr: String,

    /// Base URL of the local Ollama server.
    #[arg(long, env = "OLLAMA_URL", default_value = "http://localhost:11434")]
    pub ollama_url: String,

    /// Model id used when discovery against the backend fails.
    #[arg(long, env = "FALLBACK_MODEL", default_value = "llama3.2:1b")]
    pub fallback_model: String,

    /// Timeout in seconds for model discovery and health probes.
    #[arg(long, env = "DISCOVERY_TIMEOUT_SECS", default_value = "5")]
    pub discovery_timeout_secs: u64,

    /// Timeout in seconds for completion calls against the backend.
    #[arg(long, env = "COMPLETION_TIMEOUT_SECS", default_value = "60")]
    pub completion_timeout_secs: u64,
}
