//! Interactive console chat with the booking agent.
//!
//! Run with: cargo run -p orchestrator --example console_chat
//!
//! Configuration via .env file or environment variables:
//!   OPENAI_API_KEY             - API key for the live model (optional; the
//!                                example falls back to a local echo model)
//!   FRONTDESK_DATABASE_URL     - SQLite URL (default: sqlite:frontdesk.db?mode=rwc)
//!   FRONTDESK_SYSTEM_PROMPT    - system prompt override
//!   FRONTDESK_BUSINESS_OFFSET  - UTC offset for client times, e.g. +02:00

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use mock_model::EchoModel;
use openai_model::OpenAiModel;
use orchestrator::{BookingAgent, ChatModel};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let model: Arc<dyn ChatModel> = match OpenAiModel::from_env() {
        Ok(model) => Arc::new(model),
        Err(e) => {
            println!("No live model available ({}), using echo model", e);
            Arc::new(EchoModel::new())
        }
    };
    let model_name = model.name().to_string();

    let agent = BookingAgent::from_env(model).await?;
    println!("Booking agent ready (model: {})", model_name);
    println!("Type a message, or 'quit' to exit.\n");

    let identity = "console:local";
    let stdin = io::stdin();
    let mut line = String::new();

    loop {
        print!("you> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if text == "quit" || text == "exit" {
            break;
        }

        let reply = agent.handle_message(identity, text).await?;
        if reply.is_empty() {
            println!("agent> (no reply)");
        } else {
            println!("agent> {}", reply);
        }
    }

    println!("Bye!");
    Ok(())
}
