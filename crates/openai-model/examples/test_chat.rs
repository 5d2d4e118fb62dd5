//! Simple test for OpenAiModel chat completion.
//!
//! Run with: cargo run -p openai-model --example test_chat
//! Or with a custom message: cargo run -p openai-model --example test_chat -- "Your message here"
//!
//! Make sure to set environment variables in .env:
//!   OPENAI_API_KEY - API key for authentication

use openai_model::{ChatModel, OpenAiModel, TranscriptTurn};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Get message from command line args or use default
    let args: Vec<String> = env::args().collect();
    let message_text = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        "Hello! Please respond with a short greeting.".to_string()
    };

    println!("Initializing OpenAiModel...");
    let model = OpenAiModel::from_env()?;

    println!("Model initialized: {}", model.name());
    println!("API URL: {}", model.config().api_url);
    println!("Model: {}", model.config().model);
    println!();

    let transcript = vec![
        TranscriptTurn::system("You are a concise assistant."),
        TranscriptTurn::user(&message_text),
    ];

    println!("Sending: \"{}\"", message_text);
    println!("Waiting for response...\n");

    let reply = model.complete(&transcript, &[]).await?;

    println!("=== Response ===");
    println!("{}", reply.text());
    println!("================");

    Ok(())
}
