//! Line-based chat client for a running relay server.
//!
//! `/clear` resets the conversation, `/quit` exits.

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use relay_chat::{
    init_tracing,
    message::{ChatMessage, MessageRole},
    services::{chat_client::ChatClient, transport::HttpRelayTransport},
};

fn render(message: &ChatMessage) -> String {
    let who = match (message.role, message.is_error) {
        (MessageRole::User, _) => "you",
        (MessageRole::Assistant, false) => "assistant",
        (MessageRole::Assistant, true) => "assistant (error)",
    };
    format!("[{}] {}: {}", message.display_time(), who, message.content)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("warn");

    let base_url = std::env::var("RELAY_URL").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let transport = HttpRelayTransport::new(&base_url);
    let mut client = ChatClient::new();

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    for message in client.messages() {
        stdout.write_all(format!("{}\n", render(message)).as_bytes()).await?;
    }

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await.context("failed to read stdin")? else {
            break;
        };

        match line.trim() {
            "/quit" => break,
            "/clear" => {
                client.clear();
                for message in client.messages() {
                    stdout.write_all(format!("{}\n", render(message)).as_bytes()).await?;
                }
            }
            _ => {
                client.set_draft(line.clone());
                if let Some(reply) = client.submit_draft(&transport).await {
                    stdout.write_all(format!("{}\n", render(reply)).as_bytes()).await?;
                }
            }
        }
    }

    Ok(())
}
