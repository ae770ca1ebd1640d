//! Terminal front-end for the `LittleLogic` proxy
//!
//! One line of input is one submission. While the transcript is empty the
//! example prompts can be picked by number.

use async_trait::async_trait;
use littlelogic::api::{ChatRequest, ChatResponse};
use littlelogic::conversation::{
    ChatTransport, Conversation, HttpTransport, Role, TransportError, EXAMPLE_PROMPTS,
};
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8787";

/// Shows a pending indicator for as long as the wrapped transport is busy
struct ThinkingIndicator<T> {
    inner: T,
}

#[async_trait]
impl<T: ChatTransport> ChatTransport for ThinkingIndicator<T> {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        if let Err(e) = print_flush("Thinking…") {
            tracing::warn!(error = %e, "Failed to show pending indicator");
        }
        let result = self.inner.send(request).await;
        // Erase the indicator line
        if let Err(e) = print_flush("\r\x1b[2K") {
            tracing::warn!(error = %e, "Failed to clear pending indicator");
        }
        result
    }
}

fn print_flush(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "{text}")?;
    stdout.flush()
}

fn print_landing() {
    println!("Hi User!");
    println!("What Do You Need Explained?");
    println!();
    println!("Example prompts to see how LittleLogic works (type the number):");
    for (i, prompt) in EXAMPLE_PROMPTS.iter().enumerate() {
        println!("  [{}] {prompt}", i + 1);
    }
    println!();
    println!("AI can make mistakes, please double check responses. Type /quit to leave.");
}

/// Example prompt picked by number, only offered before the first exchange
fn example_choice(conversation: &Conversation, input: &str) -> Option<usize> {
    if !conversation.is_empty() {
        return None;
    }
    input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .filter(|&i| i < EXAMPLE_PROMPTS.len())
}

fn print_reply(conversation: &Conversation) {
    if let Some(message) = conversation
        .transcript()
        .last()
        .filter(|m| m.role() == Role::Assistant)
    {
        println!("LittleLogic: {}", message.text());
        println!();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let server_url = std::env::var("LITTLELOGIC_SERVER_URL")
        .unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
    let transport = ThinkingIndicator {
        inner: HttpTransport::new(&server_url)?,
    };
    tracing::debug!(url = %transport.inner.url(), "Using chat endpoint");

    let mut conversation = Conversation::new();
    print_landing();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let placeholder = if conversation.is_empty() {
            "Ask me anything!"
        } else {
            "Message LittleLogic…"
        };
        print_flush(&format!("({placeholder}) > "))?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input == "/quit" {
            break;
        }

        let accepted = if let Some(index) = example_choice(&conversation, input) {
            println!("You: {}", EXAMPLE_PROMPTS[index]);
            conversation.submit_example(&transport, index).await
        } else {
            conversation.set_draft(line);
            conversation.submit_draft(&transport).await
        };

        if accepted {
            print_reply(&conversation);
        }
    }

    Ok(())
}
