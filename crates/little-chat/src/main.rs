//! A simple program demonstrates how to use `little-chat` as a library.

#[macro_use]
extern crate tracing;

use std::env;
use std::io::Write as _;

use little_chat::core::Stage;
use little_chat::{Command, Session, SessionBuilder, TerminalDisplay};
use little_chat_http_backend::{HttpBackend, HttpBackendConfigBuilder};
use owo_colors::OwoColorize;
use tokio::io::{self, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut config = HttpBackendConfigBuilder::new();
    if let Ok(base_url) = env::var("LITTLE_CHAT_BASE_URL") {
        config = config.with_base_url(base_url);
    }
    let config = config.build();
    info!("talking to {}", config.endpoint());
    let backend = HttpBackend::new(config);

    let (idle_tx, mut idle_rx) = mpsc::unbounded_channel();
    let session = SessionBuilder::with_backend(backend)
        .with_display(TerminalDisplay::stdout())
        .on_idle(move || {
            idle_tx.send(()).ok();
        })
        .build();

    print_help();
    let mut lines = BufReader::new(io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush().ok();

        let Some(line) = read_line(&mut lines).await else {
            break;
        };
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                eprintln!("{}", err.bright_red());
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => {
                print_help();
                continue;
            }
            Command::QuickReplies => {
                print_quick_replies(&session);
                continue;
            }
            _ => {}
        }

        let stage = match session.apply(&command).await {
            Ok(stage) => stage,
            Err(err) => {
                error!("{err}");
                break;
            }
        };

        if command == Command::ToggleEmojis {
            print_emojis(&session).await;
        }
        if stage == Stage::Sending && idle_rx.recv().await.is_none() {
            break;
        }
    }
}

async fn read_line(lines: &mut Lines<BufReader<Stdin>>) -> Option<String> {
    match lines.next_line().await {
        Ok(line) => line,
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}

fn print_help() {
    println!("Type a message and press Enter to send it.");
    println!("  /emoji      show or hide the emoji picker");
    println!("  /emoji N    add emoji N to the message");
    println!("  /quick      list quick replies");
    println!("  /quick N    send quick reply N");
    println!("  /send       send what has been typed so far");
    println!("  /quit       leave");
    println!();
}

fn print_quick_replies(session: &Session) {
    for (idx, reply) in session.quick_replies().iter().enumerate() {
        println!("  {} {}", (idx + 1).bright_yellow(), reply.label());
    }
}

async fn print_emojis(session: &Session) {
    let visible = session
        .widget()
        .is_emoji_picker_visible()
        .await
        .unwrap_or(false);
    if !visible {
        return;
    }
    let items: Vec<_> = session
        .emojis()
        .iter()
        .enumerate()
        .map(|(idx, glyph)| format!("{} {glyph}", (idx + 1).bright_yellow()))
        .collect();
    println!("  {}", items.join("  "));
}
