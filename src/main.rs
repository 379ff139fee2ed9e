use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use voicebank::audio::AudioSample;
use voicebank::config::AssistantConfig;
use voicebank::outputs::text::{render_error, render_outcome, render_snapshot};
use voicebank::services::recognizer::HttpRecognizer;
use voicebank::DialogueEngine;

// Console commands (one per line)
enum ConsoleCommand {
    Submit(PathBuf),
    Reset,
    Confirm,
    Prompt,
    Quit,
    Unknown(String),
}

impl ConsoleCommand {
    fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let command = match head {
            "submit" | "s" if !rest.trim().is_empty() => ConsoleCommand::Submit(PathBuf::from(rest.trim())),
            "reset" | "r" => ConsoleCommand::Reset,
            "confirm" | "c" => ConsoleCommand::Confirm,
            "prompt" | "p" => ConsoleCommand::Prompt,
            "quit" | "q" | "exit" => ConsoleCommand::Quit,
            _ => ConsoleCommand::Unknown(line.to_string()),
        };
        Some(command)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = AssistantConfig::resolve_path(std::env::args().nth(1));
    let config = AssistantConfig::load(config_path.as_deref())?;

    voicebank::logging::init(config.log_filter.as_deref());
    info!("Voicebank Console Booting...");

    let recognizer = HttpRecognizer::from_config(&config.recognizer)?;
    info!(url = %recognizer.url(), "Recognizer configured");

    let engine = DialogueEngine::new(Arc::new(config.registry()), Arc::new(recognizer));
    info!(session = %engine.id(), "Dialogue session ready");

    println!("Commands: submit <file.wav> | reset | confirm | prompt | quit");
    println!("{}", render_snapshot(&engine.snapshot()));

    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    while let Some(line) = lines.next_line().await? {
        let Some(command) = ConsoleCommand::parse(&line) else { continue };

        match command {
            ConsoleCommand::Submit(path) => {
                let sample = match AudioSample::from_wav_file(&path) {
                    Ok(sample) => sample,
                    Err(e) => {
                        warn!("Failed to read {}: {}", path.display(), e);
                        println!("Cannot read {}", path.display());
                        continue;
                    }
                };
                match engine.submit_utterance(&sample).await {
                    Ok(outcome) => println!("{}", render_outcome(&outcome)),
                    Err(e) => println!("{}", render_error(&e)),
                }
            }
            ConsoleCommand::Reset => {
                engine.reset();
                println!("Session reset.");
            }
            ConsoleCommand::Confirm => match engine.confirm() {
                Ok(record) => {
                    info!(command = %record.kind, "Command confirmed");
                    println!("{}", serde_json::to_string_pretty(&record)?);
                }
                Err(e) => println!("{}", render_error(&e)),
            },
            ConsoleCommand::Prompt => {}
            ConsoleCommand::Quit => break,
            ConsoleCommand::Unknown(text) => {
                println!("Unknown command: {}", text);
                continue;
            }
        }

        println!("{}", render_snapshot(&engine.snapshot()));
    }

    info!("Voicebank Console stopped.");
    Ok(())
}
