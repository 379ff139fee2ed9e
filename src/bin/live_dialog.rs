use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use voicebank::audio::capture::Recorder;
use voicebank::config::AssistantConfig;
use voicebank::outputs::text::{render_error, render_outcome, render_snapshot};
use voicebank::services::recognizer::HttpRecognizer;
use voicebank::DialogueEngine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Config + Logging
    let config_path = AssistantConfig::resolve_path(std::env::args().nth(1));
    let config = AssistantConfig::load(config_path.as_deref())?;
    voicebank::logging::init(config.log_filter.as_deref());

    tracing::info!("Starting Live Dialog...");

    // 2. Engine
    let recognizer = HttpRecognizer::from_config(&config.recognizer)?;
    let engine = DialogueEngine::new(Arc::new(config.registry()), Arc::new(recognizer));

    // 3. Microphone (opened per utterance)
    let mut recorder = Recorder::new(config.capture.clone());

    println!("Press Enter to start recording, Enter again to submit.");
    println!("Type 'r' to reset, 'c' to confirm, 'q' to quit.");
    println!("{}", render_snapshot(&engine.snapshot()));

    // 4. Input Loop (Stdin)
    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        match line.trim() {
            "q" => break,
            "r" => {
                if recorder.is_recording() {
                    if let Err(e) = recorder.stop() {
                        warn!("Failed to discard recording: {}", e);
                    }
                }
                engine.reset();
            }
            "c" => match engine.confirm() {
                Ok(record) => println!("{}", serde_json::to_string_pretty(&record)?),
                Err(e) => println!("{}", render_error(&e)),
            },
            _ if !recorder.is_recording() => {
                if let Err(e) = recorder.start() {
                    error!("Failed to start recording: {}", e);
                    continue;
                }
                println!("Recording... press Enter to stop.");
                continue;
            }
            _ => {
                let sample = match recorder.stop() {
                    Ok(sample) => sample,
                    Err(e) => {
                        error!("Failed to stop recording: {}", e);
                        continue;
                    }
                };
                info!(bytes = sample.len(), "Utterance captured");
                match engine.submit_utterance(&sample).await {
                    Ok(outcome) => println!("{}", render_outcome(&outcome)),
                    Err(e) => println!("{}", render_error(&e)),
                }
            }
        }

        println!("{}", render_snapshot(&engine.snapshot()));
    }

    Ok(())
}
