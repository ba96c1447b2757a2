// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `recall assemble` command implementation.
//!
//! Reads a stored conversation from a JSON file, assembles the prompt for a
//! new question, and prints it as JSON. Nothing is sent to a model.

use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use recall_agent::ChatOptions;
use recall_config::model::RecallConfig;
use recall_context::{ContextEngine, PromptContext, pair_messages, render_lines};
use recall_core::RecallError;
use recall_core::types::{Exchange, ModelBackend, Persona, PersonaMessage};
use recall_router::BackendRegistry;
use serde_json::json;
use tracing::debug;

/// Shape of the `--history` file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HistoryFormat {
    /// A JSON array of exchanges (`question`, `answer`, `created_at`).
    Exchanges,
    /// A JSON array of sender-tagged persona messages.
    PersonaMessages,
}

#[derive(Args, Debug)]
pub struct AssembleArgs {
    /// JSON file holding the conversation, oldest first.
    #[arg(long, value_name = "PATH")]
    pub history: PathBuf,

    /// Layout of the history file.
    #[arg(long, value_enum, default_value_t = HistoryFormat::Exchanges)]
    pub format: HistoryFormat,

    /// The new question.
    #[arg(long)]
    pub question: String,

    /// Number of complete exchanges to keep (defaults to the configured
    /// history window).
    #[arg(long)]
    pub window: Option<usize>,

    /// Backend to address the request to.
    #[arg(long, value_name = "ID")]
    pub backend: Option<String>,

    /// Speak as this persona.
    #[arg(long, requires = "persona_tone")]
    pub persona_name: Option<String>,

    /// Tone of the persona.
    #[arg(long, requires = "persona_name")]
    pub persona_tone: Option<String>,

    /// Free-form persona profile.
    #[arg(long, requires = "persona_name")]
    pub persona_summary: Option<String>,

    /// Print `role: content` lines instead of JSON.
    #[arg(long)]
    pub plain: bool,
}

impl AssembleArgs {
    fn persona(&self) -> Option<Persona> {
        let name = self.persona_name.clone()?;
        Some(Persona {
            name,
            tone: self.persona_tone.clone().unwrap_or_default(),
            summary: self.persona_summary.clone().unwrap_or_default(),
        })
    }
}

/// Run the `recall assemble` command.
pub async fn run_assemble(config: &RecallConfig, args: AssembleArgs) -> Result<(), RecallError> {
    let history = read_history(&args.history, args.format).await?;
    let output = assemble_output(config, &args, &history).await?;
    println!("{output}");
    Ok(())
}

async fn assemble_output(
    config: &RecallConfig,
    args: &AssembleArgs,
    history: &[Exchange],
) -> Result<String, RecallError> {
    let registry = BackendRegistry::from_config(config)?;
    let backend = match &args.backend {
        Some(id) => Some(registry.select(id)?),
        None => None,
    };

    let persona = args.persona();
    let (engine, options) = match &persona {
        Some(persona) => (
            ContextEngine::for_persona(persona),
            ChatOptions::for_persona(&config.history),
        ),
        None => (
            ContextEngine::from_config(&config.agent).await?,
            ChatOptions::from_config(&config.history),
        ),
    };
    let window = args.window.unwrap_or_else(|| options.window());

    let prompt = engine.assemble(history, window, &args.question)?;
    if args.plain {
        return Ok(render_lines(prompt.messages()));
    }
    render(prompt, backend)
}

fn render(prompt: PromptContext, backend: Option<&ModelBackend>) -> Result<String, RecallError> {
    let value = match backend {
        Some(backend) => serde_json::to_value(prompt.into_request(backend)),
        None => Ok(json!({ "messages": prompt.messages() })),
    };
    value
        .and_then(|v| serde_json::to_string_pretty(&v))
        .map_err(|e| RecallError::Internal(format!("failed to serialize request: {e}")))
}

/// Reads and decodes the history file into chronological exchanges.
async fn read_history(path: &Path, format: HistoryFormat) -> Result<Vec<Exchange>, RecallError> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        RecallError::InvalidInput(format!("cannot read history file {}: {e}", path.display()))
    })?;
    let history = parse_history(&raw, format)?;
    debug!(
        path = %path.display(),
        exchanges = history.len(),
        "loaded history file"
    );
    Ok(history)
}

fn parse_history(raw: &str, format: HistoryFormat) -> Result<Vec<Exchange>, RecallError> {
    let malformed =
        |e: serde_json::Error| RecallError::InvalidInput(format!("malformed history: {e}"));
    match format {
        HistoryFormat::Exchanges => serde_json::from_str(raw).map_err(malformed),
        HistoryFormat::PersonaMessages => {
            let messages: Vec<PersonaMessage> = serde_json::from_str(raw).map_err(malformed)?;
            pair_messages(&messages)
        }
    }
}
