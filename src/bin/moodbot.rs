//! moodbot — mood-aware chat CLI
//!
//! Front-end over the session pipeline: typed chat, one-shot replies and
//! microphone turns.

use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use moodbot::capture::{ArecordSource, WavFileSource};
use moodbot::config::{Config, SPEECH_API_KEY_ENV};
use moodbot::playback::AudioPlayer;
use moodbot::providers::{SpeechToText, WebSpeechClient, WebTranslateClient, WebTtsClient};
use moodbot::version::version_string;
use moodbot::{
    AudioSource, CacheConfig, Language, ListenOptions, Moodbot, MoodbotError, Session,
    SessionBuilder, TurnOutcome,
};

/// Moodbot CLI
#[derive(Parser)]
#[command(name = "moodbot")]
#[command(version = moodbot::version::PKG_VERSION)]
#[command(about = "Mood-aware chat with spoken replies")]
struct Args {
    /// Config file path (default: ~/.moodbot/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output language: en, es, fr or hi
    #[arg(short, long)]
    lang: Option<Language>,

    /// Speak replies aloud
    #[arg(long)]
    speak: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive chat (type 'bye' to end)
    Chat,

    /// Reply to a single message
    Say {
        /// Message text (or omit to read from stdin)
        message: Option<String>,
    },

    /// Capture one utterance from the microphone and reply to it
    Listen {
        /// Listen timeout in seconds (5-15)
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Noise sensitivity step (0-3)
        #[arg(short, long)]
        sensitivity: Option<u8>,

        /// Recognize a WAV file instead of recording
        #[arg(long)]
        wav: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing (default: warn for CLI; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;

    let language = args.lang.unwrap_or(config.output.language);
    let speak = args.speak || config.output.speak;

    tracing::debug!(version = %version_string(), %language, speak, "starting moodbot");

    let player = if speak {
        match AudioPlayer::detect() {
            Ok(player) => Some(player),
            Err(e) => {
                eprintln!("playback disabled: {e}");
                None
            }
        }
    } else {
        None
    };

    match args.command {
        Command::Chat => {
            let mut session = base_builder(&config, language, speak).build();
            run_chat(&mut session, player.as_ref()).await?;
        }

        Command::Say { message } => {
            let message = resolve_text(message, "say")?;
            let mut session = base_builder(&config, language, speak).build();
            let outcome = session.process_text(&message).await?;
            print_outcome(&outcome, player.as_ref()).await;
        }

        Command::Listen {
            timeout,
            sensitivity,
            wav,
        } => {
            let options = ListenOptions::default()
                .with_timeout_secs(timeout.unwrap_or(config.voice.timeout_secs))
                .with_noise_sensitivity(u32::from(
                    sensitivity.unwrap_or(config.voice.noise_sensitivity),
                ));

            let mut session = base_builder(&config, language, speak)
                .voice(audio_source(&config, wav)?, recognizer(&config)?)
                .listen_options(options)
                .build();

            println!("listening ({}s timeout)...", options.timeout_secs());
            match session.process_voice().await {
                Ok(outcome) => {
                    println!("you said: {}", outcome.input);
                    print_outcome(&outcome, player.as_ref()).await;
                }
                Err(MoodbotError::Unrecognized) => {
                    println!("could not understand the captured audio, try again");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(())
}

/// Builder preloaded with everything but voice input.
fn base_builder(config: &Config, language: Language, speak: bool) -> SessionBuilder {
    let mut builder = Moodbot::builder().language(language).speak(speak);

    builder = match &config.services.translate_url {
        Some(url) => builder.translator(Arc::new(WebTranslateClient::with_base_url(url.as_str()))),
        None => builder.translator(Arc::new(WebTranslateClient::new())),
    };
    builder = match &config.services.tts_url {
        Some(url) => builder.synthesizer(Arc::new(WebTtsClient::with_base_url(url.as_str()))),
        None => builder.synthesizer(Arc::new(WebTtsClient::new())),
    };

    if let Some(path) = &config.output.audio_path {
        builder = builder.audio_path(path.clone());
    }
    if config.cache.enabled {
        builder = builder.response_cache(
            CacheConfig::new()
                .max_entries(config.cache.max_entries)
                .ttl(Duration::from_secs(config.cache.ttl_secs)),
        );
    }
    builder
}

fn recognizer(config: &Config) -> Result<Arc<dyn SpeechToText>, MoodbotError> {
    let api_key = config.services.speech_api_key().ok_or_else(|| {
        MoodbotError::Configuration(format!(
            "no speech API key configured (set services.speech_api_key or {SPEECH_API_KEY_ENV})"
        ))
    })?;
    Ok(match &config.services.speech_url {
        Some(url) => Arc::new(WebSpeechClient::with_base_url(api_key, url.as_str())),
        None => Arc::new(WebSpeechClient::new(api_key)),
    })
}

fn audio_source(
    config: &Config,
    wav: Option<PathBuf>,
) -> Result<Arc<dyn AudioSource>, MoodbotError> {
    Ok(match wav {
        Some(path) => Arc::new(WavFileSource::new(path)),
        None => {
            let mut mic = ArecordSource::new()?;
            if let Some(device) = &config.voice.device {
                mic = mic.with_device(device.as_str());
            }
            Arc::new(mic)
        }
    })
}

/// Interactive loop: one line per turn, ends on farewell or EOF.
async fn run_chat(
    session: &mut Session,
    player: Option<&AudioPlayer>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("moodbot {} (type 'bye' to end)", version_string());

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            // EOF
            break;
        }
        // Strip the newline only; other whitespace is part of the input.
        let input = line.trim_end_matches(['\n', '\r']);
        if input.trim().is_empty() {
            continue;
        }

        match session.process_text(input).await {
            Ok(outcome) => {
                print_outcome(&outcome, player).await;
                if session.is_ended() {
                    break;
                }
            }
            Err(e) => eprintln!("{e}"),
        }
    }
    Ok(())
}

/// Print one turn: reply, mood with confidence bar, translation, playback.
async fn print_outcome(outcome: &TurnOutcome, player: Option<&AudioPlayer>) {
    println!("{}", outcome.reply.text);
    println!(
        "mood: {} {}",
        outcome.sentiment.label,
        confidence_bar(outcome.sentiment.confidence())
    );

    if let Some(translation) = &outcome.translation {
        match translation {
            Ok(t) => println!("{}: {}", t.target.code(), t.text),
            Err(e) => eprintln!("{e}"),
        }
    }

    if let Some(speech) = &outcome.speech {
        match speech {
            Ok(spoken) => {
                if let Some(player) = player {
                    if let Err(e) = player.play(&spoken.path).await {
                        eprintln!("playback failed: {e}");
                    }
                }
            }
            Err(e) => eprintln!("{e}"),
        }
    }
}

/// Ten-cell bar for the 0..=1 confidence value, e.g. `[#######---] 70%`.
fn confidence_bar(confidence: f32) -> String {
    let filled = (confidence * 10.0).round().clamp(0.0, 10.0) as usize;
    format!(
        "[{}{}] {:.0}%",
        "#".repeat(filled),
        "-".repeat(10 - filled),
        confidence * 100.0
    )
}

/// Resolve text input from an optional CLI argument and/or stdin.
///
/// Combination rules:
/// - arg only → arg
/// - stdin only → stdin
/// - both → `"{arg}\n\n{stdin}"`
/// - neither → error
fn resolve_text(arg: Option<String>, command: &str) -> Result<String, MoodbotError> {
    let stdin_is_pipe = !io::stdin().is_terminal();
    let stdin_text = if stdin_is_pipe {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        let trimmed = buf.trim().to_string();
        if trimmed.is_empty() { None } else { Some(trimmed) }
    } else {
        None
    };

    match (arg, stdin_text) {
        (Some(a), Some(s)) => Ok(format!("{a}\n\n{s}")),
        (Some(a), None) => Ok(a),
        (None, Some(s)) => Ok(s),
        (None, None) => Err(MoodbotError::InvalidInput(format!(
            "{command}: no input provided (pass text as argument or via stdin)"
        ))),
    }
}
