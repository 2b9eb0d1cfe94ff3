// Copyright 2026 Membean Session Contributors
// SPDX-License-Identifier: Apache-2.0

//! `membean`, the command-line driver for one training session.

use anyhow::{anyhow, Context};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use membean_session::session::DEFAULT_TIME_ON_PAGE_SECS;
use membean_session::{Advancement, ConfigOverrides, SessionConfig, TrainingSession, TrainingState};

#[derive(Parser)]
#[command(
    name = "membean",
    about = "Drive a Membean training session from the terminal",
    version
)]
struct Cli {
    /// Training session id. Also reads MEMBEAN_SESSION_ID.
    #[arg(long, global = true)]
    session: Option<String>,

    /// Auth token cookie value. Also reads MEMBEAN_AUTH_TOKEN.
    #[arg(long, global = true)]
    token: Option<String>,

    /// Service origin. Also reads MEMBEAN_BASE_URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Request timeout in milliseconds. Also reads MEMBEAN_TIMEOUT_MS.
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Print state records as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and print the current training state.
    State,

    /// Submit a navigator of the current state and print the next state.
    ///
    /// Examples:
    ///   membean advance next
    ///   membean advance pass --time-on-page 12
    Advance {
        /// Navigator name from the state's nav map, or pass / fail / ikt.
        navigator: String,

        /// Seconds reported as spent on the page.
        #[arg(long, default_value_t = DEFAULT_TIME_ON_PAGE_SECS)]
        time_on_page: u64,
    },

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   membean completions bash > ~/.local/share/bash-completion/completions/membean
    ///   membean completions zsh > ~/.zfunc/_membean
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "membean", &mut std::io::stdout());
        return Ok(());
    }

    let config = SessionConfig::resolve(ConfigOverrides {
        session_id: cli.session.clone(),
        auth_token: cli.token.clone(),
        base_url: cli.base_url.clone(),
        timeout_ms: cli.timeout_ms,
    })
    .context("failed to resolve session configuration")?;
    let session = TrainingSession::new(config).context("failed to open training session")?;

    let current = session
        .refresh_state()
        .await
        .with_context(|| format!("failed to fetch state of session {}", session.id()))?;

    let shown = match cli.command {
        Commands::State => current,
        Commands::Advance {
            navigator,
            time_on_page,
        } => {
            let advancement = find_advancement(&current, &navigator)?;
            session
                .advance_with(&advancement, time_on_page)
                .await
                .with_context(|| format!("failed to advance with navigator '{navigator}'"))?
        }
        Commands::Completions { .. } => unreachable!("handled above"),
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
    } else {
        print_summary(&shown);
    }
    Ok(())
}

/// Resolve a navigator name against the state's nav map and its dedicated
/// navigators.
fn find_advancement(state: &TrainingState, name: &str) -> anyhow::Result<Advancement> {
    let fields = match (name, state) {
        ("pass", _) => state.answer().map(|a| &a.pass),
        ("fail", _) => state.answer().map(|a| &a.fail),
        ("ikt", TrainingState::NewWord(word)) => word.ikt.as_ref(),
        _ => state.nav().and_then(|nav| nav.get(name)),
    }
    .ok_or_else(|| anyhow!("state '{}' offers no navigator '{name}'", state.tag()))?;

    Advancement::from_fields(fields)
        .with_context(|| format!("navigator '{name}' cannot be submitted"))
}

fn print_summary(state: &TrainingState) {
    match state {
        TrainingState::NewWord(word) | TrainingState::Restudy(word) => {
            println!("{}: {} ({})", state.tag(), word.word, word.part_of_speech);
            if !word.context.definition.is_empty() {
                println!("  {}", word.context.definition);
            }
        }
        TrainingState::Quiz(quiz) => {
            println!("quiz: {} of {}", quiz.clock.elapsed, quiz.clock.total);
        }
        TrainingState::SpellTest(_) => println!("spelltest"),
        TrainingState::TakeABreak => println!("take_a_break: session closed"),
        TrainingState::Redirect(redirect) => println!(
            "redirect: {}",
            redirect.redirect_url.as_deref().unwrap_or("<none>")
        ),
    }

    if let Some(nav) = state.nav() {
        let names: Vec<&str> = nav.names().collect();
        if !names.is_empty() {
            println!("  navigators: {}", names.join(", "));
        }
    }
    if state.answer().is_some() {
        println!("  answers: pass, fail");
    }
}
