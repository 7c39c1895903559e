mod display;
mod results;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use lexmail_client::ApiClient;
use lexmail_core::{ClientConfig, ThemeMode};
use lexmail_session::{Notice, Session};
use lexmail_store::PrefStore;
use results::ResultCache;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lexmail", version, about = "Legal email assistant: analyze emails and draft replies")]
struct Cli {
    /// Base URL of the analysis service [env: LEXMAIL_API_BASE, default: http://localhost:8000]
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Directory holding preferences and the last results
    #[arg(long, global = true, env = "LEXMAIL_STATE_DIR")]
    state_dir: Option<PathBuf>,

    /// Give up on a request after this many seconds [env: LEXMAIL_TIMEOUT_SECS]
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the models the service is using
    Models,
    /// Check that the service is up
    Health,
    #[command(flatten)]
    Session(SessionCommand),
}

/// Commands that read or change the persisted session.
#[derive(Subcommand)]
enum SessionCommand {
    /// Set the email text
    Email(TextInput),
    /// Set the contract clause
    Contract(TextInput),
    /// Show the current fields, analysis and draft
    Show,
    /// Analyze the email
    Analyze,
    /// Draft a reply from the last analysis
    Draft,
    /// Analyze and draft in one request
    Process,
    /// Generate two draft versions side by side
    Compare,
    /// Write the last draft to a text file
    Export {
        /// Output path
        #[arg(short, long, default_value = "draft.txt")]
        out: PathBuf,
    },
    /// Show or change the theme preference
    Theme {
        #[arg(value_enum)]
        action: Option<ThemeAction>,
    },
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct TextInput {
    /// Read the text from a file (`-` for stdin)
    #[arg(long)]
    file: Option<PathBuf>,
    /// Use the given text
    #[arg(long)]
    text: Option<String>,
    /// Load the built-in sample
    #[arg(long)]
    sample: bool,
    /// Clear the field
    #[arg(long)]
    clear: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThemeAction {
    Toggle,
    Light,
    Dark,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!("lexmail v{}", env!("CARGO_PKG_VERSION"));

    let mut config = ClientConfig::from_env();
    if let Some(base) = cli.api_base.clone() {
        config.base_url = base;
    }
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout((secs > 0).then(|| Duration::from_secs(secs)));
    }
    let client = ApiClient::new(config).context("building HTTP client")?;

    let command = match cli.command {
        Command::Models => {
            let info = client.models().await.context("fetching model list")?;
            println!("{}", display::render_models(&info));
            return Ok(ExitCode::SUCCESS);
        }
        Command::Health => {
            let health = client.health().await.context("checking service health")?;
            println!("{}", display::render_health(client.base_url(), &health));
            return Ok(ExitCode::SUCCESS);
        }
        Command::Session(command) => command,
    };

    run_session(client, cli.state_dir.as_deref(), command).await
}

async fn run_session(
    client: ApiClient,
    state_dir: Option<&Path>,
    command: SessionCommand,
) -> anyhow::Result<ExitCode> {
    let prefs_path = match state_dir {
        Some(dir) => dir.join("prefs.json"),
        None => lexmail_store::default_path(),
    };
    let state_dir = prefs_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let prefs = PrefStore::open(&prefs_path)
        .with_context(|| format!("opening {}", prefs_path.display()))?;
    let cache = ResultCache::new(&state_dir);

    let mut session = Session::open(client, prefs);
    session.restore(cache.load_analysis()?, cache.load_draft()?);

    let notice = match command {
        SessionCommand::Email(input) => {
            match read_input(&input)? {
                Some(text) => session.set_email_text(text)?,
                None => session.load_sample_email()?,
            }
            eprintln!("email text saved ({} chars)", session.state().email_text.chars().count());
            None
        }
        SessionCommand::Contract(input) => {
            match read_input(&input)? {
                Some(text) => session.set_contract_snippet(text)?,
                None => session.load_sample_contract()?,
            }
            eprintln!(
                "contract clause saved ({} chars)",
                session.state().contract_snippet.chars().count()
            );
            None
        }
        SessionCommand::Show => {
            println!("{}", display::render_state(session.state()));
            None
        }
        SessionCommand::Analyze => {
            eprintln!("{}", session.loading_label());
            let notice = session.analyze().await;
            if !notice.is_error() {
                println!("{}", display::render_analysis(session.state().analysis.as_ref()));
            }
            Some(notice)
        }
        SessionCommand::Draft => {
            eprintln!("{}", session.loading_label());
            let notice = session.draft_only().await;
            if !notice.is_error() {
                let state = session.state();
                println!("{}", display::render_draft(&state.draft, state.risk_score));
            }
            Some(notice)
        }
        SessionCommand::Process => {
            eprintln!("{}", session.loading_label());
            let notice = session.process_all().await;
            if !notice.is_error() {
                let state = session.state();
                println!("{}", display::render_analysis(state.analysis.as_ref()));
                println!();
                println!("{}", display::render_draft(&state.draft, state.risk_score));
            }
            Some(notice)
        }
        SessionCommand::Compare => {
            eprintln!("Generating two versions…");
            let notice = session.compare().await;
            if !notice.is_error() {
                println!("{}", display::render_compare(&session.state().compare));
            }
            Some(notice)
        }
        SessionCommand::Export { out } => {
            results::export_txt(&session.state().draft, &out)?;
            eprintln!("draft written to {}", out.display());
            None
        }
        SessionCommand::Theme { action } => {
            let mode = match action {
                None => session.state().theme,
                Some(ThemeAction::Toggle) => session.toggle_theme()?,
                Some(ThemeAction::Light) => set_theme(&mut session, ThemeMode::Light)?,
                Some(ThemeAction::Dark) => set_theme(&mut session, ThemeMode::Dark)?,
            };
            println!("{mode}");
            None
        }
    };

    cache.save(session.state())?;
    Ok(finish(notice))
}

fn set_theme<A: lexmail_client::AssistantApi>(
    session: &mut Session<A>,
    mode: ThemeMode,
) -> anyhow::Result<ThemeMode> {
    session.set_theme(mode)?;
    Ok(mode)
}

fn read_input(input: &TextInput) -> anyhow::Result<Option<String>> {
    if input.sample {
        return Ok(None);
    }
    if input.clear {
        return Ok(Some(String::new()));
    }
    if let Some(text) = &input.text {
        return Ok(Some(text.clone()));
    }
    match &input.file {
        Some(path) if path.as_os_str() == "-" => {
            let text = std::io::read_to_string(std::io::stdin()).context("reading stdin")?;
            Ok(Some(text))
        }
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Ok(Some(text))
        }
        None => anyhow::bail!("one of --file, --text, --sample or --clear is required"),
    }
}

fn finish(notice: Option<Notice>) -> ExitCode {
    match notice {
        Some(notice) => {
            eprintln!("{}", display::render_notice(&notice));
            if notice.is_error() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        None => ExitCode::SUCCESS,
    }
}
