//! Prompt Pro command line front end.

mod session;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use providers::{resolve_model, GeminiClient, GeminiConnector};
use services::{ApiKey, CredentialSource};
use session::{parse_line, render_history, render_reply, Command, Reply, Session, HELP};
use shared::history::History;
use shared::settings::AppSettings;
use std::io::{self, BufRead, Write};
use std::path::Path;
use synthesizer::{find_persona, PromptSynthesizer, DOMAINS, TONES};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "prompt-pro", version)]
#[command(about = "Turn a rough task description into an expert prompt", long_about = None)]
struct Cli {
    /// Log progress to stderr (same as RUST_LOG=info)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one prompt and print it
    Ask(AskArgs),
    /// Interactive session with history (default)
    Session(StyleArgs),
    /// List the available domains
    Domains,
    /// List the available tones
    Tones,
    /// Show which model would be used and what the account can see
    Models,
    /// Store the Gemini API key in the settings file
    SetKey {
        /// Read from stdin when omitted
        key: Option<String>,
    },
}

#[derive(Args, Default)]
struct StyleArgs {
    /// Domain key or label (marketing, software, creative, strategy, general)
    #[arg(short, long)]
    domain: Option<String>,

    /// Tone key or label (formal, direct, creative, marketing)
    #[arg(short, long)]
    tone: Option<String>,
}

#[derive(Args)]
struct AskArgs {
    /// What you want the prompt for
    #[arg(required = true, num_args = 1..)]
    request: Vec<String>,

    #[command(flatten)]
    style: StyleArgs,

    /// Open the recommended chat tool in the browser
    #[arg(long)]
    open: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (mut settings, fresh) = services::load_settings_or_default();
    if fresh {
        tracing::info!("no settings file found, using defaults");
    }

    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;

    match cli.command.unwrap_or(Commands::Session(StyleArgs::default())) {
        Commands::Ask(args) => {
            let key = services::lookup_api_key(&settings).context(
                "no Gemini API key: run `prompt-pro set-key` or set GEMINI_API_KEY",
            )?;
            let mut session = build_session(&settings, key, &args.style);
            let reply = runtime.block_on(session.submit(&args.request.join(" ")));
            println!("{}", render_reply(&reply));
            if let Reply::Generated { link, .. } = &reply {
                if args.open {
                    open_link(link.url);
                }
            }
            if !matches!(reply, Reply::Generated { .. }) {
                std::process::exit(1);
            }
        }
        Commands::Session(style) => {
            let key = match services::lookup_api_key(&settings) {
                Some(key) => key,
                None => prompt_for_key()?,
            };
            let mut session = build_session(&settings, key, &style);
            run_session(&runtime, &mut session, settings.sidebar_preview)?;
        }
        Commands::Domains => {
            for domain in DOMAINS.iter() {
                println!("{:<10} {}  ({})", domain.key, domain.label, domain.description());
            }
        }
        Commands::Tones => {
            for tone in TONES.iter() {
                println!("{:<10} {}", tone.key, tone.label);
            }
        }
        Commands::Models => {
            let key = services::lookup_api_key(&settings).context(
                "no Gemini API key: run `prompt-pro set-key` or set GEMINI_API_KEY",
            )?;
            runtime.block_on(show_models(&settings, &key))?;
        }
        Commands::SetKey { key } => {
            let key = match key {
                Some(key) => key,
                None => read_line("Gemini API key: ")?,
            };
            let Some(key) = ApiKey::new(&key, CredentialSource::Prompt) else {
                bail!("API key is empty");
            };
            settings.gemini_auth.api_key = Some(key.expose().to_string());
            let path = services::save_settings(&settings)?;
            println!("Saved to {}", path.display());
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn connector(settings: &AppSettings) -> GeminiConnector {
    GeminiConnector {
        base_url: settings.api_base_url.clone(),
        timeout: settings.request_timeout(),
    }
}

fn build_session(settings: &AppSettings, key: ApiKey, style: &StyleArgs) -> Session {
    let domain = style.domain.as_deref().unwrap_or(&settings.default_domain);
    if find_persona(domain).is_none() {
        tracing::warn!(domain = %domain, "unknown domain, using the general persona");
    }
    let tone = style.tone.as_deref().unwrap_or(&settings.default_tone);
    let history = settings
        .history_limit
        .map(History::with_limit)
        .unwrap_or_default();
    tracing::debug!(source = ?key.source, "using Gemini API key");

    let synthesizer = PromptSynthesizer::new(Box::new(connector(settings)), settings.resolver.clone());
    Session::new(synthesizer, key, domain, tone, history)
}

fn run_session(
    runtime: &tokio::runtime::Runtime,
    session: &mut Session,
    preview: usize,
) -> Result<()> {
    println!("{}\n", HELP);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };

        match parse_line(&line?) {
            Command::Empty => {}
            Command::Quit => break,
            Command::Help => println!("{}", HELP),
            Command::Request(request) => {
                let reply = runtime.block_on(session.submit(&request));
                println!("{}\n", render_reply(&reply));
                if matches!(reply, Reply::Generated { .. }) {
                    println!("{}\n", render_history(session.history(), preview));
                }
            }
            Command::Domain(domain) => {
                if find_persona(&domain).is_none() {
                    println!("Unknown domain '{}', using the general persona", domain);
                }
                println!("Domain: {}", session.set_domain(&domain));
            }
            Command::Tone(tone) => println!("Tone: {}", session.set_tone(&tone)),
            Command::History => println!("{}", render_history(session.history(), preview)),
            Command::Export(path) => {
                match services::export_history_to_path(session.history(), Path::new(&path)) {
                    Ok(()) => println!("Exported {} entries to {}", session.history().len(), path),
                    Err(e) => println!("Export failed: {:#}", e),
                }
            }
            Command::Open => match session.last_link() {
                Some(link) => open_link(link.url),
                None => println!("Nothing generated yet"),
            },
            Command::Unknown(input) => println!("Unknown command '{}'. Type :help", input),
        }
    }

    Ok(())
}

async fn show_models(settings: &AppSettings, key: &ApiKey) -> Result<()> {
    let client = GeminiClient::with_options(
        key.expose(),
        settings.api_base_url.as_deref(),
        settings.request_timeout(),
    )?;
    let chosen = resolve_model(&client, &settings.resolver).await;
    println!("Selected: {}", chosen);

    match client.list_models().await {
        Ok(models) => {
            for model in models {
                let marker = if model.name == chosen { "*" } else { " " };
                println!("{} {}  [{}]", marker, model.name, model.supported_methods.join(", "));
            }
        }
        Err(e) => println!("Model listing unavailable: {:#}", e),
    }
    Ok(())
}

fn prompt_for_key() -> Result<ApiKey> {
    let input = read_line("Gemini API key (not saved): ")?;
    ApiKey::new(&input, CredentialSource::Prompt)
        .context("no Gemini API key: run `prompt-pro set-key` or set GEMINI_API_KEY")
}

fn read_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn open_link(url: &str) {
    if let Err(e) = open::that(url) {
        tracing::warn!(url = %url, "failed to open browser: {}", e);
        println!("Open manually: {}", url);
    }
}
