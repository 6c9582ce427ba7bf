use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    ApiConfig, ChatService, Clock, DashboardServices, ExamService, ForumService, JobService,
    ProgressService, StubTransport,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, StudyDocument, UiApp, build_app_context};

const DEFAULT_LOG_FILTER: &str = "info";
const DEFAULT_DOCUMENT_TITLE: &str = "Study material";

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    EmptyValue { flag: &'static str },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::EmptyValue { flag } => write!(f, "{flag} must not be empty"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    let value = args.next().ok_or(ArgsError::MissingValue { flag })?;
    if value.trim().is_empty() {
        return Err(ArgsError::EmptyValue { flag });
    }
    Ok(value)
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    api_base: Option<String>,
    offline: bool,
    document_url: Option<String>,
    document_title: Option<String>,
    help: bool,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, ArgsError> {
        let mut args = args.into_iter();
        let mut parsed = Self::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-base" => parsed.api_base = Some(require_value(&mut args, "--api-base")?),
                "--offline" => parsed.offline = true,
                "--document" => {
                    parsed.document_url = Some(require_value(&mut args, "--document")?);
                }
                "--document-title" => {
                    parsed.document_title = Some(require_value(&mut args, "--document-title")?);
                }
                "--help" | "-h" => parsed.help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }

    fn study_document(&self) -> Option<StudyDocument> {
        self.document_url.as_ref().map(|url| StudyDocument {
            url: url.clone(),
            title: self
                .document_title
                .clone()
                .unwrap_or_else(|| DEFAULT_DOCUMENT_TITLE.to_string()),
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api-base <url>] [--offline] [--document <url>] [--document-title <title>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-base {}", services::config::DEFAULT_BASE_URL);
    eprintln!();
    eprintln!("Environment (a .env file is loaded if present):");
    eprintln!("  NOUN_API_BASE_URL, NOUN_QUERY_STALE_SECS, NOUN_HTTP_TIMEOUT_SECS, RUST_LOG");
}

struct DesktopApp {
    services: DashboardServices,
    clock: Clock,
    document: Option<StudyDocument>,
}

impl UiApp for DesktopApp {
    fn clock(&self) -> Clock {
        self.clock
    }

    fn forum(&self) -> Arc<ForumService> {
        self.services.forum()
    }

    fn jobs(&self) -> Arc<JobService> {
        self.services.jobs()
    }

    fn exams(&self) -> Arc<ExamService> {
        self.services.exams()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn chat(&self) -> Arc<ChatService> {
        self.services.chat()
    }

    fn study_document(&self) -> Option<StudyDocument> {
        self.document.clone()
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn build_services(
    args: &Args,
    clock: Clock,
) -> Result<DashboardServices, Box<dyn std::error::Error>> {
    let mut config = ApiConfig::from_env()?;
    if let Some(base) = &args.api_base {
        config = config.with_base_url(base)?;
    }

    if args.offline {
        info!("running offline, every widget shows its empty state");
        return Ok(DashboardServices::with_transport(
            &config,
            Arc::new(StubTransport::offline()),
            clock,
        ));
    }

    info!(base_url = %config.base_url, "using dashboard api");
    Ok(DashboardServices::from_config(&config, clock)?)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let args = Args::parse(std::env::args().skip(1)).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    if args.help {
        print_usage();
        return Ok(());
    }

    init_tracing();

    let clock = Clock::default_clock();
    let services = build_services(&args, clock)?;
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        services,
        clock,
        document: args.study_document(),
    });
    let context = build_app_context(&app);

    // Some window managers default new windows to always-on-top.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Noun Success")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
