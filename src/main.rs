use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use taskera::auth::types::GENERIC_FAILURE_MESSAGE;
use taskera::auth::{AuthError, HttpAuthApi, RoleSelector};
use taskera::screen::{AuthScreen, FormStatus, Navigation};
use taskera::{ClientConfig, ConfigError, CredentialFlow, FileSessionStore};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Auth(#[from] AuthError),
    #[error("{0}")]
    Rejected(String),
    #[error("not signed in")]
    SignedOut,
}

#[derive(Parser, Debug)]
#[command(name = "taskera", about = "Sign in to and sign up for the Taskera marketplace")]
struct Cli {
    /// API base URL; overrides `TASKERA_API_BASE_URL`.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Session file; overrides `TASKERA_SESSION_FILE`.
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and print the redirect path for the account's role.
    Login(LoginArgs),
    /// Create an account.
    Register(RegisterArgs),
    /// Show the role and email of the stored session.
    Whoami,
    /// Forget the stored session.
    Logout,
}

#[derive(Args, Debug)]
struct LoginArgs {
    #[arg(long, env = "TASKERA_EMAIL")]
    email: String,
    #[arg(long, env = "TASKERA_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    full_name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    #[arg(long)]
    confirm_password: String,
    #[arg(long, value_enum, default_value_t = AccountKind::Client)]
    role: AccountKind,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum AccountKind {
    Client,
    Freelancer,
}

impl From<AccountKind> for RoleSelector {
    fn from(kind: AccountKind) -> Self {
        match kind {
            AccountKind::Client => Self::Client,
            AccountKind::Freelancer => Self::Freelancer,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(&cli)?;
    let api = HttpAuthApi::new(&config)?;
    let session = FileSessionStore::new(&config.session_file);
    tracing::debug!(base_url = api.base_url(), session_file = %session.path().display(), "client configured");
    let flow = CredentialFlow::new(Arc::new(api), Arc::new(session));

    match cli.command {
        Command::Login(args) => run_login(&flow, args).await,
        Command::Register(args) => run_register(&flow, args).await,
        Command::Whoami => run_whoami(&flow),
        Command::Logout => {
            flow.sign_out()?;
            println!("signed out");
            Ok(())
        }
    }
}

fn load_config(cli: &Cli) -> Result<ClientConfig, ConfigError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url)?;
    }
    if let Some(path) = &cli.session_file {
        config = config.with_session_file(path);
    }
    Ok(config)
}

async fn run_login(flow: &CredentialFlow, args: LoginArgs) -> Result<(), CliError> {
    let mut screen = AuthScreen::new();
    screen.login.email = args.email;
    screen.login.password = args.password;

    match screen.submit_login(flow).await {
        Navigation::Redirect(destination) => {
            println!("{destination}");
            Ok(())
        }
        Navigation::Stay => Err(rejected(screen.login.status())),
    }
}

async fn run_register(flow: &CredentialFlow, args: RegisterArgs) -> Result<(), CliError> {
    let mut screen = AuthScreen::new();
    screen.show_register();
    let form = &mut screen.register;
    form.full_name = args.full_name;
    form.email = args.email;
    form.password = args.password;
    form.confirm_password = args.confirm_password;
    form.role = args.role.into();

    screen.submit_register(flow).await;
    match screen.active_status() {
        FormStatus::Success(notice) => {
            println!("{notice}");
            Ok(())
        }
        other => Err(rejected(other)),
    }
}

fn run_whoami(flow: &CredentialFlow) -> Result<(), CliError> {
    let claims = flow.current_claims()?.ok_or(CliError::SignedOut)?;
    println!("role: {}", claims.role.as_deref().unwrap_or("-"));
    println!("email: {}", claims.email.as_deref().unwrap_or("-"));
    println!("email confirmed: {}", claims.email_confirmed);
    println!("area: {}", claims.destination());
    Ok(())
}

fn rejected(status: &FormStatus) -> CliError {
    CliError::Rejected(status.error().unwrap_or(GENERIC_FAILURE_MESSAGE).to_owned())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
