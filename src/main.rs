use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::Level;

use userdesk::config::{ClientConfig, ConfigError};
use userdesk::net::api::ApiClient;
use userdesk::net::error::TransportError;
use userdesk::net::types::{Role, User};
use userdesk::session::{Session, SessionError};
use userdesk::state::users::UserListState;
use userdesk::state::{AppState, Store};
use userdesk::storage::{SessionStorage, StorageError, StoredSession};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("http client setup failed: {0}")]
    Client(#[from] TransportError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "userdesk", about = "User administration client")]
struct Cli {
    #[arg(long, env = "USERDESK_API_HOST")]
    api_host: Option<String>,

    #[arg(long, env = "USERDESK_SESSION_FILE")]
    session_file: Option<PathBuf>,

    /// Log request traffic to stderr.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Ping,
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
    },
    Logout,
    Whoami,
    Refresh,
    Users(UsersCommand),
}

#[derive(Args, Debug)]
struct UsersCommand {
    #[command(subcommand)]
    command: UsersSubcommand,
}

#[derive(Subcommand, Debug)]
enum UsersSubcommand {
    List,
    Get {
        email: String,
    },
    Create {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long, default_value = "USER")]
        role: Role,
    },
    Update {
        email: String,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        role: Option<Role>,
    },
    Delete {
        email: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.api_host {
        Some(host) => ClientConfig::with_host(host)?,
        None => ClientConfig::from_env()?,
    };
    if let Some(path) = cli.session_file {
        config.session_file = path;
    }

    let storage = SessionStorage::new(config.session_file.clone());
    let store = match storage.load()? {
        Some(stored) => Store::with_state(stored.into_state()),
        None => Store::new(),
    };
    let api = ApiClient::with_reqwest(&config.api_host, config.timeouts)?;
    let mut session = Session::new(api, store);

    match cli.command {
        Command::Ping => {
            let status = session.health().await?;
            print_json(&status)
        }
        Command::Login { email, password } => {
            let user = session.login(&email, &password).await?;
            persist(&storage, &session.state())?;
            print_json(&user.without_password())
        }
        Command::Register {
            email,
            password,
            first_name,
            last_name,
        } => {
            let user = session
                .register(&email, &password, &first_name, &last_name)
                .await?;
            persist(&storage, &session.state())?;
            print_json(&user.without_password())
        }
        Command::Logout => {
            let result = session.logout().await;
            persist(&storage, &session.state())?;
            result?;
            print_json(&serde_json::json!({ "loggedOut": true }))
        }
        Command::Whoami => {
            let state = session.state();
            let user = state.logged_user().ok_or(SessionError::NotLoggedIn)?;
            print_json(&user.without_password())
        }
        Command::Refresh => {
            session.refresh().await?;
            persist(&storage, &session.state())?;
            print_json(&serde_json::json!({ "refreshed": true }))
        }
        Command::Users(users) => run_users(&session, users).await,
    }
}

async fn run_users(session: &Session, users: UsersCommand) -> Result<(), CliError> {
    let mut list = UserListState::default();
    match users.command {
        UsersSubcommand::List => {
            session.load_users(&mut list).await?;
            let rows: Vec<User> = list.items.iter().map(User::without_password).collect();
            print_json(&rows)
        }
        UsersSubcommand::Get { email } => {
            let user = session.get_user(&email).await?;
            print_json(&user.without_password())
        }
        UsersSubcommand::Create {
            email,
            password,
            first_name,
            last_name,
            role,
        } => {
            let draft = User::new(&email, &first_name, &last_name, role).with_password(&password);
            let saved = session.save_user(&mut list, &draft, true).await?;
            print_json(&saved.without_password())
        }
        UsersSubcommand::Update {
            email,
            password,
            first_name,
            last_name,
            role,
        } => {
            let mut draft = session.get_user(&email).await?;
            if let Some(first_name) = first_name {
                draft.first_name = first_name;
            }
            if let Some(last_name) = last_name {
                draft.last_name = last_name;
            }
            if let Some(role) = role {
                draft.role = role;
            }
            draft.password = password.unwrap_or_default();
            let saved = session.save_user(&mut list, &draft, false).await?;
            print_json(&saved.without_password())
        }
        UsersSubcommand::Delete { email } => {
            let deleted = session.delete_user(&mut list, &email).await?;
            print_json(&deleted)
        }
    }
}

/// Mirror the store to disk: a full session is written, anything else clears the file.
fn persist(storage: &SessionStorage, state: &AppState) -> Result<(), CliError> {
    match StoredSession::from_state(state) {
        Some(stored) => storage.save(&stored)?,
        None => storage.clear()?,
    }
    Ok(())
}

fn print_json(value: &impl Serialize) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
