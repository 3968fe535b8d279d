use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_PORT: u16 = 3001;

#[derive(Parser, Debug)]
#[command(name = "todo-server")]
#[command(about = "JSON CRUD API over a SQLite todo list", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Existing SQLite database file holding the `todos` table
    #[arg(value_name = "DB_PATH")]
    pub database_path: PathBuf,

    /// Origin allowed by the CORS policy (`*` for any)
    #[arg(value_name = "ALLOWED_ORIGIN")]
    pub allowed_origin: String,

    /// Address that receives a mail on every create, update and delete
    #[arg(value_name = "NOTIFY_EMAIL")]
    pub notify_email: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// SendGrid API key; notifications are off without it
    #[arg(long, env = "SENDGRID_API_KEY", hide_env_values = true)]
    pub sendgrid_api_key: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub allowed_origin: String,
    pub notify_email: Option<String>,
    pub port: u16,
    pub sendgrid_api_key: Option<String>,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            database_path: cli.database_path,
            allowed_origin: cli.allowed_origin,
            notify_email: non_empty(cli.notify_email),
            port: cli.port,
            sendgrid_api_key: non_empty(cli.sendgrid_api_key),
        }
    }
}

impl Config {
    /// Parses the process arguments. Exits with a usage message when a
    /// required argument is missing.
    pub fn from_args() -> Self {
        Cli::parse().into()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
