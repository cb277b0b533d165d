use backend::config::db::{db_url, DbProfile};
use backend::infra::db::connect_db;
use clap::{Parser, ValueEnum};
use migration::{migrate, snapshot, MigrationCommand};
use tracing::info;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Command {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl From<Command> for MigrationCommand {
    fn from(command: Command) -> Self {
        match command {
            Command::Up => MigrationCommand::Up,
            Command::Down => MigrationCommand::Down,
            Command::Fresh => MigrationCommand::Fresh,
            Command::Reset => MigrationCommand::Reset,
            Command::Refresh => MigrationCommand::Refresh,
            Command::Status => MigrationCommand::Status,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Env {
    Prod,
    Test,
}

impl From<Env> for DbProfile {
    fn from(env: Env) -> Self {
        match env {
            Env::Prod => DbProfile::Prod,
            Env::Test => DbProfile::Test,
        }
    }
}

#[derive(Parser)]
#[command(name = "migration-cli")]
#[command(about = "Todo database migration tool")]
struct Args {
    /// Migration command to run
    #[arg(value_enum)]
    command: Command,

    /// Database profile; the URL is resolved exactly as the backend does
    #[arg(short, long, value_enum, default_value = "test")]
    env: Env,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,migration_cli=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let url = match db_url(args.env.into()) {
        Ok(url) => url,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(2);
        }
    };

    let conn = match connect_db(&url).await {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("❌ Failed to connect: {e}");
            std::process::exit(1);
        }
    };

    info!(env = ?args.env, command = ?args.command, "Running migration");
    if let Err(e) = migrate(&conn, args.command.into()).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }

    match snapshot(&conn).await {
        Ok(s) => println!(
            "{} {}: {}/{} migrations applied{}",
            s.backend,
            s.database,
            s.applied,
            s.defined,
            if s.is_current() { "" } else { " (pending)" }
        ),
        Err(e) => eprintln!("Could not read migration state: {e}"),
    }
}
