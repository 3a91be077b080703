use clap::{Parser, Subcommand};

mod cmd;
mod core;
mod session;
mod tax;

/// Nigerian personal income tax calculator (2025 Nigeria Tax Act)
#[derive(Parser, Debug)]
#[command(name = "taxed", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Full tax liability breakdown
    Report(cmd::report::ReportCommand),
    /// Quarterly payment schedule
    Schedule(cmd::schedule::ScheduleCommand),
    /// Five-year income and tax projection
    Projection(cmd::projection::ProjectionCommand),
    /// List itemized income and expense entries
    Entries(cmd::entries::EntriesCommand),
    /// Print expected input formats
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Report(cmd) => cmd.exec(),
        Command::Schedule(cmd) => cmd.exec(),
        Command::Projection(cmd) => cmd.exec(),
        Command::Entries(cmd) => cmd.exec(),
        Command::Schema(cmd) => cmd.exec(),
    }
}
