use clap::{Parser, Subcommand};

mod commands;
mod logging;
mod panel;

#[derive(Parser)]
#[command(name = "pomoclock", version, about = "Pomodoro desk clock")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the clock and the terminal panel
    Run(commands::run::RunArgs),
    /// Show the configured interval sequence
    Sequence {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    logging::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Sequence { json } => commands::sequence::run(json),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
