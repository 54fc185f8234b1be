use crate::demo::{run_demo, run_parse, run_score, DemoArgs, ParseArgs, ScoreArgs};
use crate::server;
use agscore::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "AgScore",
    about = "Score agricultural lending risk from soil, climate and harvest data",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a single request read from a JSON file or stdin
    Score(ScoreArgs),
    /// Parse a `harvest score ...` command and print the extracted fields
    Parse(ParseArgs),
    /// Walk through sample requests against the configured reference tables
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Parse(args) => run_parse(args),
        Command::Demo(args) => run_demo(args),
    }
}
