mod config;
mod display;
mod error;
mod export;
mod parser;
mod schedule;
mod web;

use clap::Parser;
use tracing::info;

use config::{Cli, Commands, GenerateArgs};
use display::{print_schedule, ScheduleTable};
use error::AppError;
use export::write_schedule;
use parser::load_roster;
use schedule::plan_schedule;

fn run_generate(args: &GenerateArgs) -> Result<(), AppError> {
    let request = args.request();
    request.validate()?;

    let roster = load_roster(&args.names)?;
    info!(count = roster.len(), path = %args.names.display(), "loaded names");

    let mut rng = request.rng();
    let plan = plan_schedule(&request, &roster, &mut rng)?;

    print_schedule(&plan.assignment, &roster, plan.reused);

    if let Some(output) = &args.output {
        let table = ScheduleTable::from_assignment(&plan.assignment);
        write_schedule(output, &table)?;
        println!("\nAssignment saved to: {}", output.display());
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Generate(args) => run_generate(&args)?,
        Commands::Web { port } => {
            println!("Access the site at http://localhost:{}", port);
            web::start_server(port).await?;
        }
    }

    Ok(())
}
