use chart_images::{
    cli::{Cli, Commands},
    config, handlers,
};
use clap::Parser;
use std::process;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> chart_images::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    let config = config::load_config(cli.config.as_deref())?;

    let output = match cli.command {
        Commands::Get(args) => handlers::handle_get(args, &config)?,
        Commands::All(args) => handlers::handle_all(args, &config)?,
        Commands::Kinds => handlers::handle_kinds(),
        Commands::Version => handlers::handle_version()?,
    };

    print!("{}", output);
    Ok(())
}
