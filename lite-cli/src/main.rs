use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lite", version, about = "Lite template compiler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a markup file and print its template expression.
    Compile {
        /// Path to the markup file
        input: PathBuf,
        /// Expose an item field to the template as ${item.NAME}
        #[arg(long = "property", value_name = "NAME")]
        properties: Vec<String>,
        /// JSON file with items to resolve the property bindings against
        #[arg(long)]
        items: Option<PathBuf>,
        /// Give every <button> a click listener
        #[arg(long)]
        button_activation: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Compile {
            input,
            properties,
            items,
            button_activation,
        } => {
            let out =
                lite_cli::compile_cmd(&input, &properties, items.as_deref(), button_activation)?;
            print!("{out}");
        }
    }
    Ok(())
}
