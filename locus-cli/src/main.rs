mod commands;
mod logging;
mod project;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use project::Project;

#[derive(Parser)]
#[command(name = "locus")]
#[command(about = "Generate service locator accessors from registration attributes", long_about = None)]
struct Cli {
    /// Log debug output (overridden by LOCUS_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate sources for every manifest under a path
    Generate {
        /// A manifest file or a directory to search for *.locus.json / *.locus.toml
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output directory (default: generated)
        #[arg(long, short = 'o', default_value = "generated")]
        output: PathBuf,
    },
    /// Fail if generated sources on disk are out of date
    Check {
        /// A manifest file or a directory to search for manifests
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output directory to compare against
        #[arg(long, short = 'o', default_value = "generated")]
        output: PathBuf,
    },
    /// Regenerate whenever a manifest or locus.toml changes
    Watch {
        /// A manifest file or a directory to search for manifests
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output directory (default: generated)
        #[arg(long, short = 'o', default_value = "generated")]
        output: PathBuf,
    },
    /// Print or write the registration attribute definitions
    Attributes {
        /// Write to this file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// Describe a diagnostic code, or list them all
    Explain {
        /// Diagnostic code (e.g. DI001)
        code: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Generate { path, output } => {
            commands::generate::run(Project::new(path, output));
        }
        Commands::Check { path, output } => {
            commands::check::run(Project::new(path, output));
        }
        Commands::Watch { path, output } => {
            commands::watch::run(Project::new(path, output));
        }
        Commands::Attributes { output } => {
            commands::attributes::run(PathBuf::from("."), output);
        }
        Commands::Explain { code } => {
            commands::explain::run(code);
        }
    }
}
