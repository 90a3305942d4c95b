pub mod attributes;
pub mod check;
pub mod explain;
pub mod generate;
pub mod watch;

use console::style;
use locus::{GeneratorOutput, LocusError};

/// Print an error and exit with its code
pub(crate) fn fail(err: &LocusError) -> ! {
    eprintln!("{} {}", style("Error:").red().bold(), err);
    std::process::exit(err.exit_code());
}

/// Print every diagnostic of a run to stderr
pub(crate) fn report(output: &GeneratorOutput) {
    for diagnostic in &output.diagnostics {
        eprintln!("{} {}", style("!").red().bold(), diagnostic);
    }
}
