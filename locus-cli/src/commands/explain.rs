use console::style;
use locus::ErrorKind;

/// Human readable description of a diagnostic kind
pub fn describe(kind: ErrorKind) -> String {
    let descriptor = kind.descriptor();
    let effect = if kind.blocks_emission() {
        "The accessor is emitted as a stub returning default."
    } else {
        "The first registration is kept and the accessor is emitted in full."
    };
    format!(
        "{} {} ({})\n  message: {}\n  {}",
        descriptor.id, descriptor.title, descriptor.category, descriptor.message_format, effect
    )
}

/// Main entry point for the explain command
pub fn run(code: Option<String>) {
    match code {
        Some(code) => match ErrorKind::from_code(&code) {
            Some(kind) => println!("{}", describe(kind)),
            None => {
                eprintln!(
                    "{} Unknown diagnostic code '{}'",
                    style("Error:").red().bold(),
                    code
                );
                std::process::exit(2);
            }
        },
        None => {
            for kind in ErrorKind::ALL {
                let descriptor = kind.descriptor();
                println!("{} {}", style(descriptor.id).cyan(), descriptor.title);
            }
        }
    }
}
