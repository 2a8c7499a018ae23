use colored::Colorize;
use std::path::Path;
use throttle_cloud::OutputFormat;

pub fn handle(
    stack: &str,
    format: OutputFormat,
    show_secrets: bool,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let config = throttle_core::load_stack(stack)?;
    let resolved = throttle_core::resolve(&config)?;
    let declaration = resolved.to_declaration()?;

    let declaration = if show_secrets {
        declaration
    } else {
        declaration.redacted()
    };
    let rendered = declaration.render(format)?;

    match output {
        Some(path) => {
            std::fs::write(path, format!("{}\n", rendered))?;
            eprintln!(
                "{} {} ({})",
                "✓ Declaration written to".green(),
                path.display().to_string().cyan(),
                declaration.summary()
            );
        }
        None => println!("{}", rendered),
    }

    Ok(())
}
