use std::{env, fs::read_to_string, path::Path, process::ExitCode, time::Instant};

use anyhow::{anyhow, bail, Context};
use boum::{compile, render_error, OutputType};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.len() > 3 {
        bail!("usage: boum <file> [parsed|analyzed|optimized|js]");
    }

    let file_path = &args[1];
    let output_type = match args.get(2) {
        // Compiler errors hold `Rc`s, so they are rendered before crossing into anyhow
        Some(requested) => requested
            .parse::<OutputType>()
            .map_err(|error| anyhow!("{}", error))?,
        None => OutputType::Js,
    };

    let file_name = Path::new(file_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_path.clone());

    let source = read_to_string(file_path)
        .with_context(|| format!("failed to read `{}`", file_path))?;

    let start = Instant::now();
    match compile(&source, Some(file_name.clone()), output_type) {
        Ok(output) => {
            info!(file = %file_name, %output_type, elapsed = ?start.elapsed(), "compiled");
            println!("{}", output);
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            eprintln!("{}", render_error(&error, &source));
            Ok(ExitCode::FAILURE)
        }
    }
}
