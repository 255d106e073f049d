use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use md2html::convert_file;

#[derive(Parser)]
#[command(name = "md2html", version, about = "Convert a Markdown file to HTML")]
struct Cli {
    /// Markdown file to convert
    #[arg(value_name = "FILE")]
    input: PathBuf,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only HTML
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match convert_file(&cli.input) {
        Ok(html) => {
            print!("{}", html);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
