use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use calcpad::calculator::{ExpressionEditor, SymbolStyle, SymbolTable};
use calcpad::clipboard::copy_to_clipboard;
use calcpad::config::Config;
use calcpad::keypad;

/// A keypad calculator driven by key scripts.
///
/// Every character of a script is one button press: digits, `+ - * / ^ .`
/// (or `− × ÷`), `(` or `)` for the parenthesis button, `c` to clear,
/// `<` for backspace and `=` to calculate.
#[derive(Debug, Parser)]
#[command(name = "calcpad", version, about)]
struct Args {
    /// Key script to run. Reads scripts from stdin, one per line, when omitted.
    #[arg(short, long)]
    keys: Option<String>,

    /// Symbol style, overriding the config file.
    #[arg(long, value_enum)]
    style: Option<SymbolStyle>,

    /// Path to the config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Copy the final display to the clipboard.
    #[arg(long)]
    copy: bool,
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    let style = args.style.unwrap_or(config.style);
    debug!(?style, "Starting calculator");

    let mut editor = ExpressionEditor::new(SymbolTable::for_style(style))
        .with_error_message(config.error_message);

    match &args.keys {
        Some(script) => {
            keypad::feed(&mut editor, script).context("Invalid key script")?;
            println!("{}", editor.display_text());
        }
        None => run_interactive(&mut editor)?,
    }

    if args.copy {
        copy_to_clipboard(editor.display_text())?;
    }

    Ok(())
}

/// Feed stdin line by line into one editor, echoing the display after each line.
fn run_interactive(editor: &mut ExpressionEditor) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;

        match keypad::feed(editor, &line) {
            Ok(_) => writeln!(stdout, "{}", editor.display_text())?,
            Err(e) => {
                debug!(line, "Rejected key script");
                eprintln!("{}", e);
            }
        }
        stdout.flush()?;
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
