use clap::{Parser, Subcommand};
use specwatch_cli::CliContext;
use specwatch_cli::commands;
use specwatch_cli::dir_watcher;
use specwatch_cli::readline;
use std::io::Write;

#[tokio::main]
async fn main() -> Result<(), String> {
    let ctx = CliContext::new();

    // Initialize recording index and start directory watcher
    if let Some(handle) = dir_watcher::init_watcher(&ctx).await {
        ctx.tasks.lock().await.watcher = Some(handle);
    }

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "special attack timer tracker")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    Load {
        #[arg(short, long)]
        path: String,
    },
    Exit,
    Status,
    List,
    SetDirectory {
        #[arg(short, long)]
        path: String,
    },
    Format {
        #[arg(short, long)]
        timer: String,
        #[arg(short, long)]
        value: String,
    },
    Config,
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "specwatch".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Load { path }) => commands::load(path, ctx).await,
        Some(Commands::Status) => commands::status(ctx).await,
        Some(Commands::List) => commands::list(ctx).await,
        Some(Commands::SetDirectory { path }) => commands::set_directory(path, ctx).await,
        Some(Commands::Format { timer, value }) => commands::set_format(timer, value, ctx).await,
        Some(Commands::Config) => commands::show_config(ctx).await,
        Some(Commands::Exit) => {
            commands::exit();
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
