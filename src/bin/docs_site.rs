use anyhow::Result;
use clap::{Parser, Subcommand};
use docs_site::{AppConfig as _, Config, RedirectTable, logging, web::start_web_server};
use std::{net::SocketAddr, path::PathBuf, process::ExitCode, sync::Arc};

#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(about, version, rename_all = "kebab-case")]
struct Cli {
    #[command(subcommand)]
    command: CommandLine,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
enum CommandLine {
    /// Serve the documentation website
    StartWebServer {
        #[arg(long)]
        socket_addr: Option<SocketAddr>,
    },

    /// Load a redirects file and print its rules
    CheckRedirects {
        /// Defaults to the configured redirects file
        path: Option<PathBuf>,
    },
}

impl CommandLine {
    async fn handle_args(self, mut config: Config) -> Result<()> {
        match self {
            Self::StartWebServer { socket_addr } => {
                if let Some(socket_addr) = socket_addr {
                    config.socket_addr = socket_addr;
                }
                start_web_server(Arc::new(config)).await?;
            }
            Self::CheckRedirects { path } => {
                let table = RedirectTable::new(path.unwrap_or(config.redirects_path));
                let rules = table.rules().await?;

                for rule in rules {
                    println!("{rule}");
                }
                eprintln!("{}: {} rule(s)", table.path().display(), rules.len());
            }
        }

        Ok(())
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = async {
        let config = Config::from_environment()?;
        logging::init(&config.log_filter)?;
        cli.command.handle_args(config).await
    }
    .await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}
