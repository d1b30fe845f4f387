// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::process::exit;

use clap::Parser;
use numbersense_core::Mode;
use numbersense_core::Operation;
use numbersense_core::Timestamp;
use tokio::spawn;

use crate::cmd::drill::server::ServerConfig;
use crate::cmd::drill::server::start_server;
use crate::cmd::export::export_sessions;
use crate::cmd::history::print_history;
use crate::cmd::reset::reset_sessions;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_stats;
use crate::error::Fallible;
use crate::utils::wait_for_server;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Practice arithmetic through a web interface.
    Drill {
        /// Path to the profile directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Practice mode: flash, visual, word, or decompose.
        #[arg(long)]
        mode: Option<Mode>,
        /// Operation: add, sub, or mix.
        #[arg(long)]
        operation: Option<Operation>,
        /// Largest number used in problems, between 5 and 100.
        #[arg(long)]
        max: Option<u32>,
        /// The host address to bind to. Default is 127.0.0.1.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// The port to use for the web server. Default is 8000.
        #[arg(long, default_value_t = 8000)]
        port: u16,
        /// Whether to open the browser automatically. Default is true.
        #[arg(long)]
        open_browser: Option<bool>,
        /// Start a fresh session instead of continuing the latest one.
        #[arg(long)]
        new_session: bool,
        /// Seed for the problem generator.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print statistics for the latest session.
    Stats {
        /// Path to the profile directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Which output format to use.
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
    },
    /// Print the latest session's attempts, newest first.
    History {
        /// Path to the profile directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Print at most this many attempts.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Export every session as JSON.
    Export {
        /// Path to the profile directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Optional path to the output file. By default, the output is printed to stdout.
        #[arg(long)]
        output: Option<String>,
    },
    /// Erase all sessions.
    Reset {
        /// Path to the profile directory. By default, the current working directory is used.
        directory: Option<String>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Drill {
            directory,
            mode,
            operation,
            max,
            host,
            port,
            open_browser,
            new_session,
            seed,
        } => {
            if open_browser.unwrap_or(true) {
                // Start a separate task to open the browser once the server is up.
                let browser_host = host.clone();
                spawn(async move {
                    match wait_for_server(&browser_host, port).await {
                        Ok(_) => {
                            let _ = open::that(format!("http://{browser_host}:{port}/"));
                        }
                        Err(e) => {
                            eprintln!("Failed to connect to server: {e}");
                            exit(-1)
                        }
                    }
                });
            }
            let config = ServerConfig {
                directory,
                host,
                port,
                session_started_at: Timestamp::now(),
                mode,
                operation,
                max_range: max,
                new_session,
                seed,
            };
            start_server(config).await
        }
        Command::Stats { directory, format } => print_stats(directory, format),
        Command::History { directory, limit } => print_history(directory, limit),
        Command::Export { directory, output } => export_sessions(directory, output),
        Command::Reset { directory } => reset_sessions(directory),
    }
}
