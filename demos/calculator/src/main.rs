//! Worked-example binary: wires the `calculate`/`counter`/`docs://readme`
//! engine from [`mcp_demo_calculator`] to whichever transport `--transport`
//! names (spec.md §4.10 ambient configuration; CLI shape grounded on
//! `git-proxy-mcp`'s `clap::Parser` wiring).

use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use mcp::prelude::*;
use mcp_demo_calculator::build_engine_with_prefix;
use mcp_transport::StdioTransport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TransportKind {
    Stdio,
    Http,
    Sse,
    Ndjson,
}

/// A worked-example MCP server exposing `calculate`, `counter`, and
/// `docs://readme`.
#[derive(Parser, Debug)]
#[command(name = "mcp-demo-calculator")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Which transport to serve the engine over.
    #[arg(long, value_enum, default_value = "stdio")]
    transport: TransportKind,

    /// Address to bind for the http/sse/ndjson transports.
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: String,

    /// Method-name prefix the engine strips before dispatch.
    #[arg(long, default_value = "mcp/")]
    module_prefix: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    let engine = build_engine_with_prefix(args.module_prefix.clone());

    let result = match args.transport {
        TransportKind::Stdio => {
            tracing::info!("serving mcp-demo-calculator over stdio");
            StdioTransport::run(engine).await
        }
        TransportKind::Http => {
            tracing::info!(addr = %args.bind, "serving mcp-demo-calculator over plain HTTP");
            mcp_transport::http::serve(engine, &args.bind, None).await
        }
        TransportKind::Sse => {
            tracing::info!(addr = %args.bind, "serving mcp-demo-calculator over SSE");
            mcp_transport::sse::serve(engine, &args.bind, None, None).await
        }
        TransportKind::Ndjson => {
            tracing::info!(addr = %args.bind, "serving mcp-demo-calculator over NDJSON streaming HTTP");
            mcp_transport::ndjson::serve(engine, &args.bind, None).await
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "transport exited with an error");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
