//! CLI command definitions and dispatch for the `vantage` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod personas;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Persona-driven business insight dashboard.
#[derive(Parser)]
#[command(name = "vantage", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server backing the web dashboard.
    Serve {
        /// Port to listen on (defaults to the configured port).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (defaults to the configured host).
        #[arg(long)]
        host: Option<String>,
    },

    /// Start an interactive chat session with a persona.
    Chat {
        /// Persona to chat as (sales, research, finance, strategy, product).
        /// Prompts for a choice when omitted.
        persona: Option<String>,
    },

    /// Ask a persona a single question and print the reply.
    Ask {
        /// Persona to ask.
        persona: String,

        /// The question to send.
        message: String,
    },

    /// List the available personas.
    #[command(alias = "ls")]
    Personas,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}
