//! CadOutSource CLI - Contact submission tools.
//!
//! # Usage
//!
//! ```bash
//! # Check a payload against the quote form rules
//! cos-cli validate --form quote submission.json
//!
//! # Render both emails without sending anything
//! cos-cli preview --form message submission.json --out-dir /tmp/preview
//!
//! # Send both emails for real using RESEND_API_KEY / OFFICIAL_EMAIL
//! cos-cli send-test --form quote submission.json
//! ```
//!
//! Pass `-` as the file to read from stdin.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::path::PathBuf;

use cadoutsource_core::{DetailedProjectSubmission, Email, QuickServiceSubmission};
use clap::{Parser, Subcommand, ValueEnum};

mod commands;

use commands::CommandError;

#[derive(Parser)]
#[command(name = "cos-cli")]
#[command(author, version, about = "CadOutSource CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Which contact form a payload belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Form {
    /// Detailed project quote form (`/api/contact/contact`)
    Quote,
    /// Quick service message form (`/api/sendMessage/sendMessage`)
    Message,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a submission and print the issues or the accepted payload
    Validate {
        #[arg(short, long, value_enum)]
        form: Form,

        /// JSON file, or `-` for stdin
        input: PathBuf,
    },
    /// Render the notification and thank-you emails without sending
    Preview {
        #[arg(short, long, value_enum)]
        form: Form,

        /// JSON file, or `-` for stdin
        input: PathBuf,

        /// Write HTML and text bodies here instead of printing them
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Operator address the notification goes to
        #[arg(long, default_value = "info@cadoutsource.co.uk")]
        operator: String,

        /// Sender address (defaults to the operator address)
        #[arg(long)]
        from: Option<String>,
    },
    /// Send both emails through the configured provider
    SendTest {
        #[arg(short, long, value_enum)]
        form: Form,

        /// JSON file, or `-` for stdin
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CommandError> {
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Validate { form, input } => {
            let raw = commands::read_input(&input)?;
            match form {
                Form::Quote => commands::validate::run::<DetailedProjectSubmission>(&raw, &mut out),
                Form::Message => commands::validate::run::<QuickServiceSubmission>(&raw, &mut out),
            }?;
        }
        Commands::Preview {
            form,
            input,
            out_dir,
            operator,
            from,
        } => {
            let raw = commands::read_input(&input)?;
            let operator = Email::parse(&operator)?;
            let from = from.as_deref().map(Email::parse).transpose()?;
            let addresses = commands::preview::Addresses {
                from: from.unwrap_or_else(|| operator.clone()),
                operator,
            };
            let out_dir = out_dir.as_deref();
            match form {
                Form::Quote => commands::preview::run::<DetailedProjectSubmission>(
                    &raw, &addresses, out_dir, &mut out,
                ),
                Form::Message => commands::preview::run::<QuickServiceSubmission>(
                    &raw, &addresses, out_dir, &mut out,
                ),
            }?;
        }
        Commands::SendTest { form, input } => {
            let raw = commands::read_input(&input)?;
            match form {
                Form::Quote => {
                    commands::send_test::run::<DetailedProjectSubmission>(&raw, &mut out).await
                }
                Form::Message => {
                    commands::send_test::run::<QuickServiceSubmission>(&raw, &mut out).await
                }
            }?;
        }
    }

    out.flush()?;
    Ok(())
}
