#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Bulk mail-merge API server

use anyhow::Result;
use bulk_mailer::infrastructure::{
    email::smtp::{SmtpConfig, SmtpMailer},
    http::{
        state::{AppState, SendConfig},
        HttpServer, HttpServerConfig,
    },
};
use clap::Parser;

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// The HTTP server configuration
    #[clap(flatten)]
    pub server: HttpServerConfig,

    /// The SMTP relay configuration
    #[clap(flatten)]
    pub smtp: SmtpConfig,

    /// Dispatch pacing configuration
    #[clap(flatten)]
    pub send: SendConfig,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let state = AppState::new(args.send, SmtpMailer::new(args.smtp));

    HttpServer::new(state, args.server).await?.run().await
}
