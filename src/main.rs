// SPDX-FileCopyrightText: 2025 The Taxdoc Authors
//
// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]
#![deny(elided_lifetimes_in_paths)]
#![warn(
    rust_2018_idioms,
    future_incompatible,
    unused,
    unused_lifetimes,
    unused_qualifications,
    unused_results,
    anonymous_parameters,
    deprecated_in_future,
    elided_lifetimes_in_paths,
    explicit_outlives_requirements,
    keyword_idents,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::unseparated_literal_suffix,
    clippy::decimal_literal_representation,
    clippy::single_char_lifetime_names,
    clippy::fallible_impl_from,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::wildcard_enum_match_arm,
    clippy::deref_by_slicing,
    clippy::default_numeric_fallback,
    clippy::shadow_reuse,
    clippy::clone_on_ref_ptr,
    clippy::todo,
    clippy::string_add,
    clippy::use_debug,
    clippy::future_not_send
)]
#![cfg_attr(not(test), warn(clippy::panic_in_result_fn))]

mod analysis;
mod api;
mod app;
mod audio;
mod command;
mod error;
mod gateway;
mod metadata;
mod model;
mod notify;
mod password;
mod session;
mod storage;
mod validate;

use std::{path::PathBuf, process, sync::Arc};

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use error::Result;
use gateway::Gateway;
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Subcommand)]
enum Command {
    Signup(command::signup::Command),
    Login(command::login::Command),
    Logout(command::logout::Command),
    Whoami(command::whoami::Command),
    List(command::list::Command),
    Upload(command::upload::Command),
    Show(command::show::Command),
    Pdf(command::pdf::Command),
    Speak(command::speak::Command),
}

#[async_trait]
impl command::Command for Command {
    async fn execute(self, app: &app::App<impl Gateway + 'static>) -> Result<()> {
        match self {
            Self::Signup(cmd) => cmd.execute(app).await,
            Self::Login(cmd) => cmd.execute(app).await,
            Self::Logout(cmd) => cmd.execute(app).await,
            Self::Whoami(cmd) => cmd.execute(app).await,
            Self::List(cmd) => cmd.execute(app).await,
            Self::Upload(cmd) => cmd.execute(app).await,
            Self::Show(cmd) => cmd.execute(app).await,
            Self::Pdf(cmd) => cmd.execute(app).await,
            Self::Speak(cmd) => cmd.execute(app).await,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// The base URL of the analysis service API.
    #[arg(long, env = "TAXDOC_URL", default_value = "http://localhost:5000/api", value_parser = Url::parse)]
    url: Url,

    /// Turn off caching of the session cookies between invocations.
    #[arg(long)]
    no_cache_session: bool,

    /// The path to the Pinentry program to use when requesting passwords.
    #[arg(long, value_hint = clap::ValueHint::ExecutablePath)]
    pinentry_program: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

fn get_session_storage<T: Send + Serialize + Sync + for<'de> Deserialize<'de> + Clone + 'static>(
    args: &Args,
) -> Box<dyn storage::Storage<T>> {
    if !args.no_cache_session {
        if let Some(file_storage) = storage::File::new("session.json") {
            return Box::new(file_storage);
        }
    }

    Box::new(storage::Memory::<T>::new())
}

async fn run(args: Args) -> Result<()> {
    let prompt: Vec<Box<dyn password::Prompt>> = vec![
        Box::new(args.pinentry_program.clone().map_or_else(
            password::PinentryPrompt::new,
            password::PinentryPrompt::new_with_executable,
        )),
        Box::new(password::RpasswordPrompt),
    ];

    let mut session_storage = get_session_storage::<session::Persisted>(&args);
    let persisted = match session_storage.get().await {
        Ok(persisted) => persisted.unwrap_or_default(),
        Err(e) => {
            warn!("We could not read the cached session, so you may have to sign in again: {e}");
            session::Persisted::default()
        }
    };

    let http = Arc::new(gateway::http::Http::new(args.url.clone(), &persisted.cookies)?);
    let session = Arc::new(session::Store::new(Arc::clone(&http)));
    let analysis = Arc::new(analysis::Orchestrator::new(
        Arc::clone(&http),
        Arc::clone(&session),
    ));
    let refresher = Arc::clone(&analysis).spawn_auto_refresh();
    let app = app::App {
        session,
        analysis,
        notices: notify::Queue::new(),
        prompt: Arc::new(prompt),
    };

    if let Err(e) = app.session.check_status().await {
        warn!("We could not determine the session status and will continue signed out: {e}");
    }

    let result = command::Command::execute(args.command, &app).await;

    app.flush_notices().await;
    if app.analysis.busy().await {
        debug!("shutting down with operations still in flight; their results will be discarded");
    }
    app.analysis.shutdown();
    if let Err(e) = refresher.await {
        debug!("the refresh task did not stop cleanly: {e}");
    }

    let updated = session::Persisted {
        cookies: http.session_cookies().await,
    };
    if let Err(e) = session_storage.update(&updated).await {
        warn!("We could not cache the session for the next invocation: {e}");
    }

    result
}

#[tokio::main]
async fn main() {
    let logger_env = env_logger::Env::new()
        .filter_or("TAXDOC_LOG", "warn")
        .write_style("TAXDOC_LOG_STYLE");
    env_logger::Builder::from_env(logger_env).init();

    if let Err(e) = run(Args::parse()).await {
        error!("We encountered an error: {}", e);
        process::exit(1);
    };
}
