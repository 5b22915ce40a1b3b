// SPDX-FileCopyrightText: 2025 The Taxdoc Authors
//
// SPDX-License-Identifier: Apache-2.0

use std::{fs, path::PathBuf};

use async_trait::async_trait;
use clap::Parser;
use tokio::task;

use crate::{
    analysis::{Operation, Speech},
    app::App,
    audio,
    error::{Error, Result},
    gateway::Gateway,
    notify,
};

/// Play the spoken summary of one document's analysis.
#[derive(Debug, Parser)]
pub(crate) struct Command {
    /// The document ID, as shown by `taxdoc list`.
    #[clap()]
    id: u64,

    /// The language of the spoken summary.
    #[clap(short, long, default_value = "en")]
    lang: String,

    /// Save the audio to this file instead of playing it.
    #[clap(short, long, value_hint = clap::ValueHint::FilePath)]
    output: Option<PathBuf>,
}

#[async_trait]
impl super::Command for Command {
    async fn execute(self, app: &App<impl Gateway + 'static>) -> Result<()> {
        let result = app.analysis.play_speech(self.id, &self.lang).await;
        app.report(Operation::PlaySpeech).await;

        match result {
            Ok(Speech::Audio(bytes)) => match self.output {
                Some(path) => {
                    fs::write(&path, bytes)?;
                    let _ = app
                        .notices
                        .push(
                            format!("Audio saved to {}.", path.display()),
                            notify::Kind::Info,
                        )
                        .await;
                    Ok(())
                }
                None => {
                    task::spawn_blocking(move || audio::play(bytes)).await??;
                    Ok(())
                }
            },
            Ok(Speech::Empty) => Ok(()),
            Err(_) => Err(Error::Command),
        }
    }
}
