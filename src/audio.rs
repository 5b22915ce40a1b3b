// SPDX-FileCopyrightText: 2025 The Taxdoc Authors
//
// SPDX-License-Identifier: Apache-2.0

use std::io::Cursor;

use rodio::{Decoder, OutputStream, Sink};

use crate::error::Result;

/// Plays one audio payload on the default output device and blocks until
/// it finishes. Call from a blocking-capable context.
pub(crate) fn play(bytes: Vec<u8>) -> Result<()> {
    let (_stream, handle) = OutputStream::try_default().map_err(crate::error::Audio::from)?;
    let sink = Sink::try_new(&handle).map_err(crate::error::Audio::from)?;
    let source = Decoder::new(Cursor::new(bytes)).map_err(crate::error::Audio::from)?;

    sink.append(source);
    sink.sleep_until_end();
    Ok(())
}
