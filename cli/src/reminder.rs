use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Pause between the chime and the confirmation it precedes.
pub(crate) const CHIME_DELAY: Duration = Duration::from_millis(700);

pub(crate) trait Chime {
    fn play(&self) -> Result<()>;
}

/// Rings the terminal bell on stderr.
pub(crate) struct TerminalBell;

impl Chime for TerminalBell {
    fn play(&self) -> Result<()> {
        let mut err = io::stderr();
        err.write_all(b"\x07").context("Failed to ring terminal bell")?;
        err.flush().context("Failed to ring terminal bell")?;
        Ok(())
    }
}

/// Plays `chime`, waits `delay`, then runs `action`. A failed chime is logged
/// and `action` runs straight away; without a chime there is no wait.
pub(crate) async fn chime_then<T>(
    chime: Option<&dyn Chime>,
    delay: Duration,
    action: impl FnOnce() -> T,
) -> T {
    if let Some(chime) = chime {
        match chime.play() {
            Ok(()) => {
                debug!(?delay, "chime played");
                tokio::time::sleep(delay).await;
            }
            Err(e) => warn!(error = %format!("{e:#}"), "chime playback failed"),
        }
    }
    action()
}
