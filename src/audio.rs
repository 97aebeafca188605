/// Plays the simulation's sound cues.
///
/// A terminal has one instrument, the bell.  Explosions and the end of a game
/// ring it; every cue is also traced so the log shows what would have played.

use std::io::Write;

use crossterm::{style::Print, QueueableCommand};
use invaders::entities::SoundCue;
use tracing::trace;

pub struct TerminalAudio {
    muted: bool,
}

impl TerminalAudio {
    pub fn new(muted: bool) -> Self {
        Self { muted }
    }

    /// Queue the cues of one frame.  At most one bell per frame.
    pub fn play<W: Write>(&self, out: &mut W, cues: &[SoundCue]) -> std::io::Result<()> {
        let mut ring = false;
        for cue in cues {
            trace!(?cue, "sound");
            ring |= matches!(
                cue,
                SoundCue::AlienExplosion | SoundCue::ShipExplosion | SoundCue::EndGame
            );
        }
        if ring && !self.muted {
            out.queue(Print('\u{7}'))?;
        }
        Ok(())
    }
}
