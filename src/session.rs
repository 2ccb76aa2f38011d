//! A calculator session: one engine, driven key by key.

use flume::Receiver;
use tracing::{debug, trace};

use crate::calculator::{
    BasicEngine, CalcError, ChannelDisplay, Key, KeyOutcome, ScientificEngine, parse_key_sequence,
};
use crate::config::{Config, Keypad};
use crate::transcript::TranscriptEntry;

enum SessionEngine {
    Basic(BasicEngine<ChannelDisplay>),
    Scientific(ScientificEngine<ChannelDisplay>),
}

/// Owns one engine and records what each key press did.
pub struct Session {
    engine: SessionEngine,
    updates: Receiver<String>,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        let (sink, updates) = ChannelDisplay::unbounded();
        let basic = BasicEngine::with_display(sink).with_max_input_len(config.max_input_len);
        let engine = match config.keypad {
            Keypad::Basic => SessionEngine::Basic(basic),
            Keypad::Scientific => SessionEngine::Scientific(
                ScientificEngine::from_basic(basic).with_angle_mode(config.angle_mode),
            ),
        };
        debug!("Started {:?} session", config.keypad);

        Self { engine, updates }
    }

    pub fn display(&self) -> &str {
        match &self.engine {
            SessionEngine::Basic(engine) => engine.display(),
            SessionEngine::Scientific(engine) => engine.display(),
        }
    }

    /// Press one key.
    pub fn press(&mut self, key: &Key) -> TranscriptEntry {
        let outcome = match &mut self.engine {
            SessionEngine::Basic(engine) => engine.press(key),
            SessionEngine::Scientific(engine) => engine.press(key),
        };
        if let KeyOutcome::Unsupported(label) = &outcome {
            debug!("Key {:?} is not supported on this keypad", label);
        }
        for update in self.updates.try_iter() {
            trace!("Display updated: {}", update);
        }

        TranscriptEntry::new(key, &outcome, self.display())
    }

    /// Parse and run a key script. Nothing is pressed if the script has an
    /// unknown token.
    pub fn run_script(&mut self, script: &str) -> Result<Vec<TranscriptEntry>, CalcError> {
        let keys = parse_key_sequence(script)?;
        Ok(keys.iter().map(|key| self.press(key)).collect())
    }
}
