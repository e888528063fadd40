//! # Countdown
//!
//! Paces each shot with a visible N, N-1, ..., 1, "Smile!" sequence.

use std::fmt;
use std::time::Duration;

use tracing::debug;

use crate::config::CountdownConfig;

/// What the countdown overlay shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Count(u32),
    Smile,
    Hidden,
}

impl fmt::Display for CountdownState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountdownState::Count(n) => write!(f, "{}", n),
            CountdownState::Smile => f.write_str("Smile!"),
            CountdownState::Hidden => Ok(()),
        }
    }
}

/// Timed state sequence run once per shot
#[derive(Debug, Clone)]
pub struct CountdownController {
    seconds: u32,
    tick: Duration,
    smile_hold: Duration,
}

impl CountdownController {
    pub fn new(seconds: u32, tick: Duration, smile_hold: Duration) -> Self {
        Self { seconds, tick, smile_hold }
    }

    pub fn from_config(config: &CountdownConfig) -> Self {
        Self::new(
            config.seconds,
            Duration::from_millis(config.tick_ms),
            Duration::from_millis(config.smile_hold_ms),
        )
    }

    /// Every state in display order
    pub fn sequence(&self) -> Vec<CountdownState> {
        (1..=self.seconds)
            .rev()
            .map(CountdownState::Count)
            .chain([CountdownState::Smile, CountdownState::Hidden])
            .collect()
    }

    /// Wall time from the first number to the hidden state
    pub fn total_duration(&self) -> Duration {
        self.tick * self.seconds + self.smile_hold
    }

    /// Drive the overlay through the sequence, returning once it is hidden
    pub async fn run<F>(&self, mut display: F)
    where
        F: FnMut(CountdownState) + Send,
    {
        let mut remaining = self.seconds;
        if remaining > 0 {
            display(CountdownState::Count(remaining));
        }

        while remaining > 0 {
            tokio::time::sleep(self.tick).await;
            remaining -= 1;
            if remaining > 0 {
                display(CountdownState::Count(remaining));
            }
        }

        display(CountdownState::Smile);
        tokio::time::sleep(self.smile_hold).await;
        display(CountdownState::Hidden);
        debug!("Countdown of {}s finished", self.seconds);
    }
}

impl Default for CountdownController {
    fn default() -> Self {
        Self::from_config(&CountdownConfig::default())
    }
}
