use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, MouseEvent};
use futures::StreamExt;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc;

/// Uniform jitter applied to each tick, in milliseconds either way. Keeps
/// multiple instances polling the same host out of phase.
pub const JITTER_MS: i64 = 100;

#[derive(Clone, Debug)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Tick,
    Resize,
}

/// Computes the delay before each refresh signal. Owns its RNG so tests can
/// seed it and observe a deterministic schedule.
pub struct TickScheduler {
    base: Duration,
    rng: StdRng,
}

impl TickScheduler {
    pub fn new(base: Duration) -> Self {
        Self {
            base,
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(base: Duration, seed: u64) -> Self {
        Self {
            base,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Base interval plus a uniform offset in [-JITTER_MS, +JITTER_MS].
    pub fn next_delay(&mut self) -> Duration {
        let offset = self.rng.random_range(-JITTER_MS..=JITTER_MS);
        let millis = (self.base.as_millis() as i64 + offset).max(0);
        Duration::from_millis(millis as u64)
    }
}

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _task: tokio::task::JoinHandle<()>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration, seed: Option<u64>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel::<Event>();
        let mut scheduler = match seed {
            Some(seed) => TickScheduler::seeded(tick_rate, seed),
            None => TickScheduler::new(tick_rate),
        };

        let task = tokio::spawn(async move {
            let mut reader = event::EventStream::new();

            // A new deadline is drawn after every tick, regardless of how
            // the previous fetch went; input events never reset it.
            'outer: loop {
                let delay = tokio::time::sleep(scheduler.next_delay());
                tokio::pin!(delay);

                loop {
                    tokio::select! {
                        maybe_event = reader.next() => {
                            match maybe_event {
                                Some(Ok(evt)) => {
                                    let mapped = match evt {
                                        CrosstermEvent::Key(key) => Some(Event::Key(key)),
                                        CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
                                        CrosstermEvent::Resize(_, _) => Some(Event::Resize),
                                        _ => None,
                                    };
                                    if let Some(e) = mapped
                                        && tx.send(e).is_err()
                                    {
                                        break 'outer;
                                    }
                                }
                                Some(Err(_)) => break 'outer,
                                None => break 'outer,
                            }
                        }
                        _ = &mut delay => {
                            if tx.send(Event::Tick).is_err() {
                                break 'outer;
                            }
                            break;
                        }
                    }
                }
            }
        });

        Self { rx, _task: task }
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}
