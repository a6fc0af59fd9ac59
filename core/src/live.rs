//! The 1 Hz live-game driver.
//!
//! Wires a session, its store, and a scheduler together. Every mutating
//! operation persists a snapshot before returning, and the driver owns at
//! most one timer registration at a time.

use crate::{
    error::GameResult,
    event::GameEvent,
    scheduler::{CancelToken, Scheduler},
    session::{FinalGameStats, GameSession},
    snapshot,
    store::{history::GameRecord, GameStore},
    types::PlayerId,
};
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

struct LiveInner {
    session: GameSession,
    store: GameStore,
    ticker: Option<CancelToken>,
}

impl LiveInner {
    fn cancel_ticker(&mut self) {
        if let Some(token) = self.ticker.take() {
            token.cancel();
        }
    }

    fn persist(&self, now: DateTime<Utc>) {
        snapshot::save(&self.store, &self.session, now);
    }
}

pub struct LiveGame {
    inner: Arc<Mutex<LiveInner>>,
    scheduler: Arc<dyn Scheduler + Send + Sync>,
}

impl LiveGame {
    /// Wrap a freshly created session. Nothing is persisted until the
    /// game starts.
    pub fn new(
        store: GameStore,
        session: GameSession,
        scheduler: Arc<dyn Scheduler + Send + Sync>,
    ) -> Self {
        Self {
            inner: Arc::new(Mutex::new(LiveInner {
                session,
                store,
                ticker: None,
            })),
            scheduler,
        }
    }

    /// Resume the persisted in-progress game, if there is a valid one.
    /// The wall-clock gap is replayed, the regulation boundary re-applied,
    /// and the ticker re-registered when the game comes back running.
    pub fn resume(
        store: GameStore,
        scheduler: Arc<dyn Scheduler + Send + Sync>,
        now: DateTime<Utc>,
    ) -> GameResult<Option<Self>> {
        let Some(session) = snapshot::resume(&store, now)? else {
            return Ok(None);
        };
        let running = session.is_running();
        let live = Self::new(store, session, scheduler);
        {
            let inner = live.inner.lock().expect("live game poisoned");
            inner.persist(now);
        }
        if running {
            live.register_ticker();
        }
        Ok(Some(live))
    }

    /// A copy of the current session state, for display and tests.
    pub fn session(&self) -> GameSession {
        self.inner.lock().expect("live game poisoned").session.clone()
    }

    /// Start the game. Any previous pending snapshot is cleared first —
    /// only one in-progress game exists system-wide.
    pub fn start(&self, now: DateTime<Utc>) -> GameResult<GameEvent> {
        let event = {
            let mut inner = self.inner.lock().expect("live game poisoned");
            if let Err(e) = snapshot::clear(&inner.store) {
                log::warn!("failed to clear previous in-progress game: {e}");
            }
            let event = inner.session.start(now)?;
            inner.persist(now);
            event
        };
        self.register_ticker();
        Ok(event)
    }

    /// Pause or resume the clock, managing the ticker registration.
    pub fn toggle_running(&self, now: DateTime<Utc>) -> GameResult<GameEvent> {
        let (event, running) = {
            let mut inner = self.inner.lock().expect("live game poisoned");
            let event = inner.session.toggle_running()?;
            if !inner.session.is_running() {
                inner.cancel_ticker();
            }
            inner.persist(now);
            (event, inner.session.is_running())
        };
        if running {
            self.register_ticker();
        }
        Ok(event)
    }

    /// Toggle a player's on-field status.
    pub fn set_playing(&self, id: PlayerId, playing: bool, now: DateTime<Utc>) -> GameResult<GameEvent> {
        let mut inner = self.inner.lock().expect("live game poisoned");
        let event = inner.session.set_playing(id, playing)?;
        inner.persist(now);
        Ok(event)
    }

    /// Abandon the game: back to Setup, snapshot cleared.
    pub fn reset(&self) -> GameResult<GameEvent> {
        let mut inner = self.inner.lock().expect("live game poisoned");
        let event = inner.session.reset()?;
        inner.cancel_ticker();
        snapshot::clear(&inner.store)?;
        Ok(event)
    }

    /// End the game after explicit confirmation. Freezes state, records
    /// the result in the history store, and clears the snapshot.
    pub fn end(&self, now: DateTime<Utc>) -> GameResult<FinalGameStats> {
        let mut inner = self.inner.lock().expect("live game poisoned");
        inner.cancel_ticker();
        let (stats, _event) = inner.session.end()?;
        let record = GameRecord::from_session(&inner.session, &stats, now);
        inner.store.insert_game(&record)?;
        snapshot::clear(&inner.store)?;
        Ok(stats)
    }

    /// Register the single repeating tick. The callback carries its own
    /// token so the regulation auto-pause can cancel the registration
    /// from inside the tick.
    fn register_ticker(&self) {
        let mut inner = self.inner.lock().expect("live game poisoned");
        if inner
            .ticker
            .as_ref()
            .is_some_and(|t| !t.is_cancelled())
        {
            return;
        }
        let shared = Arc::clone(&self.inner);
        let token = self.scheduler.schedule_repeating(
            TICK_INTERVAL,
            Box::new(move || {
                let mut inner = shared.lock().expect("live game poisoned");
                if !inner.session.is_running() {
                    inner.cancel_ticker();
                    return;
                }
                match inner.session.tick() {
                    Ok(events) => {
                        inner.persist(Utc::now());
                        if events
                            .iter()
                            .any(|e| matches!(e, GameEvent::AutoPaused { .. }))
                        {
                            inner.cancel_ticker();
                        }
                    }
                    Err(e) => {
                        log::warn!("tick rejected: {e}");
                        inner.cancel_ticker();
                    }
                }
            }),
        );
        inner.ticker = Some(token);
    }
}
