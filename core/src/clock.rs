use core::time::Duration;

use crate::GameStatus;

/// Highest value the elapsed-seconds display can show.
pub const MAX_ELAPSED_SECS: u16 = 999;

pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Periodic callback facility owned by the front end, for example a browser interval or a UI event loop.
///
/// Each handle returned by `start` stays live until it is passed back to `cancel`.
pub trait TickScheduler {
    type Handle;

    fn start(&mut self, period: Duration) -> Self::Handle;

    fn cancel(&mut self, handle: Self::Handle);
}

/// Elapsed-seconds counter that keeps exactly one tick subscription alive while a game is being played.
///
/// The front end forwards every scheduled callback to [`GameClock::tick`] and every status change to
/// [`GameClock::sync`]. Dropping the clock cancels any live subscription.
pub struct GameClock<S: TickScheduler> {
    scheduler: S,
    subscription: Option<S::Handle>,
    elapsed_secs: u16,
}

impl<S: TickScheduler> GameClock<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            subscription: None,
            elapsed_secs: 0,
        }
    }

    pub fn elapsed_secs(&self) -> u16 {
        self.elapsed_secs
    }

    pub fn is_running(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Starts ticking on `Playing`, stops on anything else, and zeroes the counter on `Ready`.
    pub fn sync(&mut self, status: GameStatus) {
        if status.is_ready() {
            self.elapsed_secs = 0;
        }

        if status.is_playing() {
            if self.subscription.is_none() {
                log::trace!("start game clock");
                self.subscription = Some(self.scheduler.start(TICK_PERIOD));
            }
        } else {
            self.stop();
        }
    }

    /// Advances one second, saturating at [`MAX_ELAPSED_SECS`]. Ignored while stopped.
    pub fn tick(&mut self) {
        if self.is_running() {
            self.elapsed_secs = (self.elapsed_secs + 1).min(MAX_ELAPSED_SECS);
        }
    }

    fn stop(&mut self) {
        if let Some(handle) = self.subscription.take() {
            log::trace!("stop game clock at {}s", self.elapsed_secs);
            self.scheduler.cancel(handle);
        }
    }
}

impl<S: TickScheduler> Drop for GameClock<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
