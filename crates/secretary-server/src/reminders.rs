//! Background reminder loop.

use std::{sync::Arc, time::Duration};

use secretary_agenda::{Notifier, ReminderPolicy, SweepState, sweep};
use secretary_core::{clock::Clock, store::RecordStore};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{info, warn};

/// Sweep for due reminders every `period`, forever.
pub async fn run<S, N, C>(
  store: Arc<S>,
  notifier: N,
  clock: C,
  policy: ReminderPolicy,
  period: Duration,
)
where
  S: RecordStore,
  N: Notifier,
  C: Clock,
{
  info!(?policy, period_secs = period.as_secs(), "reminder loop started");

  let mut ticker = interval(period);
  ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
  let mut state = SweepState::default();

  loop {
    ticker.tick().await;
    if let Err(e) = sweep(store.as_ref(), &notifier, &policy, &mut state, clock.now()).await {
      warn!(error = %e, "reminder sweep failed");
    }
  }
}
