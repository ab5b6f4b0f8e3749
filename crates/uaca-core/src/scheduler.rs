// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — CRR Tick Scheduler
// ─────────────────────────────────────────────────────────────────────
//! Wall-clock driver for a `SimulationContext`.
//!
//! Two independent timers run while the scheduler is `Running`:
//! - the tick timer calls `SimulationContext::tick()` every period;
//! - the step timer advances a display-only execution-step index
//!   `EXECUTION_FLOW.len()` times per period.
//!
//! While paused, `advance_one()` runs one tick and walks the step index
//! once through the flow over one period.
//!
//! The context sits behind one `parking_lot::Mutex`, so ticks, mutations
//! and future projections never interleave. `pause()` joins both timer
//! threads before returning: no tick is in flight afterwards.
//!
//! Do not call `pause()` (or drop the scheduler) while holding the guard
//! passed to `with_context_mut`; the tick thread may be waiting on it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use serde::{Deserialize, Serialize};

use uaca_types::{AxisOverride, LayerRecord, Phase, TemporalSnapshot, UacaError, UacaResult};

use crate::engine::SimulationContext;
use crate::params::{execution_step, ExecutionStep, EXECUTION_FLOW};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Running,
    Paused,
}

struct TimerShared {
    stopped: Mutex<bool>,
    wake: Condvar,
}

/// Fixed-period callback on a dedicated thread, optionally limited to a
/// number of runs.
struct Timer {
    shared: Arc<TimerShared>,
    handle: Option<JoinHandle<()>>,
}

impl Timer {
    fn spawn<F>(
        name: &str,
        period: Duration,
        runs: Option<usize>,
        mut callback: F,
    ) -> UacaResult<Self>
    where
        F: FnMut() + Send + 'static,
    {
        let first = Instant::now()
            .checked_add(period)
            .ok_or_else(|| UacaError::Scheduler(format!("{name}: period {period:?} overflows")))?;
        let shared = Arc::new(TimerShared {
            stopped: Mutex::new(false),
            wake: Condvar::new(),
        });
        let worker = Arc::clone(&shared);

        let handle = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                let mut deadline = first;
                let mut remaining = runs;
                loop {
                    if remaining == Some(0) {
                        return;
                    }
                    {
                        let mut stopped = worker.stopped.lock();
                        while !*stopped {
                            if worker.wake.wait_until(&mut stopped, deadline).timed_out() {
                                break;
                            }
                        }
                        if *stopped {
                            return;
                        }
                    }
                    callback();
                    remaining = remaining.map(|n| n - 1);
                    // Skip missed periods instead of bursting to catch up.
                    deadline = match deadline.checked_add(period) {
                        Some(next) => next.max(Instant::now()),
                        None => {
                            log::error!("timer deadline overflowed, stopping");
                            return;
                        }
                    };
                }
            })
            .map_err(|e| UacaError::Scheduler(format!("failed to spawn {name}: {e}")))?;

        Ok(Self {
            shared,
            handle: Some(handle),
        })
    }

    /// Signal the thread and wait for it to exit.
    fn stop(&mut self) {
        *self.shared.stopped.lock() = true;
        self.shared.wake.notify_all();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("scheduler timer thread panicked");
            }
        }
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.stop();
    }
}

struct Timers {
    tick: Timer,
    step: Timer,
}

/// UI selection state. Not simulation data.
#[derive(Debug, Default)]
struct Selection {
    layer: Option<u8>,
    step: Option<usize>,
}

/// Runs a `SimulationContext` on a fixed tick period.
///
/// Starts paused; call `resume()` to start the timers.
pub struct Scheduler {
    context: Arc<Mutex<SimulationContext>>,
    active_step: Arc<AtomicUsize>,
    period: Duration,
    timers: Mutex<Option<Timers>>,
    /// One-shot step walk started by `advance_one`.
    walk: Mutex<Option<Timer>>,
    selection: Mutex<Selection>,
}

impl Scheduler {
    pub fn new(context: SimulationContext) -> Self {
        let period = context.config().tick_period();
        Self {
            context: Arc::new(Mutex::new(context)),
            active_step: Arc::new(AtomicUsize::new(0)),
            period,
            timers: Mutex::new(None),
            walk: Mutex::new(None),
            selection: Mutex::new(Selection::default()),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────

    /// Start both timers. No-op if already running.
    pub fn resume(&self) -> UacaResult<()> {
        let mut timers = self.timers.lock();
        if timers.is_some() {
            return Ok(());
        }

        self.stop_walk();

        let context = Arc::clone(&self.context);
        let tick = Timer::spawn("uaca-tick", self.period, None, move || context.lock().tick())?;

        let active_step = Arc::clone(&self.active_step);
        // On failure `tick` drops here, which stops it.
        let step = Timer::spawn("uaca-step", self.step_period(), None, move || {
            active_step.fetch_add(1, Ordering::SeqCst);
        })?;

        *timers = Some(Timers { tick, step });
        log::info!("simulation resumed (period {:?})", self.period);
        Ok(())
    }

    /// Stop both timers and wait for any in-flight tick to finish.
    pub fn pause(&self) {
        self.stop_walk();
        let mut timers = self.timers.lock();
        if let Some(mut running) = timers.take() {
            running.tick.stop();
            running.step.stop();
            log::info!("simulation paused");
        }
    }

    pub fn status(&self) -> RunStatus {
        if self.timers.lock().is_some() {
            RunStatus::Running
        } else {
            RunStatus::Paused
        }
    }

    /// Run exactly one tick and restart the step walk from the first
    /// step. Only honoured while paused.
    pub fn advance_one(&self) -> bool {
        let timers = self.timers.lock();
        if timers.is_some() {
            return false;
        }
        self.context.lock().tick();

        let mut walk = self.walk.lock();
        if let Some(mut previous) = walk.take() {
            previous.stop();
        }
        self.active_step.store(0, Ordering::SeqCst);
        let active_step = Arc::clone(&self.active_step);
        let remaining = EXECUTION_FLOW.len() - 1;
        match Timer::spawn("uaca-walk", self.step_period(), Some(remaining), move || {
            active_step.fetch_add(1, Ordering::SeqCst);
        }) {
            Ok(timer) => *walk = Some(timer),
            Err(e) => log::warn!("step walk not started: {e}"),
        }
        true
    }

    fn step_period(&self) -> Duration {
        self.period / EXECUTION_FLOW.len() as u32
    }

    fn stop_walk(&self) {
        if let Some(mut walk) = self.walk.lock().take() {
            walk.stop();
        }
    }

    // ── Context access ────────────────────────────────────────────

    pub fn with_context<R>(&self, f: impl FnOnce(&SimulationContext) -> R) -> R {
        f(&self.context.lock())
    }

    pub fn with_context_mut<R>(&self, f: impl FnOnce(&mut SimulationContext) -> R) -> R {
        f(&mut self.context.lock())
    }

    pub fn tick_count(&self) -> u64 {
        self.context.lock().tick_count()
    }

    /// Consistent copy of the live layer table.
    pub fn layers(&self) -> Vec<LayerRecord> {
        self.context.lock().layers().to_vec()
    }

    pub fn force_crisis(&self, layer_id: u8) -> bool {
        self.context.lock().force_crisis(layer_id)
    }

    pub fn induce_coherence(&self) {
        self.context.lock().induce_coherence();
    }

    pub fn force_state(&self, layer_id: u8, axes: AxisOverride, phase: Option<Phase>) -> bool {
        self.context.lock().force_state(layer_id, axes, phase)
    }

    pub fn query_temporal(&self, offset: i64) -> Option<TemporalSnapshot> {
        self.context.lock().query_temporal(offset).cloned()
    }

    pub fn set_persona(&self, name: &str) -> bool {
        self.context.lock().set_persona(name)
    }

    // ── Display state ─────────────────────────────────────────────

    /// Zero-based index into `EXECUTION_FLOW` of the highlighted step.
    pub fn active_step(&self) -> usize {
        self.active_step.load(Ordering::SeqCst) % EXECUTION_FLOW.len()
    }

    pub fn select_layer(&self, layer_id: Option<u8>) {
        self.selection.lock().layer = layer_id;
    }

    pub fn selected_layer(&self) -> Option<LayerRecord> {
        let id = self.selection.lock().layer?;
        self.context.lock().layer(id).cloned()
    }

    /// Select an execution step by id. Only honoured while paused.
    pub fn select_execution_step(&self, step_id: Option<usize>) -> bool {
        if self.status() == RunStatus::Running {
            return false;
        }
        self.selection.lock().step = step_id;
        true
    }

    pub fn selected_execution_step(&self) -> Option<ExecutionStep> {
        self.selection.lock().step.and_then(execution_step)
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.pause();
    }
}

#[cfg(test)]
mod tests {
    use uaca_types::EngineConfig;

    use super::*;

    fn scheduler(period_ms: u64) -> Scheduler {
        let config = EngineConfig {
            tick_period_ms: period_ms,
            seed: Some(1),
            ..Default::default()
        };
        Scheduler::new(SimulationContext::new(config).unwrap())
    }

    #[test]
    fn test_starts_paused() {
        let s = scheduler(900);
        assert_eq!(s.status(), RunStatus::Paused);
        assert_eq!(s.tick_count(), 0);
        assert_eq!(s.active_step(), 0);
    }

    #[test]
    fn test_advance_one_while_paused() {
        let s = scheduler(900);
        assert!(s.advance_one());
        assert!(s.advance_one());
        assert_eq!(s.tick_count(), 2);
        assert_eq!(s.with_context(|ctx| ctx.past_snapshots().len()), 1);
    }

    #[test]
    fn test_advance_one_walks_execution_steps() {
        let s = scheduler(110);
        assert!(s.advance_one());
        let last = EXECUTION_FLOW.len() - 1;
        let deadline = Instant::now() + Duration::from_secs(5);
        while s.active_step() != last && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(s.active_step(), last);

        // The walk stops on the last step instead of wrapping.
        thread::sleep(Duration::from_millis(50));
        assert_eq!(s.active_step(), last);
        assert_eq!(s.tick_count(), 1);
    }

    #[test]
    fn test_advance_one_restarts_walk_at_first_step() {
        let s = scheduler(60_000);
        assert!(s.advance_one());
        assert_eq!(s.active_step(), 0);
        assert!(s.advance_one());
        assert_eq!(s.active_step(), 0);
        s.pause();
        assert_eq!(s.tick_count(), 2);
    }

    #[test]
    fn test_timer_rejects_overflowing_period() {
        let result = Timer::spawn("uaca-test", Duration::MAX, None, || {});
        assert!(matches!(result, Err(UacaError::Scheduler(_))));
    }

    #[test]
    fn test_advance_one_refused_while_running() {
        let s = scheduler(10_000);
        s.resume().unwrap();
        assert!(!s.advance_one());
        s.pause();
        assert!(s.advance_one());
    }

    #[test]
    fn test_resume_idempotent_and_pause_stops() {
        let s = scheduler(900);
        s.resume().unwrap();
        s.resume().unwrap();
        assert_eq!(s.status(), RunStatus::Running);
        s.pause();
        s.pause();
        assert_eq!(s.status(), RunStatus::Paused);
    }

    #[test]
    fn test_timer_drives_ticks() {
        let s = scheduler(10);
        s.resume().unwrap();
        let deadline = Instant::now() + Duration::from_secs(5);
        while s.tick_count() < 3 && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        s.pause();
        let ticks = s.tick_count();
        assert!(ticks >= 3, "expected at least 3 ticks, got {ticks}");

        // Nothing runs after pause returns.
        thread::sleep(Duration::from_millis(50));
        assert_eq!(s.tick_count(), ticks);
        assert!(s.active_step() < EXECUTION_FLOW.len());
    }

    #[test]
    fn test_pause_is_prompt_for_long_period() {
        let s = scheduler(60_000);
        s.resume().unwrap();
        let start = Instant::now();
        s.pause();
        assert!(start.elapsed() < Duration::from_secs(5));
        assert_eq!(s.tick_count(), 0);
    }

    #[test]
    fn test_mutations_through_scheduler() {
        let s = scheduler(900);
        assert!(s.force_crisis(3));
        assert!(!s.force_crisis(10));
        s.induce_coherence();
        assert!(s.layers().iter().all(|l| l.phase == Phase::Apollonian));
        let axes = AxisOverride {
            information: Some(150.0),
            ..Default::default()
        };
        assert!(s.force_state(5, axes, None));
        assert_eq!(s.with_context(|ctx| ctx.layer(5).unwrap().state.information), 100.0);
        assert!(s.set_persona("Scientist"));

        for _ in 0..3 {
            s.advance_one();
        }
        assert_eq!(s.query_temporal(-1).map(|t| t.tick), Some(2));
        assert_eq!(s.query_temporal(2).map(|t| t.tick), Some(5));
        assert!(s.query_temporal(0).is_none());
    }

    #[test]
    fn test_layer_selection() {
        let s = scheduler(900);
        assert!(s.selected_layer().is_none());
        s.select_layer(Some(4));
        assert_eq!(s.selected_layer().map(|l| l.id), Some(4));
        s.select_layer(Some(77));
        assert!(s.selected_layer().is_none());
    }

    #[test]
    fn test_step_selection_only_while_paused() {
        let s = scheduler(10_000);
        assert!(s.select_execution_step(Some(9)));
        assert_eq!(s.selected_execution_step().map(|st| st.name), Some("C_E Governance check"));

        s.resume().unwrap();
        assert!(!s.select_execution_step(Some(1)));
        assert_eq!(s.selected_execution_step().map(|st| st.id), Some(9));
        s.pause();

        assert!(s.select_execution_step(None));
        assert!(s.selected_execution_step().is_none());
    }
}
