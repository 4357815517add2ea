//! Timer registry - owned countdown timers ticked once per frame
//!
//! Timers live in an arena inside [`TimerRegistry`] and are addressed by
//! [`TimerId`]. Starting a timer puts its id in the active list; every
//! [`TimerRegistry::tick`] counts the active timers down and latches a completion
//! flag on the ones that ran out. Owners consume the flag with
//! [`TimerRegistry::take_fired`] during their own update instead of receiving a
//! callback, so a completion is never lost if several ticks pass between updates.
//!
//! The registry is a plain value: each board owns one, so independent boards (and
//! tests) never share timer state.

/// Handle to a timer slot in a [`TimerRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u32);

impl TimerId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Stopped,
    Started,
}

#[derive(Debug, Clone)]
struct Timer {
    remaining_ms: u32,
    /// Remembered by `set_duration` so looping timers can rewind.
    initial_ms: u32,
    state: TimerState,
    looping: bool,
    /// Completion latch, cleared by `take_fired` or a restart.
    fired: bool,
}

impl Timer {
    fn new(looping: bool) -> Self {
        Self {
            remaining_ms: 0,
            initial_ms: 0,
            state: TimerState::Stopped,
            looping,
            fired: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TimerRegistry {
    timers: Vec<Timer>,
    /// Ids of started timers, in start order.
    active: Vec<TimerId>,
    /// Released slots available for reuse.
    free: Vec<TimerId>,
    fired_last_tick: usize,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a stopped timer with zero duration.
    pub fn create(&mut self, looping: bool) -> TimerId {
        if let Some(id) = self.free.pop() {
            self.timers[id.index()] = Timer::new(looping);
            return id;
        }
        let id = TimerId(self.timers.len() as u32);
        self.timers.push(Timer::new(looping));
        id
    }

    /// Stop a timer and hand its slot back for reuse.
    ///
    /// The id must not be used afterwards.
    pub fn release(&mut self, id: TimerId) {
        self.stop(id);
        self.timers[id.index()].fired = false;
        debug_assert!(!self.free.contains(&id), "timer {:?} released twice", id);
        self.free.push(id);
    }

    /// Set both the working countdown and the duration a looping timer rewinds to.
    pub fn set_duration(&mut self, id: TimerId, duration_ms: u32) {
        let timer = &mut self.timers[id.index()];
        timer.remaining_ms = duration_ms;
        timer.initial_ms = duration_ms;
    }

    /// Start counting down. No-op if the timer is already started.
    pub fn start(&mut self, id: TimerId) {
        let timer = &mut self.timers[id.index()];
        if timer.state == TimerState::Started {
            return;
        }
        timer.state = TimerState::Started;
        timer.fired = false;
        self.active.push(id);
    }

    /// Remove the timer from the active set regardless of looping.
    pub fn stop(&mut self, id: TimerId) {
        self.timers[id.index()].state = TimerState::Stopped;
        if let Some(pos) = self.active.iter().position(|a| *a == id) {
            self.active.remove(pos);
        }
    }

    /// Advance every active timer by `elapsed_ms`.
    ///
    /// A timer that reaches zero latches its completion flag; a looping timer
    /// rewinds to its initial duration and stays active, any other timer stops.
    /// Returns the number of timers that fired.
    pub fn tick(&mut self, elapsed_ms: u32) -> usize {
        let mut fired = 0;

        // Backward by index: completions remove entries as we go.
        for i in (0..self.active.len()).rev() {
            let id = self.active[i];
            let timer = &mut self.timers[id.index()];
            timer.remaining_ms = timer.remaining_ms.saturating_sub(elapsed_ms);
            if timer.remaining_ms > 0 {
                continue;
            }

            timer.fired = true;
            fired += 1;
            if timer.looping {
                timer.remaining_ms = timer.initial_ms;
            } else {
                timer.state = TimerState::Stopped;
                self.active.remove(i);
            }
        }

        self.fired_last_tick = fired;
        fired
    }

    /// True if the timer completed and the completion has not been taken yet.
    pub fn fired(&self, id: TimerId) -> bool {
        self.timers[id.index()].fired
    }

    /// Consume a pending completion. Returns whether there was one.
    pub fn take_fired(&mut self, id: TimerId) -> bool {
        std::mem::take(&mut self.timers[id.index()].fired)
    }

    pub fn state(&self, id: TimerId) -> TimerState {
        self.timers[id.index()].state
    }

    pub fn is_started(&self, id: TimerId) -> bool {
        self.state(id) == TimerState::Started
    }

    pub fn remaining_ms(&self, id: TimerId) -> u32 {
        self.timers[id.index()].remaining_ms
    }

    /// Number of timers currently counting down.
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Number of live (not released) timers.
    pub fn len(&self) -> usize {
        self.timers.len() - self.free.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn fired_last_tick(&self) -> usize {
        self.fired_last_tick
    }
}
