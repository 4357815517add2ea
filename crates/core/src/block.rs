//! Block module - one grid cell and its removal sequence
//!
//! A block never changes color. Once matched it walks through
//! `Idle -> Blinking -> Disappearing -> Removed`:
//!
//! - **Blinking** starts the block's own timer and flickers (visible every other frame).
//! - **Disappearing** is entered on the update that observes the timer firing; opacity
//!   is reset to full and drops by a fixed step on every update, that one included.
//! - **Removed** once opacity hits zero. Never drawn again.
//!
//! The blink is timed, the fade is counted in frames.

use crate::timer::{TimerId, TimerRegistry};
use crate::types::{BlockColor, LifecycleState, Point, Tint, ALPHA_MAX};

#[derive(Debug, Clone)]
pub struct Block {
    color: BlockColor,
    state: LifecycleState,
    /// Guards the matched pipeline against re-entry.
    matched: bool,
    alpha: u8,
    visible: bool,
    timer: TimerId,
    /// Screen-space top-left as of the last update.
    point: Point,
}

impl Block {
    /// Create an idle block with a stopped blink timer of `blink_ms`.
    pub fn new(color: BlockColor, timers: &mut TimerRegistry, blink_ms: u32) -> Self {
        let timer = timers.create(false);
        timers.set_duration(timer, blink_ms);
        Self {
            color,
            state: LifecycleState::Idle,
            matched: false,
            alpha: ALPHA_MAX,
            visible: false,
            timer,
            point: Point::default(),
        }
    }

    pub fn color(&self) -> BlockColor {
        self.color
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_matched(&self) -> bool {
        self.matched
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    pub fn timer(&self) -> TimerId {
        self.timer
    }

    pub fn point(&self) -> Point {
        self.point
    }

    /// Whether a renderer should draw this block this frame.
    pub fn is_drawn(&self) -> bool {
        self.visible && !self.color.is_empty() && self.state != LifecycleState::Removed
    }

    pub fn tint(&self) -> Tint {
        Tint::white(self.alpha)
    }

    /// Enter the blink phase. Returns false (and does nothing) if the block was
    /// already matched.
    pub fn on_matched(&mut self, timers: &mut TimerRegistry) -> bool {
        if self.matched {
            return false;
        }
        self.matched = true;
        self.state = LifecycleState::Blinking;
        timers.start(self.timer);
        true
    }

    /// Per-frame step: store the new screen position and advance the lifecycle.
    pub fn update(&mut self, timers: &mut TimerRegistry, point: Point, fade_step: u8) {
        self.point = point;

        match self.state {
            LifecycleState::Idle => {
                self.visible = true;
            }
            LifecycleState::Blinking => {
                if timers.take_fired(self.timer) {
                    self.enter_disappearing(timers);
                    // The frame that ends the blink already fades.
                    self.fade(fade_step);
                } else {
                    self.visible = !self.visible;
                }
            }
            LifecycleState::Disappearing => self.fade(fade_step),
            LifecycleState::Removed => {
                self.visible = false;
            }
        }
    }

    /// Give the timer slot back; used when the board discards this block's row.
    pub fn release(self, timers: &mut TimerRegistry) {
        timers.release(self.timer);
    }

    fn enter_disappearing(&mut self, timers: &mut TimerRegistry) {
        self.state = LifecycleState::Disappearing;
        self.alpha = ALPHA_MAX;
        timers.stop(self.timer);
        log::debug!(
            "{} block (timer {}) disappearing",
            self.color.as_str(),
            self.timer.index()
        );
    }

    fn fade(&mut self, fade_step: u8) {
        self.alpha = self.alpha.saturating_sub(fade_step);
        if self.alpha == 0 {
            self.state = LifecycleState::Removed;
            self.visible = false;
            log::debug!(
                "{} block (timer {}) removed",
                self.color.as_str(),
                self.timer.index()
            );
        } else {
            self.visible = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BLINK_MS, FADE_STEP, TICK_MS};

    fn block(color: BlockColor) -> (Block, TimerRegistry) {
        let mut timers = TimerRegistry::new();
        let block = Block::new(color, &mut timers, BLINK_MS);
        (block, timers)
    }

    /// One frame the way the board drives it: timers first, then the block.
    fn frame(block: &mut Block, timers: &mut TimerRegistry) {
        timers.tick(TICK_MS);
        block.update(timers, Point::default(), FADE_STEP);
    }

    /// Run frames until the blink timer fires.
    fn blink_out(block: &mut Block, timers: &mut TimerRegistry) -> u32 {
        let mut frames = 0;
        while block.state() == LifecycleState::Blinking {
            frame(block, timers);
            frames += 1;
            assert!(frames < 1_000, "blink never ended");
        }
        frames
    }

    #[test]
    fn new_block_is_idle_with_stopped_timer() {
        let (block, timers) = block(BlockColor::Red);
        assert_eq!(block.state(), LifecycleState::Idle);
        assert!(!block.is_matched());
        assert_eq!(block.alpha(), ALPHA_MAX);
        assert!(!timers.is_started(block.timer()));
        assert_eq!(timers.remaining_ms(block.timer()), BLINK_MS);
    }

    #[test]
    fn idle_block_is_drawn_at_full_opacity() {
        let (mut block, mut timers) = block(BlockColor::Green);
        frame(&mut block, &mut timers);
        assert!(block.is_drawn());
        assert_eq!(block.tint(), Tint::WHITE);
    }

    #[test]
    fn empty_block_is_never_drawn() {
        let (mut block, mut timers) = block(BlockColor::Empty);
        frame(&mut block, &mut timers);
        assert!(!block.is_drawn());
    }

    #[test]
    fn matching_starts_timer_and_blinks() {
        let (mut block, mut timers) = block(BlockColor::Blue);
        frame(&mut block, &mut timers);
        assert!(block.on_matched(&mut timers));
        assert_eq!(block.state(), LifecycleState::Blinking);
        assert!(timers.is_started(block.timer()));

        let mut seen = Vec::new();
        for _ in 0..4 {
            frame(&mut block, &mut timers);
            seen.push(block.is_drawn());
        }
        assert_eq!(seen, vec![false, true, false, true]);
    }

    #[test]
    fn on_matched_is_idempotent() {
        let (mut block, mut timers) = block(BlockColor::Red);
        assert!(block.on_matched(&mut timers));
        frame(&mut block, &mut timers);
        let remaining = timers.remaining_ms(block.timer());

        assert!(!block.on_matched(&mut timers));
        assert_eq!(timers.remaining_ms(block.timer()), remaining);
        assert_eq!(block.state(), LifecycleState::Blinking);
    }

    #[test]
    fn rematch_does_not_reset_fade_or_restart_timer() {
        let (mut block, mut timers) = block(BlockColor::Red);
        block.on_matched(&mut timers);
        blink_out(&mut block, &mut timers);
        frame(&mut block, &mut timers);
        let alpha = block.alpha();
        assert!(alpha < ALPHA_MAX);

        assert!(!block.on_matched(&mut timers));
        assert_eq!(block.alpha(), alpha);
        assert!(!timers.is_started(block.timer()));
        assert_eq!(block.state(), LifecycleState::Disappearing);
    }

    #[test]
    fn blink_lasts_for_the_timer_duration() {
        let (mut block, mut timers) = block(BlockColor::Pink);
        block.on_matched(&mut timers);
        let frames = blink_out(&mut block, &mut timers);
        assert_eq!(frames, BLINK_MS.div_ceil(TICK_MS));
        assert_eq!(block.state(), LifecycleState::Disappearing);
        assert_eq!(block.alpha(), ALPHA_MAX - FADE_STEP);
        assert!(block.is_drawn());
        assert!(!timers.is_started(block.timer()));
    }

    #[test]
    fn fade_reaches_removed_in_51_frames() {
        let (mut block, mut timers) = block(BlockColor::Yellow);
        block.on_matched(&mut timers);
        blink_out(&mut block, &mut timers);

        // The frame the timer fires is the first fade frame.
        assert_eq!(block.alpha(), 250);
        for n in 2..=51 {
            frame(&mut block, &mut timers);
            if n < 51 {
                assert_eq!(block.state(), LifecycleState::Disappearing, "frame {}", n);
                assert_eq!(block.alpha(), 255 - 5 * n as u8);
                assert!(block.is_drawn());
            }
        }
        assert_eq!(block.state(), LifecycleState::Removed);
        assert!(!block.is_drawn());
    }

    #[test]
    fn full_step_fade_removes_on_the_firing_frame() {
        let mut timers = TimerRegistry::new();
        let mut block = Block::new(BlockColor::Green, &mut timers, BLINK_MS);
        block.on_matched(&mut timers);
        timers.tick(BLINK_MS);
        block.update(&mut timers, Point::default(), ALPHA_MAX);
        assert_eq!(block.state(), LifecycleState::Removed);
        assert!(!block.is_drawn());
    }

    #[test]
    fn lifecycle_never_regresses() {
        let (mut block, mut timers) = block(BlockColor::Red);
        let mut last = block.state();
        for n in 0..200 {
            if n == 3 || n == 90 {
                block.on_matched(&mut timers);
            }
            frame(&mut block, &mut timers);
            assert!(block.state() >= last, "{:?} -> {:?}", last, block.state());
            last = block.state();
        }
        assert_eq!(last, LifecycleState::Removed);
    }

    /// Records log lines emitted on the calling thread.
    mod recorder {
        use std::cell::RefCell;

        thread_local! {
            static LINES: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
        }

        struct Recorder;

        impl log::Log for Recorder {
            fn enabled(&self, _: &log::Metadata) -> bool {
                true
            }

            fn log(&self, record: &log::Record) {
                LINES.with(|lines| lines.borrow_mut().push(record.args().to_string()));
            }

            fn flush(&self) {}
        }

        static RECORDER: Recorder = Recorder;

        pub fn install() {
            let _ = log::set_logger(&RECORDER);
            log::set_max_level(log::LevelFilter::Debug);
        }

        pub fn take() -> Vec<String> {
            LINES.with(|lines| std::mem::take(&mut *lines.borrow_mut()))
        }
    }

    #[test]
    fn lifecycle_transitions_are_logged() {
        recorder::install();
        let (mut block, mut timers) = block(BlockColor::Blue);
        block.on_matched(&mut timers);
        blink_out(&mut block, &mut timers);
        let lines = recorder::take();
        assert!(
            lines.iter().any(|l| l.starts_with("blue block") && l.ends_with("disappearing")),
            "{:?}",
            lines
        );

        while block.state() != LifecycleState::Removed {
            frame(&mut block, &mut timers);
        }
        let lines = recorder::take();
        assert!(
            lines.iter().any(|l| l.starts_with("blue block") && l.ends_with("removed")),
            "{:?}",
            lines
        );
    }

    #[test]
    fn update_tracks_position() {
        let (mut block, mut timers) = block(BlockColor::Red);
        block.update(&mut timers, Point::new(10, 20), FADE_STEP);
        assert_eq!(block.point(), Point::new(10, 20));
    }
}
