//! Background colour cue resource.
//!
//! The camera background tells players what is going on: a pale sky while a
//! turn runs, grey during the neutral window between turns, and a short red
//! flash when somebody touches a hazard. The flash overrides the phase colour
//! until it expires and then the phase colour shows again.

use bevy_ecs::prelude::Resource;
use raylib::prelude::Color;

/// Named background cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackdropCue {
    /// `#ccccff`, a turn is running.
    Normal,
    /// `#777777`, the neutral window between turns.
    NeutralGray,
    /// Transient red after hazard contact.
    DangerRed,
}

impl BackdropCue {
    pub fn color(self) -> Color {
        match self {
            BackdropCue::Normal => Color::new(0xcc, 0xcc, 0xff, 0xff),
            BackdropCue::NeutralGray => Color::new(0x77, 0x77, 0x77, 0xff),
            BackdropCue::DangerRed => Color::new(0xcc, 0x22, 0x22, 0xff),
        }
    }
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct Backdrop {
    /// Cue derived from the turn phase.
    pub base: BackdropCue,
    /// Session time (ms) until which the danger flash is shown.
    pub danger_until_ms: Option<u64>,
}

impl Default for Backdrop {
    fn default() -> Self {
        Self {
            base: BackdropCue::NeutralGray,
            danger_until_ms: None,
        }
    }
}

impl Backdrop {
    pub fn set_base(&mut self, cue: BackdropCue) {
        self.base = cue;
    }

    /// Start (or extend) a danger flash lasting `duration_ms` from `now_ms`.
    pub fn flash_danger(&mut self, now_ms: u64, duration_ms: u64) {
        let until = now_ms + duration_ms;
        self.danger_until_ms = Some(self.danger_until_ms.map_or(until, |u| u.max(until)));
    }

    /// Cue visible at `now_ms`.
    pub fn cue_at(&self, now_ms: u64) -> BackdropCue {
        match self.danger_until_ms {
            Some(until) if now_ms < until => BackdropCue::DangerRed,
            _ => self.base,
        }
    }

    /// Forget an expired flash.
    pub fn expire(&mut self, now_ms: u64) {
        if matches!(self.danger_until_ms, Some(until) if now_ms >= until) {
            self.danger_until_ms = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flash_overrides_base_until_it_expires() {
        let mut b = Backdrop::default();
        b.set_base(BackdropCue::Normal);
        b.flash_danger(1000, 300);
        assert_eq!(b.cue_at(1000), BackdropCue::DangerRed);
        assert_eq!(b.cue_at(1299), BackdropCue::DangerRed);
        assert_eq!(b.cue_at(1300), BackdropCue::Normal);
        b.expire(1300);
        assert!(b.danger_until_ms.is_none());
    }

    #[test]
    fn overlapping_flashes_keep_the_later_deadline() {
        let mut b = Backdrop::default();
        b.flash_danger(0, 300);
        b.flash_danger(100, 100);
        assert_eq!(b.danger_until_ms, Some(300));
    }

    #[test]
    fn cue_colors_match_palette() {
        let c = BackdropCue::Normal.color();
        assert_eq!((c.r, c.g, c.b), (0xcc, 0xcc, 0xff));
        let c = BackdropCue::NeutralGray.color();
        assert_eq!((c.r, c.g, c.b), (0x77, 0x77, 0x77));
    }
}
