//! Time- and distance-bounded suppression of phantom touches after a hover.
//!
//! Some digitizers report a spurious touch right where the pen was hovering a
//! moment ago. Every hover arms a short window around the hover point; queries
//! landing inside that window (in time and space) are answered with "no input".

pub const DEFAULT_GUARD_TIME_MS: u64 = 100;
pub const DEFAULT_GUARD_RADIUS_PX: f32 = 12.0;

/// Window size used by the next arm operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuardSettings {
    pub duration_ms: u64,
    pub radius_px: f32,
}

impl Default for GuardSettings {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_GUARD_TIME_MS,
            radius_px: DEFAULT_GUARD_RADIUS_PX,
        }
    }
}

/// An armed suppression window. Settings are captured at arm time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuardWindow {
    pub expires_at_ms: u64,
    pub anchor_x: f32,
    pub anchor_y: f32,
    pub radius_px: f32,
}

impl GuardWindow {
    fn covers(&self, x: f32, y: f32) -> bool {
        distance(x, y, self.anchor_x, self.anchor_y) <= self.radius_px
    }
}

#[derive(Debug, Default)]
pub struct HoverGuard {
    settings: GuardSettings,
    window: Option<GuardWindow>,
}

impl HoverGuard {
    pub fn new(settings: GuardSettings) -> Self {
        Self {
            settings,
            window: None,
        }
    }

    pub fn settings(&self) -> GuardSettings {
        self.settings
    }

    /// Takes effect on the next [`arm`](Self::arm); an armed window keeps its size.
    pub fn configure(&mut self, settings: GuardSettings) {
        self.settings = settings;
    }

    pub fn window(&self) -> Option<&GuardWindow> {
        self.window.as_ref()
    }

    pub fn is_armed(&self) -> bool {
        self.window.is_some()
    }

    pub fn arm(&mut self, now_ms: u64, x: f32, y: f32) {
        let window = GuardWindow {
            expires_at_ms: now_ms.saturating_add(self.settings.duration_ms),
            anchor_x: x,
            anchor_y: y,
            radius_px: self.settings.radius_px,
        };
        log::debug!(
            "hover guard armed at ({:.1}, {:.1}) r={:.1}px until {}ms",
            x,
            y,
            window.radius_px,
            window.expires_at_ms
        );
        self.window = Some(window);
    }

    pub fn disarm(&mut self) {
        if self.window.take().is_some() {
            log::trace!("hover guard disarmed");
        }
    }

    /// Whether a query at position (`x`, `y`) must be treated as a phantom touch.
    /// An expired window is dropped here rather than by a timer.
    pub fn suppresses(&mut self, now_ms: u64, x: f32, y: f32) -> bool {
        let Some(window) = self.window else {
            return false;
        };

        if now_ms >= window.expires_at_ms {
            log::debug!("hover guard expired at {}ms", now_ms);
            self.window = None;
            return false;
        }

        let suppressed = window.covers(x, y);
        if suppressed {
            log::debug!("suppressing phantom touch at ({:.1}, {:.1})", x, y);
        }
        suppressed
    }
}

fn distance(x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    (x2 - x1).hypot(y2 - y1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard(duration_ms: u64, radius_px: f32) -> HoverGuard {
        HoverGuard::new(GuardSettings {
            duration_ms,
            radius_px,
        })
    }

    #[test]
    fn test_defaults() {
        let settings = GuardSettings::default();
        assert_eq!(settings.duration_ms, 100);
        assert_eq!(settings.radius_px, 12.0);
        assert!(!HoverGuard::default().is_armed());
    }

    #[test]
    fn test_arm_records_anchor_and_expiry() {
        let mut g = guard(50, 10.0);
        g.arm(1000, 100.0, 200.0);
        let w = g.window().copied().unwrap();
        assert_eq!(w.expires_at_ms, 1050);
        assert_eq!((w.anchor_x, w.anchor_y), (100.0, 200.0));
        assert_eq!(w.radius_px, 10.0);
    }

    #[test]
    fn test_suppresses_inside_radius_and_window() {
        let mut g = guard(50, 10.0);
        g.arm(0, 100.0, 100.0);
        // 5*sqrt(2) ~ 7.07px away
        assert!(g.suppresses(10, 105.0, 105.0));
        // exactly on the radius still counts
        assert!(g.suppresses(10, 110.0, 100.0));
        assert!(!g.suppresses(10, 120.0, 100.0));
        assert!(g.is_armed());
    }

    #[test]
    fn test_lazy_expiry() {
        let mut g = guard(50, 10.0);
        g.arm(0, 100.0, 100.0);
        assert!(g.suppresses(49, 100.0, 100.0));
        assert!(!g.suppresses(50, 100.0, 100.0));
        assert!(!g.is_armed());
    }

    #[test]
    fn test_configure_does_not_resize_armed_window() {
        let mut g = guard(50, 10.0);
        g.arm(0, 0.0, 0.0);
        g.configure(GuardSettings {
            duration_ms: 500,
            radius_px: 100.0,
        });
        assert!(!g.suppresses(10, 50.0, 0.0));
        assert!(!g.suppresses(60, 0.0, 0.0));

        g.arm(100, 0.0, 0.0);
        assert!(g.suppresses(550, 50.0, 0.0));
    }

    #[test]
    fn test_disarm() {
        let mut g = guard(50, 10.0);
        g.arm(0, 0.0, 0.0);
        g.disarm();
        assert!(!g.suppresses(1, 0.0, 0.0));
    }
}
