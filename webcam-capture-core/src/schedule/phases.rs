use std::time::Duration;

/// Default length of each move/freeze segment.
pub const DEFAULT_SEGMENT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    Move,
    Freeze,
}

impl GamePhase {
    pub fn toggled(self) -> Self {
        match self {
            Self::Move => Self::Freeze,
            Self::Freeze => Self::Move,
        }
    }
}

/// Alternates move/freeze segments of a fixed length, starting with move.
///
/// Driven by explicit elapsed time rather than free-running intervals, so a
/// game can own it, pause it by not advancing it, and drop it with the
/// screen.
#[derive(Debug, Clone)]
pub struct PhaseScheduler {
    segment: Duration,
    elapsed: Duration,
    current: GamePhase,
    switches: u64,
}

impl PhaseScheduler {
    pub fn new(segment: Duration) -> Self {
        Self {
            segment,
            elapsed: Duration::ZERO,
            current: GamePhase::Move,
            switches: 0,
        }
    }

    pub fn current(&self) -> GamePhase {
        self.current
    }

    pub fn segment(&self) -> Duration {
        self.segment
    }

    /// Number of phase changes so far.
    pub fn switches(&self) -> u64 {
        self.switches
    }

    /// Phase at an arbitrary point since the start.
    pub fn phase_at(&self, elapsed: Duration) -> GamePhase {
        if self.segment.is_zero() {
            return GamePhase::Move;
        }
        let index = elapsed.as_nanos() / self.segment.as_nanos();
        if index % 2 == 0 {
            GamePhase::Move
        } else {
            GamePhase::Freeze
        }
    }

    /// Advance time, returning every phase entered along the way, in order.
    pub fn advance(&mut self, delta: Duration) -> Vec<GamePhase> {
        if self.segment.is_zero() {
            return Vec::new();
        }
        let before = self.elapsed.as_nanos() / self.segment.as_nanos();
        self.elapsed = self.elapsed.saturating_add(delta);
        let after = self.elapsed.as_nanos() / self.segment.as_nanos();

        let mut entered = Vec::new();
        for _ in before..after {
            self.current = self.current.toggled();
            self.switches += 1;
            entered.push(self.current);
        }
        entered
    }

    pub fn reset(&mut self) {
        self.elapsed = Duration::ZERO;
        self.current = GamePhase::Move;
        self.switches = 0;
    }
}

impl Default for PhaseScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_SEGMENT)
    }
}
