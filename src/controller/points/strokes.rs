/// Which side of a matchup receives strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    Golfer,
    Opponent,
}

/// How strokes are spread over a nine for two rounded handicaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeAllocation {
    pub receiver: Option<Receiver>,
    /// Handicap difference, less 9 once it rolls over.
    pub diff: i32,
    pub rollover: i32,
}

/// The higher handicap gets strokes. A difference above 9 rolls over: every
/// hole gets one stroke and the lowest-index holes get a second.
#[must_use]
pub fn stroke_allocation(golfer_hcp: i32, opponent_hcp: i32) -> StrokeAllocation {
    let receiver = match golfer_hcp.cmp(&opponent_hcp) {
        std::cmp::Ordering::Greater => Some(Receiver::Golfer),
        std::cmp::Ordering::Less => Some(Receiver::Opponent),
        std::cmp::Ordering::Equal => None,
    };
    let diff = (golfer_hcp - opponent_hcp).abs();
    if diff > 9 {
        StrokeAllocation {
            receiver,
            diff: diff - 9,
            rollover: 1,
        }
    } else {
        StrokeAllocation {
            receiver,
            diff,
            rollover: 0,
        }
    }
}

impl StrokeAllocation {
    /// Strokes the receiving side gets on a hole with this stroke index.
    #[must_use]
    pub fn strokes_on(&self, handicap9: i32) -> i32 {
        if self.receiver.is_none() {
            0
        } else if handicap9 <= self.diff {
            1 + self.rollover
        } else {
            self.rollover
        }
    }

    #[must_use]
    pub fn strokes_for(&self, side: Receiver, handicap9: i32) -> i32 {
        if self.receiver == Some(side) {
            self.strokes_on(handicap9)
        } else {
            0
        }
    }
}
