use crate::WrapMode;
use core_text::WrapPosition;
use core_wrap::WrapMetrics;

/// Scroll anchor of a viewport, tagged by wrap mode.
///
/// `Off` anchors at a logical line and a horizontal screen column. `Soft`
/// anchors at a sub-line and carries the metrics object used to interpret it.
pub enum WrapAdapter {
    Off {
        top_line: usize,
        left_col: usize,
    },
    Soft {
        top: WrapPosition,
        metrics: Box<dyn WrapMetrics>,
    },
}

impl Default for WrapAdapter {
    fn default() -> Self {
        WrapAdapter::Off {
            top_line: 0,
            left_col: 0,
        }
    }
}

impl std::fmt::Debug for WrapAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WrapAdapter::Off { top_line, left_col } => f
                .debug_struct("Off")
                .field("top_line", top_line)
                .field("left_col", left_col)
                .finish(),
            WrapAdapter::Soft { top, metrics } => f
                .debug_struct("Soft")
                .field("top", top)
                .field("wrap_width", &metrics.wrap_width())
                .finish(),
        }
    }
}

impl WrapAdapter {
    pub fn mode(&self) -> WrapMode {
        match self {
            WrapAdapter::Off { .. } => WrapMode::None,
            WrapAdapter::Soft { .. } => WrapMode::Soft,
        }
    }

    /// Logical line of the first visible row.
    pub fn top_line(&self) -> usize {
        match self {
            WrapAdapter::Off { top_line, .. } => *top_line,
            WrapAdapter::Soft { top, .. } => top.line,
        }
    }

    /// First visible row as a wrapped position; sub-line 0 when not wrapping.
    pub fn top(&self) -> WrapPosition {
        match self {
            WrapAdapter::Off { top_line, .. } => WrapPosition::new(*top_line, 0),
            WrapAdapter::Soft { top, .. } => *top,
        }
    }

    pub fn left_col(&self) -> usize {
        match self {
            WrapAdapter::Off { left_col, .. } => *left_col,
            WrapAdapter::Soft { .. } => 0,
        }
    }

    pub fn metrics(&self) -> Option<&dyn WrapMetrics> {
        match self {
            WrapAdapter::Off { .. } => None,
            WrapAdapter::Soft { metrics, .. } => Some(metrics.as_ref()),
        }
    }
}
