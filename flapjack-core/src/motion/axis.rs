//! Axis identifiers and logical positions

/// Identifies one stepper channel of the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisId {
    /// Belt carrying batter from the dispenser over the griddle to the tray
    Conveyor,
    /// Batter valve
    Dispenser,
    /// Cooling fan
    Cooling,
}

impl AxisId {
    /// Every axis, in service order
    pub const ALL: [AxisId; 3] = [AxisId::Conveyor, AxisId::Dispenser, AxisId::Cooling];
}

/// Logical dispenser valve position
///
/// Mapped to absolute step targets by the motion config, so the valve is
/// always driven to a known position instead of nudged relative to its
/// current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispenserPosition {
    /// Batter flows
    Open,
    /// Batter held back
    Closed,
}

/// Step direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Position count increases
    Forward,
    /// Position count decreases
    Reverse,
}

impl Direction {
    /// Get the opposite direction
    pub fn opposite(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }

    /// Position change of one step in this direction
    pub fn delta(self) -> i32 {
        match self {
            Direction::Forward => 1,
            Direction::Reverse => -1,
        }
    }
}
