use crate::error::BoardError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up = 0,
    Down = 1,
    Right = 2,
    Left = 3,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Right, Self::Left];

    pub fn iter() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter()
    }

    /// Whether tiles travel towards index 0 of their line.
    pub const fn towards_start(self) -> bool {
        matches!(self, Self::Up | Self::Left)
    }
}

impl TryFrom<u8> for Direction {
    type Error = BoardError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(BoardError::InvalidDirection(value))
    }
}
