#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Speed {
    #[default]
    OneMs,
    FiveMs,
}

impl Speed {
    pub const ALL: [Self; 2] = [Self::OneMs, Self::FiveMs];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneMs => "1ms",
            Self::FiveMs => "5ms",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::OneMs => 0,
            Self::FiveMs => 1,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "1ms" => Some(Self::OneMs),
            "5ms" => Some(Self::FiveMs),
            _ => None,
        }
    }
}

/// Compass direction of the simulated inflow, in image axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    East,
    West,
    North,
    South,
    NorthEast,
    SouthWest,
    SouthEast,
    NorthWest,
}

impl Direction {
    pub const ALL: [Self; 8] = [
        Self::East,
        Self::West,
        Self::North,
        Self::South,
        Self::NorthEast,
        Self::SouthWest,
        Self::SouthEast,
        Self::NorthWest,
    ];

    /// Token used in dataset file names.
    pub const fn code(self) -> &'static str {
        match self {
            Self::East => "x",
            Self::West => "-x",
            Self::North => "y",
            Self::South => "-y",
            Self::NorthEast => "+x+y",
            Self::SouthWest => "-x-y",
            Self::SouthEast => "+x-y",
            Self::NorthWest => "-x+y",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::East => "East (+x)",
            Self::West => "West (-x)",
            Self::North => "North (+y)",
            Self::South => "South (-y)",
            Self::NorthEast => "NE (+x+y)",
            Self::SouthWest => "SW (-x-y)",
            Self::SouthEast => "SE (+x-y)",
            Self::NorthWest => "NW (-x+y)",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|direction| *direction == self)
            .unwrap_or(0)
    }

    /// Accepts either the selector label or the file-name code.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|direction| direction.label() == value || direction.code() == value)
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, Speed};

    #[test]
    fn speed_parse_accepts_wire_values_only() {
        assert_eq!(Speed::parse("1ms"), Some(Speed::OneMs));
        assert_eq!(Speed::parse(" 5MS "), Some(Speed::FiveMs));
        assert_eq!(Speed::parse("3ms"), None);
        assert_eq!(Speed::parse(""), None);
    }

    #[test]
    fn direction_codes_match_label_table() {
        let table = [
            ("East (+x)", "x"),
            ("West (-x)", "-x"),
            ("North (+y)", "y"),
            ("South (-y)", "-y"),
            ("NE (+x+y)", "+x+y"),
            ("SW (-x-y)", "-x-y"),
            ("SE (+x-y)", "+x-y"),
            ("NW (-x+y)", "-x+y"),
        ];

        for (index, (label, code)) in table.iter().enumerate() {
            let direction = Direction::ALL[index];
            assert_eq!(direction.label(), *label);
            assert_eq!(direction.code(), *code);
            assert_eq!(direction.index(), index);
        }
        assert_eq!(Direction::ALL.len(), table.len());
    }

    #[test]
    fn direction_parse_takes_label_or_code() {
        assert_eq!(Direction::parse("North (+y)"), Some(Direction::North));
        assert_eq!(Direction::parse("-x+y"), Some(Direction::NorthWest));
        assert_eq!(Direction::parse("north"), None);
    }
}
