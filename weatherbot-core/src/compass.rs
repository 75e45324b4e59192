//! Wind bearing to compass label.

use std::fmt;

/// One of eight 45° sectors, the first centred on true north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompassDirection {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl CompassDirection {
    const ORDERED: [CompassDirection; 8] = [
        CompassDirection::North,
        CompassDirection::NorthEast,
        CompassDirection::East,
        CompassDirection::SouthEast,
        CompassDirection::South,
        CompassDirection::SouthWest,
        CompassDirection::West,
        CompassDirection::NorthWest,
    ];

    /// Sector for a bearing in degrees. `360` wraps to north.
    pub fn from_degrees(deg: u16) -> Self {
        let index = ((f64::from(deg) + 22.5) / 45.0).floor() as usize % 8;
        Self::ORDERED[index]
    }

    /// Wind label as it appears in the report.
    pub fn label(&self) -> &'static str {
        match self {
            CompassDirection::North => "северный",
            CompassDirection::NorthEast => "северо-восточный",
            CompassDirection::East => "восточный",
            CompassDirection::SouthEast => "юго-восточный",
            CompassDirection::South => "южный",
            CompassDirection::SouthWest => "юго-западный",
            CompassDirection::West => "западный",
            CompassDirection::NorthWest => "северо-западный",
        }
    }

    pub const fn all() -> &'static [CompassDirection] {
        &Self::ORDERED
    }
}

impl fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify an optional bearing; a missing bearing stays unknown.
pub fn wind_direction(deg: Option<u16>) -> Option<CompassDirection> {
    deg.map(CompassDirection::from_degrees)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinal_points() {
        assert_eq!(CompassDirection::from_degrees(0), CompassDirection::North);
        assert_eq!(CompassDirection::from_degrees(90), CompassDirection::East);
        assert_eq!(CompassDirection::from_degrees(180), CompassDirection::South);
        assert_eq!(CompassDirection::from_degrees(270), CompassDirection::West);
    }

    #[test]
    fn full_turn_wraps_to_north() {
        assert_eq!(CompassDirection::from_degrees(360), CompassDirection::North);
        assert_eq!(CompassDirection::from_degrees(359), CompassDirection::North);
        assert_eq!(CompassDirection::from_degrees(338), CompassDirection::North);
    }

    #[test]
    fn sector_boundaries_round_up() {
        assert_eq!(CompassDirection::from_degrees(22), CompassDirection::North);
        assert_eq!(CompassDirection::from_degrees(23), CompassDirection::NorthEast);
        assert_eq!(CompassDirection::from_degrees(45), CompassDirection::NorthEast);
        assert_eq!(CompassDirection::from_degrees(337), CompassDirection::NorthWest);
    }

    #[test]
    fn every_degree_maps_to_a_known_label() {
        for deg in 0..360u16 {
            let dir = CompassDirection::from_degrees(deg);
            assert!(CompassDirection::all().contains(&dir), "degree {deg}");
        }
    }

    #[test]
    fn absent_bearing_is_unknown() {
        assert_eq!(wind_direction(None), None);
        assert_eq!(wind_direction(Some(0)), Some(CompassDirection::North));
    }

    #[test]
    fn labels_are_localized() {
        assert_eq!(CompassDirection::East.to_string(), "восточный");
        assert_eq!(CompassDirection::NorthWest.label(), "северо-западный");
    }
}
