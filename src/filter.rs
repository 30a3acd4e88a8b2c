// Copyright 2025 Taglog Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::level::Level;

/// An inclusive severity range gating which records a dispatch accepts.
///
/// [`LevelBand::at_most`] and [`LevelBand::at_least`] build the two
/// complementary bands of the standard two-sink setup; together they cover
/// every level and overlap on none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelBand {
    min: Level,
    max: Level,
}

impl LevelBand {
    pub fn new(min: Level, max: Level) -> Self {
        Self { min, max }
    }

    /// Accepts `max` and everything less severe.
    pub fn at_most(max: Level) -> Self {
        Self::new(Level::Debug, max)
    }

    /// Accepts `min` and everything more severe.
    pub fn at_least(min: Level) -> Self {
        Self::new(min, Level::Fatal)
    }

    pub fn accepts(&self, level: Level) -> bool {
        self.min <= level && level <= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::LevelBand;
    use crate::level::Level;

    #[test]
    fn test_at_most_accepts_downward() {
        let band = LevelBand::at_most(Level::Info);
        assert!(band.accepts(Level::Debug));
        assert!(band.accepts(Level::Info));
        assert!(!band.accepts(Level::Warn));
        assert!(!band.accepts(Level::Fatal));
    }

    #[test]
    fn test_at_least_accepts_upward() {
        let band = LevelBand::at_least(Level::Warn);
        assert!(!band.accepts(Level::Info));
        assert!(band.accepts(Level::Warn));
        assert!(band.accepts(Level::Error));
        assert!(band.accepts(Level::Fatal));
    }

    #[test]
    fn test_standard_bands_partition_all_levels() {
        let info_band = LevelBand::at_most(Level::Info);
        let error_band = LevelBand::at_least(Level::Warn);
        for level in Level::ALL {
            assert_ne!(info_band.accepts(level), error_band.accepts(level));
        }
    }

    #[test]
    fn test_explicit_range() {
        let band = LevelBand::new(Level::Info, Level::Error);
        assert!(!band.accepts(Level::Debug));
        assert!(band.accepts(Level::Info));
        assert!(band.accepts(Level::Error));
        assert!(!band.accepts(Level::Panic));
    }
}
