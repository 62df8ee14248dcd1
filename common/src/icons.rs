//! Named day/night icon pairs, looked up by condition string.
//!
//! The registry is built once at startup from the asset tables and handed to
//! every widget that draws condition icons through its init args.

use alloc::collections::BTreeMap;
use alloc::string::String;

use crate::canvas::Icon;
use crate::config::{NIGHT_END_HOUR, NIGHT_START_HOUR};

/// Variants of one icon for daytime and nighttime.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IconPair {
    pub day: Icon,
    pub night: Icon,
}

impl IconPair {
    /// The variant for `hour` under the default night window.
    pub fn for_hour(
        &self,
        hour: u8,
    ) -> &Icon {
        if is_night_hour(hour, NIGHT_START_HOUR, NIGHT_END_HOUR) { &self.night } else { &self.day }
    }
}

#[derive(Clone, Debug, Default)]
pub struct IconRegistry {
    icons: BTreeMap<String, IconPair>,
}

impl IconRegistry {
    pub const fn new() -> Self { Self { icons: BTreeMap::new() } }

    /// Register the icons for `key`. A later registration for the same key wins.
    pub fn register(
        &mut self,
        key: &str,
        day: Icon,
        night: Icon,
    ) {
        self.icons.insert(String::from(key), IconPair { day, night });
    }

    pub fn get(
        &self,
        key: &str,
    ) -> Option<&IconPair> {
        self.icons.get(key)
    }

    #[inline]
    pub fn len(&self) -> usize { self.icons.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.icons.is_empty() }
}

/// Whether `hour` falls in `[night_start, night_end)`, wrapping past midnight
/// when `night_start > night_end`.
pub const fn is_night_hour(
    hour: u8,
    night_start: u8,
    night_end: u8,
) -> bool {
    if night_start > night_end {
        hour >= night_start || hour < night_end
    } else {
        hour >= night_start && hour < night_end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUN: [u8; 1] = [0xFF];
    const MOON: [u8; 1] = [0x0F];
    const CLOUD: [u8; 1] = [0x3C];

    #[test]
    fn test_night_window_wraps() {
        assert!(is_night_hour(21, 21, 6));
        assert!(is_night_hour(0, 21, 6));
        assert!(is_night_hour(5, 21, 6));
        assert!(!is_night_hour(6, 21, 6), "end hour is already day");
        assert!(!is_night_hour(20, 21, 6));
    }

    #[test]
    fn test_night_window_same_day() {
        assert!(is_night_hour(2, 1, 4));
        assert!(!is_night_hour(4, 1, 4));
    }

    #[test]
    fn test_register_and_lookup() {
        let mut icons = IconRegistry::new();
        icons.register("sunny", Icon::new(&SUN, 8), Icon::new(&MOON, 8));

        let pair = icons.get("sunny");
        assert!(pair.is_some());
        assert_eq!(pair.map(|p| *p.for_hour(12)), Some(Icon::new(&SUN, 8)));
        assert_eq!(pair.map(|p| *p.for_hour(23)), Some(Icon::new(&MOON, 8)));
        assert!(icons.get("hail").is_none());
    }

    #[test]
    fn test_last_registration_wins() {
        let mut icons = IconRegistry::new();
        icons.register("cloudy", Icon::new(&SUN, 8), Icon::new(&SUN, 8));
        icons.register("cloudy", Icon::new(&CLOUD, 8), Icon::new(&MOON, 8));

        assert_eq!(icons.len(), 1);
        assert_eq!(icons.get("cloudy").map(|p| p.day), Some(Icon::new(&CLOUD, 8)));
    }
}
