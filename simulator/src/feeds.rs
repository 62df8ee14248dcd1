//! Fake data sources driven by the frame counter.
//!
//! Every source posts each frame; widgets ignore values that did not change,
//! so only real transitions reach the display.

use std::collections::VecDeque;

use status_bar_common::widgets::{ChatPostArgs, IconStripPostArgs, TemperaturePostArgs, TextPostArgs, WeatherPostArgs};
use status_bar_common::{DisplaySession, PostArgs};

use crate::assets::{CONDITIONS, HEART};
use crate::scene::{CHAT, SUBS, TEMPS, VIEWERS, WEATHER};
use crate::timing::{FRAME_TIME, HOURS_PER_SECOND};

const MESSAGES: [&str; 8] = [
    "hello there",
    "gg",
    "that relayout was smooth",
    "first!",
    "is it raining over there?",
    "nice",
    "what font is that",
    "brb",
];

/// High, current and low temperature, cycled every few seconds.
const TEMPERATURES: [[f32; 3]; 4] = [
    [21.0, 17.5, 9.0],
    [21.0, 18.2, 9.0],
    [23.5, 19.0, 9.0],
    [23.5, -2.0, -4.5],
];

pub struct Feeds {
    chat: VecDeque<&'static str>,
    next_message: usize,
}

impl Feeds {
    pub fn new() -> Self {
        Self {
            chat: VecDeque::from(["", "", ""]),
            next_message: 0,
        }
    }

    /// Post every source's value for `frame`.
    pub fn post(
        &mut self,
        frame: u32,
        session: &mut DisplaySession<'_>,
    ) {
        let viewers = (frame / 50) % 12;
        session.post_to_resource(VIEWERS, &PostArgs::new(&TextPostArgs::new(viewers)));

        let temps = TEMPERATURES[(frame / 250) as usize % TEMPERATURES.len()];
        session.post_to_resource(TEMPS, &PostArgs::new(&TemperaturePostArgs::new(&temps)));

        if frame % 75 == 0 {
            self.push_message();
        }
        session.post_to_resource(CHAT, &PostArgs::new(&self.chat_rows()));

        let condition = CONDITIONS[(frame / 500) as usize % CONDITIONS.len()];
        session.post_to_resource(WEATHER, &PostArgs::new(&WeatherPostArgs::new(condition, hour_at(frame))));

        let subs = IconStripPostArgs {
            icon: HEART,
            count: ((frame / 100) % 5) as usize,
        };
        session.post_to_resource(SUBS, &PostArgs::new(&subs));
    }

    fn push_message(&mut self) {
        self.chat.pop_front();
        self.chat.push_back(MESSAGES[self.next_message % MESSAGES.len()]);
        self.next_message += 1;
    }

    fn chat_rows(&self) -> ChatPostArgs {
        let row = |i: usize| self.chat.get(i).copied().unwrap_or_default();
        ChatPostArgs::new(row(0), row(1), row(2))
    }
}

impl Default for Feeds {
    fn default() -> Self { Self::new() }
}

/// Simulated hour of day at `frame`.
fn hour_at(frame: u32) -> u8 {
    let secs = (FRAME_TIME * frame).as_secs();
    ((secs * u64::from(HOURS_PER_SECOND)) % 24) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_scrolls_oldest_first() {
        let mut feeds = Feeds::new();
        feeds.push_message();
        feeds.push_message();
        assert_eq!(feeds.chat_rows(), ChatPostArgs::new("", MESSAGES[0], MESSAGES[1]));

        feeds.push_message();
        feeds.push_message();
        assert_eq!(feeds.chat_rows(), ChatPostArgs::new(MESSAGES[1], MESSAGES[2], MESSAGES[3]));
    }

    #[test]
    fn test_hour_wraps() {
        assert_eq!(hour_at(0), 0);
        assert_eq!(hour_at(50), 1, "one simulated hour per second");
        assert_eq!(hour_at(50 * 25), 1);
    }
}
