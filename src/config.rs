use crate::celebration::{DEFAULT_BALLOONS, DEFAULT_CANDLES};
use chrono::{Datelike, NaiveDate};
use std::{env, time::Duration};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_TICK_MS: u64 = 500;
pub const DEFAULT_TITLE: &str = "Happy 20th Birthday!";
pub const DEFAULT_NAME: &str = "Hashir Khan";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardConfig {
    pub port: u16,
    pub total_candles: usize,
    pub total_balloons: usize,
    pub tick: Duration,
    pub title: String,
    pub recipient: String,
    pub birthday: Option<NaiveDate>,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            total_candles: DEFAULT_CANDLES,
            total_balloons: DEFAULT_BALLOONS,
            tick: Duration::from_millis(DEFAULT_TICK_MS),
            title: DEFAULT_TITLE.to_string(),
            recipient: DEFAULT_NAME.to_string(),
            birthday: NaiveDate::from_ymd_opt(2024, 8, 7),
        }
    }
}

impl CardConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = parsed(&lookup, "PORT").unwrap_or(defaults.port);
        let total_candles = parsed::<usize>(&lookup, "CARD_CANDLES")
            .filter(|&n| positive("CARD_CANDLES", n))
            .unwrap_or(defaults.total_candles);
        let total_balloons = parsed::<usize>(&lookup, "CARD_BALLOONS")
            .filter(|&n| positive("CARD_BALLOONS", n))
            .unwrap_or(defaults.total_balloons);
        let tick = parsed::<u64>(&lookup, "CARD_TICK_MS")
            .filter(|&ms| positive("CARD_TICK_MS", ms))
            .map(Duration::from_millis)
            .unwrap_or(defaults.tick);

        let title = non_empty(&lookup, "CARD_TITLE").unwrap_or(defaults.title);
        let recipient = non_empty(&lookup, "CARD_NAME").unwrap_or(defaults.recipient);
        let birthday = match non_empty(&lookup, "CARD_DATE") {
            Some(raw) => match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(err) => {
                    warn!("ignoring CARD_DATE={raw:?}: {err}");
                    defaults.birthday
                }
            },
            None => defaults.birthday,
        };

        Self {
            port,
            total_candles,
            total_balloons,
            tick,
            title,
            recipient,
            birthday,
        }
    }

    pub fn birthday_label(&self) -> Option<String> {
        self.birthday.map(|date| {
            let day = date.day();
            format!("{} {day}{}", date.format("%B"), ordinal_suffix(day))
        })
    }
}

fn parsed<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("ignoring {key}={raw:?}: not a valid number");
            None
        }
    }
}

fn non_empty(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn positive<T: PartialEq + Default>(key: &str, value: T) -> bool {
    if value == T::default() {
        warn!("ignoring {key}=0: must be at least 1");
        return false;
    }
    true
}

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
