//! Built-in feature filters: percentage rollout and time-window activation.

use crate::filter::FeatureFilter;
use chrono::{DateTime, Utc};
use log::warn;
use rand::Rng;
use serde_json::Value;
use std::collections::HashMap;

/// Enables a feature for a percentage of evaluations.
///
/// Reads `PercentageFilterSetting` (a number or numeric string, 0-100) and
/// returns true with that probability, drawing fresh randomness per call.
/// Distinct evaluations are independent; there is no per-user stickiness.
pub struct PercentageFilter;

impl PercentageFilter {
    pub const NAME: &'static str = "PercentageFilter";
    pub const SETTING: &'static str = "PercentageFilterSetting";
}

impl FeatureFilter for PercentageFilter {
    fn evaluate(&self, parameters: &HashMap<String, Value>) -> bool {
        let Some(percentage) = parameters.get(Self::SETTING).and_then(numeric_value) else {
            warn!(
                "{} missing or non-numeric {}; evaluating to false",
                Self::NAME,
                Self::SETTING
            );
            return false;
        };

        let percentage = percentage.clamp(0.0, 100.0);
        rand::rng().random_range(0.0..100.0) < percentage
    }
}

/// Enables a feature inside a configured time window.
///
/// Reads `TimeWindowFilterSettingStart` and `TimeWindowFilterSettingEnd`
/// (RFC 3339, with RFC 2822 accepted as a fallback) and returns true iff the
/// current time falls within `[start, end]`. A missing bound leaves that side
/// open; an unparseable bound disables the filter.
pub struct TimeWindowFilter;

impl TimeWindowFilter {
    pub const NAME: &'static str = "TimeWindowFilter";
    pub const SETTING_START: &'static str = "TimeWindowFilterSettingStart";
    pub const SETTING_END: &'static str = "TimeWindowFilterSettingEnd";
}

impl FeatureFilter for TimeWindowFilter {
    fn evaluate(&self, parameters: &HashMap<String, Value>) -> bool {
        let now = Utc::now();
        self.evaluate_at(parameters, now)
    }
}

impl TimeWindowFilter {
    fn evaluate_at(&self, parameters: &HashMap<String, Value>, now: DateTime<Utc>) -> bool {
        let start = match bound(parameters, Self::SETTING_START) {
            Ok(start) => start,
            Err(()) => return false,
        };
        let end = match bound(parameters, Self::SETTING_END) {
            Ok(end) => end,
            Err(()) => return false,
        };

        start.is_none_or(|start| now >= start) && end.is_none_or(|end| now <= end)
    }
}

/// A configured-but-unparseable bound is an error; an absent bound is open.
fn bound(parameters: &HashMap<String, Value>, key: &str) -> Result<Option<DateTime<Utc>>, ()> {
    let Some(raw) = parameters.get(key) else {
        return Ok(None);
    };

    match raw.as_str().and_then(parse_timestamp) {
        Some(instant) => Ok(Some(instant)),
        None => {
            warn!(
                "{} has unparseable {}: {}; evaluating to false",
                TimeWindowFilter::NAME,
                key,
                raw
            );
            Err(())
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .ok()
        .map(|instant| instant.with_timezone(&Utc))
}

fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
