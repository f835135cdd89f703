//! Turns a [`WeatherRecord`] into display lines with emoji annotations.
//!
//! All glyph choices come from the static tables below. Thresholds are
//! expressed in metric units; records in other units are normalized first.

use std::{fmt, ops::RangeInclusive};

use crate::{clock::ClockReading, model::WeatherRecord};

pub const TITLE: &str = "What's the weather now 🤔";
pub const LOADING: &str = "Loading weather data...";

/// Upper-exclusive threshold band; the last band of every table is unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Band {
    pub below: f64,
    pub glyph: &'static str,
}

const fn band(below: f64, glyph: &'static str) -> Band {
    Band { below, glyph }
}

/// Degrees Celsius.
pub const TEMPERATURE_BANDS: &[Band] = &[
    band(0.0, "🥶"),
    band(10.0, "🧥"),
    band(20.0, "🙂"),
    band(30.0, "😎"),
    band(f64::INFINITY, "🔥"),
];

/// Relative humidity, percent.
pub const HUMIDITY_BANDS: &[Band] = &[
    band(30.0, "🏜️"),
    band(60.0, "🌿"),
    band(f64::INFINITY, "💦"),
];

/// Hectopascals; values are whole numbers so `1021` makes 1020 inclusive.
pub const PRESSURE_BANDS: &[Band] = &[
    band(1000.0, "🔻"),
    band(1021.0, "🔵"),
    band(f64::INFINITY, "🔺"),
];

/// Metres per second, roughly Beaufort 0-1 / 2-3 / 4-5 / 6-7 / 8+.
pub const WIND_BANDS: &[Band] = &[
    band(1.5, "🍃"),
    band(5.5, "🌬️"),
    band(10.8, "💨"),
    band(17.2, "🌀"),
    band(f64::INFINITY, "🌪️"),
];

/// OpenWeather condition ids; earlier entries win.
const CONDITION_CODES: &[(RangeInclusive<u16>, &str)] = &[
    (511..=511, "🌨️"),
    (781..=781, "🌪️"),
    (200..=299, "⛈️"),
    (300..=399, "🌦️"),
    (500..=599, "🌧️"),
    (600..=699, "❄️"),
    (700..=799, "🌫️"),
    (800..=800, "☀️"),
    (801..=801, "🌤️"),
    (802..=802, "⛅"),
    (803..=804, "☁️"),
];

const CONDITION_KEYWORDS: &[(&str, &str)] = &[
    ("thunder", "⛈️"),
    ("drizzle", "🌦️"),
    ("sleet", "🌨️"),
    ("rain", "🌧️"),
    ("shower", "🌧️"),
    ("snow", "❄️"),
    ("tornado", "🌪️"),
    ("mist", "🌫️"),
    ("fog", "🌫️"),
    ("haze", "🌫️"),
    ("smoke", "🌫️"),
    ("dust", "🌫️"),
    ("clear", "☀️"),
    ("few clouds", "🌤️"),
    ("scattered clouds", "⛅"),
    ("cloud", "☁️"),
];

const UNKNOWN_CONDITION: &str = "🌈";

/// Glyph of the first band `value` falls below; NaN lands in the last band.
fn classify(bands: &'static [Band], value: f64) -> &'static str {
    bands.iter().find(|b| value < b.below).or_else(|| bands.last()).map_or("", |b| b.glyph)
}

pub fn temperature_glyph(celsius: f64) -> &'static str {
    classify(TEMPERATURE_BANDS, celsius)
}

pub fn humidity_glyph(pct: u8) -> &'static str {
    classify(HUMIDITY_BANDS, f64::from(pct))
}

pub fn pressure_glyph(hpa: u32) -> &'static str {
    classify(PRESSURE_BANDS, f64::from(hpa))
}

pub fn wind_glyph(metres_per_second: f64) -> &'static str {
    classify(WIND_BANDS, metres_per_second)
}

/// Glyph for the sky condition: condition id first, then description keywords.
pub fn condition_glyph(code: Option<u16>, description: &str) -> &'static str {
    if let Some(glyph) =
        code.and_then(|c| CONDITION_CODES.iter().find(|(r, _)| r.contains(&c)).map(|(_, g)| *g))
    {
        return glyph;
    }

    let description = description.to_lowercase();
    CONDITION_KEYWORDS
        .iter()
        .find(|(keyword, _)| description.contains(keyword))
        .map(|(_, glyph)| *glyph)
        .unwrap_or(UNKNOWN_CONDITION)
}

/// One labelled field, e.g. `💧 Humidity: 81% 💦`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub icon: &'static str,
    pub label: &'static str,
    pub value: String,
    pub badge: &'static str,
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {} {}", self.icon, self.label, self.value, self.badge)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub heading: String,
    pub date_line: String,
    pub lines: Vec<ReportLine>,
}

impl Report {
    pub fn build(record: &WeatherRecord, clock: &ClockReading) -> Self {
        let units = record.units;
        let temp_suffix = units.temperature_suffix();

        let lines = vec![
            ReportLine {
                icon: "🌡️",
                label: "Temperature",
                value: format!("{}{temp_suffix}", record.temperature),
                badge: temperature_glyph(units.to_celsius(record.temperature)),
            },
            ReportLine {
                icon: "🌤️",
                label: "Description",
                value: record.description.clone(),
                badge: condition_glyph(record.condition_code, &record.description),
            },
            ReportLine {
                icon: "😅",
                label: "Feels like",
                value: format!("{}{temp_suffix}", record.feels_like),
                badge: temperature_glyph(units.to_celsius(record.feels_like)),
            },
            ReportLine {
                icon: "💧",
                label: "Humidity",
                value: format!("{}%", record.humidity_pct),
                badge: humidity_glyph(record.humidity_pct),
            },
            ReportLine {
                icon: "🔵",
                label: "Pressure",
                value: format!("{} hPa", record.pressure_hpa),
                badge: pressure_glyph(record.pressure_hpa),
            },
            ReportLine {
                icon: "🌬️",
                label: "Wind Speed",
                value: format!("{}{}", record.wind_speed, units.speed_suffix()),
                badge: wind_glyph(units.to_metres_per_second(record.wind_speed)),
            },
        ];

        Self { heading: record.city.clone(), date_line: clock_line(clock), lines }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heading)?;
        writeln!(f, "{}", self.date_line)?;
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

pub fn clock_line(reading: &ClockReading) -> String {
    format!("🕒 {}  Current Date: {}", reading.time, reading.date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Units;

    fn record(units: Units) -> WeatherRecord {
        WeatherRecord {
            city: "Paris".into(),
            temperature: 12.5,
            feels_like: 11.8,
            humidity_pct: 81,
            pressure_hpa: 1012,
            wind_speed: 3.6,
            description: "light rain".into(),
            condition_code: Some(500),
            observed_at: None,
            units,
        }
    }

    fn reading() -> ClockReading {
        ClockReading { time: "09:30".into(), date: "Mon Oct 19 2026".into() }
    }

    #[test]
    fn temperature_thresholds() {
        assert_eq!(temperature_glyph(-12.0), "🥶");
        assert_eq!(temperature_glyph(-0.1), "🥶");
        assert_eq!(temperature_glyph(0.0), "🧥");
        assert_eq!(temperature_glyph(9.9), "🧥");
        assert_eq!(temperature_glyph(10.0), "🙂");
        assert_eq!(temperature_glyph(25.0), "😎");
        assert_eq!(temperature_glyph(30.0), "🔥");
    }

    #[test]
    fn humidity_and_pressure_thresholds() {
        assert_eq!(humidity_glyph(0), "🏜️");
        assert_eq!(humidity_glyph(30), "🌿");
        assert_eq!(humidity_glyph(60), "💦");
        assert_eq!(humidity_glyph(100), "💦");

        assert_eq!(pressure_glyph(985), "🔻");
        assert_eq!(pressure_glyph(1000), "🔵");
        assert_eq!(pressure_glyph(1020), "🔵");
        assert_eq!(pressure_glyph(1021), "🔺");
    }

    #[test]
    fn wind_thresholds() {
        assert_eq!(wind_glyph(0.0), "🍃");
        assert_eq!(wind_glyph(1.5), "🌬️");
        assert_eq!(wind_glyph(7.0), "💨");
        assert_eq!(wind_glyph(12.0), "🌀");
        assert_eq!(wind_glyph(25.0), "🌪️");
    }

    #[test]
    fn empty_band_table_has_no_glyph() {
        assert_eq!(classify(&[], 12.0), "");
    }

    #[test]
    fn nan_falls_into_last_band() {
        assert_eq!(temperature_glyph(f64::NAN), "🔥");
    }

    #[test]
    fn condition_code_groups() {
        assert_eq!(condition_glyph(Some(211), ""), "⛈️");
        assert_eq!(condition_glyph(Some(301), ""), "🌦️");
        assert_eq!(condition_glyph(Some(502), ""), "🌧️");
        assert_eq!(condition_glyph(Some(511), ""), "🌨️");
        assert_eq!(condition_glyph(Some(601), ""), "❄️");
        assert_eq!(condition_glyph(Some(741), ""), "🌫️");
        assert_eq!(condition_glyph(Some(781), ""), "🌪️");
        assert_eq!(condition_glyph(Some(800), ""), "☀️");
        assert_eq!(condition_glyph(Some(801), ""), "🌤️");
        assert_eq!(condition_glyph(Some(802), ""), "⛅");
        assert_eq!(condition_glyph(Some(804), ""), "☁️");
    }

    #[test]
    fn condition_falls_back_to_description() {
        assert_eq!(condition_glyph(None, "Heavy Snow"), "❄️");
        assert_eq!(condition_glyph(Some(42), "overcast clouds"), "☁️");
        assert_eq!(condition_glyph(None, "few clouds"), "🌤️");
        assert_eq!(condition_glyph(None, "thunderstorm with rain"), "⛈️");
        assert_eq!(condition_glyph(None, "unknown"), "🌈");
    }

    #[test]
    fn report_lines_follow_tables() {
        let report = Report::build(&record(Units::Metric), &reading());

        assert_eq!(report.heading, "Paris");
        assert_eq!(report.date_line, "🕒 09:30  Current Date: Mon Oct 19 2026");

        let rendered: Vec<String> = report.lines.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "🌡️ Temperature: 12.5°C 🙂",
                "🌤️ Description: light rain 🌧️",
                "😅 Feels like: 11.8°C 🙂",
                "💧 Humidity: 81% 💦",
                "🔵 Pressure: 1012 hPa 🔵",
                "🌬️ Wind Speed: 3.6m/s 🌬️",
            ]
        );
    }

    #[test]
    fn imperial_values_are_normalized_before_banding() {
        let mut rec = record(Units::Imperial);
        rec.temperature = 95.0;
        rec.feels_like = 14.0;
        rec.wind_speed = 30.0;

        let report = Report::build(&rec, &reading());

        assert_eq!(report.lines[0].value, "95°F");
        assert_eq!(report.lines[0].badge, "🔥");
        assert_eq!(report.lines[2].badge, "🥶");
        assert_eq!(report.lines[5].value, "30mph");
        assert_eq!(report.lines[5].badge, "🌀");
    }

    #[test]
    fn kelvin_temperatures_are_normalized() {
        let mut rec = record(Units::Standard);
        rec.temperature = 300.0;

        let report = Report::build(&rec, &reading());
        assert_eq!(report.lines[0].value, "300K");
        assert_eq!(report.lines[0].badge, "😎");
    }

    #[test]
    fn report_display_orders_heading_date_then_fields() {
        let report = Report::build(&record(Units::Metric), &reading());
        let text = report.to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "Paris");
        assert!(lines[1].contains("Current Date"));
        assert!(lines[2].starts_with("🌡️ Temperature"));
    }
}
