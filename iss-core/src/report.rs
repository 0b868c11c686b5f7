//! Renders the resolved IP, location, and pass windows into the final
//! human-readable report. Pure string work, no I/O.

use chrono::{DateTime, Utc};
use serde::de::Error as _;

use crate::{
    error::FetchError,
    model::{Location, PassWindow},
};

/// Format string matching the upstream convention of GMT-suffixed
/// calendar timestamps, e.g. `Fri, 01 Jan 2021 00:00:00 GMT`.
const GMT_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// One pass as a report line: UTC rise time, then minutes and seconds of
/// visibility.
fn pass_line(pass: &PassWindow) -> Result<String, FetchError> {
    let minutes = pass.duration_secs / 60;
    let seconds = pass.duration_secs % 60;

    // A rise time chrono cannot represent is a malformed upstream payload,
    // not a pre-flight validation failure.
    let rise = DateTime::<Utc>::from_timestamp(pass.rise_time, 0).ok_or_else(|| {
        FetchError::Parse(serde_json::Error::custom(format!(
            "rise time {} is out of range",
            pass.rise_time
        )))
    })?;

    Ok(format!(
        "{} for {minutes} minutes {seconds} seconds",
        rise.format(GMT_FORMAT)
    ))
}

/// Assemble the full report. Fails only on a rise time that does not map to
/// a representable date; well-formed input always renders.
pub fn render(ip: &str, location: &Location, passes: &[PassWindow]) -> Result<String, FetchError> {
    let city = location.city.as_deref().unwrap_or("unknown");
    let country = location.country.as_deref().unwrap_or("unknown");

    let mut out = format!("Your IP address is {ip}\n");
    out.push_str(&format!(
        "This means you are located in {city}, {country}, latitude {}, longitude {}\n",
        location.latitude, location.longitude
    ));
    out.push_str(
        "According to NASA's data, the International Space Station will appear over your location at these times:\n",
    );
    out.push_str("(Note: the upstream APIs report no time zone, so these are GMT times)\n\n");

    for pass in passes {
        out.push_str(&pass_line(pass)?);
        out.push('\n');
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mountain_view() -> Location {
        serde_json::from_str(
            r#"{"latitude": 37.4, "longitude": -122.1,
                "city_name": "Mountain View", "country_name": "US"}"#,
        )
        .unwrap()
    }

    #[test]
    fn pass_line_splits_duration_and_renders_gmt() {
        let line = pass_line(&PassWindow {
            rise_time: 1_609_459_200,
            duration_secs: 125,
        })
        .unwrap();

        // 1609459200 is 2021-01-01 00:00:00 UTC, a Friday.
        assert_eq!(line, "Fri, 01 Jan 2021 00:00:00 GMT for 2 minutes 5 seconds");
    }

    #[test]
    fn render_includes_location_line_and_passes_in_order() {
        let passes = [
            PassWindow { rise_time: 1_700_000_000, duration_secs: 600 },
            PassWindow { rise_time: 1_700_005_000, duration_secs: 65 },
        ];

        let report = render("8.8.8.8", &mountain_view(), &passes).unwrap();

        assert!(report.starts_with("Your IP address is 8.8.8.8\n"));
        assert!(report.contains(
            "This means you are located in Mountain View, US, latitude 37.4, longitude -122.1"
        ));

        let lines: Vec<&str> = report.lines().collect();
        // 1700000000 is 2023-11-14 22:13:20 UTC, a Tuesday.
        assert_eq!(lines[5], "Tue, 14 Nov 2023 22:13:20 GMT for 10 minutes 0 seconds");
        assert!(lines[6].ends_with("for 1 minutes 5 seconds"));
    }

    #[test]
    fn render_is_idempotent() {
        let passes = [PassWindow { rise_time: 1_700_000_000, duration_secs: 600 }];
        let loc = mountain_view();

        let a = render("8.8.8.8", &loc, &passes).unwrap();
        let b = render("8.8.8.8", &loc, &passes).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn render_falls_back_when_city_and_country_are_absent() {
        let loc: Location =
            serde_json::from_str(r#"{"latitude": 0.0, "longitude": 0.0}"#).unwrap();

        let report = render("1.2.3.4", &loc, &[]).unwrap();
        assert!(report.contains("located in unknown, unknown, latitude 0, longitude 0"));
    }

    #[test]
    fn out_of_range_rise_time_is_a_parse_error() {
        let err = pass_line(&PassWindow { rise_time: i64::MAX, duration_secs: 60 }).unwrap_err();

        assert!(matches!(err, FetchError::Parse(_)));
        assert!(err.to_string().contains("out of range"));
    }
}
