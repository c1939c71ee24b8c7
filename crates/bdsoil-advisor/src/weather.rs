//! Static weather snapshot.
//!
//! There is no weather service behind this: the advisory screen shows a
//! fixed monsoon-season snapshot.

use serde::Serialize;

/// Current conditions shown on the weather screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeatherSnapshot {
    /// Air temperature.
    pub temperature: &'static str,
    /// Relative humidity.
    pub humidity: &'static str,
    /// Rainfall.
    pub rainfall: &'static str,
    /// Wind speed.
    pub wind_speed: &'static str,
    /// Forecast text.
    pub forecast: &'static str,
}

impl WeatherSnapshot {
    /// The snapshot served to every user.
    pub const fn current() -> Self {
        Self {
            temperature: "32°C",
            humidity: "85%",
            rainfall: "15mm",
            wind_speed: "10 km/h",
            forecast: "Heavy monsoon rains expected",
        }
    }

    /// Labelled fields in display order.
    pub const fn entries(&self) -> [(&'static str, &'static str); 5] {
        [
            ("Temperature", self.temperature),
            ("Humidity", self.humidity),
            ("Rainfall", self.rainfall),
            ("Wind Speed", self.wind_speed),
            ("Forecast", self.forecast),
        ]
    }
}

impl core::fmt::Display for WeatherSnapshot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;
        for (label, value) in self.entries() {
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(f, "{label}: {value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_key_value_lines_in_order() {
        let text = WeatherSnapshot::current().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines.first(), Some(&"Temperature: 32°C"));
        assert_eq!(lines.last(), Some(&"Forecast: Heavy monsoon rains expected"));
    }
}
