use forecast_core::CurrentWeather;

/// Plain-text block for the terminal.
pub fn render(weather: &CurrentWeather) -> String {
    let mut out = format!("{} [{}]\n", weather.summary, weather.icon_id);

    let rows = [
        ("Temperature", &weather.temperature),
        ("Wind", &weather.wind_info),
        ("Humidity", &weather.humidity),
        ("Pressure", &weather.pressure),
        ("Visibility", &weather.visibility),
        ("Updated", &weather.last_updated),
    ];
    for (label, value) in rows {
        out.push_str(&format!("  {label:<12}{value}\n"));
    }

    out.push('\n');
    for day in &weather.forecast {
        out.push_str(&format!("  {:<8}{:>6}  {}\n", day.date, day.temperature, day.icon_id));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecast_core::{DayForecast, IconId};

    fn weather() -> CurrentWeather {
        CurrentWeather {
            icon_id: IconId::PartlyCloudyDay,
            summary: "Partly Cloudy".into(),
            temperature: "21ºC".into(),
            last_updated: "10:13".into(),
            wind_info: "12km/h E | 19ºC".into(),
            humidity: "55%".into(),
            pressure: "1013hPa".into(),
            visibility: "9km".into(),
            forecast: vec![
                DayForecast { icon_id: IconId::Rain, temperature: "15ºC".into(), date: "14 Nov".into() },
                DayForecast {
                    icon_id: IconId::Unknown,
                    temperature: "-2ºC".into(),
                    date: "15 Nov".into(),
                },
            ],
        }
    }

    #[test]
    fn renders_header_and_rows() {
        let text = render(&weather());
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "Partly Cloudy [partly-cloudy-day]");
        assert_eq!(lines[1], "  Temperature 21ºC");
        assert_eq!(lines[2], "  Wind        12km/h E | 19ºC");
        assert!(lines.contains(&"  Updated     10:13"));
    }

    #[test]
    fn renders_days_in_order() {
        let text = render(&weather());
        let days: Vec<_> = text.lines().filter(|l| l.contains(" Nov")).collect();

        assert_eq!(days.len(), 2);
        assert!(days[0].starts_with("  14 Nov"));
        assert!(days[0].ends_with("rain"));
        assert!(days[1].ends_with("unknown"));
    }

    #[test]
    fn every_line_ends_with_newline() {
        let text = render(&weather());

        assert!(text.ends_with('\n'));
        assert_eq!(text.lines().count(), 1 + 6 + 1 + 2);
        assert_eq!(text.lines().nth(7), Some(""));
    }
}
