const ICON_BASE_URL: &str = "http://openweathermap.org/img/wn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSize {
    Small,
    /// The `@4x` variant.
    Large,
}

pub fn icon_url(icon: &str, size: IconSize) -> String {
    match size {
        IconSize::Small => format!("{ICON_BASE_URL}/{icon}.png"),
        IconSize::Large => format!("{ICON_BASE_URL}/{icon}@4x.png"),
    }
}

/// Terminal stand-in for an OpenWeather icon id such as `10d`.
pub fn icon_glyph(icon: &str) -> &'static str {
    let night = icon.ends_with('n');
    match icon.get(..2) {
        Some("01") if night => "🌙",
        Some("01") => "☀",
        Some("02") => "🌤",
        Some("03" | "04") => "☁",
        Some("09") => "🌧",
        Some("10") => "🌦",
        Some("11") => "⛈",
        Some("13") => "❄",
        Some("50") => "🌫",
        _ => "?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_for_both_sizes() {
        assert_eq!(icon_url("10d", IconSize::Small), "http://openweathermap.org/img/wn/10d.png");
        assert_eq!(
            icon_url("10d", IconSize::Large),
            "http://openweathermap.org/img/wn/10d@4x.png"
        );
    }

    #[test]
    fn glyphs_distinguish_clear_day_and_night() {
        assert_eq!(icon_glyph("01d"), "☀");
        assert_eq!(icon_glyph("01n"), "🌙");
        assert_eq!(icon_glyph("13d"), "❄");
    }

    #[test]
    fn unknown_icon_gets_placeholder() {
        assert_eq!(icon_glyph(""), "?");
        assert_eq!(icon_glyph("99x"), "?");
    }
}
