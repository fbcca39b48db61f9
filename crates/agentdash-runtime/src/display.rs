use agentdash_core::{ConnectionStatus, StateId};

/// Indicator symbols shared by the full-screen and line output.
pub const INDICATOR_ACTIVE: &str = "●";
pub const INDICATOR_IDLE: &str = "○";
pub const INDICATOR_PENDING: &str = "◌";
pub const INDICATOR_ERROR: &str = "✖";
pub const INDICATOR_SUCCESS: &str = "✔";
pub const INDICATOR_INFO: &str = "·";

pub fn state_indicator(id: StateId) -> &'static str {
    match id {
        StateId::Sleeping => INDICATOR_IDLE,
        _ => INDICATOR_ACTIVE,
    }
}

pub fn connection_indicator(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Live => INDICATOR_ACTIVE,
        ConnectionStatus::Offline => INDICATOR_ERROR,
        ConnectionStatus::Connecting => INDICATOR_PENDING,
    }
}

/// Map a log category to its feed marker.
pub fn kind_indicator(kind: &str) -> &'static str {
    match kind {
        "error" => INDICATOR_ERROR,
        "success" => INDICATOR_SUCCESS,
        _ => INDICATOR_INFO,
    }
}

/// Parse a `#rrggbb` colour token.
pub fn parse_hex_color(token: &str) -> Option<(u8, u8, u8)> {
    let hex = token.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_indicators() {
        assert_eq!(state_indicator(StateId::Sleeping), "○");
        for id in [StateId::Thinking, StateId::Coding, StateId::Searching, StateId::Pushing] {
            assert_eq!(state_indicator(id), "●");
        }
    }

    #[test]
    fn connection_indicators() {
        assert_eq!(connection_indicator(ConnectionStatus::Live), "●");
        assert_eq!(connection_indicator(ConnectionStatus::Offline), "✖");
        assert_eq!(connection_indicator(ConnectionStatus::Connecting), "◌");
    }

    #[test]
    fn kind_indicators() {
        assert_eq!(kind_indicator("error"), "✖");
        assert_eq!(kind_indicator("success"), "✔");
        assert_eq!(kind_indicator("info"), "·");
        assert_eq!(kind_indicator("anything"), "·");
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("#6c5ce7"), Some((0x6c, 0x5c, 0xe7)));
        for id in StateId::ALL {
            assert!(parse_hex_color(id.color()).is_some(), "{id}");
        }
        assert_eq!(parse_hex_color("6c5ce7"), None);
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gggggg"), None);
    }
}
