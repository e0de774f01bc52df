/// Bot commands recognized in any auth state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Reset the session and show the welcome / auth prompt.
    Start,
    /// Clear history and authentication.
    Reset,
    /// Static help text.
    Help,
    /// Any other `/word`; carries the lowercased name without the slash.
    Unknown(String),
}

impl Command {
    /// Parses `/name`, `/name@botname` or `/name args...`. Returns None for plain text.
    pub fn parse(text: &str) -> Option<Command> {
        let first = text.trim_start().split_whitespace().next()?;
        let name = first.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or_default().to_lowercase();
        if name.is_empty() {
            return None;
        }
        Some(match name.as_str() {
            "start" => Command::Start,
            "reset" => Command::Reset,
            "help" => Command::Help,
            _ => Command::Unknown(name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_commands() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("  /reset  "), Some(Command::Reset));
        assert_eq!(Command::parse("/HELP"), Some(Command::Help));
        assert_eq!(Command::parse("/start@chatgate_bot"), Some(Command::Start));
        assert_eq!(Command::parse("/start deep-link-payload"), Some(Command::Start));
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(
            Command::parse("/weather today"),
            Some(Command::Unknown("weather".to_string()))
        );
    }

    #[test]
    fn test_parse_plain_text_is_not_a_command() {
        assert_eq!(Command::parse("hello /start"), None);
        assert_eq!(Command::parse("sk-ant-abc"), None);
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("/"), None);
        assert_eq!(Command::parse("/@bot"), None);
    }
}
