//! Inbound events and command parsing

use boardroom_domain::{split_first_token, ConversationId};

/// Something the user did in a conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// A message; `caption` is the caption of attached media, if any
    Message {
        conversation: ConversationId,
        text: Option<String>,
        caption: Option<String>,
    },
    /// The user picked one of the choices of an interactive prompt
    Choice {
        conversation: ConversationId,
        data: String,
    },
}

impl InboundEvent {
    /// A plain text message
    pub fn text(conversation: ConversationId, text: impl Into<String>) -> Self {
        InboundEvent::Message {
            conversation,
            text: Some(text.into()),
            caption: None,
        }
    }

    pub fn choice(conversation: ConversationId, data: impl Into<String>) -> Self {
        InboundEvent::Choice {
            conversation,
            data: data.into(),
        }
    }
}

/// A `/`-prefixed command; `None` arguments mean the command came bare
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Chat(Option<String>),
    Ask(Option<String>),
    Team(Option<String>),
    Stop,
    Language(Option<String>),
    Switch(Option<String>),
    Current,
    History,
    Clear,
    Depth(Option<String>),
    Export,
    Stats,
    Search(Option<String>),
    Filter(Option<String>),
    AdminStats,
    News,
    Exit,
    Unknown(String),
}

impl Command {
    /// Parse a message as a command. Returns `None` for plain text.
    ///
    /// Only the first token names the command; a `@botname` suffix is
    /// ignored and the rest of the text becomes the argument.
    pub fn parse(text: &str) -> Option<Command> {
        let (token, rest) = split_first_token(text)?;
        let name = token.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or(name).to_lowercase();
        let args = (!rest.is_empty()).then(|| rest.to_string());

        Some(match name.as_str() {
            "start" => Command::Start,
            "chat" => Command::Chat(args),
            "ask" => Command::Ask(args),
            "team" => Command::Team(args),
            "stop" => Command::Stop,
            "language" => Command::Language(args),
            "switch" => Command::Switch(args),
            "current" => Command::Current,
            "history" => Command::History,
            "clear" => Command::Clear,
            "depth" => Command::Depth(args),
            "export" => Command::Export,
            "stats" => Command::Stats,
            "search" => Command::Search(args),
            "filter" => Command::Filter(args),
            "admin_stats" => Command::AdminStats,
            "news" => Command::News,
            "exit" => Command::Exit,
            _ => Command::Unknown(token.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(Command::parse("hello /chat"), None);
        assert_eq!(Command::parse("   "), None);
    }

    #[test]
    fn test_arguments_follow_first_token() {
        assert_eq!(
            Command::parse("/chat  bond market outlook "),
            Some(Command::Chat(Some("bond market outlook".to_string())))
        );
        assert_eq!(Command::parse("/chat"), Some(Command::Chat(None)));
        assert_eq!(
            Command::parse("/team CEO,CTO new strategy"),
            Some(Command::Team(Some("CEO,CTO new strategy".to_string())))
        );
    }

    #[test]
    fn test_bot_suffix_is_stripped() {
        assert_eq!(Command::parse("/stop@hedge_bot"), Some(Command::Stop));
        assert_eq!(
            Command::parse("/depth@hedge_bot 7"),
            Some(Command::Depth(Some("7".to_string())))
        );
    }

    #[test]
    fn test_unknown_command_keeps_token() {
        assert_eq!(
            Command::parse("/dance now"),
            Some(Command::Unknown("/dance".to_string()))
        );
    }
}
