//! REPL (Read-Eval-Print Loop) for the console conversation

use crate::output::console::ConsoleTransport;
use boardroom_application::{CommandRouter, InboundEvent};
use boardroom_domain::ConversationId;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

/// One line typed at the prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplInput {
    Empty,
    Quit,
    /// `:<selector>` answering a choice prompt
    Choice(String),
    /// `:caption <text>` simulating media with a caption
    Caption(String),
    /// Anything else, commands included
    Message(String),
}

impl ReplInput {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return ReplInput::Empty;
        }
        let Some(rest) = line.strip_prefix(':') else {
            return ReplInput::Message(line.to_string());
        };
        match rest {
            "q" | "quit" | "exit" => ReplInput::Quit,
            _ => match rest.strip_prefix("caption ") {
                Some(caption) => ReplInput::Caption(caption.trim().to_string()),
                None => ReplInput::Choice(rest.trim().to_string()),
            },
        }
    }
}

/// Interactive console session bound to one conversation
pub struct BoardroomRepl {
    router: Arc<CommandRouter>,
    transport: Arc<ConsoleTransport>,
    conversation: ConversationId,
    history_path: Option<PathBuf>,
}

impl BoardroomRepl {
    pub fn new(
        router: Arc<CommandRouter>,
        transport: Arc<ConsoleTransport>,
        conversation: ConversationId,
    ) -> Self {
        Self {
            router,
            transport,
            conversation,
            history_path: dirs::data_dir().map(|p| p.join("boardroom").join("history.txt")),
        }
    }

    /// Override where typed lines are persisted
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.history_path = path;
        }
        self
    }

    /// Run until EOF or `:quit`
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(ref path) = self.history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = tokio::task::block_in_place(|| rl.readline("boardroom> "));

            match readline {
                Ok(line) => {
                    let input = ReplInput::parse(&line);
                    if input == ReplInput::Empty {
                        continue;
                    }
                    if input == ReplInput::Quit {
                        println!("Bye!");
                        break;
                    }
                    let _ = rl.add_history_entry(line.trim());
                    self.process(input).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    self.save_history(&mut rl);
                    return Err(err);
                }
            }
        }

        self.save_history(&mut rl);
        Ok(())
    }

    fn save_history(&self, rl: &mut DefaultEditor) {
        if let Some(ref path) = self.history_path
            && let Err(e) = rl.save_history(path)
        {
            debug!("Could not save REPL history: {}", e);
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│          Boardroom - Console Session        │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Conversation: {}", self.conversation);
        println!("Type /start for commands, :1 / :2 to answer prompts, :quit to exit.");
        println!();
    }

    /// Translate one input into an event and hand it to the router
    async fn process(&self, input: ReplInput) {
        let event = match input {
            ReplInput::Message(text) => InboundEvent::text(self.conversation, text),
            ReplInput::Caption(caption) => InboundEvent::Message {
                conversation: self.conversation,
                text: None,
                caption: Some(caption),
            },
            ReplInput::Choice(selector) => {
                match self.transport.resolve_choice(self.conversation, &selector) {
                    Some(data) => {
                        self.transport.clear_choices(self.conversation);
                        InboundEvent::choice(self.conversation, data)
                    }
                    None => {
                        println!("{} no choice '{}' is pending", "!".yellow(), selector);
                        return;
                    }
                }
            }
            ReplInput::Empty | ReplInput::Quit => return,
        };

        // A started cycle keeps running in the background; its handle is dropped
        if let Err(e) = self.router.handle(event).await {
            warn!("Failed to deliver reply: {}", e);
            eprintln!("{} {}", "Error:".red().bold(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_messages_and_commands() {
        assert_eq!(ReplInput::parse("   "), ReplInput::Empty);
        assert_eq!(
            ReplInput::parse(" /team cto,cfo budget "),
            ReplInput::Message("/team cto,cfo budget".to_string())
        );
        assert_eq!(
            ReplInput::parse("Should we hedge?"),
            ReplInput::Message("Should we hedge?".to_string())
        );
    }

    #[test]
    fn test_parse_colon_inputs() {
        assert_eq!(ReplInput::parse(":q"), ReplInput::Quit);
        assert_eq!(ReplInput::parse(":quit"), ReplInput::Quit);
        assert_eq!(ReplInput::parse(":2"), ReplInput::Choice("2".to_string()));
        assert_eq!(
            ReplInput::parse(":switch_CFO"),
            ReplInput::Choice("switch_CFO".to_string())
        );
        assert_eq!(
            ReplInput::parse(":caption Oil jumps 5%"),
            ReplInput::Caption("Oil jumps 5%".to_string())
        );
    }
}
