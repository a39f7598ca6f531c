//! Console transport
//!
//! Renders replies on the terminal and remembers the last choice prompt so
//! the REPL can resolve `:1`-style answers.

use async_trait::async_trait;
use boardroom_application::{Choice, ReplyChannel, ReplyError};
use boardroom_domain::ConversationId;
use colored::Colorize;
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// [`ReplyChannel`] that prints to a terminal
pub struct ConsoleTransport {
    documents_dir: PathBuf,
    pending: Mutex<HashMap<ConversationId, Vec<Choice>>>,
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleTransport {
    /// Print to stdout; exported documents land in `documents_dir`
    pub fn new(documents_dir: impl Into<PathBuf>) -> Self {
        Self::with_writer(documents_dir, Box::new(io::stdout()))
    }

    pub fn with_writer(documents_dir: impl Into<PathBuf>, out: Box<dyn Write + Send>) -> Self {
        Self {
            documents_dir: documents_dir.into(),
            pending: Mutex::new(HashMap::new()),
            out: Mutex::new(out),
        }
    }

    pub fn documents_dir(&self) -> &Path {
        &self.documents_dir
    }

    /// Choices of the last prompt shown in `conversation`
    pub fn pending_choices(&self, conversation: ConversationId) -> Vec<Choice> {
        self.pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&conversation)
            .cloned()
            .unwrap_or_default()
    }

    /// Map a typed selector to choice data.
    ///
    /// A number picks the n-th pending choice (1-based). Anything else is
    /// passed through as raw data.
    pub fn resolve_choice(&self, conversation: ConversationId, selector: &str) -> Option<String> {
        let selector = selector.trim();
        if selector.is_empty() {
            return None;
        }
        match selector.parse::<usize>() {
            Ok(index) => self
                .pending_choices(conversation)
                .get(index.checked_sub(1)?)
                .map(|choice| choice.data.clone()),
            Err(_) => Some(selector.to_string()),
        }
    }

    /// Forget the pending prompt once it has been answered
    pub fn clear_choices(&self, conversation: ConversationId) {
        self.pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&conversation);
    }

    fn write_block(&self, block: &str) -> Result<(), ReplyError> {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        writeln!(out)?;
        writeln!(out, "{}", block)?;
        out.flush()?;
        Ok(())
    }

    fn render_choices(prompt: &str, choices: &[Choice]) -> String {
        let mut output = format!("{}", prompt.bold());
        for (index, choice) in choices.iter().enumerate() {
            output.push_str(&format!(
                "\n  {} {}  {}",
                format!("[{}]", index + 1).cyan().bold(),
                choice.label,
                format!("(:{})", choice.data).dimmed()
            ));
        }
        output
    }
}

#[async_trait]
impl ReplyChannel for ConsoleTransport {
    async fn send_text(&self, conversation: ConversationId, text: &str) -> Result<(), ReplyError> {
        debug!(%conversation, chars = text.len(), "Printing reply");
        self.write_block(text)
    }

    async fn send_choices(
        &self,
        conversation: ConversationId,
        prompt: &str,
        choices: Vec<Choice>,
    ) -> Result<(), ReplyError> {
        let block = Self::render_choices(prompt, &choices);
        self.pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(conversation, choices);
        self.write_block(&block)
    }

    async fn send_document(
        &self,
        conversation: ConversationId,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ReplyError> {
        // Keep only the final component of the suggested name
        let file_name = Path::new(file_name)
            .file_name()
            .ok_or_else(|| ReplyError::Delivery(format!("invalid file name: {file_name}")))?;
        let path = self.documents_dir.join(file_name);

        tokio::fs::create_dir_all(&self.documents_dir).await?;
        tokio::fs::write(&path, bytes).await?;
        debug!(%conversation, path = %path.display(), "Document written");

        self.write_block(&format!(
            "{} {}",
            "Saved:".green().bold(),
            path.display()
        ))
    }
}
