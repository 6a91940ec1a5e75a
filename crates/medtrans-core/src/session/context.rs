//! Conversation context kept per session and replayed into prompts.

use crate::domain::{Exchange, Session};

/// Exchanges retained per session; older ones are evicted first.
pub const MAX_CONTEXT_EXCHANGES: usize = 5;

impl Session {
    fn trim_context(&mut self) {
        let len = self.conversation_context.len();
        if len > MAX_CONTEXT_EXCHANGES {
            self.conversation_context.drain(..len - MAX_CONTEXT_EXCHANGES);
        }
    }

    /// Render retained history as numbered `Original`/`Translation` lines.
    ///
    /// Trims before rendering, so a store that skipped trimming on write
    /// still never leaks more than the last five exchanges.
    pub fn build_prompt_context(&mut self) -> String {
        self.trim_context();

        let mut out = String::new();
        for (i, exchange) in self.conversation_context.iter().enumerate() {
            let n = i + 1;
            out.push_str(&format!("Original ({}): {}\n", n, exchange.original));
            out.push_str(&format!("Translation ({}): {}\n", n, exchange.translation));
        }
        out
    }

    pub fn append_exchange(&mut self, original: impl Into<String>, translation: impl Into<String>) {
        self.conversation_context.push(Exchange::new(original, translation));
        self.trim_context();
    }

    /// Forget all conversation context. Safe to call on an empty session.
    pub fn reset_context(&mut self) {
        self.conversation_context.clear();
    }
}
