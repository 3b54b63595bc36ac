//! Telegram glue: the identity the game runs under, a Game API client,
//! the score bridge, and the webhook router with its context store.

pub mod api;
pub mod bridge;
pub mod router;
pub mod store;

use std::env;

/// Where a finished score can be posted: the game message in a chat, or an
/// inline message. Telegram requires exactly one of the two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreContext {
    Chat { chat_id: i64, message_id: i64 },
    Inline { inline_message_id: String },
}

/// Identity and score target for this run. Assembled once at startup and
/// read-only afterwards; without a token and target the game still runs,
/// the bridge just stays disabled.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub username: String,
    pub user_id: Option<i64>,
    pub score_context: Option<ScoreContext>,
    pub bot_token: Option<String>,
}

impl SessionContext {
    /// A local run with no Telegram identity.
    pub fn guest() -> Self {
        Self {
            username: "guest".to_string(),
            user_id: None,
            score_context: None,
            bot_token: None,
        }
    }

    /// Assemble from the environment the launcher passes through.
    pub fn from_env() -> Self {
        context_from_parts(
            env::var("GOOBI_USERNAME").ok(),
            int_var("GOOBI_USER_ID"),
            int_var("GOOBI_CHAT_ID"),
            int_var("GOOBI_MESSAGE_ID"),
            env::var("GOOBI_INLINE_ID").ok(),
            env::var("TELEGRAM_BOT_TOKEN").ok(),
        )
    }

    /// True when the bridge has everything it needs to talk to Telegram.
    pub fn can_use_telegram(&self) -> bool {
        self.bot_token.is_some() && self.user_id.is_some() && self.score_context.is_some()
    }
}

fn int_var(name: &str) -> Option<i64> {
    env::var(name).ok().and_then(|value| value.parse().ok())
}

/// Pure assembly so the precedence rules are testable without touching the
/// process environment. A chat target wins over an inline one when both
/// halves of the chat reference are present.
fn context_from_parts(
    username: Option<String>,
    user_id: Option<i64>,
    chat_id: Option<i64>,
    message_id: Option<i64>,
    inline_id: Option<String>,
    bot_token: Option<String>,
) -> SessionContext {
    let score_context = match (chat_id, message_id, inline_id) {
        (Some(chat_id), Some(message_id), _) => Some(ScoreContext::Chat {
            chat_id,
            message_id,
        }),
        (_, _, Some(inline_message_id)) => Some(ScoreContext::Inline { inline_message_id }),
        _ => None,
    };
    SessionContext {
        username: username.unwrap_or_else(|| "guest".to_string()),
        user_id,
        score_context,
        bot_token,
    }
}
