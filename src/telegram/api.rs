//! Thin client for the Bot API Game methods, plus the DTOs webhook
//! updates parse into. Calls are blocking; callers keep them off the
//! simulation thread.

use std::error::Error;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::telegram::ScoreContext;

/// Short name the game is registered under with BotFather.
pub const GAME_SHORT_NAME: &str = "goobi";
/// The hosted game page callback answers launch.
pub const GAME_URL: &str = "https://goobi.vercel.app";

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub callback_query: Option<CallbackQuery>,
    #[serde(default)]
    pub inline_query: Option<InlineQuery>,
    #[serde(default)]
    pub chosen_inline_result: Option<ChosenInlineResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub from: Option<User>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
}

impl User {
    /// Handle first, then first name, then a fixed fallback.
    pub fn display_name(&self) -> String {
        self.username
            .clone()
            .or_else(|| self.first_name.clone())
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    #[serde(default)]
    pub game_short_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InlineQuery {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChosenInlineResult {
    pub from: User,
    #[serde(default)]
    pub inline_message_id: Option<String>,
}

/// One row of a getGameHighScores reply, best first.
#[derive(Debug, Clone, Deserialize)]
pub struct GameHighScore {
    pub score: i64,
    pub user: User,
}

/// Telegram's standard response wrapper. Absent fields decode to `None`,
/// so error replies parse for any `T`.
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

impl<T> ApiEnvelope<T> {
    fn into_result(self, method: &str) -> Result<Option<T>, Box<dyn Error>> {
        if self.ok {
            Ok(self.result)
        } else {
            Err(format!(
                "{} failed: {}",
                method,
                self.description
                    .unwrap_or_else(|| "no description".to_string())
            )
            .into())
        }
    }
}

/// The harmless rejection Telegram sends when the posted score does not
/// beat the one already on the board.
fn is_not_modified(description: Option<&str>) -> bool {
    description.map_or(false, |d| d.contains("BOT_SCORE_NOT_MODIFIED"))
}

pub struct TelegramClient {
    token: String,
}

impl TelegramClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        payload: Value,
    ) -> Result<ApiEnvelope<T>, Box<dyn Error>> {
        let url = format!("https://api.telegram.org/bot{}/{}", self.token, method);
        let response = match ureq::post(&url).set("User-Agent", "goobi").send_json(payload) {
            Ok(response) => response,
            // Telegram puts its error envelope in the body of non-2xx
            // replies; read it instead of dropping it
            Err(ureq::Error::Status(_, response)) => response,
            Err(err) => return Err(err.into()),
        };
        Ok(response.into_json()?)
    }

    /// Post a finished score against the targeted game message. Returns
    /// false when Telegram kept an equal or higher score already on the
    /// board, which still counts as success.
    pub fn set_game_score(
        &self,
        user_id: i64,
        score: u32,
        target: &ScoreContext,
    ) -> Result<bool, Box<dyn Error>> {
        let mut payload = json!({
            "user_id": user_id,
            "score": score,
            "edit_message": true,
        });
        apply_target(&mut payload, target);

        let envelope: ApiEnvelope<Value> = self.call("setGameScore", payload)?;
        if !envelope.ok && is_not_modified(envelope.description.as_deref()) {
            return Ok(false);
        }
        envelope.into_result("setGameScore")?;
        Ok(true)
    }

    /// Fetch the scoreboard for the targeted game message.
    pub fn get_game_high_scores(
        &self,
        user_id: i64,
        target: &ScoreContext,
    ) -> Result<Vec<GameHighScore>, Box<dyn Error>> {
        let mut payload = json!({ "user_id": user_id });
        apply_target(&mut payload, target);

        let envelope: ApiEnvelope<Vec<GameHighScore>> =
            self.call("getGameHighScores", payload)?;
        Ok(envelope.into_result("getGameHighScores")?.unwrap_or_default())
    }

    /// Send the game message into a chat. Returns the sent message so the
    /// caller can remember where this user's scores should be posted.
    pub fn send_game(&self, chat_id: i64) -> Result<Message, Box<dyn Error>> {
        let payload = json!({
            "chat_id": chat_id,
            "game_short_name": GAME_SHORT_NAME,
        });
        let envelope: ApiEnvelope<Message> = self.call("sendGame", payload)?;
        let message = envelope
            .into_result("sendGame")?
            .ok_or("sendGame returned no message")?;
        Ok(message)
    }

    /// Answer a game callback with the launch URL.
    pub fn answer_game_query(&self, query_id: &str, url: &str) -> Result<(), Box<dyn Error>> {
        let payload = json!({
            "callback_query_id": query_id,
            "url": url,
        });
        let envelope: ApiEnvelope<bool> = self.call("answerCallbackQuery", payload)?;
        envelope.into_result("answerCallbackQuery")?;
        Ok(())
    }

    /// Answer a callback for a short name that is not ours.
    pub fn answer_unknown_game(&self, query_id: &str) -> Result<(), Box<dyn Error>> {
        let payload = json!({
            "callback_query_id": query_id,
            "text": "Unknown game short name",
            "show_alert": true,
        });
        let envelope: ApiEnvelope<bool> = self.call("answerCallbackQuery", payload)?;
        envelope.into_result("answerCallbackQuery")?;
        Ok(())
    }

    /// Offer the one game result for an inline query.
    pub fn answer_inline_query(&self, query_id: &str) -> Result<(), Box<dyn Error>> {
        let payload = json!({
            "inline_query_id": query_id,
            "results": [{
                "type": "game",
                "id": "goobi_game_inline",
                "game_short_name": GAME_SHORT_NAME,
            }],
        });
        let envelope: ApiEnvelope<bool> = self.call("answerInlineQuery", payload)?;
        envelope.into_result("answerInlineQuery")?;
        Ok(())
    }
}

/// Fill in whichever message reference the context carries.
fn apply_target(payload: &mut Value, target: &ScoreContext) {
    match target {
        ScoreContext::Chat {
            chat_id,
            message_id,
        } => {
            payload["chat_id"] = json!(chat_id);
            payload["message_id"] = json!(message_id);
        }
        ScoreContext::Inline { inline_message_id } => {
            payload["inline_message_id"] = json!(inline_message_id);
        }
    }
}
