//! Pure webhook routing: updates in, declarative actions out. Context
//! caching happens here, so the executor stays a thin API shim and the
//! whole flow is testable without HTTP.

use crate::telegram::api::{Update, GAME_SHORT_NAME, GAME_URL};
use crate::telegram::store::ContextStore;
use crate::telegram::ScoreContext;

/// An API call the executor should make for a routed update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAction {
    /// Send the game message into a chat. Once sent, report the new
    /// message back through [`note_game_sent`] so scores can find it.
    SendGame { chat_id: i64, user_id: i64 },
    AnswerGameQuery { query_id: String, url: String },
    AnswerUnknownGame { query_id: String },
    AnswerInlineQuery { query_id: String },
}

/// `/start`, alone or with a bot mention or trailing arguments.
fn is_start_command(text: &str) -> bool {
    let text = text.trim();
    text == "/start" || text.starts_with("/start@") || text.starts_with("/start ")
}

/// Map one update to the API calls it requires, caching inline score
/// targets as a side effect.
pub fn route_update(update: &Update, store: &mut dyn ContextStore) -> Vec<RouteAction> {
    let mut actions = Vec::new();

    if let Some(message) = &update.message {
        if message.text.as_deref().map_or(false, is_start_command) {
            let user_id = message
                .from
                .as_ref()
                .map(|user| user.id)
                .unwrap_or(message.chat.id);
            actions.push(RouteAction::SendGame {
                chat_id: message.chat.id,
                user_id,
            });
        }
    }

    if let Some(query) = &update.callback_query {
        if query.game_short_name.as_deref() == Some(GAME_SHORT_NAME) {
            actions.push(RouteAction::AnswerGameQuery {
                query_id: query.id.clone(),
                url: GAME_URL.to_string(),
            });
        } else {
            actions.push(RouteAction::AnswerUnknownGame {
                query_id: query.id.clone(),
            });
        }
    }

    if let Some(query) = &update.inline_query {
        actions.push(RouteAction::AnswerInlineQuery {
            query_id: query.id.clone(),
        });
    }

    if let Some(chosen) = &update.chosen_inline_result {
        if let Some(inline_message_id) = &chosen.inline_message_id {
            store.put(
                chosen.from.id,
                ScoreContext::Inline {
                    inline_message_id: inline_message_id.clone(),
                },
            );
        }
    }

    actions
}

/// Record where the game message for `user_id` ended up, so later score
/// posts target it.
pub fn note_game_sent(store: &mut dyn ContextStore, user_id: i64, chat_id: i64, message_id: i64) {
    store.put(
        user_id,
        ScoreContext::Chat {
            chat_id,
            message_id,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telegram::store::MemoryContextStore;
    use serde_json::json;

    fn update(value: serde_json::Value) -> Update {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_start_command_matching() {
        assert!(is_start_command("/start"));
        assert!(is_start_command("  /start  "));
        assert!(is_start_command("/start@GoobiBot"));
        assert!(is_start_command("/start again"));
        assert!(!is_start_command("/started"));
        assert!(!is_start_command("start"));
        assert!(!is_start_command("hello"));
    }

    #[test]
    fn test_start_message_requests_send_game() {
        let mut store = MemoryContextStore::new();
        let actions = route_update(
            &update(json!({
                "update_id": 1,
                "message": {
                    "message_id": 10,
                    "chat": { "id": -200 },
                    "from": { "id": 42, "first_name": "Ada" },
                    "text": "/start"
                }
            })),
            &mut store,
        );

        assert_eq!(
            actions,
            vec![RouteAction::SendGame {
                chat_id: -200,
                user_id: 42
            }]
        );
        // Nothing cached until the game message actually goes out
        assert!(store.get(42).is_none());
    }

    #[test]
    fn test_non_command_message_routes_nowhere() {
        let mut store = MemoryContextStore::new();
        let actions = route_update(
            &update(json!({
                "update_id": 2,
                "message": {
                    "message_id": 11,
                    "chat": { "id": -200 },
                    "text": "good morning"
                }
            })),
            &mut store,
        );

        assert!(actions.is_empty());
    }

    #[test]
    fn test_game_callback_answers_with_url() {
        let mut store = MemoryContextStore::new();
        let actions = route_update(
            &update(json!({
                "update_id": 3,
                "callback_query": {
                    "id": "cb-1",
                    "from": { "id": 42 },
                    "game_short_name": "goobi"
                }
            })),
            &mut store,
        );

        assert_eq!(
            actions,
            vec![RouteAction::AnswerGameQuery {
                query_id: "cb-1".to_string(),
                url: GAME_URL.to_string()
            }]
        );
    }

    #[test]
    fn test_foreign_callback_gets_alert() {
        let mut store = MemoryContextStore::new();
        let actions = route_update(
            &update(json!({
                "update_id": 4,
                "callback_query": {
                    "id": "cb-2",
                    "from": { "id": 42 },
                    "game_short_name": "tetris"
                }
            })),
            &mut store,
        );

        assert_eq!(
            actions,
            vec![RouteAction::AnswerUnknownGame {
                query_id: "cb-2".to_string()
            }]
        );
    }

    #[test]
    fn test_inline_query_offers_the_game() {
        let mut store = MemoryContextStore::new();
        let actions = route_update(
            &update(json!({
                "update_id": 5,
                "inline_query": { "id": "iq-1", "from": { "id": 42 } }
            })),
            &mut store,
        );

        assert_eq!(
            actions,
            vec![RouteAction::AnswerInlineQuery {
                query_id: "iq-1".to_string()
            }]
        );
    }

    #[test]
    fn test_chosen_inline_result_caches_target() {
        let mut store = MemoryContextStore::new();
        let actions = route_update(
            &update(json!({
                "update_id": 6,
                "chosen_inline_result": {
                    "result_id": "goobi_game_inline",
                    "from": { "id": 42 },
                    "inline_message_id": "inline-9"
                }
            })),
            &mut store,
        );

        assert!(actions.is_empty());
        assert_eq!(
            store.get(42),
            Some(&ScoreContext::Inline {
                inline_message_id: "inline-9".to_string()
            })
        );
    }

    #[test]
    fn test_note_game_sent_caches_chat_target() {
        let mut store = MemoryContextStore::new();
        note_game_sent(&mut store, 42, -200, 777);

        assert_eq!(
            store.get(42),
            Some(&ScoreContext::Chat {
                chat_id: -200,
                message_id: 777
            })
        );
    }
}
