//! Best-effort score exchange with Telegram, kept off the simulation
//! thread. Submission fires once per run; fetches retry briefly and then
//! fall back to an empty board.

use std::error::Error;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use crate::telegram::api::{GameHighScore, TelegramClient};
use crate::telegram::{ScoreContext, SessionContext};

const FETCH_ATTEMPTS: u32 = 3;
const FETCH_RETRY_DELAY: Duration = Duration::from_millis(500);
/// The scoreboard shows at most this many rows.
pub const LEADERBOARD_LIMIT: usize = 10;

/// What became of a score submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Telegram recorded the new score.
    Posted,
    /// An equal or higher score was already on the board. Success.
    NotModified,
    Failed(String),
}

/// The board leader, as shown on the start and game-over screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScore {
    pub score: u32,
    pub holder: String,
}

impl Default for HighScore {
    fn default() -> Self {
        Self {
            score: 0,
            holder: "None".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub username: String,
    pub score: u32,
}

/// Everything the game-over screen wants from Telegram, delivered once.
#[derive(Debug, Clone)]
pub struct ScoreboardUpdate {
    pub submit: SubmitOutcome,
    pub high_score: HighScore,
    pub leaderboard: Vec<LeaderboardEntry>,
}

pub fn submit_score(
    client: &TelegramClient,
    user_id: i64,
    score: u32,
    target: &ScoreContext,
) -> SubmitOutcome {
    match client.set_game_score(user_id, score, target) {
        Ok(true) => SubmitOutcome::Posted,
        Ok(false) => SubmitOutcome::NotModified,
        Err(err) => SubmitOutcome::Failed(err.to_string()),
    }
}

pub fn fetch_high_score(client: &TelegramClient, user_id: i64, target: &ScoreContext) -> HighScore {
    match fetch_scores_with_retry(client, user_id, target) {
        Ok(rows) => leader_of(&rows),
        Err(err) => {
            eprintln!("High score fetch failed: {}", err);
            HighScore::default()
        }
    }
}

pub fn fetch_leaderboard(
    client: &TelegramClient,
    user_id: i64,
    target: &ScoreContext,
) -> Vec<LeaderboardEntry> {
    match fetch_scores_with_retry(client, user_id, target) {
        Ok(rows) => board_of(&rows),
        Err(err) => {
            eprintln!("Leaderboard fetch failed: {}", err);
            Vec::new()
        }
    }
}

fn fetch_scores_with_retry(
    client: &TelegramClient,
    user_id: i64,
    target: &ScoreContext,
) -> Result<Vec<GameHighScore>, Box<dyn Error>> {
    let mut last_err: Option<Box<dyn Error>> = None;
    for attempt in 1..=FETCH_ATTEMPTS {
        match client.get_game_high_scores(user_id, target) {
            Ok(rows) => return Ok(rows),
            Err(err) => {
                eprintln!(
                    "getGameHighScores attempt {}/{} failed: {}",
                    attempt, FETCH_ATTEMPTS, err
                );
                last_err = Some(err);
                if attempt < FETCH_ATTEMPTS {
                    thread::sleep(FETCH_RETRY_DELAY);
                }
            }
        }
    }
    Err(last_err.unwrap_or_else(|| "no attempts made".into()))
}

/// First row of the board, or the empty-board placeholder.
fn leader_of(rows: &[GameHighScore]) -> HighScore {
    rows.first()
        .map(|row| HighScore {
            score: row.score.max(0) as u32,
            holder: row.user.display_name(),
        })
        .unwrap_or_default()
}

/// Upstream rows in upstream order, truncated for display.
fn board_of(rows: &[GameHighScore]) -> Vec<LeaderboardEntry> {
    rows.iter()
        .take(LEADERBOARD_LIMIT)
        .map(|row| LeaderboardEntry {
            username: row.user.display_name(),
            score: row.score.max(0) as u32,
        })
        .collect()
}

/// Run the game-over exchange in the background: post the score, then
/// fetch the refreshed board. Returns None when the context cannot talk
/// to Telegram; otherwise the receiver yields exactly one update.
pub fn spawn_game_over_exchange(
    context: &SessionContext,
    score: u32,
) -> Option<Receiver<ScoreboardUpdate>> {
    let token = context.bot_token.clone()?;
    let user_id = context.user_id?;
    let target = context.score_context.clone()?;
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let client = TelegramClient::new(token);
        let submit = submit_score(&client, user_id, score, &target);
        if let SubmitOutcome::Failed(reason) = &submit {
            eprintln!("Score submission failed: {}", reason);
        }
        let high_score = fetch_high_score(&client, user_id, &target);
        let leaderboard = fetch_leaderboard(&client, user_id, &target);
        // The receiver is gone if the player already restarted
        let _ = tx.send(ScoreboardUpdate {
            submit,
            high_score,
            leaderboard,
        });
    });

    Some(rx)
}

/// Fetch the current board leader in the background for the start screen.
pub fn spawn_high_score_fetch(context: &SessionContext) -> Option<Receiver<HighScore>> {
    let token = context.bot_token.clone()?;
    let user_id = context.user_id?;
    let target = context.score_context.clone()?;
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let client = TelegramClient::new(token);
        let _ = tx.send(fetch_high_score(&client, user_id, &target));
    });

    Some(rx)
}
