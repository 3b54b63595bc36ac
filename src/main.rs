mod constants;
mod game;
mod storage;
mod telegram;
mod ui;
mod util;

use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use game::input::{GameKey, InputController, InputEvent};
use game::session::GameSession;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, BufRead};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};
use telegram::api::{TelegramClient, Update};
use telegram::bridge::{self, ScoreboardUpdate};
use telegram::router::{self, RouteAction};
use telegram::store::MemoryContextStore;
use telegram::SessionContext;
use ui::game_scene::render_game;
use ui::over_scene::{render_over, BridgeStatus};
use ui::start_scene::render_start;
use ui::Hud;

/// Terminals without the keyboard enhancement protocol never report key
/// releases. A key with no press or repeat for this long counts as released.
const HOLD_RELEASE_TIMEOUT: Duration = Duration::from_millis(500);

enum Screen {
    Start,
    Game,
    Over,
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 {
        match args[1].as_str() {
            "webhook" => {
                return run_webhook();
            }
            "--version" | "-v" => {
                println!("goobi {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--help" | "-h" => {
                println!("Goobi - Terminal Endless Climber\n");
                println!("Usage: goobi [command]\n");
                println!("Commands:");
                println!("  webhook    Route Telegram updates read from stdin, one JSON object per line");
                println!("  --version  Show version information");
                println!("  --help     Show this help message");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown command: {}", other);
                eprintln!("Run 'goobi --help' for usage.");
                std::process::exit(1);
            }
        }
    }

    let context = SessionContext::from_env();
    let telegram_enabled = context.can_use_telegram();
    let mut rng = rand::thread_rng();

    let mut hud = Hud {
        username: context.username.clone(),
        local_best: storage::load_high_score().score,
        world_best: None,
    };

    // Ask Telegram for the world best in the background while the title shows.
    let mut world_best_rx = bridge::spawn_high_score_fetch(&context);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let keyboard_enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if keyboard_enhanced {
        stdout.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut screen = Screen::Start;
    let mut session = GameSession::new(&mut rng);
    let mut controller = InputController::new();
    let mut held: Vec<(GameKey, Instant)> = Vec::new();
    let mut last_tick = Instant::now();

    let mut scoreboard_rx: Option<Receiver<ScoreboardUpdate>> = None;
    let mut scoreboard: Option<ScoreboardUpdate> = None;
    let mut new_best = false;

    loop {
        match screen {
            Screen::Start => {
                if let Some(rx) = &world_best_rx {
                    match rx.try_recv() {
                        Ok(best) => {
                            hud.world_best = Some(best);
                            world_best_rx = None;
                        }
                        Err(TryRecvError::Empty) => {}
                        Err(TryRecvError::Disconnected) => world_best_rx = None,
                    }
                }

                terminal.draw(|frame| {
                    let area = frame.size();
                    render_start(frame, area, &hud);
                })?;

                if event::poll(Duration::from_millis(50))? {
                    if let Event::Key(key_event) = event::read()? {
                        if key_event.kind != KeyEventKind::Release {
                            match key_event.code {
                                KeyCode::Char(' ') | KeyCode::Enter => {
                                    session = GameSession::new(&mut rng);
                                    controller = InputController::new();
                                    held.clear();
                                    last_tick = Instant::now();
                                    screen = Screen::Game;
                                }
                                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => break,
                                _ => {}
                            }
                        }
                    }
                }
            }

            Screen::Game => {
                terminal.draw(|frame| {
                    let area = frame.size();
                    render_game(frame, area, &session, &hud);
                })?;

                if event::poll(Duration::from_millis(16))? {
                    if let Event::Key(key_event) = event::read()? {
                        match key_event.code {
                            KeyCode::Esc => {
                                screen = Screen::Start;
                                continue;
                            }
                            code => {
                                if let Some(key) = game_key_of(code) {
                                    let pressed = key_event.kind != KeyEventKind::Release;
                                    if !keyboard_enhanced && pressed {
                                        note_hold(&mut held, key);
                                    }
                                    if let Some(intent) =
                                        controller.handle(InputEvent { key, pressed })
                                    {
                                        session.apply_intent(intent);
                                    }
                                }
                            }
                        }
                    }
                }

                if !keyboard_enhanced {
                    for key in expire_holds(&mut held) {
                        if let Some(intent) =
                            controller.handle(InputEvent { key, pressed: false })
                        {
                            session.apply_intent(intent);
                        }
                    }
                }

                let delta = last_tick.elapsed().as_secs_f64();
                last_tick = Instant::now();
                if session.tick(&mut rng, delta) {
                    let final_score = session.score;
                    new_best = final_score > hud.local_best;
                    hud.local_best = storage::record_high_score(final_score).score;
                    scoreboard = None;
                    scoreboard_rx = bridge::spawn_game_over_exchange(&context, final_score);
                    screen = Screen::Over;
                }
            }

            Screen::Over => {
                if let Some(rx) = &scoreboard_rx {
                    match rx.try_recv() {
                        Ok(update) => {
                            hud.world_best = Some(update.high_score.clone());
                            scoreboard = Some(update);
                            scoreboard_rx = None;
                        }
                        Err(TryRecvError::Empty) => {}
                        Err(TryRecvError::Disconnected) => scoreboard_rx = None,
                    }
                }

                terminal.draw(|frame| {
                    let area = frame.size();
                    let bridge = if !telegram_enabled {
                        BridgeStatus::Offline
                    } else {
                        match (&scoreboard, &scoreboard_rx) {
                            (Some(update), _) => BridgeStatus::Done(update),
                            (None, Some(_)) => BridgeStatus::Pending,
                            (None, None) => BridgeStatus::Offline,
                        }
                    };
                    render_over(frame, area, &session, &hud, bridge, new_best);
                })?;

                if event::poll(Duration::from_millis(50))? {
                    if let Event::Key(key_event) = event::read()? {
                        if key_event.kind != KeyEventKind::Release {
                            match key_event.code {
                                KeyCode::Char(' ') | KeyCode::Enter => {
                                    session = GameSession::new(&mut rng);
                                    controller = InputController::new();
                                    held.clear();
                                    last_tick = Instant::now();
                                    screen = Screen::Game;
                                }
                                KeyCode::Char('q') | KeyCode::Char('Q') => break,
                                KeyCode::Esc => screen = Screen::Start,
                                _ => {}
                            }
                        }
                    }
                }
            }
        }
    }

    // Restore terminal
    if keyboard_enhanced {
        terminal.backend_mut().execute(PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;

    Ok(())
}

/// Map a terminal key to a game key. A and D mirror the arrow keys; W and
/// the up arrow double as jump so the browser controls carry over.
fn game_key_of(code: KeyCode) -> Option<GameKey> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(GameKey::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(GameKey::Right),
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(GameKey::Jump)
        }
        _ => None,
    }
}

/// Record a press (or autorepeat) for the hold-timeout fallback.
fn note_hold(held: &mut Vec<(GameKey, Instant)>, key: GameKey) {
    let now = Instant::now();
    if let Some(entry) = held.iter_mut().find(|(held_key, _)| *held_key == key) {
        entry.1 = now;
    } else {
        held.push((key, now));
    }
}

/// Drop every stale hold and hand back the keys to release.
fn expire_holds(held: &mut Vec<(GameKey, Instant)>) -> Vec<GameKey> {
    let now = Instant::now();
    let mut expired = Vec::new();
    held.retain(|(key, last_seen)| {
        if now.duration_since(*last_seen) >= HOLD_RELEASE_TIMEOUT {
            expired.push(*key);
            false
        } else {
            true
        }
    });
    expired
}

fn run_webhook() -> io::Result<()> {
    let token = match std::env::var("TELEGRAM_BOT_TOKEN") {
        Ok(token) if !token.is_empty() => token,
        _ => {
            eprintln!("TELEGRAM_BOT_TOKEN is not set");
            std::process::exit(1);
        }
    };
    let client = TelegramClient::new(token);
    let mut store = MemoryContextStore::new();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let update: Update = match serde_json::from_str(line) {
            Ok(update) => update,
            Err(err) => {
                eprintln!("Skipping malformed update: {}", err);
                continue;
            }
        };
        execute_actions(&client, &mut store, &update);
    }

    Ok(())
}

/// Run every action the router produced for one update. Failures are
/// logged and skipped so one bad update cannot wedge the stream.
fn execute_actions(client: &TelegramClient, store: &mut MemoryContextStore, update: &Update) {
    for action in router::route_update(update, store) {
        let result = match &action {
            RouteAction::SendGame { chat_id, user_id } => match client.send_game(*chat_id) {
                Ok(message) => {
                    router::note_game_sent(store, *user_id, message.chat.id, message.message_id);
                    Ok(())
                }
                Err(err) => Err(err),
            },
            RouteAction::AnswerGameQuery { query_id, url } => {
                client.answer_game_query(query_id, url)
            }
            RouteAction::AnswerUnknownGame { query_id } => client.answer_unknown_game(query_id),
            RouteAction::AnswerInlineQuery { query_id } => client.answer_inline_query(query_id),
        };
        if let Err(err) = result {
            eprintln!("update {}: {:?} failed: {}", update.update_id, action, err);
        }
    }
}
