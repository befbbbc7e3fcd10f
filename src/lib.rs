//! Server-authoritative rooms for a two-player card-comparison duel.
//!
//! Players join a room by key, receive half of a shuffled card catalog
//! each, and take turns naming the attribute their front card fights on.
//! The winner of each comparison annexes both cards; the game ends when
//! one deck runs dry. All state lives on the server and every action is
//! served one at a time, so clients can race all they want.
//!
//! ## Modules
//!
//! - [`cards`] — the immutable catalog, per-player decks, shuffle-and-split dealing
//! - [`gameroom`] — the engine: rooms, registry, round resolution, dispatch
//! - [`hosting`] — actix WebSocket shell around the single switchboard task

pub mod cards;
pub mod gameroom;
pub mod hosting;

/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` and writes DEBUG level to file, INFO to terminal.
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}
