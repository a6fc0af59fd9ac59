//! game-runner: headless driver for the equal-playing-time tracker.
//!
//! Usage:
//!   game-runner --db game.db --team-name Hornets --age-group 10U \
//!               --players Ada,Ben,Cleo --seconds 120 --end
//!   game-runner --db game.db --resume --seconds 30
//!
//! Without --real-time, ticks are fired through the manual scheduler so a
//! whole game simulates instantly. With --real-time the thread scheduler
//! runs at a true 1 Hz.

use anyhow::{anyhow, Result};
use chrono::Utc;
use playtime_core::{
    config::GameConfig,
    live::LiveGame,
    scheduler::{ManualScheduler, Scheduler, ThreadScheduler},
    session::GameSession,
    store::{team::Team, GameStore},
    types::AgeGroup,
};
use std::env;
use std::sync::Arc;
use std::time::Duration;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let db = str_arg(&args, "--db").unwrap_or_else(|| ":memory:".to_string());
    let team_name = str_arg(&args, "--team-name").unwrap_or_else(|| "Green Dragons".to_string());
    let age_group = str_arg(&args, "--age-group").unwrap_or_else(|| "10U".to_string());
    let players = str_arg(&args, "--players")
        .unwrap_or_else(|| "Ada,Ben,Cleo,Dev,Eli".to_string());
    let seconds: u64 = num_arg(&args, "--seconds", 120);
    let duration_min: Option<u32> = str_arg(&args, "--duration").map(|s| s.parse()).transpose()?;
    let resume_only = args.iter().any(|a| a == "--resume");
    let end_game = args.iter().any(|a| a == "--end");
    let real_time = args.iter().any(|a| a == "--real-time");

    let store = GameStore::open(&db)?;
    store.migrate()?;

    println!("game-runner");
    println!("  db:      {db}");
    println!("  seconds: {seconds}");
    println!();

    let manual = Arc::new(ManualScheduler::new());
    let scheduler: Arc<dyn Scheduler + Send + Sync> = if real_time {
        Arc::new(ThreadScheduler)
    } else {
        manual.clone()
    };

    // A pending in-progress game always wins over starting a new one.
    let live = match LiveGame::resume(store, scheduler.clone(), Utc::now())? {
        Some(live) => {
            let session = live.session();
            println!(
                "Resumed game with {} at {}s ({})",
                session.team_name,
                session.elapsed_sec(),
                if session.is_running() { "running" } else { "paused" }
            );
            live
        }
        None if resume_only => {
            println!("No in-progress game to resume.");
            return Ok(());
        }
        None => {
            let age_group = AgeGroup::parse(&age_group)
                .ok_or_else(|| anyhow!("unknown age group: {age_group}"))?;
            let store = GameStore::open(&db)?;
            store.migrate()?;
            let mut team = Team::new(&team_name, "2026", age_group, None);
            for name in players.split(',').filter(|n| !n.trim().is_empty()) {
                team.add_player(name.trim(), None, None)?;
            }
            store.insert_team(&team)?;

            let config = GameConfig::default();
            let mut session = GameSession::for_team(&team, &config);
            if let Some(min) = duration_min {
                session.set_duration_min(min, &config)?;
            }
            println!(
                "Starting {}-second game for {} ({} players)",
                session.clock.scheduled_duration_sec,
                team.name,
                team.players.len()
            );
            let live = LiveGame::new(store, session, scheduler.clone());
            live.start(Utc::now())?;
            live
        }
    };

    if real_time {
        std::thread::sleep(Duration::from_secs(seconds));
    } else {
        manual.fire_n(seconds as usize);
    }

    let session = live.session();
    println!();
    println!(
        "Clock: {}s / {}s  ({})",
        session.elapsed_sec(),
        session.clock.scheduled_duration_sec,
        if session.is_running() { "running" } else { "paused" }
    );
    println!("  {:<16} {:>8} {:>8} {:>7} {:>7}", "player", "playing", "sitting", "cur%", "proj%");
    for p in &session.players {
        println!(
            "  {:<16} {:>7}s {:>7}s {:>6.1}% {:>6.1}%",
            p.name, p.playing_time_sec, p.sitting_time_sec, p.playing_pct, p.projected_playing_pct
        );
    }

    if end_game {
        // Two-step confirmation lives at the UI boundary; --end is that
        // explicit confirmation here.
        if session.is_running() {
            live.toggle_running(Utc::now())?;
        }
        let stats = live.end(Utc::now())?;
        println!();
        println!(
            "Game ended at {}s; result recorded to history.",
            stats.total_game_time_sec
        );
    } else {
        println!();
        println!("Game left in progress; run again with --resume to continue.");
    }

    Ok(())
}

fn str_arg(args: &[String], flag: &str) -> Option<String> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].clone())
}

fn num_arg(args: &[String], flag: &str, default: u64) -> u64 {
    str_arg(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
