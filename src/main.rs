//! Hoopsim entry point
//!
//! Runs the simulation headless with a scripted shooter, feeding events to
//! logging audio/HUD/render sinks. Challenge rounds are submitted to the
//! leaderboard stored under `--data-dir`.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};
use clap::Parser;

use hoopsim::audio::{AudioDirector, LogAudioSink};
use hoopsim::autoplay::AutoPlayer;
use hoopsim::consts::FRAME_DT;
use hoopsim::highscores::format_date;
use hoopsim::persistence::FileStorage;
use hoopsim::renderer::{FrameSnapshot, LogRenderSink, RenderSink};
use hoopsim::sim::{self, ChallengePhase, GameEvent, GameMode, GameState, Side, tick};
use hoopsim::ui::{HudSink, HudSnapshot, LogHudSink, MessageBoard};
use hoopsim::{Leaderboard, Settings};

#[derive(Parser, Debug)]
#[command(name = "hoopsim")]
#[command(about = "Headless basketball shooting simulation")]
struct Args {
    /// Game mode: regular, challenge or free (defaults to the saved setting)
    #[arg(short, long)]
    mode: Option<String>,

    /// Maximum frames to simulate
    #[arg(short, long, default_value_t = 4000)]
    frames: u64,

    /// Stop once this many shots have been taken and the last has landed
    #[arg(short, long)]
    shots: Option<u32>,

    /// Seed for the scripted shooter
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Directory holding settings and the leaderboard
    #[arg(long, default_value = ".hoopsim")]
    data_dir: PathBuf,

    /// Name recorded on the leaderboard after a challenge round
    #[arg(short, long, default_value = "")]
    name: String,
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut storage = FileStorage::open(&args.data_dir)
        .with_context(|| format!("opening data dir {}", args.data_dir.display()))?;
    log::debug!("Using data dir {}", storage.dir().display());
    let settings = Settings::load(&storage);
    let mut leaderboard = Leaderboard::load(&storage);

    let mode = match args.mode.as_deref() {
        Some(name) => match GameMode::from_str(name) {
            Some(mode) => mode,
            None => bail!("unknown mode {:?} (expected regular, challenge or free)", name),
        },
        None => settings.default_mode,
    };

    log::info!("Hoopsim starting in {} mode (seed {})", mode.as_str(), args.seed);
    if let Some(best) = leaderboard.top_score() {
        log::info!("Best challenge score so far: {}", best);
    }

    let mut state = GameState::new(mode);
    let mut player = AutoPlayer::new(args.seed);
    let mut audio = AudioDirector::from_settings(&settings);
    let mut audio_sink = LogAudioSink;
    let mut hud = LogHudSink::default();
    let mut render = LogRenderSink::default();
    let mut messages = MessageBoard::default();

    let mut frames_run = 0u64;

    for _ in 0..args.frames {
        let input = player.next_input(&state);
        let events = tick(&mut state, &input, FRAME_DT);
        frames_run += 1;

        audio.dispatch(&events, &mut audio_sink);
        messages.push_events(&events);
        messages.update(FRAME_DT);
        hud.draw(&HudSnapshot::capture(&state), messages.active());
        render.present(&FrameSnapshot::capture(&state, &settings));

        let round_over = events
            .iter()
            .any(|e| matches!(e, GameEvent::ChallengeEnded { .. }));

        if round_over {
            let ts = now_ms();
            if let ChallengePhase::AwaitingName { final_score } = state.challenge {
                log::info!("Round over with {} points", final_score);
                match leaderboard.potential_rank(final_score) {
                    Some(rank) => log::info!("Leaderboard rank {}", rank),
                    None => log::info!("Score did not make the leaderboard"),
                }
            }
            let submitted =
                sim::submit_challenge_score(&mut state, &mut leaderboard, &mut storage, &args.name, ts);
            if let Some(list) = submitted {
                println!("Leaderboard:");
                for (i, entry) in list.iter().enumerate() {
                    println!(
                        "{:>2}. {:<20} {:>4}  {}",
                        i + 1,
                        entry.name,
                        entry.score,
                        format_date(entry.timestamp, ts)
                    );
                }
            }
            break;
        }

        if let Some(limit) = args.shots {
            if player.shots >= limit && !state.ball.flying {
                break;
            }
        }
    }

    if let Err(e) = settings.save(&mut storage) {
        log::warn!("Settings not saved: {}", e);
    }

    println!(
        "{} frames, {} shots taken",
        frames_run, player.shots
    );
    for side in [Side::Home, Side::Guest] {
        let stats = state.stats(side);
        println!(
            "{:<5} score {:>3}  made {}/{} ({:.1}%)",
            side.as_str(),
            stats.score,
            stats.made,
            stats.attempts,
            stats.make_pct()
        );
    }
    Ok(())
}
