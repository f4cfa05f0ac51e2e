use std::{path::PathBuf, time::Duration};

use blockfall_engine::{ActionError, GameEvent, GameSession, GameSnapshot, PieceSeed};
use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::Serialize;
use tracing::{debug, info, trace};

use crate::util::Output;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    /// Seed for piece generation and player input, as 32 hex digits
    #[arg(long)]
    pub(crate) seed: Option<PieceSeed>,
    /// Number of games to play
    #[arg(long, default_value_t = 1)]
    pub(crate) games: usize,
    /// Stop a game after this many pieces have locked
    #[arg(long, default_value_t = 500)]
    pub(crate) max_pieces: usize,
    /// Simulated frame duration in milliseconds
    #[arg(long, default_value_t = 16)]
    pub(crate) frame_ms: u64,
    /// Output file path
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
struct GameSummary {
    game: usize,
    seed: PieceSeed,
    frames: u64,
    topped_out: bool,
    snapshot: GameSnapshot,
}

/// Player input issued once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayerAction {
    Idle,
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDrop,
    HardDrop,
}

impl PlayerAction {
    const ALL: [Self; 6] = [
        Self::Idle,
        Self::MoveLeft,
        Self::MoveRight,
        Self::Rotate,
        Self::SoftDrop,
        Self::HardDrop,
    ];

    fn random<R>(rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    fn apply(self, session: &mut GameSession) -> Result<(), ActionError> {
        match self {
            Self::Idle => Ok(()),
            Self::MoveLeft => session.try_move_left(),
            Self::MoveRight => session.try_move_right(),
            Self::Rotate => session.try_rotate(),
            Self::SoftDrop => session.soft_drop(),
            Self::HardDrop => session.hard_drop(),
        }
    }
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        seed,
        games,
        max_pieces,
        frame_ms,
        output,
    } = arg;

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    info!(%seed, games, "starting simulation");

    let frame = Duration::from_millis(*frame_ms);
    let summaries = simulate(seed, *games, *max_pieces, frame);

    Output::save_json(&summaries, output.clone())?;
    Ok(())
}

fn simulate(seed: PieceSeed, games: usize, max_pieces: usize, frame: Duration) -> Vec<GameSummary> {
    let mut rng = Pcg32::from_seed(seed.to_bytes());
    (0..games)
        .map(|game| {
            let game_seed = rng.random();
            play_game(game, game_seed, &mut rng, max_pieces, frame)
        })
        .collect()
}

fn play_game<R>(
    game: usize,
    seed: PieceSeed,
    rng: &mut R,
    max_pieces: usize,
    frame: Duration,
) -> GameSummary
where
    R: Rng + ?Sized,
{
    let mut session = GameSession::with_seed(seed);
    let mut frames = 0;

    while !session.is_game_over() && session.stats().completed_pieces() < max_pieces {
        let action = PlayerAction::random(rng);
        if let Err(err) = action.apply(&mut session) {
            trace!(game, ?action, %err, "action rejected");
        }
        session.advance_time(frame);
        frames += 1;

        for event in session.drain_events() {
            if let GameEvent::GameOver { score } = event {
                debug!(game, score, frames, "game topped out");
            }
        }
    }

    let snapshot = session.snapshot();
    info!(
        game,
        score = snapshot.stats.score(),
        pieces = snapshot.stats.completed_pieces(),
        "game finished"
    );
    GameSummary {
        game,
        seed,
        frames,
        topped_out: snapshot.game_over,
        snapshot,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: PieceSeed = PieceSeed::from_u128(0xdead_beef);
    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn test_games_stop_at_piece_limit_or_top_out() {
        let summaries = simulate(SEED, 3, 40, FRAME);
        assert_eq!(summaries.len(), 3);
        for summary in &summaries {
            let pieces = summary.snapshot.stats.completed_pieces();
            assert!(summary.topped_out || pieces == 40);
            assert!(pieces <= 40);
            assert!(summary.frames > 0);
        }
    }

    #[test]
    fn test_simulation_is_reproducible() {
        let a = serde_json::to_value(simulate(SEED, 2, 100, FRAME)).unwrap();
        let b = serde_json::to_value(simulate(SEED, 2, 100, FRAME)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a[0]["seed"], a[1]["seed"]);
    }

    #[test]
    fn test_player_action_reports_rejection() {
        let mut session = GameSession::with_seed(SEED);
        assert_eq!(PlayerAction::Idle.apply(&mut session), Ok(()));
        while PlayerAction::MoveLeft.apply(&mut session).is_ok() {}
        let err = PlayerAction::MoveLeft.apply(&mut session).unwrap_err();
        assert!(err.is_piece_collision());
        assert_eq!(PlayerAction::HardDrop.apply(&mut session), Ok(()));
    }

    #[test]
    fn test_zero_pieces_plays_nothing() {
        let summaries = simulate(SEED, 1, 0, FRAME);
        assert_eq!(summaries[0].frames, 0);
        assert!(!summaries[0].topped_out);
    }

    #[test]
    fn test_summary_json_shape() {
        let summaries = simulate(SEED, 1, 5, FRAME);
        let json = serde_json::to_value(&summaries).unwrap();
        let summary = &json[0];
        assert_eq!(summary["game"], 0);
        assert_eq!(summary["seed"].as_str().unwrap().len(), 32);
        assert!(summary["snapshot"]["board"].is_string());
        assert!(summary["snapshot"]["stats"]["score"].is_u64());
    }
}
