//! Game loop and session lifecycle
//!
//! `Idle -> Running -> GameOver -> Running ...`
//!
//! Each `frame` first fires the timers that came due since the previous
//! frame, then runs the frame body in a fixed order:
//! input -> player movement -> entity fall -> collisions.
//! Rendering is the caller's next step (see `Frontend::present`).

use super::collision::{CollisionOutcome, resolve_collisions};
use super::difficulty;
use super::input::{InputController, InputEvent, apply_intent};
use super::scheduler::{Scheduler, TimerKind};
use super::spawn;
use super::state::{
    Arena, GameEvent, GameOverReason, GamePhase, GameSession, SessionSummary,
};
use crate::config::Config;
use crate::consts::{MAX_FRAME_MS, NOMINAL_FRAME_MS, SECOND_MS};

pub struct Game {
    config: Config,
    phase: GamePhase,
    session: GameSession,
    scheduler: Scheduler,
    input: InputController,
    events: Vec<GameEvent>,
    last_frame_ms: Option<f64>,
    end_reason: Option<GameOverReason>,
}

impl Game {
    /// A game in `Idle`, waiting for `start`
    pub fn new(config: Config, arena: Arena) -> Self {
        let session = GameSession::new(0, arena, &config);
        Self {
            config,
            phase: GamePhase::Idle,
            session,
            scheduler: Scheduler::new(),
            input: InputController::new(),
            events: Vec::new(),
            last_frame_ms: None,
            end_reason: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Arena changed size (window resize). The player is re-clamped.
    pub fn resize(&mut self, arena: Arena) {
        self.session.arena = arena;
        let x = self.session.player.x;
        self.session.player.set_x(x, &arena);
    }

    /// Begin a new session from Idle or GameOver (restarts if already running)
    pub fn start(&mut self, seed: u64) {
        if self.is_running() {
            log::info!("restarting session in progress");
        }

        self.session = GameSession::new(seed, self.session.arena, &self.config);
        self.input.reset();
        self.last_frame_ms = None;
        self.end_reason = None;

        self.scheduler = Scheduler::new();
        self.scheduler
            .schedule(TimerKind::ItemSpawn, self.session.current_spawn_interval_ms);
        self.scheduler
            .schedule(TimerKind::BombSpawn, self.config.bomb_spawn_interval_ms);
        self.scheduler.schedule(TimerKind::DifficultyTick, SECOND_MS);
        self.scheduler.schedule(TimerKind::Countdown, SECOND_MS);

        self.phase = GamePhase::Running;
        self.events.push(GameEvent::SessionStarted {
            duration_secs: self.config.duration_secs,
        });
        log::info!(
            "session started (seed {}, arena {}x{})",
            seed,
            self.session.arena.width,
            self.session.arena.height
        );
    }

    /// Route a raw input event. Presses are ignored unless running.
    pub fn handle_input(&mut self, event: InputEvent) {
        if !self.is_running() && !event.is_release() {
            return;
        }
        self.input.handle(event);
    }

    /// One display-refresh callback at `timestamp_ms`
    pub fn frame(&mut self, timestamp_ms: f64) {
        if !self.is_running() {
            return;
        }

        let frame_ms = match self.last_frame_ms {
            Some(last) => (timestamp_ms - last).clamp(0.0, MAX_FRAME_MS),
            None => NOMINAL_FRAME_MS,
        };
        self.last_frame_ms = Some(timestamp_ms);

        // Timers that came due between frames
        let until = self.scheduler.now_ms() + frame_ms;
        while let Some(kind) = self.scheduler.pop_due(until) {
            self.on_timer(kind);
        }
        self.scheduler.advance_to(until);

        if !self.is_running() {
            return;
        }

        let session = &mut self.session;
        let arena = session.arena;

        let intent = self.input.intent(&session.player, &arena, &self.config);
        apply_intent(&mut session.player, &intent, frame_ms, &arena);

        session.entities.advance(session.current_fall_speed, &arena);

        let mut detonated = false;
        for outcome in resolve_collisions(session, &self.config) {
            match outcome {
                CollisionOutcome::Collected { kind, .. } => {
                    self.events.push(GameEvent::ItemCollected {
                        kind,
                        score: session.score,
                    });
                }
                CollisionOutcome::Detonated { .. } => {
                    detonated = true;
                    self.events.push(GameEvent::BombDetonated);
                }
            }
        }

        if detonated {
            self.game_over(GameOverReason::Bomb);
        }
    }

    fn on_timer(&mut self, kind: TimerKind) {
        // A trigger that outlives its session does nothing
        if !self.is_running() {
            return;
        }

        match kind {
            TimerKind::ItemSpawn => {
                spawn::spawn_item(&mut self.session, &self.config);
            }
            TimerKind::BombSpawn => {
                spawn::spawn_bomb(&mut self.session, &self.config);
            }
            TimerKind::DifficultyTick => {
                let update = difficulty::tick(&mut self.session, &self.config);
                if update.interval_changed {
                    self.scheduler
                        .set_period(TimerKind::ItemSpawn, update.spawn_interval_ms);
                }
                if update.interval_changed || update.speed_changed {
                    log::debug!(
                        "t={}s fall speed {:.2}, spawn every {}ms",
                        self.session.elapsed_secs,
                        update.fall_speed,
                        update.spawn_interval_ms
                    );
                    self.events.push(GameEvent::DifficultyChanged {
                        fall_speed: update.fall_speed,
                        spawn_interval_ms: update.spawn_interval_ms,
                    });
                }
            }
            TimerKind::Countdown => {
                self.session.seconds_remaining = self.session.seconds_remaining.saturating_sub(1);
                self.events.push(GameEvent::CountdownTick {
                    remaining_secs: self.session.seconds_remaining,
                });
                if self.session.seconds_remaining == 0 {
                    self.game_over(GameOverReason::TimeUp);
                }
            }
        }
    }

    /// Running -> GameOver. Cancels every trigger; terminal until `start`.
    fn game_over(&mut self, reason: GameOverReason) {
        if !self.is_running() {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.end_reason = Some(reason);
        self.scheduler.cancel_all();
        self.input.reset();
        self.session.player.velocity = 0.0;
        self.events.push(GameEvent::GameOver {
            reason,
            final_score: self.session.score,
        });
        log::info!(
            "game over ({:?}) after {}s, score {}",
            reason,
            self.session.elapsed_secs,
            self.session.score
        );
    }

    /// Take everything that happened since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            seed: self.session.seed,
            score: self.session.score,
            elapsed_secs: self.session.elapsed_secs,
            reason: self.end_reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::player_hitbox;
    use crate::sim::input::ArrowKey;
    use crate::sim::state::ItemKind;
    use glam::Vec2;

    fn arena() -> Arena {
        Arena::new(800.0, 600.0)
    }

    /// Config with bombs effectively disabled so long runs are deterministic
    fn bombless(duration_secs: u32) -> Config {
        Config {
            duration_secs,
            bomb_spawn_interval_ms: 10_000_000,
            ..Default::default()
        }
    }

    /// Run `frames` frames 16ms apart starting at `t`; returns the next timestamp
    fn run_frames(game: &mut Game, mut t: f64, frames: usize) -> f64 {
        for _ in 0..frames {
            game.frame(t);
            t += 16.0;
        }
        t
    }

    /// Top-left that centers a sprite of `size` on the player's hitbox
    fn on_player(game: &Game, size: f32) -> Vec2 {
        let s = &game.session;
        let hb = player_hitbox(&s.player, &s.arena, &game.config);
        hb.min + hb.size / 2.0 - Vec2::splat(size / 2.0)
    }

    #[test]
    fn starts_idle_and_ignores_frames() {
        let mut game = Game::new(Config::default(), arena());
        assert_eq!(game.phase(), GamePhase::Idle);
        run_frames(&mut game, 0.0, 100);
        assert!(game.session().entities.is_empty());
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn start_initialises_session() {
        let mut game = Game::new(Config::default(), arena());
        game.start(5);
        assert!(game.is_running());
        let s = game.session();
        assert_eq!(s.score, 0);
        assert_eq!(s.seconds_remaining, 30);
        assert_eq!(s.current_fall_speed, 2.0);
        assert_eq!(s.current_spawn_interval_ms, 800);
        assert_eq!(s.player.x, 325.0);
        assert_eq!(
            game.drain_events(),
            vec![GameEvent::SessionStarted { duration_secs: 30 }]
        );
        for kind in [
            TimerKind::ItemSpawn,
            TimerKind::BombSpawn,
            TimerKind::DifficultyTick,
            TimerKind::Countdown,
        ] {
            assert!(game.scheduler.is_scheduled(kind));
        }
    }

    #[test]
    fn items_spawn_on_the_interval() {
        let mut game = Game::new(bombless(30), arena());
        game.start(1);
        // 50 frames = 800ms: exactly one spawn
        run_frames(&mut game, 0.0, 49);
        assert!(game.session().entities.is_empty());
        game.frame(49.0 * 16.0);
        assert_eq!(game.session().entities.len(), 1);
    }

    #[test]
    fn countdown_ends_the_session_at_zero() {
        let mut game = Game::new(bombless(30), arena());
        game.start(3);
        let t = run_frames(&mut game, 0.0, 1874);
        assert!(game.is_running());
        assert_eq!(game.session().seconds_remaining, 1);

        game.frame(t);
        assert_eq!(game.phase(), GamePhase::GameOver);
        let events = game.drain_events();
        assert!(events.contains(&GameEvent::CountdownTick { remaining_secs: 0 }));
        assert!(matches!(
            events.last(),
            Some(GameEvent::GameOver {
                reason: GameOverReason::TimeUp,
                ..
            })
        ));
        assert_eq!(game.summary().reason, Some(GameOverReason::TimeUp));
    }

    #[test]
    fn spawn_interval_reaches_floor_after_thirty_seconds() {
        let mut game = Game::new(bombless(120), arena());
        game.start(8);
        run_frames(&mut game, 0.0, 1875);
        let s = game.session();
        assert_eq!(s.elapsed_secs, 30);
        assert_eq!(s.current_spawn_interval_ms, 200);
        assert_eq!(game.scheduler.period_ms(TimerKind::ItemSpawn), Some(200.0));
    }

    #[test]
    fn fall_speed_reaches_max_at_sixty_seconds() {
        let mut game = Game::new(bombless(120), arena());
        game.start(8);
        run_frames(&mut game, 0.0, 3750);
        assert_eq!(game.session().elapsed_secs, 60);
        assert_eq!(game.session().current_fall_speed, 8.0);
    }

    #[test]
    fn bomb_on_player_ends_session() {
        let mut game = Game::new(Config::default(), arena());
        game.start(11);
        game.drain_events();

        let pos = on_player(&game, game.config.bomb_size);
        let arena = game.session.arena;
        let config = game.config.clone();
        game.session.entities.spawn_bomb(pos.x, &arena, &config);
        game.session.entities.advance(pos.y, &arena);

        game.frame(0.0);
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert!(game.session().entities.is_empty());
        let events = game.drain_events();
        assert_eq!(
            events,
            vec![
                GameEvent::BombDetonated,
                GameEvent::GameOver {
                    reason: GameOverReason::Bomb,
                    final_score: 0
                }
            ]
        );
        assert!(!game.scheduler.is_scheduled(TimerKind::Countdown));
        assert!(!game.scheduler.is_scheduled(TimerKind::ItemSpawn));
    }

    #[test]
    fn nothing_happens_after_game_over() {
        let mut game = Game::new(Config::default(), arena());
        game.start(2);
        game.game_over(GameOverReason::TimeUp);
        game.drain_events();

        run_frames(&mut game, 0.0, 2000);
        assert!(game.session().entities.is_empty());
        assert!(game.drain_events().is_empty());
        // Stray timer fire is a no-op
        game.on_timer(TimerKind::BombSpawn);
        assert!(game.session().entities.is_empty());
    }

    #[test]
    fn restart_after_game_over_resets_everything() {
        let mut game = Game::new(bombless(30), arena());
        game.start(4);
        let t = run_frames(&mut game, 0.0, 400);
        game.session.score = 120;
        game.game_over(GameOverReason::Bomb);
        assert!(!game.session().entities.is_empty());

        game.start(4);
        assert!(game.is_running());
        assert_eq!(game.session().score, 0);
        assert!(game.session().entities.is_empty());
        assert_eq!(game.session().elapsed_secs, 0);
        assert_eq!(game.session().current_fall_speed, 2.0);

        // Clock restarts: first frame of the new session is nominal
        game.frame(t + 50_000.0);
        assert_eq!(game.scheduler.now_ms(), 16.0);
    }

    #[test]
    fn collecting_an_item_emits_score() {
        let mut game = Game::new(Config::default(), arena());
        game.start(6);
        game.drain_events();

        let pos = on_player(&game, game.config.item_size);
        let arena = game.session.arena;
        let config = game.config.clone();
        game.session
            .entities
            .spawn_item(ItemKind::GoldIngot, pos.x, &arena, &config);
        game.session.entities.advance(pos.y, &arena);

        game.frame(0.0);
        assert!(game.is_running());
        assert_eq!(
            game.drain_events(),
            vec![GameEvent::ItemCollected {
                kind: ItemKind::GoldIngot,
                score: 10
            }]
        );
    }

    #[test]
    fn input_moves_player_only_while_running() {
        let mut game = Game::new(Config::default(), arena());
        game.handle_input(InputEvent::KeyDown(ArrowKey::Right));
        game.start(1);
        game.frame(0.0);
        assert_eq!(game.session().player.x, 325.0);

        game.handle_input(InputEvent::KeyDown(ArrowKey::Right));
        game.frame(16.0);
        assert_eq!(game.session().player.x, 350.0);

        game.handle_input(InputEvent::KeyUp(ArrowKey::Right));
        game.frame(32.0);
        assert_eq!(game.session().player.x, 350.0);
    }

    #[test]
    fn pointer_follow_settles_at_low_frame_rate() {
        let mut game = Game::new(bombless(30), arena());
        game.start(1);
        // Player centered at 325; pointer at 600 puts the target edge at 525
        game.handle_input(InputEvent::PointerDown { x: 600.0 });

        let mut t = 0.0;
        let mut tail = Vec::new();
        for i in 0..120 {
            game.frame(t);
            if i >= 110 {
                tail.push(game.session().player.x);
            }
            t += 33.3;
        }
        for x in tail {
            assert!((x - 525.0).abs() <= 1.0, "player at {x}");
        }
    }

    #[test]
    fn long_frames_are_clamped() {
        let mut game = Game::new(bombless(30), arena());
        game.start(1);
        game.frame(0.0);
        game.frame(10_000.0);
        assert_eq!(game.scheduler.now_ms(), 16.0 + MAX_FRAME_MS);
        assert_eq!(game.session().seconds_remaining, 30);
    }

    #[test]
    fn same_seed_same_session() {
        let run = || {
            let mut game = Game::new(Config::default(), arena());
            game.start(777);
            run_frames(&mut game, 0.0, 600);
            game.session()
                .entities
                .iter()
                .map(|e| (e.kind, e.pos))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}
