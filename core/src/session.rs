use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::time::Duration;
use rand::Rng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Short sound played once.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    PlaceFlag,
    ClearFlag,
    Bomb,
}

/// Background music started when a game ends, looping until stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Song {
    Win,
    Lose,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioCommand {
    Play(Effect),
    Loop(Song),
    StopMusic,
    PauseMusic,
    ResumeMusic,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Playing,
    GameOver { won: bool },
}

impl Phase {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }
}

/// What the front-end has to do after an input was handled.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Feedback {
    /// Something visible changed and needs a redraw
    pub updated: bool,
    pub audio: Vec<AudioCommand>,
    /// Set when a win produced a new best time that should be persisted
    pub new_best: Option<BestTime>,
}

/// Drives a board from player input, tracking play/game-over, the watch and the best time.
#[derive(Clone, Debug)]
pub struct Session<R = SmallRng> {
    board: Board<R>,
    watch: Watch,
    best_time: Option<BestTime>,
    phase: Phase,
    sound_enabled: bool,
    instructions_visible: bool,
}

impl<R: Rng> Session<R> {
    pub fn new(board: Board<R>, best_time: Option<BestTime>, sound_enabled: bool) -> Self {
        Self {
            board,
            watch: Watch::new(),
            best_time,
            phase: Phase::Playing,
            sound_enabled,
            instructions_visible: true,
        }
    }

    pub fn board(&self) -> &Board<R> {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn flags_left(&self) -> CellCount {
        self.board.flags_left()
    }

    pub fn watch(&self) -> &Watch {
        &self.watch
    }

    pub fn best_time(&self) -> Option<BestTime> {
        self.best_time
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn instructions_visible(&self) -> bool {
        self.instructions_visible
    }

    pub fn elapsed_display(&self) -> String {
        self.watch.display()
    }

    /// Time shown on the game-over screen, only a win has one.
    pub fn result_time_display(&self) -> String {
        match self.phase {
            Phase::GameOver { won: true } => self.watch.display(),
            _ => NO_TIME.to_string(),
        }
    }

    pub fn best_time_display(&self) -> String {
        display_best_time(self.best_time)
    }

    pub fn tick(&mut self, dt: Duration) -> Feedback {
        if !self.phase.is_playing() {
            return Feedback::default();
        }
        let before = self.watch.seconds();
        self.watch.update(dt);
        Feedback {
            updated: before != self.watch.seconds(),
            ..Default::default()
        }
    }

    /// Digs at a tile: reveals grass or sets off a mine.
    pub fn primary_click(&mut self, coords: Coord2) -> Feedback {
        let mut feedback = self.dismiss_instructions();
        if !self.phase.is_playing() || !self.board.is_position_valid(coords) {
            return feedback;
        }
        if !self.board.can_tile_be_mined(coords) {
            return feedback;
        }

        match self.board.tile_state(coords) {
            TileState::HiddenBomb => {
                log::debug!("Mine set off at {:?}", coords);
                self.phase = Phase::GameOver { won: false };
                self.watch.set_active(false);
                self.board.explode_bombs();
                self.play(&mut feedback, AudioCommand::Play(Effect::Bomb));
                self.play(&mut feedback, AudioCommand::Loop(Song::Lose));
                feedback.updated = true;
            }
            TileState::Grass => match self.board.reveal_tile(coords) {
                Ok(_) => {
                    self.watch.set_active(true);
                    feedback.updated = true;
                    self.check_win(&mut feedback);
                }
                Err(err) => log::warn!("Could not reveal {:?}: {}", coords, err),
            },
            _ => {}
        }
        feedback
    }

    /// Places a flag on an unrevealed tile or takes one back.
    pub fn secondary_click(&mut self, coords: Coord2) -> Feedback {
        use TileState::*;

        let mut feedback = self.dismiss_instructions();
        if !self.phase.is_playing() || !self.board.is_position_valid(coords) {
            return feedback;
        }

        match self.board.tile_state(coords) {
            Grass | HiddenBomb => {
                if self.board.place_flag(coords).is_ok_and(MarkOutcome::has_update) {
                    feedback.updated = true;
                    self.play(&mut feedback, AudioCommand::Play(Effect::PlaceFlag));
                    self.check_win(&mut feedback);
                }
            }
            GrassFlagged | BombFlagged => {
                if self.board.clear_flag(coords).is_ok_and(MarkOutcome::has_update) {
                    feedback.updated = true;
                    self.play(&mut feedback, AudioCommand::Play(Effect::ClearFlag));
                }
            }
            DisplayAdjacentBombs | ExplodingBomb => {}
        }
        feedback
    }

    /// Starts over on a freshly mined board, only available mid-game.
    pub fn reset(&mut self) -> Feedback {
        let mut feedback = self.dismiss_instructions();
        if self.phase.is_playing() {
            self.restart();
            feedback.updated = true;
        }
        feedback
    }

    /// Leaves the game-over screen, silencing the end-of-game music.
    pub fn play_again(&mut self) -> Feedback {
        if self.phase.is_playing() {
            return Feedback::default();
        }
        self.restart();
        Feedback {
            updated: true,
            audio: Vec::from([AudioCommand::StopMusic]),
            new_best: None,
        }
    }

    fn restart(&mut self) {
        self.board.reset();
        self.watch.reset();
        self.phase = Phase::Playing;
    }

    pub fn toggle_sound(&mut self) -> Feedback {
        let mut feedback = self.dismiss_instructions();
        self.sound_enabled = !self.sound_enabled;
        feedback.audio.push(if self.sound_enabled {
            AudioCommand::ResumeMusic
        } else {
            AudioCommand::PauseMusic
        });
        feedback.updated = true;
        feedback
    }

    fn dismiss_instructions(&mut self) -> Feedback {
        Feedback {
            updated: core::mem::replace(&mut self.instructions_visible, false),
            ..Default::default()
        }
    }

    fn play(&self, feedback: &mut Feedback, command: AudioCommand) {
        if self.sound_enabled {
            feedback.audio.push(command);
        }
    }

    fn check_win(&mut self, feedback: &mut Feedback) {
        if !self.board.is_fully_cleared() {
            return;
        }

        self.phase = Phase::GameOver { won: true };
        self.watch.set_active(false);
        log::debug!("Board cleared in {}s", self.watch.seconds());

        if let Some(best) = BestTime::improves(self.best_time, self.watch.seconds()) {
            self.best_time = Some(best);
            feedback.new_best = Some(best);
        }
        self.play(feedback, AudioCommand::Loop(Song::Win));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn session(size: Coord2, mines: &[Coord2]) -> Session {
        let config = BoardConfig::new_unchecked(size, 45, 0);
        let board = Board::with_mines(config, mines, SmallRng::seed_from_u64(0)).unwrap();
        Session::new(board, None, true)
    }

    #[test]
    fn revealing_grass_starts_the_watch() {
        let mut session = session((3, 3), &[(0, 0), (2, 2)]);
        assert!(session.instructions_visible());

        let feedback = session.primary_click((1, 1));

        assert!(feedback.updated);
        assert!(feedback.audio.is_empty());
        assert!(!session.instructions_visible());
        assert!(session.watch().is_active());
        assert_eq!(session.board().tile_state((1, 1)), TileState::DisplayAdjacentBombs);

        assert!(session.tick(Duration::from_secs(3)).updated);
        assert_eq!(session.elapsed_display(), "003");
        assert!(!session.tick(Duration::from_millis(10)).updated);
    }

    #[test]
    fn watch_waits_for_the_first_reveal() {
        let mut session = session((3, 3), &[(0, 0)]);
        session.secondary_click((2, 2));
        session.tick(Duration::from_secs(10));
        assert_eq!(session.elapsed_display(), "000");
    }

    #[test]
    fn hitting_a_mine_ends_the_game() {
        let mut session = session((3, 3), &[(0, 0), (2, 2)]);
        session.primary_click((1, 1));

        let feedback = session.primary_click((0, 0));

        assert_eq!(session.phase(), Phase::GameOver { won: false });
        assert_eq!(
            feedback.audio,
            [AudioCommand::Play(Effect::Bomb), AudioCommand::Loop(Song::Lose)]
        );
        assert_eq!(session.board().tile_state((0, 0)), TileState::ExplodingBomb);
        assert_eq!(session.board().tile_state((2, 2)), TileState::ExplodingBomb);
        assert_eq!(session.result_time_display(), NO_TIME);
        assert_eq!(feedback.new_best, None);

        assert!(!session.tick(Duration::from_secs(5)).updated);
        assert_eq!(session.elapsed_display(), "000");
    }

    #[test]
    fn input_is_ignored_after_game_over() {
        let mut session = session((3, 3), &[(0, 0)]);
        session.primary_click((0, 0));

        assert!(!session.primary_click((2, 2)).updated);
        assert!(!session.secondary_click((2, 2)).updated);
        assert_eq!(session.board().tile_state((2, 2)), TileState::Grass);
    }

    #[test]
    fn flags_play_sounds_and_track_the_budget() {
        let mut session = session((3, 3), &[(0, 0)]);

        let placed = session.secondary_click((0, 0));
        assert!(placed.updated);
        assert_eq!(placed.audio, [AudioCommand::Play(Effect::PlaceFlag)]);
        assert_eq!(session.flags_left(), 0);

        assert!(session.secondary_click((1, 1)).audio.is_empty());
        assert_eq!(session.board().tile_state((1, 1)), TileState::Grass);

        let cleared = session.secondary_click((0, 0));
        assert_eq!(cleared.audio, [AudioCommand::Play(Effect::ClearFlag)]);
        assert_eq!(session.flags_left(), 1);
    }

    #[test]
    fn flagged_tiles_cannot_be_dug() {
        let mut session = session((3, 3), &[(0, 0)]);
        session.secondary_click((0, 0));

        let feedback = session.primary_click((0, 0));

        assert!(!feedback.updated);
        assert!(session.phase().is_playing());
        assert_eq!(session.board().tile_state((0, 0)), TileState::BombFlagged);
    }

    #[test]
    fn clearing_the_board_wins_and_records_best_time() {
        let mut session = session((3, 3), &[(2, 2)]);
        session.primary_click((0, 0));
        session.tick(Duration::from_secs(12));

        let feedback = session.secondary_click((2, 2));

        assert_eq!(session.phase(), Phase::GameOver { won: true });
        assert_eq!(
            feedback.audio,
            [AudioCommand::Play(Effect::PlaceFlag), AudioCommand::Loop(Song::Win)]
        );
        assert_eq!(feedback.new_best, BestTime::new(12));
        assert_eq!(session.best_time_display(), "012");
        assert_eq!(session.result_time_display(), "012");
        assert!(!session.watch().is_active());
    }

    #[test]
    fn slower_win_keeps_previous_best() {
        let config = BoardConfig::new_unchecked((2, 1), 45, 0);
        let board = Board::with_mines(config, &[(0, 0)], SmallRng::seed_from_u64(0)).unwrap();
        let mut session = Session::new(board, BestTime::new(5), true);
        session.secondary_click((0, 0));
        session.primary_click((1, 0));
        assert_eq!(session.phase(), Phase::GameOver { won: true });
        assert_eq!(session.best_time(), BestTime::new(0));

        let config = BoardConfig::new_unchecked((2, 1), 45, 0);
        let board = Board::with_mines(config, &[(0, 0)], SmallRng::seed_from_u64(0)).unwrap();
        let mut session = Session::new(board, BestTime::new(5), true);
        session.primary_click((1, 0));
        session.tick(Duration::from_secs(9));
        let feedback = session.secondary_click((0, 0));
        assert_eq!(session.phase(), Phase::GameOver { won: true });
        assert_eq!(feedback.new_best, None);
        assert_eq!(session.best_time(), BestTime::new(5));
    }

    #[test]
    fn muted_session_emits_no_sounds() {
        let config = BoardConfig::new_unchecked((3, 3), 45, 0);
        let board = Board::with_mines(config, &[(0, 0)], SmallRng::seed_from_u64(0)).unwrap();
        let mut session = Session::new(board, None, false);

        assert!(session.secondary_click((1, 1)).audio.is_empty());
        assert!(session.primary_click((0, 0)).audio.is_empty());
        assert_eq!(session.phase(), Phase::GameOver { won: false });
    }

    #[test]
    fn toggling_sound_pauses_and_resumes_music() {
        let mut session = session((3, 3), &[(0, 0)]);

        assert_eq!(session.toggle_sound().audio, [AudioCommand::PauseMusic]);
        assert!(!session.sound_enabled());
        assert_eq!(session.toggle_sound().audio, [AudioCommand::ResumeMusic]);
        assert!(session.sound_enabled());
    }

    #[test]
    fn play_again_stops_music_and_resets() {
        let mut session = session((3, 3), &[(0, 0)]);
        assert_eq!(session.play_again(), Feedback::default());

        session.primary_click((0, 0));
        let feedback = session.play_again();

        assert_eq!(feedback.audio, [AudioCommand::StopMusic]);
        assert!(session.phase().is_playing());
        assert_eq!(session.flags_left(), 1);
        assert_eq!(session.board().tiles_cleared(), 0);
        assert_eq!(session.elapsed_display(), "000");
    }

    #[test]
    fn reset_mid_game_stops_the_watch() {
        let mut session = session((3, 3), &[(0, 0)]);
        session.primary_click((2, 2));
        session.tick(Duration::from_secs(4));

        session.reset();

        assert!(!session.watch().is_active());
        session.tick(Duration::from_secs(4));
        assert_eq!(session.elapsed_display(), "000");
    }

    #[test]
    fn reset_is_ignored_on_the_game_over_screen() {
        let mut session = session((3, 3), &[(0, 0)]);
        session.primary_click((0, 0));

        assert!(!session.reset().updated);
        assert_eq!(session.phase(), Phase::GameOver { won: false });
        assert_eq!(session.board().tile_state((0, 0)), TileState::ExplodingBomb);
    }

    #[test]
    fn clicks_outside_the_board_are_ignored() {
        let mut session = session((3, 3), &[(0, 0)]);
        assert!(session.primary_click((3, 0)).updated);
        assert!(!session.primary_click((0, 3)).updated);
        assert!(!session.secondary_click((9, 9)).updated);
        assert_eq!(session.flags_left(), 1);
    }
}
