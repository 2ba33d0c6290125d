use grassweeper_core::{AudioCommand, Effect, Song};
use web_sys::HtmlAudioElement;

fn load(src: &str) -> Option<HtmlAudioElement> {
    match HtmlAudioElement::new_with_src(src) {
        Ok(element) => Some(element),
        Err(err) => {
            log::error!("failed to load audio {}: {:?}", src, err);
            None
        }
    }
}

fn start(element: &HtmlAudioElement) {
    element.set_current_time(0.0);
    if let Err(err) = element.play() {
        log::error!("failed to play audio: {:?}", err);
    }
}

fn halt(element: &HtmlAudioElement) {
    if let Err(err) = element.pause() {
        log::error!("failed to pause audio: {:?}", err);
    }
}

/// Plays the sound effects and end-of-game songs requested by the session.
#[derive(Debug)]
pub(crate) struct AudioPlayer {
    place_flag: Option<HtmlAudioElement>,
    clear_flag: Option<HtmlAudioElement>,
    bomb: Option<HtmlAudioElement>,
    win: Option<HtmlAudioElement>,
    lose: Option<HtmlAudioElement>,
    current_song: Option<Song>,
}

impl AudioPlayer {
    pub(crate) fn new() -> Self {
        let win = load("audio/win.ogg");
        let lose = load("audio/lose.ogg");
        for song in [&win, &lose].into_iter().flatten() {
            song.set_loop(true);
        }
        Self {
            place_flag: load("audio/place_flag.ogg"),
            clear_flag: load("audio/clear_flag.ogg"),
            bomb: load("audio/mine.ogg"),
            win,
            lose,
            current_song: None,
        }
    }

    fn effect(&self, effect: Effect) -> Option<&HtmlAudioElement> {
        match effect {
            Effect::PlaceFlag => self.place_flag.as_ref(),
            Effect::ClearFlag => self.clear_flag.as_ref(),
            Effect::Bomb => self.bomb.as_ref(),
        }
    }

    fn song(&self, song: Song) -> Option<&HtmlAudioElement> {
        match song {
            Song::Win => self.win.as_ref(),
            Song::Lose => self.lose.as_ref(),
        }
    }

    fn current(&self) -> Option<&HtmlAudioElement> {
        self.current_song.and_then(|song| self.song(song))
    }

    pub(crate) fn run(&mut self, commands: &[AudioCommand]) {
        for &command in commands {
            log::trace!("audio: {:?}", command);
            match command {
                AudioCommand::Play(effect) => {
                    if let Some(element) = self.effect(effect) {
                        start(element);
                    }
                }
                AudioCommand::Loop(song) => {
                    if let Some(element) = self.current() {
                        halt(element);
                    }
                    self.current_song = Some(song);
                    if let Some(element) = self.song(song) {
                        start(element);
                    }
                }
                AudioCommand::StopMusic => {
                    if let Some(element) = self.current() {
                        halt(element);
                    }
                    self.current_song = None;
                }
                AudioCommand::PauseMusic => {
                    if let Some(element) = self.current() {
                        halt(element);
                    }
                }
                AudioCommand::ResumeMusic => {
                    if let Some(element) = self.current() {
                        if let Err(err) = element.play() {
                            log::error!("failed to resume audio: {:?}", err);
                        }
                    }
                }
            }
        }
    }
}
