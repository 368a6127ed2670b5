// Facade: one home-theater object sequences the DVD player, projector,
// sound system and lights so the client calls one method per scenario.

use crate::config::Settings;
use crate::error::Result;
use crate::narration::Narrator;

#[derive(Debug, Default)]
pub struct DvdPlayer {
    on: bool,
    current: Option<String>,
}

impl DvdPlayer {
    pub fn on(&mut self, n: &Narrator) {
        self.on = true;
        n.say("DVD Player: Powering ON");
    }

    pub fn play(&mut self, movie: &str, n: &Narrator) {
        self.current = Some(movie.to_string());
        n.say(format_args!("DVD Player: Playing \"{}\"", movie));
    }

    pub fn stop(&mut self, n: &Narrator) {
        if let Some(movie) = self.current.take() {
            n.say(format_args!("DVD Player: Stopping \"{}\"", movie));
        }
    }

    pub fn eject(&mut self, n: &Narrator) {
        n.say("DVD Player: Ejecting disc");
    }

    pub fn off(&mut self, n: &Narrator) {
        self.on = false;
        n.say("DVD Player: Powering OFF");
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn current_movie(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectorMode {
    Widescreen,
    Standard,
}

#[derive(Debug)]
pub struct Projector {
    on: bool,
    mode: ProjectorMode,
}

impl Default for Projector {
    fn default() -> Self {
        Self {
            on: false,
            mode: ProjectorMode::Standard,
        }
    }
}

impl Projector {
    pub fn on(&mut self, n: &Narrator) {
        self.on = true;
        n.say("Projector: Powering ON");
    }

    pub fn widescreen_mode(&mut self, n: &Narrator) {
        self.mode = ProjectorMode::Widescreen;
        n.say("Projector: Setting to Widescreen mode (16:9)");
    }

    pub fn standard_mode(&mut self, n: &Narrator) {
        self.mode = ProjectorMode::Standard;
        n.say("Projector: Setting to Standard mode (4:3)");
    }

    pub fn focus(&mut self, n: &Narrator) {
        n.say("Projector: Adjusting focus");
    }

    pub fn off(&mut self, n: &Narrator) {
        self.on = false;
        n.say("Projector: Powering OFF");
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn mode(&self) -> ProjectorMode {
        self.mode
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundMode {
    Stereo,
    Surround,
}

#[derive(Debug)]
pub struct SoundSystem {
    on: bool,
    volume: u8,
    mode: SoundMode,
}

impl Default for SoundSystem {
    fn default() -> Self {
        Self {
            on: false,
            volume: 0,
            mode: SoundMode::Stereo,
        }
    }
}

impl SoundSystem {
    pub fn on(&mut self, n: &Narrator) {
        self.on = true;
        n.say("Sound System: Powering ON");
    }

    pub fn set_volume(&mut self, level: u8, n: &Narrator) {
        self.volume = level;
        n.say(format_args!("Sound System: Setting volume to {}", level));
    }

    pub fn set_surround(&mut self, n: &Narrator) {
        self.mode = SoundMode::Surround;
        n.say("Sound System: Enabling Surround Sound mode");
    }

    pub fn set_stereo(&mut self, n: &Narrator) {
        self.mode = SoundMode::Stereo;
        n.say("Sound System: Setting to Stereo mode");
    }

    pub fn off(&mut self, n: &Narrator) {
        self.on = false;
        n.say("Sound System: Powering OFF");
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn mode(&self) -> SoundMode {
        self.mode
    }
}

#[derive(Debug, Default)]
pub struct Lights {
    brightness: u8,
}

impl Lights {
    pub fn on(&mut self, n: &Narrator) {
        self.brightness = 100;
        n.say("Lights: ON (Brightness: 100%)");
    }

    pub fn dim(&mut self, level: u8, n: &Narrator) {
        self.brightness = level.min(100);
        n.say(format_args!("Lights: Dimmed to {}%", self.brightness));
    }

    pub fn off(&mut self, n: &Narrator) {
        self.brightness = 0;
        n.say("Lights: OFF");
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }
}

// ============================================================================
// Facade
// ============================================================================

pub struct HomeTheaterFacade {
    pub dvd: DvdPlayer,
    pub projector: Projector,
    pub sound: SoundSystem,
    pub lights: Lights,
    narrator: Narrator,
}

impl HomeTheaterFacade {
    pub fn new(
        dvd: DvdPlayer,
        projector: Projector,
        sound: SoundSystem,
        lights: Lights,
        narrator: Narrator,
    ) -> Self {
        Self {
            dvd,
            projector,
            sound,
            lights,
            narrator,
        }
    }

    pub fn watch_movie(&mut self, movie: &str) {
        let n = &self.narrator;
        n.say("Get ready to watch a movie...");
        self.lights.dim(10, n);
        self.projector.on(n);
        self.projector.widescreen_mode(n);
        self.projector.focus(n);
        self.sound.on(n);
        self.sound.set_volume(15, n);
        self.sound.set_surround(n);
        self.dvd.on(n);
        self.dvd.play(movie, n);
        n.say("Movie setup complete! Enjoy your movie!");
    }

    pub fn end_movie(&mut self) {
        let n = &self.narrator;
        n.say("Shutting down home theater...");
        self.dvd.stop(n);
        self.dvd.eject(n);
        self.dvd.off(n);
        self.sound.off(n);
        self.projector.off(n);
        self.lights.on(n);
        n.say("Movie ended. Home theater shut down complete!");
    }

    pub fn listen_to_music(&mut self) {
        let n = &self.narrator;
        n.say("Setting up for music...");
        self.lights.dim(30, n);
        self.sound.on(n);
        self.sound.set_stereo(n);
        self.sound.set_volume(10, n);
        n.say("Music setup complete! Enjoy!");
    }

    pub fn end_music(&mut self) {
        let n = &self.narrator;
        n.say("Ending music session...");
        self.sound.off(n);
        self.lights.on(n);
        n.say("Music ended!");
    }

    pub fn all_off(&mut self) {
        let n = &self.narrator;
        n.say("Shutting down all systems...");
        self.dvd.off(n);
        self.projector.off(n);
        self.sound.off(n);
        self.lights.off(n);
        n.say("All systems powered OFF!");
    }
}

pub fn demo(narrator: &Narrator, _settings: &Settings) -> Result<()> {
    let n = narrator;
    let mut dvd = DvdPlayer::default();
    let mut projector = Projector::default();
    let mut sound = SoundSystem::default();
    let mut lights = Lights::default();

    n.section("Without the facade");
    n.say(">>> Starting movie the hard way...");
    lights.dim(10, n);
    projector.on(n);
    projector.widescreen_mode(n);
    projector.focus(n);
    sound.on(n);
    sound.set_volume(15, n);
    sound.set_surround(n);
    dvd.on(n);
    dvd.play("The Matrix", n);
    n.say(">>> Ending movie the hard way...");
    dvd.stop(n);
    dvd.eject(n);
    dvd.off(n);
    sound.off(n);
    projector.off(n);
    projector.standard_mode(n);
    lights.on(n);

    n.section("With the facade");
    let mut theater = HomeTheaterFacade::new(dvd, projector, sound, lights, narrator.clone());
    theater.watch_movie("Inception");
    n.say(">>> Watching movie...");
    theater.end_movie();

    n.section("Music mode");
    theater.listen_to_music();
    n.say(">>> Listening to music...");
    theater.end_music();

    n.section("Lights out");
    theater.all_off();
    Ok(())
}
