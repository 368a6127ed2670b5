// Proxy: a stand-in image that loads the real one on first display, caches
// it, and counts every access.

use crate::config::Settings;
use crate::error::Result;
use crate::narration::Narrator;
use std::fmt;
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

pub trait Image {
    fn display(&mut self);
    fn file_name(&self) -> &str;
    fn dimensions(&self) -> String;
}

pub const IMAGE_BYTES: usize = 5 * 1024 * 1024;

pub struct RealImage {
    file_name: String,
    data: Vec<u8>,
    width: u32,
    height: u32,
    load_time: Duration,
    narrator: Narrator,
}

impl RealImage {
    /// Simulates an expensive load from disk. `delay` stands in for I/O.
    pub fn load(file_name: impl Into<String>, delay: Duration, narrator: Narrator) -> Self {
        let file_name = file_name.into();
        narrator.say(format_args!(" RealImage: Loading '{}' from disk...", file_name));

        let started = Instant::now();
        thread::sleep(delay);
        let data = vec![0u8; IMAGE_BYTES];
        let load_time = started.elapsed();

        let image = Self {
            file_name,
            data,
            width: 1920,
            height: 1080,
            load_time,
            narrator,
        };
        image.narrator.say(format_args!(
            "   Loaded {} MB, {}, in {}ms",
            image.size_mb(),
            image.dimensions(),
            image.load_time.as_millis()
        ));
        info!(file = %image.file_name, load_ms = image.load_time.as_millis() as u64, "real image loaded");
        image
    }

    pub fn size_mb(&self) -> usize {
        self.data.len() / (1024 * 1024)
    }

    pub fn load_time(&self) -> Duration {
        self.load_time
    }
}

impl Image for RealImage {
    fn display(&mut self) {
        self.narrator.say(format_args!(
            "  Displaying: {} [{}x{}]",
            self.file_name, self.width, self.height
        ));
    }

    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn dimensions(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageStatistics {
    pub file_name: String,
    pub access_count: u32,
    pub loaded: bool,
    pub size_mb: Option<usize>,
    pub load_time: Option<Duration>,
}

impl fmt::Display for ImageStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File: {}", self.file_name)?;
        writeln!(f, "Access Count: {}", self.access_count)?;
        write!(f, "Loaded: {}", if self.loaded { "Yes" } else { "No" })?;
        if let (Some(size), Some(time)) = (self.size_mb, self.load_time) {
            write!(f, "\nSize: {} MB\nLoad Time: {} ms", size, time.as_millis())?;
        }
        Ok(())
    }
}

pub struct ProxyImage {
    file_name: String,
    real: Option<RealImage>,
    access_count: u32,
    constructions: u32,
    load_delay: Duration,
    narrator: Narrator,
}

impl ProxyImage {
    pub fn new(file_name: impl Into<String>, load_delay: Duration, narrator: Narrator) -> Self {
        let file_name = file_name.into();
        narrator.say(format_args!(
            " ProxyImage: Created proxy for '{}' (image NOT loaded yet)",
            file_name
        ));
        Self {
            file_name,
            real: None,
            access_count: 0,
            constructions: 0,
            load_delay,
            narrator,
        }
    }

    pub fn access_count(&self) -> u32 {
        self.access_count
    }

    pub fn is_loaded(&self) -> bool {
        self.real.is_some()
    }

    /// How many times the real image was constructed. Never above one.
    pub fn constructions(&self) -> u32 {
        self.constructions
    }

    pub fn statistics(&self) -> ImageStatistics {
        ImageStatistics {
            file_name: self.file_name.clone(),
            access_count: self.access_count,
            loaded: self.is_loaded(),
            size_mb: self.real.as_ref().map(RealImage::size_mb),
            load_time: self.real.as_ref().map(RealImage::load_time),
        }
    }
}

impl Image for ProxyImage {
    fn display(&mut self) {
        self.access_count += 1;
        self.narrator.say(format_args!(
            " ProxyImage: Access #{} to '{}'",
            self.access_count, self.file_name
        ));

        let real = match self.real.take() {
            Some(cached) => {
                self.narrator
                    .say("  ProxyImage: Using cached image (no disk access needed)");
                cached
            }
            None => {
                self.narrator
                    .say(" ProxyImage: First access - loading real image...");
                self.constructions += 1;
                RealImage::load(self.file_name.clone(), self.load_delay, self.narrator.clone())
            }
        };
        self.real.insert(real).display();
    }

    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn dimensions(&self) -> String {
        match &self.real {
            Some(real) => real.dimensions(),
            None => "Unknown (not loaded)".to_string(),
        }
    }
}

pub fn demo(narrator: &Narrator, settings: &Settings) -> Result<()> {
    let delay = settings.latency.delay(settings.latency.image_load_ms);

    narrator.section("Without a proxy: everything loads up front");
    let started = Instant::now();
    let mut eager: Vec<RealImage> = ["photo1.jpg", "photo2.jpg", "photo3.jpg"]
        .into_iter()
        .map(|name| RealImage::load(name, delay, narrator.clone()))
        .collect();
    narrator.say(format_args!(
        "Loaded {} images (~{} MB) in {}ms",
        eager.len(),
        eager.iter().map(RealImage::size_mb).sum::<usize>(),
        started.elapsed().as_millis()
    ));
    if let Some(first) = eager.first_mut() {
        first.display();
    }

    narrator.section("With a proxy: load on demand");
    let mut gallery: Vec<ProxyImage> = ["vacation1.jpg", "vacation2.jpg", "vacation3.jpg"]
        .into_iter()
        .map(|name| ProxyImage::new(name, delay, narrator.clone()))
        .collect();
    gallery[0].display();
    let loaded = gallery.iter().filter(|p| p.is_loaded()).count();
    narrator.say(format_args!("{} of {} images loaded", loaded, gallery.len()));
    narrator.say(format_args!(
        "Dimensions of {}: {}",
        gallery[1].file_name(),
        gallery[1].dimensions()
    ));

    narrator.section("Caching");
    let mut portrait = ProxyImage::new("portrait.jpg", delay, narrator.clone());
    for _ in 0..3 {
        narrator.blank();
        portrait.display();
    }
    narrator.blank();
    narrator.say("Proxy statistics:");
    for line in portrait.statistics().to_string().lines() {
        narrator.bullet(line);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proxy(narrator: &Narrator) -> ProxyImage {
        ProxyImage::new("test.jpg", Duration::ZERO, narrator.clone())
    }

    #[test]
    fn test_not_loaded_until_displayed() {
        let narrator = Narrator::captured();
        let image = proxy(&narrator);

        assert!(!image.is_loaded());
        assert_eq!(image.dimensions(), "Unknown (not loaded)");
        assert!(!narrator.contains("Loading"));
    }

    #[test]
    fn test_loads_exactly_once_and_counts_accesses() {
        let narrator = Narrator::captured();
        let mut image = proxy(&narrator);

        for expected in 1..=3 {
            image.display();
            assert_eq!(image.access_count(), expected);
            assert!(image.is_loaded());
        }
        assert_eq!(image.constructions(), 1);
        assert_eq!(narrator.count("Loading 'test.jpg' from disk"), 1);
        assert_eq!(narrator.count("Using cached image"), 2);
        assert_eq!(narrator.count("Displaying: test.jpg [1920x1080]"), 3);
    }

    #[test]
    fn test_statistics() {
        let narrator = Narrator::captured();
        let mut image = proxy(&narrator);
        let before = image.statistics();
        assert!(!before.loaded);
        assert_eq!(before.size_mb, None);

        image.display();
        image.display();
        let after = image.statistics();
        assert_eq!(after.access_count, 2);
        assert_eq!(after.size_mb, Some(5));
        assert!(after.to_string().contains("Loaded: Yes"));
        assert_eq!(image.dimensions(), "1920x1080");
    }
}
