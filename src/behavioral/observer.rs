// Observer: a weather station pushes every new reading to the displays
// registered with it.

use crate::config::Settings;
use crate::error::Result;
use crate::narration::Narrator;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurements {
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
}

impl Measurements {
    pub fn new(temperature: f64, humidity: f64, pressure: f64) -> Self {
        Self {
            temperature,
            humidity,
            pressure,
        }
    }
}

pub trait Observer {
    fn update(&mut self, measurements: &Measurements, narrator: &Narrator);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(usize);

// ============================================================================
// Subject
// ============================================================================

pub struct WeatherData {
    observers: Vec<(ObserverId, Rc<RefCell<dyn Observer>>)>,
    next_id: usize,
    latest: Option<Measurements>,
    narrator: Narrator,
}

impl WeatherData {
    pub fn new(narrator: Narrator) -> Self {
        Self {
            observers: Vec::new(),
            next_id: 0,
            latest: None,
            narrator,
        }
    }

    pub fn register(&mut self, observer: Rc<RefCell<dyn Observer>>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        debug!(observers = self.observers.len(), "observer registered");
        id
    }

    /// Returns false when `id` was not registered.
    pub fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(registered, _)| *registered != id);
        self.observers.len() != before
    }

    pub fn set_measurements(&mut self, measurements: Measurements) {
        info!(
            temperature = measurements.temperature,
            humidity = measurements.humidity,
            pressure = measurements.pressure,
            "new measurements"
        );
        self.latest = Some(measurements);
        for (_, observer) in &self.observers {
            observer.borrow_mut().update(&measurements, &self.narrator);
        }
    }

    pub fn latest(&self) -> Option<Measurements> {
        self.latest
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

// ============================================================================
// Displays
// ============================================================================

#[derive(Debug, Default)]
pub struct CurrentConditionsDisplay {
    last: Option<(f64, f64)>,
}

impl CurrentConditionsDisplay {
    /// Last seen (temperature, humidity).
    pub fn last(&self) -> Option<(f64, f64)> {
        self.last
    }
}

impl Observer for CurrentConditionsDisplay {
    fn update(&mut self, m: &Measurements, narrator: &Narrator) {
        self.last = Some((m.temperature, m.humidity));
        narrator.say(format_args!(
            "Current conditions: {:.1}°C and {:.1}% humidity",
            m.temperature, m.humidity
        ));
    }
}

#[derive(Debug)]
pub struct StatisticsDisplay {
    sum: f64,
    count: u32,
    max: f64,
    min: f64,
}

impl Default for StatisticsDisplay {
    fn default() -> Self {
        Self {
            sum: 0.0,
            count: 0,
            max: f64::NEG_INFINITY,
            min: f64::INFINITY,
        }
    }
}

impl StatisticsDisplay {
    pub fn average(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / f64::from(self.count))
    }

    pub fn max(&self) -> Option<f64> {
        (self.count > 0).then_some(self.max)
    }

    pub fn min(&self) -> Option<f64> {
        (self.count > 0).then_some(self.min)
    }
}

impl Observer for StatisticsDisplay {
    fn update(&mut self, m: &Measurements, narrator: &Narrator) {
        self.sum += m.temperature;
        self.count += 1;
        self.max = self.max.max(m.temperature);
        self.min = self.min.min(m.temperature);

        narrator.say(format_args!(
            "Avg/Max/Min temperature = {:.1}/{:.1}/{:.1}",
            self.sum / f64::from(self.count),
            self.max,
            self.min
        ));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Rising,
    Steady,
    Falling,
}

impl Trend {
    fn between(previous: f64, current: f64) -> Self {
        if current > previous {
            Trend::Rising
        } else if current < previous {
            Trend::Falling
        } else {
            Trend::Steady
        }
    }

    pub fn forecast(self) -> &'static str {
        match self {
            Trend::Rising => "Improving weather on the way!",
            Trend::Steady => "More of the same",
            Trend::Falling => "Watch out for cooler, rainy weather",
        }
    }
}

#[derive(Debug, Default)]
pub struct ForecastDisplay {
    last_pressure: Option<f64>,
    trend: Option<Trend>,
}

impl ForecastDisplay {
    /// `None` until a second reading arrives.
    pub fn trend(&self) -> Option<Trend> {
        self.trend
    }
}

impl Observer for ForecastDisplay {
    fn update(&mut self, m: &Measurements, narrator: &Narrator) {
        self.trend = self
            .last_pressure
            .map(|previous| Trend::between(previous, m.pressure));
        self.last_pressure = Some(m.pressure);

        match self.trend {
            Some(trend) => narrator.say(format_args!("Forecast: {}", trend.forecast())),
            None => narrator.say("Forecast: collecting data, no trend yet"),
        }
    }
}

pub fn demo(narrator: &Narrator, _settings: &Settings) -> Result<()> {
    let mut station = WeatherData::new(narrator.clone());

    let current = Rc::new(RefCell::new(CurrentConditionsDisplay::default()));
    let statistics = Rc::new(RefCell::new(StatisticsDisplay::default()));
    let forecast = Rc::new(RefCell::new(ForecastDisplay::default()));

    station.register(current.clone());
    station.register(statistics.clone());
    let forecast_id = station.register(forecast.clone());
    narrator.say(format_args!("{} displays registered", station.observer_count()));

    let readings = [
        Measurements::new(26.6, 65.0, 1013.1),
        Measurements::new(28.5, 70.0, 1012.0),
        Measurements::new(22.0, 90.0, 1011.5),
    ];
    for (i, reading) in readings.into_iter().enumerate() {
        narrator.section(&format!("Weather update {}", i + 1));
        station.set_measurements(reading);
    }

    narrator.section("Removing forecast display");
    station.remove(forecast_id);
    narrator.say(format_args!("{} displays registered", station.observer_count()));

    narrator.section("Weather update 4");
    station.set_measurements(Measurements::new(20.5, 85.0, 1010.0));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_registered_observers_notified_in_order() {
        let narrator = Narrator::captured();
        let mut station = WeatherData::new(narrator.clone());
        station.register(Rc::new(RefCell::new(CurrentConditionsDisplay::default())));
        station.register(Rc::new(RefCell::new(StatisticsDisplay::default())));

        station.set_measurements(Measurements::new(20.0, 50.0, 1000.0));

        let lines = narrator.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Current conditions"));
        assert!(lines[1].starts_with("Avg/Max/Min"));
    }

    #[test]
    fn test_removed_observer_not_notified() {
        let narrator = Narrator::captured();
        let mut station = WeatherData::new(narrator.clone());
        let display = Rc::new(RefCell::new(CurrentConditionsDisplay::default()));
        let id = station.register(display.clone());

        assert!(station.remove(id));
        assert!(!station.remove(id));
        station.set_measurements(Measurements::new(20.0, 50.0, 1000.0));

        assert_eq!(display.borrow().last(), None);
        assert_eq!(station.observer_count(), 0);
    }

    #[test]
    fn test_statistics() {
        let narrator = Narrator::captured();
        let mut station = WeatherData::new(narrator.clone());
        let stats = Rc::new(RefCell::new(StatisticsDisplay::default()));
        station.register(stats.clone());

        for t in [10.0, 20.0, 30.0] {
            station.set_measurements(Measurements::new(t, 50.0, 1000.0));
        }

        let stats = stats.borrow();
        assert_eq!(stats.average(), Some(20.0));
        assert_eq!(stats.max(), Some(30.0));
        assert_eq!(stats.min(), Some(10.0));
    }

    #[test]
    fn test_forecast_trend() {
        let narrator = Narrator::captured();
        let mut forecast = ForecastDisplay::default();

        forecast.update(&Measurements::new(20.0, 50.0, 1000.0), &narrator);
        assert_eq!(forecast.trend(), None);

        forecast.update(&Measurements::new(20.0, 50.0, 1002.0), &narrator);
        assert_eq!(forecast.trend(), Some(Trend::Rising));

        forecast.update(&Measurements::new(20.0, 50.0, 1002.0), &narrator);
        assert_eq!(forecast.trend(), Some(Trend::Steady));

        forecast.update(&Measurements::new(20.0, 50.0, 999.0), &narrator);
        assert_eq!(forecast.trend(), Some(Trend::Falling));
        assert!(narrator.contains("Watch out for cooler, rainy weather"));
    }

    #[test]
    fn test_demo_runs() {
        let narrator = Narrator::captured();
        demo(&narrator, &Settings::for_tests()).unwrap();
        assert_eq!(narrator.count("Forecast:"), 3);
        assert_eq!(narrator.count("Current conditions"), 4);
    }
}
