//! Randomized cosmetic particles drawn over the background.
//!
//! Membership is decided by substring containment on the lower-cased condition
//! category, so one label can switch on several kinds of decoration at once.
//! The random source is always passed in.

use rand::Rng;

pub const RAIN_DROP_COUNT: usize = 150;
pub const CLOUD_SHAPE_COUNT: usize = 5;
pub const SNOW_FLAKE_COUNT: usize = 50;

/// Seconds a cloud takes to cross the sky.
pub const CLOUD_DRIFT_SECS: f64 = 25.0;

/// Clouds that are always present when the sky is cloudy.
pub const STATIC_CLOUDS: [CloudShape; 2] = [
    CloudShape {
        id: CLOUD_SHAPE_COUNT,
        top_pct: 15.0,
        size_px: 120.0,
        height_px: 60.0,
        delay_secs: 5.0,
        duration_secs: CLOUD_DRIFT_SECS,
    },
    CloudShape {
        id: CLOUD_SHAPE_COUNT + 1,
        top_pct: 25.0,
        size_px: 80.0,
        height_px: 40.0,
        delay_secs: 12.0,
        duration_secs: CLOUD_DRIFT_SECS,
    },
];

fn pct(value: f64) -> String {
    format!("{value}%")
}

fn secs(value: f64) -> String {
    format!("{value}s")
}

fn px(value: f64) -> String {
    format!("{value}px")
}

#[derive(Debug, Clone, PartialEq)]
pub struct RainDrop {
    pub id: usize,
    pub left_pct: f64,
    pub delay_secs: f64,
    pub duration_secs: f64,
}

impl RainDrop {
    pub fn left(&self) -> String {
        pct(self.left_pct)
    }

    pub fn delay(&self) -> String {
        secs(self.delay_secs)
    }

    pub fn duration(&self) -> String {
        secs(self.duration_secs)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CloudShape {
    pub id: usize,
    pub top_pct: f64,
    pub size_px: f64,
    pub height_px: f64,
    pub delay_secs: f64,
    pub duration_secs: f64,
}

impl CloudShape {
    pub fn top(&self) -> String {
        pct(self.top_pct)
    }

    pub fn width(&self) -> String {
        px(self.size_px)
    }

    pub fn height(&self) -> String {
        px(self.height_px)
    }

    pub fn delay(&self) -> String {
        secs(self.delay_secs)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnowFlake {
    pub id: usize,
    pub left_pct: f64,
    pub size_px: f64,
    pub delay_secs: f64,
    pub duration_secs: f64,
}

impl SnowFlake {
    pub fn left(&self) -> String {
        pct(self.left_pct)
    }

    pub fn size(&self) -> String {
        px(self.size_px)
    }

    pub fn delay(&self) -> String {
        secs(self.delay_secs)
    }
}

pub fn rain_drops<R: Rng + ?Sized>(rng: &mut R) -> Vec<RainDrop> {
    (0..RAIN_DROP_COUNT)
        .map(|id| RainDrop {
            id,
            left_pct: rng.gen_range(0.0..100.0),
            delay_secs: rng.gen_range(0.0..2.0),
            duration_secs: rng.gen_range(0.8..1.2),
        })
        .collect()
}

pub fn cloud_shapes<R: Rng + ?Sized>(rng: &mut R) -> Vec<CloudShape> {
    (0..CLOUD_SHAPE_COUNT)
        .map(|id| {
            let size_px = rng.gen_range(60.0..140.0);
            CloudShape {
                id,
                top_pct: rng.gen_range(10.0..40.0),
                size_px,
                height_px: size_px * 0.6,
                delay_secs: rng.gen_range(0.0..20.0),
                duration_secs: CLOUD_DRIFT_SECS,
            }
        })
        .collect()
}

pub fn snow_flakes<R: Rng + ?Sized>(rng: &mut R) -> Vec<SnowFlake> {
    (0..SNOW_FLAKE_COUNT)
        .map(|id| SnowFlake {
            id,
            left_pct: rng.gen_range(0.0..100.0),
            size_px: rng.gen_range(2.0..6.0),
            delay_secs: rng.gen_range(0.0..3.0),
            duration_secs: rng.gen_range(2.0..4.0),
        })
        .collect()
}

fn is_rainy(weather_type: &str) -> bool {
    weather_type.contains("rain") || weather_type.contains("drizzle")
}

fn is_cloudy(weather_type: &str) -> bool {
    weather_type.contains("cloud")
}

fn is_snowy(weather_type: &str) -> bool {
    weather_type.contains("snow")
}

fn is_clear(weather_type: &str) -> bool {
    weather_type.contains("clear")
}

fn is_stormy(weather_type: &str) -> bool {
    weather_type.contains("thunder") || weather_type.contains("storm")
}

/// Everything drawn over the background for one condition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decorations {
    weather_type: String,
    pub rain: Vec<RainDrop>,
    /// Generated shapes only; see [`Decorations::all_clouds`] for the static extras.
    pub clouds: Vec<CloudShape>,
    pub snow: Vec<SnowFlake>,
    pub sun_rays: bool,
    pub lightning: bool,
}

impl Decorations {
    /// Generate a fresh set for `weather_type`, which is lower-cased first.
    pub fn generate<R: Rng + ?Sized>(weather_type: &str, rng: &mut R) -> Self {
        let weather_type = weather_type.to_lowercase();

        let rain = if is_rainy(&weather_type) { rain_drops(rng) } else { Vec::new() };
        let clouds = if is_cloudy(&weather_type) { cloud_shapes(rng) } else { Vec::new() };
        let snow = if is_snowy(&weather_type) { snow_flakes(rng) } else { Vec::new() };

        Self {
            sun_rays: is_clear(&weather_type),
            lightning: is_stormy(&weather_type),
            weather_type,
            rain,
            clouds,
            snow,
        }
    }

    /// Replace everything if `weather_type` differs from the one these were
    /// generated for. Returns whether a regeneration happened.
    pub fn refresh<R: Rng + ?Sized>(&mut self, weather_type: &str, rng: &mut R) -> bool {
        if self.weather_type == weather_type.to_lowercase() {
            return false;
        }

        *self = Self::generate(weather_type, rng);
        true
    }

    pub fn weather_type(&self) -> &str {
        &self.weather_type
    }

    /// Generated cloud shapes followed by the two static ones.
    pub fn all_clouds(&self) -> Vec<CloudShape> {
        if !is_cloudy(&self.weather_type) {
            return Vec::new();
        }

        self.clouds.iter().cloned().chain(STATIC_CLOUDS).collect()
    }

    pub fn particle_count(&self) -> usize {
        self.rain.len() + self.all_clouds().len() + self.snow.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particle_count() == 0 && !self.sun_rays && !self.lightning
    }
}
