//! Terminal rendering of readings, notifications and decorated skies.

use chrono::Local;
use crossterm::{
    cursor, execute,
    style::{Color, Stylize},
    terminal::{self, ClearType},
};
use std::{
    io::{self, Write},
    time::{Duration, Instant},
};
use weather_studio_core::{
    Decorations, DisplayState, Notification, PresentationBucket, Theme, WeatherIcon,
    WeatherReading,
    decoration::CloudShape,
};

const MISSING: &str = "--";

/// Pixels per terminal column when placing cloud shapes.
const PX_PER_COLUMN: f64 = 10.0;

/// Seconds between lightning flashes.
const FLASH_PERIOD_SECS: f64 = 4.0;
const FLASH_LENGTH_SECS: f64 = 0.25;

fn bucket_color(bucket: PresentationBucket) -> Color {
    match bucket {
        PresentationBucket::Sunny => Color::Yellow,
        PresentationBucket::Cloudy => Color::Grey,
        PresentationBucket::Rainy => Color::Blue,
        PresentationBucket::Snowy => Color::White,
        PresentationBucket::Stormy => Color::Magenta,
    }
}

struct Palette {
    text: Color,
    muted: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette { text: Color::White, muted: Color::DarkGrey },
        Theme::Light => Palette { text: Color::Black, muted: Color::Grey },
    }
}

fn icon_glyph(icon: WeatherIcon) -> &'static str {
    match icon {
        WeatherIcon::Sun => "☀",
        WeatherIcon::Cloud => "☁",
        WeatherIcon::CloudRain => "🌧",
        WeatherIcon::CloudSnow => "🌨",
        WeatherIcon::Zap => "⚡",
    }
}

/// Round half up, never producing negative zero.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor() + 0.0
}

fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text content of a reading card, before styling.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub title: String,
    pub icon: WeatherIcon,
    pub temperature: String,
    pub description: String,
    pub feels_like: String,
    pub details: Vec<(&'static str, String)>,
}

impl CardView {
    pub fn from_reading(reading: &WeatherReading) -> Self {
        let units = reading.units;
        let condition = reading.primary_condition();

        let visibility = match reading.visibility_m {
            Some(meters) => format!("{} km", (f64::from(meters) / 1000.0).round()),
            None => MISSING.to_string(),
        };

        let updated = reading.observation_time.with_timezone(&Local).format("%H:%M").to_string();

        Self {
            title: reading.location_name.clone(),
            icon: WeatherIcon::for_category(&condition.category),
            temperature: format!(
                "{}{}",
                round_half_up(reading.temperature),
                units.temperature_symbol()
            ),
            description: capitalize_words(&condition.description),
            feels_like: format!(
                "Feels like {}{}",
                round_half_up(reading.feels_like),
                units.temperature_symbol()
            ),
            details: vec![
                ("Humidity", format!("{}%", reading.humidity_pct)),
                ("Wind Speed", format!("{} {}", reading.wind_speed, units.speed_symbol())),
                ("Pressure", format!("{} hPa", reading.pressure_hpa)),
                ("Visibility", visibility),
                ("Updated", updated),
            ],
        }
    }
}

pub fn print_card(state: &DisplayState, theme: Theme) {
    let colors = palette(theme);

    let Some(reading) = &state.reading else {
        println!(
            "{}",
            "Enter your API key to see weather data".with(colors.muted)
        );
        return;
    };

    let view = CardView::from_reading(reading);
    let accent = bucket_color(view.icon.tint());

    let mut icon = icon_glyph(view.icon).with(accent);
    if view.icon.pulses() {
        icon = icon.slow_blink();
    }

    println!();
    println!("  {}", view.title.as_str().with(colors.text).bold());
    println!("  {icon}  {}", view.temperature.as_str().with(colors.text).bold());
    println!("  {}", view.description.as_str().with(colors.muted));
    println!("  {}", view.feels_like.as_str().with(colors.muted));
    println!();
    for (label, value) in &view.details {
        println!(
            "  {}{}",
            format!("{label:12}").with(colors.muted),
            value.as_str().with(colors.text)
        );
    }
    println!(
        "  {}{}",
        format!("{:12}", "Background").with(colors.muted),
        state.background_class().with(bucket_color(state.bucket))
    );
}

pub fn print_loading(theme: Theme) {
    println!("{}", "Loading...".with(palette(theme).muted).italic());
}

pub fn print_notification(notification: &Notification) {
    if notification.is_error() {
        eprintln!(
            "{} {}",
            format!("{}:", notification.title).red().bold(),
            notification.description
        );
    } else {
        println!(
            "{} {}",
            format!("{}:", notification.title).green().bold(),
            notification.description
        );
    }
}

/// One rendered frame of the sky.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub lines: Vec<String>,
    pub flash: bool,
}

/// Fraction of the way through the current animation cycle, or `None`
/// while the particle is still waiting out its delay.
fn cycle_progress(t: f64, delay: f64, duration: f64) -> Option<f64> {
    if t < delay || duration <= 0.0 {
        return None;
    }
    Some(((t - delay) / duration).fract())
}

fn column(pct: f64, width: usize) -> usize {
    ((pct / 100.0 * width as f64) as usize).min(width - 1)
}

fn put(grid: &mut [Vec<char>], row: isize, col: isize, glyph: char) {
    if row < 0 || col < 0 {
        return;
    }
    if let Some(cell) = grid.get_mut(row as usize).and_then(|line| line.get_mut(col as usize)) {
        *cell = glyph;
    }
}

fn draw_cloud(grid: &mut [Vec<char>], cloud: &CloudShape, width: usize, height: usize, t: f64) {
    let Some(progress) = cycle_progress(t, cloud.delay_secs, cloud.duration_secs) else {
        return;
    };

    let span = ((cloud.size_px / PX_PER_COLUMN).round() as isize).max(3);
    let rows = ((cloud.height_px / (PX_PER_COLUMN * 3.0)).round() as isize).max(1);
    let left = (progress * (width as isize + span) as f64) as isize - span;
    let top = (cloud.top_pct / 100.0 * height as f64) as isize;

    for dy in 0..rows {
        for dx in 0..span {
            let glyph = if dx == 0 {
                '('
            } else if dx == span - 1 {
                ')'
            } else {
                '░'
            };
            put(grid, top + dy, left + dx, glyph);
        }
    }
}

fn draw_sun(grid: &mut [Vec<char>], width: usize) {
    let center = width as isize - 5;
    let rays = [
        (0, -2, '\\'),
        (0, 0, '|'),
        (0, 2, '/'),
        (1, -2, '-'),
        (1, 0, '☀'),
        (1, 2, '-'),
        (2, -2, '/'),
        (2, 0, '|'),
        (2, 2, '\\'),
    ];
    for (row, offset, glyph) in rays {
        put(grid, row, center + offset, glyph);
    }
}

/// Render the decorations at `t` seconds into the animation.
pub fn frame(decorations: &Decorations, width: usize, height: usize, t: f64) -> Frame {
    if width == 0 || height == 0 {
        return Frame { lines: Vec::new(), flash: false };
    }

    let mut grid = vec![vec![' '; width]; height];

    for cloud in decorations.all_clouds() {
        draw_cloud(&mut grid, &cloud, width, height, t);
    }

    for drop in &decorations.rain {
        if let Some(progress) = cycle_progress(t, drop.delay_secs, drop.duration_secs) {
            let row = (progress * height as f64) as isize;
            put(&mut grid, row, column(drop.left_pct, width) as isize, '|');
        }
    }

    for flake in &decorations.snow {
        if let Some(progress) = cycle_progress(t, flake.delay_secs, flake.duration_secs) {
            let row = (progress * height as f64) as isize;
            let glyph = if flake.size_px >= 4.0 { '*' } else { '·' };
            put(&mut grid, row, column(flake.left_pct, width) as isize, glyph);
        }
    }

    if decorations.sun_rays {
        draw_sun(&mut grid, width);
    }

    let flash = decorations.lightning && t.rem_euclid(FLASH_PERIOD_SECS) < FLASH_LENGTH_SECS;

    Frame { lines: grid.into_iter().map(|line| line.into_iter().collect()).collect(), flash }
}

fn write_frame(out: &mut impl Write, frame: &Frame, bucket: PresentationBucket) -> io::Result<()> {
    let color = bucket_color(bucket);
    for line in &frame.lines {
        if frame.flash {
            writeln!(out, "{}", line.as_str().with(color).reverse())?;
        } else {
            writeln!(out, "{}", line.as_str().with(color))?;
        }
    }
    Ok(())
}

/// A single still of the sky, taken once every particle is in motion.
pub fn print_sky(state: &DisplayState) -> io::Result<()> {
    if state.decorations.is_empty() {
        return Ok(());
    }

    let (columns, _) = terminal::size().unwrap_or((80, 24));
    let still = frame(&state.decorations, usize::from(columns).min(80), 8, 3.0);
    write_frame(&mut io::stdout().lock(), &still, state.bucket)
}

/// Redraw the sky and card for `duration`, about ten frames a second.
pub async fn animate(state: &DisplayState, theme: Theme, duration: Duration) -> io::Result<()> {
    let mut out = io::stdout();
    let (columns, rows) = terminal::size().unwrap_or((80, 24));
    let height = usize::from(rows).saturating_sub(14).max(4);

    execute!(out, cursor::Hide)?;

    let started = Instant::now();
    let mut ticker = tokio::time::interval(Duration::from_millis(100));

    let result = async {
        while started.elapsed() < duration {
            ticker.tick().await;

            let t = started.elapsed().as_secs_f64();
            let sky = frame(&state.decorations, usize::from(columns), height, t);

            execute!(out, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
            write_frame(&mut out, &sky, state.bucket)?;
            out.flush()?;
            print_card(state, theme);
        }
        Ok::<_, io::Error>(())
    }
    .await;

    execute!(out, cursor::Show)?;
    result
}
