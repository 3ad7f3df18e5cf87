//! Renders a shaken snow globe to the terminal.
//!
//! Run with `cargo run --example ascii_globe`.

use std::{thread, time::Duration};

use snow_globe::*;

const COLUMNS: usize = 60;
const ROWS: usize = 30;

struct AsciiSink {
    scale: Vec2,
    cells: Vec<u8>,
}

impl AsciiSink {
    fn new(config: &GlobeConfig) -> Self {
        let extent = config.globe.center + Vec2::splat(config.globe.radius);
        Self {
            scale: Vec2::new(COLUMNS as f32 / extent.x, ROWS as f32 / extent.y),
            cells: vec![b' '; COLUMNS * ROWS],
        }
    }

    fn print(&self, frame: u64, energy: f32, resting: usize) {
        let mut screen = String::with_capacity((COLUMNS + 1) * ROWS + 64);
        screen.push_str("\x1b[H");
        for row in self.cells.chunks(COLUMNS) {
            screen.push_str(&String::from_utf8_lossy(row));
            screen.push('\n');
        }
        screen.push_str(&format!(
            "frame {frame:>5}  swirl {energy:>6.3}  resting {resting:>4}\n"
        ));
        print!("{screen}");
    }
}

impl RenderSink for AsciiSink {
    fn begin_frame(&mut self, _particle_count: usize) {
        self.cells.fill(b' ');
    }

    fn draw(&mut self, _handle: RenderHandle, position: Vec2, size: f32, opacity: f32) {
        let cell = position * self.scale;
        if cell.x < 0.0 || cell.y < 0.0 {
            return;
        }
        let (col, row) = (cell.x as usize, cell.y as usize);
        if col >= COLUMNS || row >= ROWS {
            return;
        }
        self.cells[row * COLUMNS + col] = match (size > 3.5, opacity > 0.8) {
            (true, true) => b'@',
            (true, false) => b'o',
            (false, true) => b'*',
            (false, false) => b'.',
        };
    }
}

fn main() -> Result<(), ConfigError> {
    let config = GlobeConfig::default();
    let mut globe = SnowGlobe::with_seed(config, 2024)?;
    let shaker = ManualMotion::new();
    if !globe.attach_motion(shaker.clone()) {
        eprintln!("motion input unavailable, the globe will only settle");
    }

    let mut sink = AsciiSink::new(&config);
    print!("\x1b[2J");
    for frame in 0..1800u64 {
        if (30..60).contains(&frame) {
            let sign = if frame % 2 == 0 { 1.0 } else { -1.0 };
            shaker.emit(MotionSample::new(7.0 * sign, -5.0, 0.0));
        }

        let Some(stats) = globe.step() else {
            break;
        };
        if frame % 3 == 0 {
            globe.render(&mut sink);
            sink.print(stats.frame, stats.swirl_energy, stats.resting());
        }
        thread::sleep(Duration::from_millis(16));
    }

    globe.dispose();
    Ok(())
}
