/// Terminal viewer for fixed-point models
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use fixmesh_core::{Camera, ModelError, ModelGeometry, SceneView, ScreenPoint};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tracing::{info, warn};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Orientation units per key press, 1/32 of a turn.
const TURN_STEP: i32 = 64;

/// Orientation units per frame while idle.
const SPIN_STEP: i32 = 4;

/// Viewer settings gathered from the command line.
#[derive(Debug, Clone, Copy)]
pub struct ViewerConfig {
    pub distance: i32,
    pub resizable: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            distance: 400,
            resizable: false,
        }
    }
}

/// Result of projecting one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    pub polygons: usize,
    pub center: ScreenPoint,
}

/// Main application struct for terminal model viewing
pub struct TerminalApp {
    model: ModelGeometry,
    camera: Camera,
    renderer: AsciiRenderer,
    orientation: i32,
    spinning: bool,
    mirrored: bool,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
    stats: Result<FrameStats, ModelError>,
}

impl TerminalApp {
    pub fn new(model: ModelGeometry, config: ViewerConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(model, config, width, height))
    }

    /// Build a viewer for a `width` x `height` terminal; the top row is kept
    /// for the status line.
    pub fn with_size(model: ModelGeometry, config: ViewerConfig, width: u16, height: u16) -> Self {
        let rows = height.saturating_sub(1).max(1) as u32;
        let mut camera = Camera::new(width.max(1) as u32, rows).with_distance(config.distance);
        camera.resizable = config.resizable;

        Self {
            model,
            renderer: AsciiRenderer::new(camera.width as usize, camera.height as usize),
            camera,
            orientation: 0,
            spinning: true,
            mirrored: false,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
            stats: Ok(FrameStats {
                polygons: 0,
                center: ScreenPoint::NONE,
            }),
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            if event::poll(Duration::from_millis(0))? {
                if let Event::Key(KeyEvent { code, .. }) = event::read()? {
                    self.handle_key(code);
                }
            }

            self.update();
            self.render()?;

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char('a') | KeyCode::Left => {
                self.spinning = false;
                self.orientation = self.orientation.wrapping_sub(TURN_STEP);
            }
            KeyCode::Char('d') | KeyCode::Right => {
                self.spinning = false;
                self.orientation = self.orientation.wrapping_add(TURN_STEP);
            }
            KeyCode::Char(' ') => {
                self.spinning = !self.spinning;
            }
            // Only the index swap survives the next projection, which
            // reverses winding without moving the outline
            KeyCode::Char('m') => {
                self.model.mirror_model();
                self.mirrored = true;
                info!("mirrored model winding");
            }
            KeyCode::Char('r') => {
                self.model.rotate(1);
                info!("rotated rest pose a quarter turn");
            }
            KeyCode::Char('v') => {
                self.camera.resizable = !self.camera.resizable;
                info!(resizable = self.camera.resizable, "switched viewport layout");
            }
            _ => {}
        }
    }

    fn update(&mut self) {
        if self.spinning {
            self.orientation = (self.orientation + SPIN_STEP) & 0x3FFF;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn orientation(&self) -> i32 {
        self.orientation
    }

    pub fn model(&self) -> &ModelGeometry {
        &self.model
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn renderer(&self) -> &AsciiRenderer {
        &self.renderer
    }

    /// Project the model into the character buffer for the current frame.
    pub fn render_frame(&mut self) -> Result<FrameStats, ModelError> {
        self.renderer.clear();
        self.renderer
            .frame(self.camera.viewport(self.camera.resizable()));

        let polygons = self
            .model
            .draw(&self.camera, &mut self.renderer, 0, 0, self.orientation)?;
        let center = self
            .model
            .center_point(&self.camera, 0, 0, self.orientation)?;
        self.renderer.mark(center, '@');

        Ok(FrameStats { polygons, center })
    }

    fn render(&mut self) -> io::Result<()> {
        let stats = self.render_frame();
        if let (Err(e), Ok(_)) = (&stats, &self.stats) {
            warn!(error = %e, "model cannot be drawn");
        }
        self.stats = stats;

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 1))?;
        self.renderer.draw(&mut stdout)?;

        let status = match &self.stats {
            Ok(stats) => format!(
                "fixmesh | FPS: {:.1} | orientation: {} | polygons: {} | center: ({}, {}) | winding: {} | A/D=Turn Space=Spin M=Mirror winding R=Rotate V=Layout Q=Quit",
                self.fps,
                self.orientation,
                stats.polygons,
                stats.center.x,
                stats.center.y,
                if self.mirrored { "mirrored" } else { "normal" }
            ),
            Err(e) => format!("fixmesh | {} | Q=Quit", e),
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(status),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
