//! Everything a single demo needs to run: the demo itself, the surface it draws on and the
//! render loop that drives it. Created explicitly and torn down explicitly.

use color_eyre::eyre::Result;

use crate::config::main::Config;
use crate::demos::index::Demo;
use crate::input::Input;
use crate::render_loop::driver::{LoopState, RenderLoop};
use crate::render_loop::scheduler::FrameQueue;
use crate::surface::Surface;

/// `Playground`
pub struct Playground {
    /// The active demo
    demo: Box<dyn Demo>,
    /// What the demo draws on
    surface: Surface,
    /// Drives the demo once per display refresh
    render_loop: RenderLoop<FrameQueue>,
}

impl Playground {
    /// Start the named demo, sized and seeded from the config.
    pub fn new(demo_name: &str, config: &Config) -> Result<Self> {
        let demo =
            crate::demos::index::create_instance(demo_name, config, config.width, config.height)?;
        let surface = Surface::new(config.width, config.height, config.pixel_density)?;
        let initial = if config.running_on_start {
            LoopState::Running
        } else {
            LoopState::Paused
        };

        tracing::debug!("Starting the '{demo_name}' demo ({initial:?})");
        Ok(Self::with_demo(demo, surface, initial))
    }

    /// Wire up an already created demo.
    #[must_use]
    pub fn with_demo(demo: Box<dyn Demo>, surface: Surface, initial: LoopState) -> Self {
        Self {
            demo,
            surface,
            render_loop: RenderLoop::new(FrameQueue::new(), initial),
        }
    }

    /// The display has refreshed: render any frames that are due. Returns how many were
    /// rendered.
    pub fn vsync(&mut self) -> usize {
        self.render_loop.tick(self.demo.as_mut(), &mut self.surface)
    }

    /// Route a user event to wherever it belongs.
    pub fn handle_input(&mut self, input: Input) {
        tracing::trace!("Handling input: {input:?}");
        #[expect(
            clippy::wildcard_enum_match_arm,
            reason = "Everything else is for the demo"
        )]
        match input {
            Input::Toggle => self.render_loop.toggle(),
            Input::End => self.dispose(),
            Input::Resize { width, height } => match self.surface.resize(width, height) {
                Ok(()) => self.demo.resize(width, height),
                Err(error) => tracing::warn!("Ignoring resize: {error:?}"),
            },
            other => self.demo.handle_input(&other.to_slider_range()),
        }
    }

    /// The active demo.
    #[must_use]
    pub fn demo(&self) -> &dyn Demo {
        self.demo.as_ref()
    }

    /// The surface with the most recent frame on it.
    #[must_use]
    pub const fn surface(&self) -> &Surface {
        &self.surface
    }

    /// The render loop.
    #[must_use]
    pub const fn render_loop(&self) -> &RenderLoop<FrameQueue> {
        &self.render_loop
    }

    /// Whether frames are being rendered.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.render_loop.is_running()
    }

    /// How many frames have been rendered.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.render_loop.frames()
    }

    /// Tear down. No more frames are rendered after this.
    pub fn dispose(&mut self) {
        self.render_loop.dispose();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn config() -> Config {
        Config {
            width: 200.0,
            height: 150.0,
            seed: Some(1),
            ..Config::default()
        }
    }

    #[test]
    fn frames_are_rendered_on_vsync() {
        let mut playground = Playground::new("physics", &config()).unwrap();
        assert_eq!(playground.vsync(), 1);
        assert_eq!(playground.vsync(), 1);
        assert_eq!(playground.frames(), 2);
    }

    #[test]
    fn starting_paused() {
        let config = Config {
            running_on_start: false,
            ..config()
        };
        let mut playground = Playground::new("particles", &config).unwrap();
        assert_eq!(playground.vsync(), 0);
        playground.handle_input(Input::Toggle);
        assert_eq!(playground.vsync(), 1);
    }

    #[test]
    fn resize_reaches_surface_and_demo() {
        let mut playground = Playground::new("physics", &config()).unwrap();
        playground.handle_input(Input::Resize {
            width: 50.0,
            height: 40.0,
        });
        assert_eq!(playground.surface().dimensions(), (50, 40));

        playground.vsync();
        for position in playground.demo().positions() {
            assert!(position.x <= 50.0 && position.y <= 40.0);
        }
    }

    #[test]
    fn zero_size_surface_waits() {
        let mut playground = Playground::new("particles", &config()).unwrap();
        playground.handle_input(Input::Resize {
            width: 0.0,
            height: 0.0,
        });
        assert_eq!(playground.vsync(), 0);
        assert!(playground.is_running());

        playground.handle_input(Input::Resize {
            width: 10.0,
            height: 10.0,
        });
        assert_eq!(playground.vsync(), 1);
    }

    #[test]
    fn huge_resize_is_ignored() {
        let mut playground = Playground::new("physics", &config()).unwrap();
        let resize = Input::parse(r#"{"resize":{"width":1e19,"height":1e19}}"#).unwrap();
        playground.handle_input(resize);

        assert_eq!(playground.surface().dimensions(), (200, 150));
        assert_eq!(playground.vsync(), 1);
        for position in playground.demo().positions() {
            assert!(position.x <= 200.0 && position.y <= 150.0);
        }
    }

    #[test]
    fn huge_configured_size_is_an_error() {
        let config = Config {
            width: 100_000.0,
            height: 100_000.0,
            ..config()
        };
        assert!(Playground::new("particles", &config).is_err());
    }

    #[test]
    fn end_disposes() {
        let mut playground = Playground::new("particles", &config()).unwrap();
        playground.handle_input(Input::End);
        assert!(!playground.is_running());
        playground.handle_input(Input::Toggle);
        assert_eq!(playground.vsync(), 0);
    }

    #[test]
    fn unknown_demo() {
        assert!(Playground::new("nope", &config()).is_err());
    }
}
