use std::sync::Arc;

use super::super::canvas::tessellated::SharedMesh;
use super::super::canvas::tessellated::TessellatedSurface;
use super::super::timelines::pacer::TimerPacer;
use super::super::timelines::sequence::draw_spirals;
use super::super::timelines::sequence::SURFACE_COUNT;
use super::super::timelines::trigger::OneShotTrigger;
use super::config::Config;
use super::palette::parse_color;
use super::renderer::Renderer;

/// What the window knows at the moment of the first click.
pub struct Activation {
    pub window: Arc<winit::window::Window>,
    pub viewport: (f64, f64),
}

type ActivationCallback = Box<dyn FnOnce(Activation) + Send>;

pub struct App {
    config: Config,
    background: palette::Srgba<f32>,
    meshes: Vec<SharedMesh>,
    renderer: Option<Renderer>,
    trigger: OneShotTrigger<ActivationCallback>,
}

impl App {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let background = parse_color(&config.style.background)?;
        let surfaces: Vec<TessellatedSurface> =
            (0..SURFACE_COUNT).map(|_| TessellatedSurface::new()).collect();
        let meshes = surfaces.iter().map(TessellatedSurface::mesh).collect();
        let trigger = OneShotTrigger::subscribe(Self::activation(config.clone(), surfaces));
        Ok(Self {
            config,
            background,
            meshes,
            renderer: None,
            trigger,
        })
    }

    fn activation(config: Config, mut surfaces: Vec<TessellatedSurface>) -> ActivationCallback {
        Box::new(move |activation: Activation| {
            // Drop the hint from the title.
            activation.window.set_title(&config.window.title);
            let viewport = activation.viewport;
            let spawned = std::thread::Builder::new()
                .name("spiral-sequence".into())
                .spawn(move || {
                    match pollster::block_on(draw_spirals(
                        &mut surfaces,
                        &config,
                        viewport,
                        &TimerPacer,
                    )) {
                        Ok(summaries) => log::debug!("{} runs finished", summaries.len()),
                        Err(error) => log::error!("spiral sequence aborted: {error}"),
                    }
                });
            if let Err(error) = spawned {
                log::error!("failed to start the spiral sequence: {error}");
            }
        })
    }

    fn on_click(&mut self) {
        let Some(renderer) = self.renderer.as_ref() else {
            return;
        };
        let window = renderer.window().clone();
        let size = window.inner_size();
        let activation = Activation {
            window,
            viewport: (size.width as f64, size.height as f64),
        };
        if self.trigger.fire(activation) {
            log::info!("drawing started for a {}x{} viewport", size.width, size.height);
        } else {
            log::debug!("click ignored, drawing was already started");
        }
    }

    pub fn run(config: Config) -> anyhow::Result<()> {
        let event_loop = winit::event_loop::EventLoop::new()?;
        let mut app = Self::new(config)?;
        event_loop.run_app(&mut app)?;
        Ok(())
    }
}

impl winit::application::ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        if self.renderer.is_some() {
            return;
        }
        let window_settings = &self.config.window;
        let title = if self.trigger.is_armed() {
            format!("{} - {}", window_settings.title, window_settings.hint)
        } else {
            window_settings.title.clone()
        };
        let renderer = event_loop
            .create_window(
                winit::window::Window::default_attributes()
                    .with_title(title)
                    .with_inner_size(winit::dpi::PhysicalSize::<u32>::from(window_settings.size)),
            )
            .map_err(anyhow::Error::from)
            .and_then(|window| Renderer::new(window, self.meshes.clone(), self.background));
        match renderer {
            Ok(renderer) => self.renderer = Some(renderer),
            Err(error) => {
                log::error!("failed to create the window renderer: {error:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: winit::event::WindowEvent,
    ) {
        match event {
            winit::event::WindowEvent::CloseRequested => event_loop.exit(),
            winit::event::WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size);
                }
            }
            winit::event::WindowEvent::RedrawRequested => {
                if let Some(renderer) = self.renderer.as_mut() {
                    if let Err(error) = renderer.render() {
                        log::error!("render failed: {error:#}");
                        event_loop.exit();
                    }
                }
            }
            winit::event::WindowEvent::MouseInput {
                state: winit::event::ElementState::Pressed,
                button: winit::event::MouseButton::Left,
                ..
            } => self.on_click(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &winit::event_loop::ActiveEventLoop) {
        if let Some(renderer) = self.renderer.as_ref() {
            renderer.request_redraw();
        }
    }
}
