use anyhow::Result;
use clap::Parser;
use spincube_mount::{ResizeBus, SceneMount, SurfaceHost};
use spincube_render_wgpu::WgpuSceneRenderer;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "spincube-desktop", about = "Spinning cube viewport")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Initial window width in pixels
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Initial window height in pixels
    #[arg(long, default_value = "720")]
    height: u32,
}

/// Window-backed surface host. The window is created hidden; attaching the
/// surface shows it, detaching hides it again.
struct WindowHost {
    window: Option<Arc<Window>>,
    surface_attached: bool,
}

impl WindowHost {
    fn new() -> Self {
        Self {
            window: None,
            surface_attached: false,
        }
    }
}

impl SurfaceHost for WindowHost {
    fn is_connected(&self) -> bool {
        self.window.is_some()
    }

    fn attach_surface(&mut self) {
        if let Some(window) = &self.window {
            window.set_visible(true);
        }
        self.surface_attached = true;
    }

    fn detach_surface(&mut self) {
        if let Some(window) = &self.window {
            window.set_visible(false);
        }
        self.surface_attached = false;
    }

    fn has_surface(&self) -> bool {
        self.surface_attached
    }
}

struct CubeApp {
    initial_size: PhysicalSize<u32>,
    host: WindowHost,
    bus: ResizeBus,
    mount: Option<SceneMount<WgpuSceneRenderer>>,
}

impl CubeApp {
    fn new(width: u32, height: u32) -> Self {
        Self {
            initial_size: PhysicalSize::new(width.max(1), height.max(1)),
            host: WindowHost::new(),
            bus: ResizeBus::new(),
            mount: None,
        }
    }
}

impl ApplicationHandler for CubeApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.mount.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Spincube")
            .with_visible(false)
            .with_inner_size(self.initial_size);
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("find adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("spincube_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("create device");

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        let renderer = WgpuSceneRenderer::new(surface, device, queue, config);

        self.host.window = Some(window);
        let mount = SceneMount::attach(
            &mut self.host,
            &mut self.bus,
            renderer,
            size.width,
            size.height,
        );
        self.mount = Some(mount);

        if let Some(window) = &self.host.window {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                if let Some(mount) = &mut self.mount {
                    mount.detach(&mut self.host, &mut self.bus);
                }
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.bus.dispatch(new_size.width, new_size.height);
            }
            WindowEvent::RedrawRequested => {
                let Some(mount) = &mut self.mount else {
                    return;
                };
                // frame() reports whether to reschedule; once the mount is
                // detached the redraw chain ends here.
                if mount.frame() {
                    if let Some(window) = &self.host.window {
                        window.request_redraw();
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.mount.as_ref().is_some_and(|m| m.is_running()) {
            if let Some(window) = &self.host.window {
                window.request_redraw();
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("spincube-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = CubeApp::new(cli.width, cli.height);
    event_loop.run_app(&mut app)?;

    Ok(())
}
