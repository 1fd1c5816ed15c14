//! Preview window for the `display` operation.
//!
//! With the `window` feature a frame is shown in an SDL2 window until the
//! window is closed or Escape is pressed. Without it, [`display`] only logs
//! that nothing can be shown.

use image::RgbImage;

use crate::error::Result;

#[cfg(feature = "window")]
pub use sdl_window::{Window, WindowEvent, FPS};

/// Show a frame and block until the viewer dismisses it.
#[cfg(feature = "window")]
pub fn display(image: &RgbImage) -> Result<()> {
    use crate::error::Error;

    let mut window =
        Window::new("mdl-render", image.width(), image.height()).map_err(Error::Display)?;
    window.show(image).map_err(Error::Display)
}

#[cfg(not(feature = "window"))]
pub fn display(image: &RgbImage) -> Result<()> {
    log::warn!(
        "display of a {}x{} frame skipped: built without the `window` feature",
        image.width(),
        image.height()
    );
    Ok(())
}

#[cfg(feature = "window")]
mod sdl_window {
    use std::time::Duration;

    use sdl2::event::Event;
    use sdl2::keyboard::Keycode;
    use sdl2::pixels::PixelFormatEnum;
    use sdl2::rect::Rect;

    use image::RgbImage;

    pub const FPS: u64 = 60;
    const FRAME_TARGET_TIME: Duration = Duration::from_millis(1000 / FPS);

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum WindowEvent {
        None,
        Quit,
    }

    /// Pixels packed as little-endian ARGB8888, for streaming textures.
    fn argb_bytes(image: &RgbImage) -> Vec<u8> {
        image
            .pixels()
            .flat_map(|p| {
                let [r, g, b] = p.0;
                (0xFF00_0000u32 | (r as u32) << 16 | (g as u32) << 8 | b as u32).to_le_bytes()
            })
            .collect()
    }

    pub struct Window {
        canvas: sdl2::render::Canvas<sdl2::video::Window>,
        event_pump: sdl2::EventPump,
        width: u32,
        height: u32,
    }

    impl Window {
        pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
            let sdl_context = sdl2::init()?;
            let video_subsystem = sdl_context.video()?;

            let window = video_subsystem
                .window(title, width, height)
                .position_centered()
                .build()
                .map_err(|e| e.to_string())?;

            let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
            let event_pump = sdl_context.event_pump()?;

            Ok(Self {
                canvas,
                event_pump,
                width,
                height,
            })
        }

        pub fn poll_events(&mut self) -> WindowEvent {
            for event in self.event_pump.poll_iter() {
                match event {
                    Event::Quit { .. }
                    | Event::KeyDown {
                        keycode: Some(Keycode::Escape),
                        ..
                    } => return WindowEvent::Quit,
                    _ => {}
                }
            }
            WindowEvent::None
        }

        /// Present `image` until the window is closed.
        pub fn show(&mut self, image: &RgbImage) -> Result<(), String> {
            let texture_creator = self.canvas.texture_creator();
            let mut texture = texture_creator
                .create_texture_streaming(PixelFormatEnum::ARGB8888, self.width, self.height)
                .map_err(|e| e.to_string())?;
            texture
                .update(None, &argb_bytes(image), (self.width * 4) as usize)
                .map_err(|e| e.to_string())?;

            while self.poll_events() != WindowEvent::Quit {
                self.canvas.clear();
                self.canvas
                    .copy(&texture, None, Some(Rect::new(0, 0, self.width, self.height)))?;
                self.canvas.present();
                std::thread::sleep(FRAME_TARGET_TIME);
            }
            Ok(())
        }
    }
}
