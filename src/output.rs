//! Writing finished frames to disk.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, DynamicImage, Frame, RgbImage};
use log::info;

use crate::error::Result;
use crate::render::FrameBuffer;

/// Save a frame, choosing the format from the file extension.
pub fn save_extension<P: AsRef<Path>>(buffer: &FrameBuffer, path: P) -> Result<()> {
    save_image(&buffer.to_rgb_image(), path)
}

pub fn save_image<P: AsRef<Path>>(image: &RgbImage, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    image.save(path)?;
    Ok(())
}

/// `<dir>/<basename>_<NNN>.png`, with the frame number zero-padded to 3 digits.
pub fn frame_path(dir: &Path, basename: &str, frame: usize) -> PathBuf {
    dir.join(format!("{basename}_{frame:03}.png"))
}

/// `<dir>/<basename>.gif`
pub fn animation_path(dir: &Path, basename: &str) -> PathBuf {
    dir.join(format!("{basename}.gif"))
}

/// A looping GIF written one frame at a time, so finished frames can be
/// dropped as soon as they are encoded.
pub struct AnimationWriter {
    encoder: GifEncoder<BufWriter<File>>,
    delay: Delay,
    path: PathBuf,
    frames: usize,
}

impl AnimationWriter {
    pub fn create<P: AsRef<Path>>(path: P, delay_ms: u32) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut encoder = GifEncoder::new(BufWriter::new(File::create(path)?));
        encoder.set_repeat(Repeat::Infinite)?;

        Ok(Self {
            encoder,
            delay: Delay::from_numer_denom_ms(delay_ms, 1),
            path: path.to_path_buf(),
            frames: 0,
        })
    }

    pub fn push(&mut self, image: &RgbImage) -> Result<()> {
        let rgba = DynamicImage::ImageRgb8(image.clone()).into_rgba8();
        self.encoder
            .encode_frame(Frame::from_parts(rgba, 0, 0, self.delay))?;
        self.frames += 1;
        Ok(())
    }

    /// Close the file and return the number of frames written.
    pub fn finish(self) -> Result<usize> {
        let Self {
            encoder,
            path,
            frames,
            ..
        } = self;
        // The trailer is written when the encoder drops
        drop(encoder);
        info!("wrote {frames} frames to {}", path.display());
        Ok(frames)
    }
}

/// Encode `frames` in order as a looping GIF.
pub fn make_animation<'a, P, I>(frames: I, path: P, delay_ms: u32) -> Result<usize>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = &'a RgbImage>,
{
    let mut writer = AnimationWriter::create(path, delay_ms)?;
    for image in frames {
        writer.push(image)?;
    }
    writer.finish()
}
