use crate::gaze_aoi::error::GazeError;
use anyhow::Error;
use image::RgbImage;
use std::io::{Read, Write};

/// One of the robot's camera configurations.
///
/// `payload_size` is the raw YUV422 byte count the bridge sends back for
/// a single `getImg` request; `camera_id` and `resolution_id` follow the
/// robot vendor's numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CameraMode {
    pub payload_size: usize,
    pub width: u32,
    pub height: u32,
    pub camera_id: u8,
    pub resolution_id: u8,
}

impl CameraMode {
    /// Resolve a user-facing camera code (1..=4) into its configuration.
    ///
    /// 1: stereo 1280x360, 2: stereo 2560x720, 3: mono 320x240,
    /// 4: mono 640x480. Any other code is a fatal configuration error.
    pub fn from_code(code: u8) -> Result<Self, GazeError> {
        match code {
            1 => Ok(Self {
                payload_size: 921_600,
                width: 1280,
                height: 360,
                camera_id: 3,
                resolution_id: 14,
            }),
            2 => Ok(Self {
                payload_size: 3_686_400,
                width: 2560,
                height: 720,
                camera_id: 3,
                resolution_id: 13,
            }),
            3 => Ok(Self {
                payload_size: 153_600,
                width: 320,
                height: 240,
                camera_id: 0,
                resolution_id: 1,
            }),
            4 => Ok(Self {
                payload_size: 614_400,
                width: 640,
                height: 480,
                camera_id: 0,
                resolution_id: 2,
            }),
            other => Err(GazeError::InvalidCameraMode(other)),
        }
    }
}

/// Request one frame from the robot bridge and decode it.
///
/// The bridge answers a `getImg` request with exactly `payload_size`
/// bytes of YUYV 4:2:2 data.
pub fn grab_frame<S: Read + Write>(stream: &mut S, mode: &CameraMode) -> Result<RgbImage, Error> {
    stream.write_all(b"getImg")?;
    let mut payload = vec![0u8; mode.payload_size];
    stream.read_exact(&mut payload)?;
    yuv422_to_rgb(&payload, mode.width, mode.height)
}

/// Decode a packed YUYV 4:2:2 buffer into an RGB image.
///
/// Each four-byte group `[Y0, U, Y1, V]` covers two horizontally adjacent
/// pixels sharing one chroma sample; conversion uses full-range BT.601.
/// The width must be even, since chroma samples span pixel pairs.
pub fn yuv422_to_rgb(data: &[u8], width: u32, height: u32) -> Result<RgbImage, Error> {
    if width % 2 != 0 {
        return Err(Error::msg(format!(
            "YUV422 requires an even width, got {}",
            width
        )));
    }
    let expected = (width as usize) * (height as usize) * 2;
    if data.len() != expected {
        return Err(Error::msg(format!(
            "YUV422 payload size mismatch: expected {} bytes for {}x{}, got {}",
            expected,
            width,
            height,
            data.len()
        )));
    }

    let mut image = RgbImage::new(width, height);
    for (pair_index, chunk) in data.chunks_exact(4).enumerate() {
        let [y0, u, y1, v] = [chunk[0], chunk[1], chunk[2], chunk[3]];
        let base = pair_index as u32 * 2;
        let (px, py) = (base % width, base / width);
        image.put_pixel(px, py, image::Rgb(ycbcr_to_rgb(y0, u, v)));
        image.put_pixel(px + 1, py, image::Rgb(ycbcr_to_rgb(y1, u, v)));
    }
    Ok(image)
}

fn ycbcr_to_rgb(y: u8, cb: u8, cr: u8) -> [u8; 3] {
    let y = y as f32;
    let cb = cb as f32 - 128.0;
    let cr = cr as f32 - 128.0;

    let r = y + 1.402 * cr;
    let g = y - 0.344136 * cb - 0.714136 * cr;
    let b = y + 1.772 * cb;

    [clamp_u8(r), clamp_u8(g), clamp_u8(b)]
}

fn clamp_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
