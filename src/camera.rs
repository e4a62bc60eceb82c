// Live camera as a media source.
// Visual expectation: each `next_frame()` gives a FrameBuffer whose pixels are
// 0x00RRGGBB, ready to blit into a player's viewport.

use crate::error::Error;
use crate::types::FrameBuffer;

use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        ApiBackend, CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType,
        Resolution,
    },
};
use tracing::{info, warn};

// A small wrapper around nokhwa::Camera so the player stays clean.
pub struct CameraCapture {
    cam: Camera,
    width: u32,
    height: u32,
}

impl CameraCapture {
    /// Open camera `index` through `backend`, asking for a resolution near
    /// `width` x `height` (the device may pick something else).
    pub fn open(index: u32, width: u32, height: u32, backend: ApiBackend) -> Result<Self, Error> {
        let fmt = CameraFormat::new(
            Resolution::new(width, height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            30,
        );
        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        let mut cam = Camera::with_backend(CameraIndex::Index(index), req, backend)
            .map_err(|e| Error::CameraInit(format!("Create camera {index}: {e}")))?;
        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("Open stream: {e}")))?;

        // The actual stream might choose a slightly different resolution.
        let actual = cam.resolution();
        info!(index, width = actual.width(), height = actual.height(), ?backend, "camera stream open");

        Ok(Self { cam, width: actual.width(), height: actual.height() })
    }

    /// Grab one frame (blocks until the camera delivers it).
    pub fn next_frame(&mut self) -> Result<FrameBuffer, Error> {
        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("Fetch frame: {e}")))?;
        let rgb_img = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("Decode RGB: {e}")))?;

        let (w, h) = rgb_img.dimensions();
        let pixels = rgb_img
            .pixels()
            .map(|p| ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | p[2] as u32)
            .collect();
        Ok(FrameBuffer { width: w as usize, height: h as usize, pixels })
    }

    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

// Stop streaming so the device is free for others afterwards.
impl Drop for CameraCapture {
    fn drop(&mut self) {
        if let Err(e) = self.cam.stop_stream() {
            warn!(error = %e, "camera stream did not stop cleanly");
        }
    }
}
