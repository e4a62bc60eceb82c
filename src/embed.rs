// Binding a player's video surface to a spot inside the host window.
// One implementation per OS, picked at build time; all of them answer the same
// question: "can this surface live in that window?" (true = frames will show).

use std::ffi::c_void;

use nokhwa::utils::ApiBackend;
use tracing::{debug, warn};

use crate::types::Viewport;

/// Opaque native window handle plus the window's size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowHandle {
    raw: usize,
    pub width: usize,
    pub height: usize,
}

impl WindowHandle {
    pub fn new(raw: *mut c_void, width: usize, height: usize) -> Self {
        Self { raw: raw as usize, width, height }
    }

    pub fn is_null(&self) -> bool {
        self.raw == 0
    }

    pub fn raw(&self) -> usize {
        self.raw
    }
}

/// The area a player draws into, and the window it is bound to (if any).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoSurface {
    area: Viewport,
    window: Option<usize>,
}

impl VideoSurface {
    pub fn new(area: Viewport) -> Self {
        Self { area, window: None }
    }

    pub fn area(&self) -> Viewport {
        self.area
    }

    pub fn is_embedded(&self) -> bool {
        self.window.is_some()
    }
}

pub trait VideoOutput {
    /// Short name for logs.
    fn platform(&self) -> &'static str;

    /// Capture API for camera media on this OS.
    fn capture_api(&self) -> ApiBackend;

    /// Bind `surface` to the window behind `handle`.
    fn embed(&self, surface: &mut VideoSurface, handle: &WindowHandle) -> bool;
}

// Shared checks: a real window, and an area that fits inside it.
fn bind(platform: &str, surface: &mut VideoSurface, handle: &WindowHandle) -> bool {
    if handle.is_null() {
        warn!(platform, "no native window to embed into");
        return false;
    }
    let area = surface.area;
    if area.is_empty() || !area.fits_within(handle.width, handle.height) {
        warn!(platform, ?area, width = handle.width, height = handle.height, "video area outside window");
        return false;
    }
    surface.window = Some(handle.raw);
    debug!(platform, ?area, "video surface embedded");
    true
}

#[cfg(target_os = "linux")]
mod linux {
    use super::*;

    /// X11/Wayland window id; camera media through Video4Linux.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct XOutput;

    impl VideoOutput for XOutput {
        fn platform(&self) -> &'static str {
            "linux"
        }

        fn capture_api(&self) -> ApiBackend {
            ApiBackend::Video4Linux
        }

        fn embed(&self, surface: &mut VideoSurface, handle: &WindowHandle) -> bool {
            bind(self.platform(), surface, handle)
        }
    }
}

#[cfg(target_os = "windows")]
mod windows {
    use super::*;

    /// HWND; camera media through MediaFoundation.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Win32Output;

    impl VideoOutput for Win32Output {
        fn platform(&self) -> &'static str {
            "windows"
        }

        fn capture_api(&self) -> ApiBackend {
            ApiBackend::MediaFoundation
        }

        fn embed(&self, surface: &mut VideoSurface, handle: &WindowHandle) -> bool {
            bind(self.platform(), surface, handle)
        }
    }
}

#[cfg(target_os = "macos")]
mod macos {
    use super::*;

    /// NSWindow/NSView pointer; camera media through AVFoundation.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct CocoaOutput;

    impl VideoOutput for CocoaOutput {
        fn platform(&self) -> &'static str {
            "macos"
        }

        fn capture_api(&self) -> ApiBackend {
            ApiBackend::AVFoundation
        }

        fn embed(&self, surface: &mut VideoSurface, handle: &WindowHandle) -> bool {
            bind(self.platform(), surface, handle)
        }
    }
}

#[cfg(target_os = "linux")]
pub type NativeOutput = linux::XOutput;
#[cfg(target_os = "windows")]
pub type NativeOutput = windows::Win32Output;
#[cfg(target_os = "macos")]
pub type NativeOutput = macos::CocoaOutput;

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(raw: usize, w: usize, h: usize) -> WindowHandle {
        WindowHandle::new(raw as *mut c_void, w, h)
    }

    #[test]
    fn embeds_into_a_window_that_fits() {
        let mut surface = VideoSurface::new(Viewport::new(0, 0, 400, 400));
        assert!(NativeOutput::default().embed(&mut surface, &handle(0x1000, 800, 824)));
        assert!(surface.is_embedded());
    }

    #[test]
    fn refuses_null_handles_and_oversized_areas() {
        let out = NativeOutput::default();
        let mut surface = VideoSurface::new(Viewport::new(0, 0, 400, 400));
        assert!(!out.embed(&mut surface, &handle(0, 800, 800)));

        let mut wide = VideoSurface::new(Viewport::new(500, 0, 400, 400));
        assert!(!out.embed(&mut wide, &handle(0x1000, 800, 800)));
        assert!(!wide.is_embedded());
    }
}
