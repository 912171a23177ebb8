use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::error::CaptureError;
use crate::models::media::StreamInfo;
use crate::traits::preview_surface::PreviewSurface;

#[derive(Default)]
struct PreviewBinding {
    surface: Option<Box<dyn PreviewSurface>>,
    attached: bool,
    /// Bumped by every `bind`/`unbind`.
    epoch: u64,
}

/// Shared slot a caller binds a preview surface into.
///
/// Clones refer to the same slot. A surface bound here is shown the next
/// time a stream is acquired and detached whenever that stream is released.
///
/// Surface methods are always called with the slot unlocked: the surface is
/// taken out for the call and put back afterwards unless it was rebound or
/// unbound in the meantime.
#[derive(Clone, Default)]
pub struct PreviewSlot {
    inner: Arc<Mutex<PreviewBinding>>,
}

impl PreviewSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `surface`, returning whatever was bound before (detached).
    pub fn bind(&self, surface: Box<dyn PreviewSurface>) -> Option<Box<dyn PreviewSurface>> {
        let (previous, was_attached) = {
            let mut binding = self.inner.lock();
            binding.epoch += 1;
            let was_attached = std::mem::take(&mut binding.attached);
            (binding.surface.replace(surface), was_attached)
        };
        Self::detached(previous, was_attached)
    }

    /// Remove the bound surface, detaching it first.
    pub fn unbind(&self) -> Option<Box<dyn PreviewSurface>> {
        let (previous, was_attached) = {
            let mut binding = self.inner.lock();
            binding.epoch += 1;
            let was_attached = std::mem::take(&mut binding.attached);
            (binding.surface.take(), was_attached)
        };
        Self::detached(previous, was_attached)
    }

    pub fn is_bound(&self) -> bool {
        self.inner.lock().surface.is_some()
    }

    /// Whether the bound surface currently points at a stream.
    pub fn is_attached(&self) -> bool {
        self.inner.lock().attached
    }

    /// Attach and play. A missing surface is not an error.
    pub(crate) fn show(&self, stream: &StreamInfo) -> Result<(), CaptureError> {
        let Some((mut surface, epoch)) = self.checkout() else {
            return Ok(());
        };

        if let Err(e) = surface.attach(stream) {
            self.checkin(surface, epoch, false);
            return Err(e);
        }
        {
            let mut binding = self.inner.lock();
            if binding.epoch == epoch {
                binding.attached = true;
            }
        }
        let played = surface.play();
        self.checkin(surface, epoch, true);
        played
    }

    /// Detach the bound surface from whatever stream it shows.
    pub(crate) fn clear(&self) {
        let checked_out = {
            let mut binding = self.inner.lock();
            if !std::mem::take(&mut binding.attached) {
                return;
            }
            let epoch = binding.epoch;
            binding.surface.take().map(|surface| (surface, epoch))
        };
        if let Some((mut surface, epoch)) = checked_out {
            surface.detach();
            self.checkin(surface, epoch, false);
        }
    }

    fn checkout(&self) -> Option<(Box<dyn PreviewSurface>, u64)> {
        let mut binding = self.inner.lock();
        let epoch = binding.epoch;
        binding.surface.take().map(|surface| (surface, epoch))
    }

    /// Return a checked-out surface to the slot. If the slot was rebound or
    /// unbound while it was out, the surface is dropped (detached first if
    /// it still shows a stream).
    fn checkin(&self, mut surface: Box<dyn PreviewSurface>, epoch: u64, attached: bool) {
        {
            let mut binding = self.inner.lock();
            if binding.epoch == epoch && binding.surface.is_none() {
                binding.surface = Some(surface);
                return;
            }
        }
        log::debug!("Preview surface replaced during a callback; dropping the old one");
        if attached {
            surface.detach();
        }
    }

    fn detached(surface: Option<Box<dyn PreviewSurface>>, was_attached: bool) -> Option<Box<dyn PreviewSurface>> {
        let mut surface = surface?;
        if was_attached {
            surface.detach();
        }
        Some(surface)
    }
}

impl fmt::Debug for PreviewSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let binding = self.inner.lock();
        f.debug_struct("PreviewSlot")
            .field("bound", &binding.surface.is_some())
            .field("attached", &binding.attached)
            .finish()
    }
}
