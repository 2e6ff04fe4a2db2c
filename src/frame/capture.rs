use crate::{
    assets::source::ImageSource,
    foundation::{
        core::SlotIndex,
        error::{PhotostripError, PhotostripResult},
    },
};

/// Photos taken during one capture run, in shot order.
///
/// Shot `i` fills slot `i`. The sequence only grows until [`CaptureRun::reset`].
#[derive(Clone, Debug, Default)]
pub struct CaptureRun {
    photos: Vec<ImageSource>,
}

impl CaptureRun {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a shot and return the slot it fills.
    pub fn push(&mut self, photo: ImageSource) -> SlotIndex {
        self.photos.push(photo);
        SlotIndex(self.photos.len() - 1)
    }

    pub fn reset(&mut self) {
        self.photos.clear();
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn photos(&self) -> &[ImageSource] {
        &self.photos
    }

    pub fn get(&self, slot: SlotIndex) -> Option<&ImageSource> {
        self.photos.get(slot.0)
    }

    /// Fail unless at least `required` shots were taken.
    pub fn ensure_complete(&self, required: usize) -> PhotostripResult<()> {
        if self.photos.len() < required {
            return Err(PhotostripError::validation(format!(
                "take {required} photos first ({} taken)",
                self.photos.len()
            )));
        }
        Ok(())
    }
}
