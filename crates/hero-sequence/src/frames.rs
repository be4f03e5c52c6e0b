use crate::{Result, SequenceConfig, SequenceError};

/// Maps a frame index to its asset identity:
/// `<folder>/<basename><index:05><extension>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSource {
    folder: String,
    basename: String,
    extension: String,
}

impl FrameSource {
    pub fn new(
        folder: impl Into<String>,
        basename: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        let mut folder = folder.into();
        while folder.len() > 1 && folder.ends_with('/') {
            folder.pop();
        }
        Self {
            folder,
            basename: basename.into(),
            extension: extension.into(),
        }
    }

    pub fn from_config(config: &SequenceConfig) -> Self {
        Self::new(
            config.frame_folder.as_str(),
            config.frame_basename.as_str(),
            config.frame_extension.as_str(),
        )
    }

    pub fn src(&self, index: usize) -> String {
        let Self {
            folder,
            basename,
            extension,
        } = self;
        match folder.as_str() {
            "" => format!("{basename}{index:05}{extension}"),
            "/" => format!("/{basename}{index:05}{extension}"),
            _ => format!("{folder}/{basename}{index:05}{extension}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloadProgress {
    Pending { loaded: usize, total: usize },
    /// Reported exactly once, by the notification that loads the last frame.
    Complete,
}

#[derive(Debug)]
struct FrameSlot<I> {
    src: String,
    state: LoadState,
    image: Option<I>,
}

/// Owns every frame handle for the lifetime of the widget.
///
/// The store is the "all loaded" barrier for the independent image loads: it
/// counts successful loads and reports [`PreloadProgress::Complete`] once the
/// count reaches the frame count. Failed frames are logged and never counted,
/// so a sequence with a missing asset stays pending forever.
#[derive(Debug)]
pub struct FrameStore<I> {
    slots: Vec<FrameSlot<I>>,
    loaded: usize,
    failed: usize,
    completed: bool,
}

impl<I> FrameStore<I> {
    pub fn new(source: &FrameSource, count: usize) -> Self {
        let slots = (0..count)
            .map(|index| FrameSlot {
                src: source.src(index),
                state: LoadState::Unloaded,
                image: None,
            })
            .collect();
        Self {
            slots,
            loaded: 0,
            failed: 0,
            completed: false,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded
    }

    pub fn failed_count(&self) -> usize {
        self.failed
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn src(&self, index: usize) -> Result<&str> {
        Ok(self.slot(index)?.src.as_str())
    }

    pub fn state(&self, index: usize) -> Result<LoadState> {
        Ok(self.slot(index)?.state)
    }

    /// Handle previously attached to `index`, whatever its load state.
    pub fn image(&self, index: usize) -> Option<&I> {
        self.slots.get(index).and_then(|slot| slot.image.as_ref())
    }

    /// Handle for `index` only once it has finished loading.
    pub fn loaded_image(&self, index: usize) -> Option<&I> {
        self.slots
            .get(index)
            .filter(|slot| slot.state == LoadState::Loaded)
            .and_then(|slot| slot.image.as_ref())
    }

    /// Installs (or replaces) the handle for `index` and marks it loading.
    /// Returns the source identity the handle should be pointed at.
    pub fn attach(&mut self, index: usize, image: I) -> Result<&str> {
        let slot = self.slot_mut(index)?;
        let previous = std::mem::replace(&mut slot.state, LoadState::Loading);
        slot.image = Some(image);
        match previous {
            LoadState::Loaded => self.loaded -= 1,
            LoadState::Failed => self.failed -= 1,
            LoadState::Unloaded | LoadState::Loading => {}
        }
        Ok(self.slots[index].src.as_str())
    }

    pub fn mark_loaded(&mut self, index: usize) -> Result<PreloadProgress> {
        let total = self.slots.len();
        let slot = self.slot_mut(index)?;
        match slot.state {
            LoadState::Loaded => {}
            previous => {
                slot.state = LoadState::Loaded;
                if previous == LoadState::Failed {
                    self.failed -= 1;
                }
                self.loaded += 1;
            }
        }

        if self.loaded == total && !self.completed {
            self.completed = true;
            return Ok(PreloadProgress::Complete);
        }
        Ok(PreloadProgress::Pending {
            loaded: self.loaded,
            total,
        })
    }

    pub fn mark_failed(&mut self, index: usize) -> Result<()> {
        let slot = self.slot_mut(index)?;
        if slot.state == LoadState::Failed {
            return Ok(());
        }
        let was_loaded = slot.state == LoadState::Loaded;
        slot.state = LoadState::Failed;
        tracing::error!(index, src = %slot.src, "failed to load frame image");
        if was_loaded {
            self.loaded -= 1;
        }
        self.failed += 1;
        Ok(())
    }

    fn slot(&self, index: usize) -> Result<&FrameSlot<I>> {
        let count = self.slots.len();
        self.slots
            .get(index)
            .ok_or(SequenceError::FrameOutOfRange { index, count })
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut FrameSlot<I>> {
        let count = self.slots.len();
        self.slots
            .get_mut(index)
            .ok_or(SequenceError::FrameOutOfRange { index, count })
    }
}
