// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Processor session — owns the INPUT/OUTPUT buffer pair and hands out
// bounds-checked views of it to the transforms.

use pixelwerk_core::config::ProcessorConfig;
use pixelwerk_core::error::{PixelError, Result};
use pixelwerk_core::types::ImageDescriptor;
use tracing::{debug, info, instrument, warn};

/// The two fixed-capacity byte regions shared with the host.
struct Buffers {
    input: Vec<u8>,
    output: Vec<u8>,
}

/// A processing session: one INPUT and one OUTPUT buffer of equal capacity,
/// reused across every operation call.
///
/// Every transform borrows the session mutably, so two operations can never
/// observe the buffers at the same time. Operations read INPUT and overwrite
/// OUTPUT in place; the filter pass additionally uses INPUT as scratch.
///
/// ```ignore
/// let mut processor = Processor::new(ProcessorConfig::default());
/// processor.initialize(64 * 64 * 4)?;
/// processor.load_input(&pixels)?;
/// processor.blur(ImageDescriptor::new(64, 64, Channels::Rgba), 2)?;
/// let blurred = processor.read_output(ImageDescriptor::new(64, 64, Channels::Rgba))?;
/// ```
pub struct Processor {
    config: ProcessorConfig,
    buffers: Option<Buffers>,
}

impl Processor {
    // -- Construction ---------------------------------------------------------

    /// Create a session with no buffers allocated yet.
    pub fn new(config: ProcessorConfig) -> Self {
        Self {
            config,
            buffers: None,
        }
    }

    /// Create a session and allocate `config.max_bytes` for each buffer.
    pub fn with_config(config: ProcessorConfig) -> Result<Self> {
        let max_bytes = config.max_bytes;
        let mut processor = Self::new(config);
        processor.initialize(max_bytes)?;
        Ok(processor)
    }

    // -- Lifecycle ------------------------------------------------------------

    /// Release any held buffers and allocate two fresh regions of
    /// `max_bytes` each.
    ///
    /// On failure the session is left released.
    #[instrument(skip(self))]
    pub fn initialize(&mut self, max_bytes: usize) -> Result<()> {
        self.release();

        let input = allocate(max_bytes)?;
        let output = allocate(max_bytes)?;
        self.buffers = Some(Buffers { input, output });

        info!(max_bytes, "Processor buffers allocated");
        Ok(())
    }

    /// Free both buffers. Safe to call repeatedly.
    pub fn release(&mut self) {
        if self.buffers.take().is_some() {
            debug!("Processor buffers released");
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.buffers.is_some()
    }

    /// Capacity of each buffer in bytes, zero when released.
    pub fn capacity(&self) -> usize {
        self.buffers.as_ref().map_or(0, |b| b.input.len())
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    // -- Host access ----------------------------------------------------------

    /// Base address of INPUT, or null when released.
    ///
    /// The pointer stays valid until the next `initialize` or `release`.
    pub fn input_ptr(&mut self) -> *mut u8 {
        self.buffers
            .as_mut()
            .map_or(std::ptr::null_mut(), |b| b.input.as_mut_ptr())
    }

    /// Base address of OUTPUT, or null when released.
    pub fn output_ptr(&mut self) -> *mut u8 {
        self.buffers
            .as_mut()
            .map_or(std::ptr::null_mut(), |b| b.output.as_mut_ptr())
    }

    /// Whole INPUT region, for hosts that write through a slice.
    pub fn input_mut(&mut self) -> Result<&mut [u8]> {
        Ok(&mut self.buffers_mut()?.input)
    }

    /// Whole OUTPUT region.
    pub fn output(&self) -> Result<&[u8]> {
        self.buffers
            .as_ref()
            .map(|b| b.output.as_slice())
            .ok_or(PixelError::NotInitialized)
    }

    /// Copy `data` to the start of INPUT.
    pub fn load_input(&mut self, data: &[u8]) -> Result<()> {
        let capacity = self.capacity();
        let buffers = self.buffers_mut()?;
        if data.len() > capacity {
            return Err(PixelError::BufferTooSmall {
                required: data.len(),
                capacity,
            });
        }
        buffers.input[..data.len()].copy_from_slice(data);
        Ok(())
    }

    /// Copy the image described by `desc` out of OUTPUT.
    pub fn read_output(&self, desc: ImageDescriptor) -> Result<Vec<u8>> {
        let len = desc.byte_len()?;
        let output = self.output()?;
        output
            .get(..len)
            .map(<[u8]>::to_vec)
            .ok_or(PixelError::BufferTooSmall {
                required: len,
                capacity: output.len(),
            })
    }

    /// Exchange INPUT and OUTPUT so the last result becomes the next source.
    pub fn swap_buffers(&mut self) -> Result<()> {
        let buffers = self.buffers_mut()?;
        std::mem::swap(&mut buffers.input, &mut buffers.output);
        Ok(())
    }

    // -- Views for transforms ---------------------------------------------------

    pub(crate) fn ensure_initialized(&self) -> Result<()> {
        if self.buffers.is_some() {
            Ok(())
        } else {
            warn!("Operation called before initialize");
            Err(PixelError::NotInitialized)
        }
    }

    /// Borrow INPUT and OUTPUT trimmed to `input_len` and `output_len` bytes.
    ///
    /// Fails with `BufferTooSmall` instead of handing out a view that would
    /// reach past the allocation.
    pub(crate) fn frame(
        &mut self,
        input_len: usize,
        output_len: usize,
    ) -> Result<(&mut [u8], &mut [u8])> {
        let Buffers { input, output } = self.buffers_mut()?;
        let capacity = input.len();
        let required = input_len.max(output_len);
        if required > capacity {
            warn!(required, capacity, "Rejecting call that exceeds buffer capacity");
            return Err(PixelError::BufferTooSmall { required, capacity });
        }
        Ok((&mut input[..input_len], &mut output[..output_len]))
    }

    fn buffers_mut(&mut self) -> Result<&mut Buffers> {
        self.buffers.as_mut().ok_or(PixelError::NotInitialized)
    }
}

impl Default for Processor {
    fn default() -> Self {
        Self::new(ProcessorConfig::default())
    }
}

impl std::fmt::Debug for Processor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Processor")
            .field("capacity", &self.capacity())
            .field("config", &self.config)
            .finish()
    }
}

/// Allocate a zeroed buffer, reporting failure instead of aborting.
fn allocate(len: usize) -> Result<Vec<u8>> {
    if len == 0 {
        return Err(PixelError::AllocationFailed(0));
    }
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| PixelError::AllocationFailed(len))?;
    buffer.resize(len, 0);
    Ok(buffer)
}
