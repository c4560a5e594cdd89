//! LSB steganography over interleaved RGBA8 pixel buffers.
//!
//! The embedded stream is
//!
//! ```text
//! [4 bytes ] payload length L (u32, big-endian)
//! [L bytes ] payload
//! ```
//!
//! expanded MSB-first into bits, one bit per color channel. Bit `k` goes into
//! the least-significant bit of the `k`-th non-alpha byte in buffer order
//! (R, G, B of pixel 0, then R, G, B of pixel 1, ...). Alpha bytes are never
//! read or written. Channels past the last payload bit keep their original
//! value.
//!
//! There is no integrity check here: corruption surfaces as an AES-GCM
//! authentication failure after the envelope is decrypted.

use crate::constants::{CHANNELS_PER_PIXEL, PAYLOAD_CHANNELS_PER_PIXEL, STEGO_LENGTH_HEADER};
use crate::errors::PlainsightError;

/// Interleaved RGBA8 pixel data with its dimensions.
///
/// Invariant: `data.len() == 4 * width * height`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap RGBA bytes.
    ///
    /// # Errors
    /// `InvalidPixelBuffer` unless `data.len() == 4 * width * height`.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, PlainsightError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(CHANNELS_PER_PIXEL));
        if expected != Some(data.len()) {
            return Err(PlainsightError::InvalidPixelBuffer {
                width,
                height,
                expected: expected.unwrap_or(usize::MAX),
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A `width` x `height` buffer with every byte set to `fill`.
    ///
    /// # Errors
    /// `InvalidPixelBuffer` if the size overflows `usize`.
    pub fn filled(width: u32, height: u32, fill: u8) -> Result<Self, PlainsightError> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(CHANNELS_PER_PIXEL))
            .ok_or(PlainsightError::InvalidPixelBuffer {
                width,
                height,
                expected: usize::MAX,
                actual: 0,
            })?;
        Self::new(width, height, vec![fill; len])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Give up the buffer, returning the raw RGBA bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Payload capacity of this buffer in bytes. See [`capacity`].
    pub fn capacity(&self) -> i64 {
        capacity(self.width, self.height)
    }
}

/// Maximum payload bytes a `width` x `height` carrier can hold.
///
/// `floor(width * height * 3 / 8) - 4`: one bit per color channel, minus the
/// length header. Negative for tiny images; anything `<= 0` means nothing
/// can be embedded.
pub fn capacity(width: u32, height: u32) -> i64 {
    // u128: width * height * 3 overflows i64 near u32::MAX squared.
    let bits = u128::from(width) * u128::from(height) * PAYLOAD_CHANNELS_PER_PIXEL as u128;
    (bits / 8) as i64 - STEGO_LENGTH_HEADER as i64
}

/// Embed `data` into `carrier` in place.
///
/// The carrier is checked before any byte is written, so on error it is
/// left exactly as it was.
///
/// An empty `data` is accepted and writes a zero length header, which
/// [`extract`] reads back as `NoHiddenData`. Embedding nothing therefore
/// also clears a previously embedded payload's header.
///
/// # Errors
/// `PayloadTooLarge` if `data.len()` exceeds [`capacity`].
pub fn embed(carrier: &mut PixelBuffer, data: &[u8]) -> Result<(), PlainsightError> {
    let capacity = carrier.capacity();
    let too_large = PlainsightError::PayloadTooLarge {
        size: data.len(),
        capacity,
    };
    if i64::try_from(data.len()).map_or(true, |len| len > capacity) {
        return Err(too_large);
    }
    let header = u32::try_from(data.len()).map_err(|_| too_large)?.to_be_bytes();

    let bits = header.iter().chain(data).flat_map(|&byte| byte_bits(byte));
    for (channel, bit) in color_channels_mut(&mut carrier.data).zip(bits) {
        *channel = (*channel & 0xfe) | bit;
    }

    tracing::debug!(
        size = data.len(),
        capacity,
        width = carrier.width,
        height = carrier.height,
        "embedded payload"
    );
    Ok(())
}

/// Copying variant of [`embed`]: returns a new buffer, `carrier` untouched.
///
/// # Errors
/// `PayloadTooLarge` if `data.len()` exceeds [`capacity`].
pub fn embedded(carrier: &PixelBuffer, data: &[u8]) -> Result<PixelBuffer, PlainsightError> {
    let mut out = carrier.clone();
    embed(&mut out, data)?;
    Ok(out)
}

/// Recover the payload embedded in `carrier`.
///
/// # Errors
/// `NoHiddenData` if the decoded length is zero or larger than the carrier
/// could hold, or the carrier is too small to hold a length header.
pub fn extract(carrier: &PixelBuffer) -> Result<Vec<u8>, PlainsightError> {
    let mut bits = color_channels(&carrier.data).map(|channel| channel & 1);

    let mut header = [0u8; STEGO_LENGTH_HEADER];
    for byte in header.iter_mut() {
        *byte = next_byte(&mut bits).ok_or(PlainsightError::NoHiddenData)?;
    }
    let declared = u32::from_be_bytes(header);

    let max_len = carrier.capacity();
    if declared == 0 || i64::from(declared) > max_len {
        tracing::debug!(declared, max_len, "no hidden data in carrier");
        return Err(PlainsightError::NoHiddenData);
    }

    let data = (0..declared)
        .map(|_| next_byte(&mut bits).ok_or(PlainsightError::NoHiddenData))
        .collect::<Result<Vec<u8>, _>>()?;

    tracing::debug!(size = data.len(), "extracted payload");
    Ok(data)
}

/// The 8 bits of `byte`, most significant first.
fn byte_bits(byte: u8) -> impl Iterator<Item = u8> {
    (0..8).rev().map(move |i| (byte >> i) & 1)
}

/// Pack the next 8 bits (MSB first) into a byte.
fn next_byte(bits: &mut impl Iterator<Item = u8>) -> Option<u8> {
    (0..8).try_fold(0u8, |acc, _| bits.next().map(|bit| (acc << 1) | bit))
}

fn color_channels(data: &[u8]) -> impl Iterator<Item = u8> + '_ {
    data.chunks_exact(CHANNELS_PER_PIXEL)
        .flat_map(|pixel| pixel[..PAYLOAD_CHANNELS_PER_PIXEL].iter().copied())
}

fn color_channels_mut(data: &mut [u8]) -> impl Iterator<Item = &mut u8> + '_ {
    data.chunks_exact_mut(CHANNELS_PER_PIXEL)
        .flat_map(|pixel| pixel[..PAYLOAD_CHANNELS_PER_PIXEL].iter_mut())
}
