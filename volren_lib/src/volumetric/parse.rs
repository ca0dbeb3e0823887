//! Parser of the `.dat` volume layout
//!
//! Little endian 2 byte values.
//! First three values are width, height and depth,
//! followed by `width * height * depth` samples in <0;4095>,
//! x growing fastest.

use nom::{number::complete::le_u16, sequence::tuple, IResult};

use crate::{Result, VolumeError};

/// 3x 16bit dimension
pub const DAT_HEADER_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatHeader {
    pub width: u16,
    pub height: u16,
    pub depth: u16,
}

impl DatHeader {
    pub fn voxel_count(&self) -> usize {
        self.width as usize * self.height as usize * self.depth as usize
    }
}

pub fn dat_header(s: &[u8]) -> IResult<&[u8], DatHeader> {
    let mut header = tuple((le_u16, le_u16, le_u16));
    let (s, (width, height, depth)) = header(s)?;

    Ok((
        s,
        DatHeader {
            width,
            height,
            depth,
        },
    ))
}

/// Decode a whole file into 16bit words, header included
///
/// Only checks that the bytes form whole samples,
/// dimensions are validated by [`super::VolumeField::new`].
pub fn dat_words(slice: &[u8]) -> Result<Vec<u16>> {
    let (payload, header) = match dat_header(slice) {
        Ok(r) => r,
        Err(_) => {
            return Err(VolumeError::InvalidHeader(format!(
                "expected {DAT_HEADER_LEN} header bytes, got {}",
                slice.len()
            )))
        }
    };

    if payload.len() % 2 != 0 {
        return Err(VolumeError::TruncatedSample { len: slice.len() });
    }

    let mut words = Vec::with_capacity(3 + payload.len() / 2);
    words.extend([header.width, header.height, header.depth]);
    words.extend(
        payload
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]])),
    );

    Ok(words)
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn header_little_endian() {
        let bytes = [2, 0, 3, 0, 0, 1, 0xff];
        let (rest, header) = dat_header(&bytes).unwrap();

        assert_eq!(
            header,
            DatHeader {
                width: 2,
                height: 3,
                depth: 256
            }
        );
        assert_eq!(header.voxel_count(), 2 * 3 * 256);
        assert_eq!(rest, &[0xff]);
    }

    #[test]
    fn words_include_header() {
        let bytes = [1, 0, 1, 0, 2, 0, 0xff, 0x0f, 0, 0];
        let words = dat_words(&bytes).unwrap();

        assert_eq!(words, vec![1, 1, 2, 4095, 0]);
    }

    #[test]
    fn short_header() {
        let res = dat_words(&[1, 0, 1]);
        assert!(matches!(res, Err(VolumeError::InvalidHeader(_))));
    }

    #[test]
    fn odd_byte_count() {
        let res = dat_words(&[1, 0, 1, 0, 1, 0, 7]);
        assert!(matches!(res, Err(VolumeError::TruncatedSample { len: 7 })));
    }
}
