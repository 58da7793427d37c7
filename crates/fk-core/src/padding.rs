use serde::{Deserialize, Serialize};

/// How a sampler resolves neighbor indices that fall outside `[0, len)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Padding {
    /// Out-of-range neighbors are masked out and contribute zero.
    #[default]
    Zeros,
    /// Out-of-range neighbors replicate the nearest edge pixel.
    Clamp,
    /// Mirror around edge pixels without repeating them.
    Reflect101,
}

impl Padding {
    /// Resolves index `i` on an axis of length `len`.
    ///
    /// `None` means the neighbor is masked out and must not be read.
    #[inline]
    pub fn resolve(self, i: isize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }

        match self {
            Self::Zeros => {
                if i < 0 || i as usize >= len {
                    None
                } else {
                    Some(i as usize)
                }
            }
            Self::Clamp => {
                if i < 0 {
                    Some(0)
                } else {
                    Some((i as usize).min(len - 1))
                }
            }
            Self::Reflect101 => {
                // Triangle wave with peaks at 0 and len - 1.
                let last = (len - 1) as isize;
                if last == 0 {
                    return Some(0);
                }
                let folded = i.rem_euclid(2 * last);
                Some((last - (folded - last).abs()) as usize)
            }
        }
    }
}
