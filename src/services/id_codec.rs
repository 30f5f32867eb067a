//! Opaque public ids for content records.
//!
//! Integer primary keys never leave the API raw: responses carry a sqids
//! encoding configured at startup, and path extractors decode it back.
//! Decoding is strict — a public id must decode to exactly one number that
//! fits in `i64`.
use sqids::Sqids;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdCodecError {
    #[error("SQIDS_MIN_LENGTH must fit in u8, got {0}")]
    InvalidMinLength(usize),

    #[error("sqids codec rejected the configuration: {0}")]
    Codec(#[from] sqids::Error),

    #[error("id must be non-negative, got {0}")]
    NegativeId(i64),

    // Client supplied a malformed public id (e.g. /content/{id})
    #[error("invalid public id")]
    InvalidPublicId,
}

#[derive(Clone, Debug)]
pub struct IdCodec {
    sqids: Sqids,
}

impl IdCodec {
    pub fn new(min_length: usize, alphabet: &str) -> Result<Self, IdCodecError> {
        let min_length: u8 = min_length
            .try_into()
            .map_err(|_| IdCodecError::InvalidMinLength(min_length))?;

        let sqids = Sqids::builder()
            .min_length(min_length)
            .alphabet(alphabet.chars().collect())
            .build()?;

        Ok(Self { sqids })
    }

    pub fn encode(&self, id: i64) -> Result<String, IdCodecError> {
        if id < 0 {
            return Err(IdCodecError::NegativeId(id));
        }
        Ok(self.sqids.encode(&[id as u64])?)
    }

    pub fn decode(&self, public_id: &str) -> Result<i64, IdCodecError> {
        match self.sqids.decode(public_id).as_slice() {
            [n] => i64::try_from(*n).map_err(|_| IdCodecError::InvalidPublicId),
            _ => Err(IdCodecError::InvalidPublicId),
        }
    }
}
