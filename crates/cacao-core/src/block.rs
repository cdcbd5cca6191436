//! Content-addressed block encoding.
//!
//! A capability is persisted and transmitted as a block: its canonical
//! binary encoding plus a content identifier derived from those bytes. The
//! [`BlockCodec`] trait is the boundary; [`DagCborCodec`] is the default
//! implementation (DAG-CBOR bytes, CIDv1 over a SHA-256 multihash).

use cid::Cid;
use cid::multihash::Multihash;
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::cacao::Cacao;
use crate::error::{CodecError, CodecResult};

/// Multicodec code for DAG-CBOR.
pub const DAG_CBOR_CODEC: u64 = 0x71;

/// Multihash code for SHA2-256.
pub const SHA2_256_CODE: u64 = 0x12;

/// A capability together with its encoded bytes and content id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacaoBlock {
    /// The decoded capability.
    pub value: Cacao,
    /// Canonical encoding of `value`.
    pub bytes: Vec<u8>,
    /// Content id of `bytes`.
    pub cid: Cid,
}

impl CacaoBlock {
    /// Check the block against a previously known content id.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::CidMismatch`] if the ids differ.
    pub fn verify_cid(&self, expected: &Cid) -> CodecResult<()> {
        if &self.cid == expected {
            Ok(())
        } else {
            Err(CodecError::CidMismatch {
                expected: expected.to_string(),
                actual: self.cid.to_string(),
            })
        }
    }
}

/// Canonical encoder and content-addressing boundary.
pub trait BlockCodec: Send + Sync {
    /// Encode a capability. Equal values must yield identical blocks.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Encode`] if the value cannot be encoded.
    fn encode(&self, value: &Cacao) -> CodecResult<CacaoBlock>;

    /// Decode bytes into a block, deriving the content id from the input.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Decode`] for undecodable bytes and
    /// [`CodecError::NonCanonical`] if the bytes are not the canonical
    /// encoding of the value they decode to.
    fn decode(&self, bytes: &[u8]) -> CodecResult<CacaoBlock>;
}

/// Compute the CIDv1 (dag-cbor, sha2-256) of encoded bytes.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if the digest cannot be wrapped as a
/// multihash.
pub fn content_id(bytes: &[u8]) -> CodecResult<Cid> {
    let digest = Sha256::digest(bytes);
    let hash = Multihash::<64>::wrap(SHA2_256_CODE, &digest)
        .map_err(|e| CodecError::Encode(e.to_string()))?;
    Ok(Cid::new_v1(DAG_CBOR_CODEC, hash))
}

/// DAG-CBOR block codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct DagCborCodec;

impl DagCborCodec {
    /// Create the codec.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl BlockCodec for DagCborCodec {
    fn encode(&self, value: &Cacao) -> CodecResult<CacaoBlock> {
        let bytes =
            serde_ipld_dagcbor::to_vec(value).map_err(|e| CodecError::Encode(e.to_string()))?;
        let cid = content_id(&bytes)?;
        debug!(cid = %cid, len = bytes.len(), "Encoded capability block");
        Ok(CacaoBlock {
            value: value.clone(),
            bytes,
            cid,
        })
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<CacaoBlock> {
        let value: Cacao =
            serde_ipld_dagcbor::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))?;

        let canonical =
            serde_ipld_dagcbor::to_vec(&value).map_err(|e| CodecError::Encode(e.to_string()))?;
        if canonical != bytes {
            return Err(CodecError::NonCanonical);
        }

        let cid = content_id(bytes)?;
        Ok(CacaoBlock {
            value,
            bytes: bytes.to_vec(),
            cid,
        })
    }
}
