use super::*;

/// A proof-of-work hash function.
///
/// Implementations keep no state between calls so a single instance can be
/// shared by every share validation running in parallel.
pub trait HashAlgorithm: Send + Sync {
    fn hash(&self, input: &[u8]) -> Result<Vec<u8>, PoolError>;

    /// Scale of the algorithm's difficulty 1 target relative to double-SHA256.
    fn multiplier(&self) -> u32 {
        1
    }
}

/// Any single-round RustCrypto digest.
pub struct Digester<D> {
    multiplier: u32,
    digest: PhantomData<fn() -> D>,
}

impl<D> Digester<D> {
    pub fn new() -> Self {
        Self::with_multiplier(1)
    }

    pub fn with_multiplier(multiplier: u32) -> Self {
        Self {
            multiplier,
            digest: PhantomData,
        }
    }
}

impl<D> Default for Digester<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Digest> HashAlgorithm for Digester<D> {
    fn hash(&self, input: &[u8]) -> Result<Vec<u8>, PoolError> {
        Ok(D::digest(input).to_vec())
    }

    fn multiplier(&self) -> u32 {
        self.multiplier
    }
}

pub struct Sha256d;

impl HashAlgorithm for Sha256d {
    fn hash(&self, input: &[u8]) -> Result<Vec<u8>, PoolError> {
        Ok(sha256d::Hash::hash(input).to_byte_array().to_vec())
    }
}

/// Litecoin-style scrypt: the input doubles as salt, N=1024, r=1, p=1.
pub struct Scrypt {
    params: scrypt::Params,
}

impl Scrypt {
    pub const MULTIPLIER: u32 = 1 << 16;

    pub fn new() -> Result<Self, PoolError> {
        let params = scrypt::Params::new(10, 1, 1, 32).map_err(|err| {
            HashAlgorithmSnafu {
                algorithm: "scrypt",
                message: err.to_string(),
            }
            .build()
        })?;

        Ok(Self { params })
    }
}

impl HashAlgorithm for Scrypt {
    fn hash(&self, input: &[u8]) -> Result<Vec<u8>, PoolError> {
        let mut output = vec![0u8; 32];

        scrypt::scrypt(input, input, &self.params, &mut output).map_err(|err| {
            HashAlgorithmSnafu {
                algorithm: "scrypt",
                message: err.to_string(),
            }
            .build()
        })?;

        Ok(output)
    }

    fn multiplier(&self) -> u32 {
        Self::MULTIPLIER
    }
}

/// Multi-round algorithm: each stage hashes the previous stage's digest.
pub struct Chained {
    stages: Vec<Arc<dyn HashAlgorithm>>,
    multiplier: u32,
}

impl Chained {
    pub fn new(stages: Vec<Arc<dyn HashAlgorithm>>, multiplier: u32) -> Result<Self, PoolError> {
        if stages.is_empty() {
            return ConfigurationSnafu {
                message: "hash chain needs at least one stage",
            }
            .fail();
        }

        Ok(Self { stages, multiplier })
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl HashAlgorithm for Chained {
    fn hash(&self, input: &[u8]) -> Result<Vec<u8>, PoolError> {
        let mut digest = input.to_vec();

        for stage in &self.stages {
            digest = stage.hash(&digest)?;
        }

        Ok(digest)
    }

    fn multiplier(&self) -> u32 {
        self.multiplier
    }
}

/// Interpret a digest as a little-endian 256-bit number. Wider digests are
/// truncated to their first 32 bytes.
pub fn hash_to_u256(digest: &[u8]) -> Result<U256, PoolError> {
    if digest.len() < 32 {
        return HashAlgorithmSnafu {
            algorithm: "digest",
            message: format!("digest of {} bytes is shorter than 32", digest.len()),
        }
        .fail();
    }

    Ok(U256::from_little_endian(&digest[..32]))
}
