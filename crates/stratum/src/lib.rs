use {
    bitcoin::{
        BlockHash, CompactTarget, Target, TxMerkleNode, block,
        hashes::{Hash, sha256d},
    },
    byteorder::{BigEndian, ByteOrder, LittleEndian},
    hex::FromHex,
    primitive_types::U256,
    serde::{
        Deserialize, Serialize, Serializer,
        de::{self, Deserializer},
        ser::SerializeSeq,
    },
    serde_with::{DeserializeFromStr, SerializeDisplay},
    snafu::Snafu,
    std::{
        fmt::{self, Display, Formatter},
        str::FromStr,
        sync::LazyLock,
    },
};

pub use {
    difficulty::{DIFFICULTY_1_TARGET, Difficulty},
    error::{InternalError, Result, StratumError},
    extranonce::Extranonce,
    job_id::JobId,
    merkle::{MerkleNode, merkle_root},
    nbits::Nbits,
    nonce::Nonce,
    notify::Notify,
    ntime::Ntime,
    prevhash::PrevHash,
    submit::Submit,
    version::Version,
};

mod difficulty;
mod error;
mod extranonce;
mod job_id;
mod merkle;
mod nbits;
mod nonce;
mod notify;
mod ntime;
mod prevhash;
mod submit;
mod version;
