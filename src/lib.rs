use {
    algorithm::Algorithm,
    anyhow::{Context, Error, anyhow, bail, ensure},
    arguments::Arguments,
    async_trait::async_trait,
    bitcoin::{
        Address, Amount, Block, BlockHash, Network, TxOut, Txid,
        address::NetworkUnchecked,
        hashes::{Hash, sha256d},
    },
    blake2::Blake2s256,
    block_template::BlockTemplate,
    byteorder::{BigEndian, ByteOrder},
    chain::Chain,
    chrono::{DateTime, Utc},
    clap::{Parser, ValueEnum},
    daemon::{Daemon, TemplateFile},
    digest::{Digest, consts},
    error::{ConfigurationSnafu, EncodingSnafu, HashAlgorithmSnafu, PoolError, TemplateSnafu},
    extra_nonce::ExtraNonce,
    generation_transaction::{GenerationTransaction, GenerationTransactionBuilder},
    futures::future,
    generator::spawn_generator,
    groestl::Groestl512,
    hash_algorithm::{Chained, Digester, HashAlgorithm, Scrypt, Sha256d, hash_to_u256},
    job::Job,
    job_counter::JobCounter,
    jobs::Jobs,
    lru::LruCache,
    merkle_tree::MerkleTree,
    options::Options,
    outputs::Outputs,
    parking_lot::Mutex,
    persisted_block::PersistedBlock,
    pool::Pool,
    primitive_types::U256,
    reward_table::{RewardTable, parse_reward},
    serde::{Deserialize, Serialize},
    serializers::{
        serialize_block, serialize_coinbase, serialize_header, serialize_number, serialize_string,
        var_int,
    },
    settings::Settings,
    sha2::Sha256,
    sha3::Keccak256,
    share::Share,
    signature_script::SignatureScript,
    skein::Skein512,
    snafu::Snafu,
    std::{
        collections::{BTreeMap, HashMap, HashSet, VecDeque},
        env,
        fmt::{self, Display, Formatter},
        fs, io, iter,
        marker::PhantomData,
        num::NonZeroUsize,
        path::{Path, PathBuf},
        process,
        str::FromStr,
        sync::{
            Arc,
            atomic::{AtomicU32, AtomicU64, Ordering},
        },
        time::{Duration, Instant, SystemTime, UNIX_EPOCH},
    },
    stratum::{
        Difficulty, Extranonce, JobId, MerkleNode, Nbits, Nonce, Notify, Ntime, PrevHash,
        StratumError, Submit, Version, merkle_root,
    },
    tokio::{
        runtime::Runtime,
        sync::watch,
        task::JoinSet,
        time::{MissedTickBehavior, interval},
    },
    tokio_util::sync::CancellationToken,
    tracing::{debug, error, info, warn},
    tracing_appender::non_blocking,
    tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt},
};

#[cfg(test)]
use {
    bitcoin::{
        CompactTarget, Sequence, Target, Transaction, VarInt,
        block::{self, Header},
    },
    std::thread,
    tokio::time::{sleep, timeout},
};

pub mod algorithm;
mod arguments;
pub mod block_template;
pub mod chain;
pub mod daemon;
pub mod error;
pub mod extra_nonce;
pub mod generation_transaction;
mod generator;
pub mod hash_algorithm;
pub mod job;
pub mod job_counter;
pub mod jobs;
mod logs;
pub mod merkle_tree;
pub mod options;
pub mod outputs;
pub mod persisted_block;
pub mod pool;
pub mod reward_table;
pub mod serializers;
pub mod settings;
pub mod share;
pub mod signature_script;
mod signal;
mod subcommand;

type Result<T = (), E = Error> = std::result::Result<T, E>;

/// Seconds since the unix epoch, saturating at the end of the 32-bit range
/// block headers can carry.
fn unix_time() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u32::try_from(elapsed.as_secs()).unwrap_or(u32::MAX))
        .unwrap_or_default()
}

pub fn main() {
    let guard = logs::init();

    let args = Arguments::parse();

    let runtime = match Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("error: failed to create tokio runtime: {err}");
            process::exit(1);
        }
    };

    let result = runtime.block_on(async {
        let cancel_token = signal::setup_signal_handler();
        args.run(cancel_token).await
    });

    if let Err(err) = result {
        eprintln!("error: {err}");

        for (i, cause) in err.chain().skip(1).enumerate() {
            if i == 0 {
                eprintln!();
                eprintln!("because:");
            }
            eprintln!("- {cause}");
        }

        if env::var_os("RUST_BACKTRACE")
            .map(|val| val == "1")
            .unwrap_or_default()
        {
            eprintln!();
            eprintln!("{}", err.backtrace());
        }

        drop(guard);
        process::exit(1);
    }
}
