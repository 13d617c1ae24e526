use super::*;

#[derive(Clone, Default, Debug, Parser)]
#[command(group(
    clap::ArgGroup::new("chains")
        .required(false)
        .args(&["chain", "signet", "regtest", "testnet", "testnet4"]),
))]
pub struct Options {
    #[arg(long, help = "Load configuration from <CONFIG>.")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Load configuration from <CONFIG_DIR>/foundry.toml.")]
    pub config_dir: Option<PathBuf>,

    #[arg(long = "chain", value_enum, help = "Use <CHAIN>. [default: mainnet]")]
    pub chain: Option<Chain>,

    #[arg(
        long,
        short = 's',
        help = "Use signet. Equivalent to `--chain signet`."
    )]
    pub signet: bool,

    #[arg(
        long,
        short = 'r',
        help = "Use regtest. Equivalent to `--chain regtest`."
    )]
    pub regtest: bool,

    #[arg(
        long,
        short = 't',
        help = "Use testnet. Equivalent to `--chain testnet`."
    )]
    pub testnet: bool,

    #[arg(long, help = "Use testnet4. Equivalent to `--chain testnet4`.")]
    pub testnet4: bool,

    #[arg(
        long,
        value_enum,
        help = "Hash block headers with <ALGORITHM>. [default: sha256d]"
    )]
    pub algorithm: Option<Algorithm>,

    #[arg(long, help = "Pay the block reward remainder to <POOL_WALLET>.")]
    pub pool_wallet: Option<String>,

    #[arg(
        long,
        value_name = "ADDRESS=PERCENT",
        value_parser = parse_reward,
        help = "Pay PERCENT of the block reward to ADDRESS. May be repeated."
    )]
    pub reward: Vec<(String, f64)>,

    #[arg(long, help = "Tag coinbase signature scripts with <COINBASE_TAG>.")]
    pub coinbase_tag: Option<String>,

    #[arg(long, help = "Allocate extranonce1 values from partition <INSTANCE_ID>.")]
    pub instance_id: Option<u32>,

    #[arg(long, help = "Build generation transactions with version <TX_VERSION>.")]
    pub tx_version: Option<u32>,

    #[arg(long, help = "Append <TX_COMMENT> to generation transactions.")]
    pub tx_comment: Option<String>,

    #[arg(long, help = "Append a block signature byte for proof-of-stake hybrids.")]
    pub proof_of_stake_hybrid: bool,

    #[arg(long, help = "Accept share ntime up to <NTIME_DRIFT> seconds ahead.")]
    pub ntime_drift: Option<u32>,

    #[arg(long, help = "Accept shares for superseded jobs for <STALE_GRACE> seconds.")]
    pub stale_grace: Option<u64>,

    #[arg(long, help = "Poll for block templates every <UPDATE_INTERVAL> seconds.")]
    pub update_interval: Option<u64>,

    #[arg(long, help = "Validate shares at <DIFFICULTY>. [default: 1]")]
    pub difficulty: Option<Difficulty>,

    #[arg(long, help = "Append found blocks to <BLOCKS_FILE> as JSON lines.")]
    pub blocks_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let opts = Options::default();
        assert!(opts.chain.is_none());
        assert!(!opts.signet);
        assert!(!opts.regtest);
        assert!(!opts.testnet);
        assert!(!opts.testnet4);
        assert!(opts.reward.is_empty());
    }

    #[test]
    fn chain_flags_are_mutually_exclusive() {
        assert!(Options::try_parse_from(["foundry", "--signet", "--regtest"]).is_err());
        assert!(Options::try_parse_from(["foundry", "--chain", "signet", "--regtest"]).is_err());
    }

    #[test]
    fn parse_chain_argument() {
        let opts = Options::try_parse_from(["foundry", "--chain", "testnet4"]).unwrap();
        assert_eq!(opts.chain, Some(Chain::Testnet4));

        let opts = Options::try_parse_from(["foundry", "-t"]).unwrap();
        assert!(opts.testnet);
    }

    #[test]
    fn parse_rewards() {
        let opts = Options::try_parse_from([
            "foundry",
            "--reward",
            "mrwhWEDnU6dUtHZJ2oBswTpEdbBHgYiMji=1",
            "--reward",
            "mk8JqN1kNWju8o3DXEijiJyn7iqkwktAWq=0.5",
        ])
        .unwrap();

        assert_eq!(
            opts.reward,
            vec![
                ("mrwhWEDnU6dUtHZJ2oBswTpEdbBHgYiMji".to_string(), 1.0),
                ("mk8JqN1kNWju8o3DXEijiJyn7iqkwktAWq".to_string(), 0.5),
            ]
        );

        assert!(Options::try_parse_from(["foundry", "--reward", "nopercent"]).is_err());
    }

    #[test]
    fn parse_algorithm_and_difficulty() {
        let opts = Options::try_parse_from([
            "foundry",
            "--algorithm",
            "myr-groestl",
            "--difficulty",
            "0.001",
        ])
        .unwrap();

        assert_eq!(opts.algorithm, Some(Algorithm::MyrGroestl));
        assert_eq!(opts.difficulty, Some(Difficulty::new(0.001).unwrap()));

        assert!(Options::try_parse_from(["foundry", "--algorithm", "x11"]).is_err());
        assert!(Options::try_parse_from(["foundry", "--difficulty", "-1"]).is_err());
    }
}
