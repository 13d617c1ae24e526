use super::*;

/// TOML config file structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub chain: Option<Chain>,
    pub algorithm: Option<Algorithm>,
    pub pool_wallet: Option<String>,
    pub rewards: Option<RewardTable>,
    pub coinbase_tag: Option<String>,
    pub instance_id: Option<u32>,
    pub tx_version: Option<u32>,
    pub tx_comment: Option<String>,
    pub proof_of_stake_hybrid: Option<bool>,
    pub ntime_drift: Option<u32>,
    pub stale_grace: Option<u64>,
    pub update_interval: Option<u64>,
    pub difficulty: Option<Difficulty>,
    pub blocks_file: Option<PathBuf>,
}

/// Resolved configuration
#[derive(Debug, Clone, Default, Serialize)]
pub struct Settings {
    pub config: Option<PathBuf>,
    pub config_dir: Option<PathBuf>,
    pub chain: Option<Chain>,
    pub algorithm: Option<Algorithm>,
    pub pool_wallet: Option<String>,
    pub rewards: Option<RewardTable>,
    pub coinbase_tag: Option<String>,
    pub instance_id: Option<u32>,
    pub tx_version: Option<u32>,
    pub tx_comment: Option<String>,
    pub proof_of_stake_hybrid: bool,
    pub ntime_drift: Option<u32>,
    pub stale_grace: Option<u64>,
    pub update_interval: Option<u64>,
    pub difficulty: Option<Difficulty>,
    pub blocks_file: Option<PathBuf>,
}

impl Settings {
    pub const DEFAULT_COINBASE_TAG: &'static str = "/foundry/";
    pub const DEFAULT_STALE_GRACE: u64 = 30;
    pub const DEFAULT_UPDATE_INTERVAL: u64 = 10;

    /// Load settings from all sources with proper priority
    pub fn load(options: Options) -> Result<Self> {
        let mut env = BTreeMap::<String, String>::new();

        for (var, value) in env::vars_os() {
            let Some(var) = var.to_str() else {
                continue;
            };

            let Some(key) = var.strip_prefix("FOUNDRY_") else {
                continue;
            };

            env.insert(
                key.into(),
                value.into_string().map_err(|value| {
                    anyhow!(
                        "environment variable `{var}` not valid unicode: `{}`",
                        value.to_string_lossy()
                    )
                })?,
            );
        }

        Self::merge(options, env)
    }

    /// Merge CLI options over environment over config file over defaults
    pub fn merge(options: Options, env: BTreeMap<String, String>) -> Result<Self> {
        let settings = Self::from_options(&options).or(Self::from_env(&env)?);

        let config = match Self::find_config_path(&settings) {
            Some(config_path) => toml::from_str(&fs::read_to_string(&config_path).context(
                anyhow!("failed to open config file `{}`", config_path.display()),
            )?)
            .context(anyhow!(
                "failed to deserialize config file `{}`",
                config_path.display()
            ))?,
            None => Config::default(),
        };

        let settings = settings.or(Self::from_config(&config)).or_defaults();

        settings.validate()?;

        Ok(settings)
    }

    fn find_config_path(settings: &Self) -> Option<PathBuf> {
        if let Some(path) = &settings.config {
            return Some(path.clone());
        }

        if let Some(dir) = &settings.config_dir {
            let path = dir.join("foundry.toml");
            if path.exists() {
                return Some(path);
            }
        }

        dirs::config_dir()
            .map(|dir| dir.join("foundry").join("foundry.toml"))
            .filter(|path| path.exists())
    }

    pub fn from_options(options: &Options) -> Self {
        Self {
            config: options.config.clone(),
            config_dir: options.config_dir.clone(),
            chain: options
                .signet
                .then_some(Chain::Signet)
                .or(options.regtest.then_some(Chain::Regtest))
                .or(options.testnet.then_some(Chain::Testnet))
                .or(options.testnet4.then_some(Chain::Testnet4))
                .or(options.chain),
            algorithm: options.algorithm,
            pool_wallet: options.pool_wallet.clone(),
            rewards: (!options.reward.is_empty())
                .then(|| options.reward.iter().cloned().collect()),
            coinbase_tag: options.coinbase_tag.clone(),
            instance_id: options.instance_id,
            tx_version: options.tx_version,
            tx_comment: options.tx_comment.clone(),
            proof_of_stake_hybrid: options.proof_of_stake_hybrid,
            ntime_drift: options.ntime_drift,
            stale_grace: options.stale_grace,
            update_interval: options.update_interval,
            difficulty: options.difficulty,
            blocks_file: options.blocks_file.clone(),
        }
    }

    pub fn from_env(env: &BTreeMap<String, String>) -> Result<Self> {
        let get_bool = |key: &str| {
            env.get(key)
                .map(|value| !value.is_empty() && value != "0" && value.to_lowercase() != "false")
                .unwrap_or_default()
        };

        let get_string = |key: &str| env.get(key).cloned();

        let get_path = |key: &str| env.get(key).map(PathBuf::from);

        fn get_parsed<T>(env: &BTreeMap<String, String>, key: &str) -> Result<Option<T>>
        where
            T: FromStr,
            T::Err: std::error::Error + Send + Sync + 'static,
        {
            env.get(key)
                .map(|value| value.parse::<T>())
                .transpose()
                .with_context(|| {
                    format!(
                        "failed to parse environment variable FOUNDRY_{key} as {}",
                        std::any::type_name::<T>()
                    )
                })
        }

        let get_rewards = |key: &str| -> Result<Option<RewardTable>> {
            env.get(key)
                .map(|value| {
                    value
                        .split(',')
                        .map(str::trim)
                        .filter(|entry| !entry.is_empty())
                        .map(parse_reward)
                        .collect::<Result<RewardTable>>()
                })
                .transpose()
                .with_context(|| format!("failed to parse environment variable FOUNDRY_{key}"))
        };

        Ok(Self {
            config: get_path("CONFIG"),
            config_dir: get_path("CONFIG_DIR"),
            chain: env
                .get("CHAIN")
                .map(|chain| chain.parse::<Chain>())
                .transpose()
                .context("failed to parse environment variable FOUNDRY_CHAIN as chain")?,
            algorithm: env
                .get("ALGORITHM")
                .map(|algorithm| algorithm.parse::<Algorithm>())
                .transpose()
                .context("failed to parse environment variable FOUNDRY_ALGORITHM as algorithm")?,
            pool_wallet: get_string("POOL_WALLET"),
            rewards: get_rewards("REWARDS")?,
            coinbase_tag: get_string("COINBASE_TAG"),
            instance_id: get_parsed(env, "INSTANCE_ID")?,
            tx_version: get_parsed(env, "TX_VERSION")?,
            tx_comment: get_string("TX_COMMENT"),
            proof_of_stake_hybrid: get_bool("PROOF_OF_STAKE_HYBRID"),
            ntime_drift: get_parsed(env, "NTIME_DRIFT")?,
            stale_grace: get_parsed(env, "STALE_GRACE")?,
            update_interval: get_parsed(env, "UPDATE_INTERVAL")?,
            difficulty: get_parsed(env, "DIFFICULTY")?,
            blocks_file: get_path("BLOCKS_FILE"),
        })
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            config: None,
            config_dir: None,
            chain: config.chain,
            algorithm: config.algorithm,
            pool_wallet: config.pool_wallet.clone(),
            rewards: config.rewards.clone(),
            coinbase_tag: config.coinbase_tag.clone(),
            instance_id: config.instance_id,
            tx_version: config.tx_version,
            tx_comment: config.tx_comment.clone(),
            proof_of_stake_hybrid: config.proof_of_stake_hybrid.unwrap_or_default(),
            ntime_drift: config.ntime_drift,
            stale_grace: config.stale_grace,
            update_interval: config.update_interval,
            difficulty: config.difficulty,
            blocks_file: config.blocks_file.clone(),
        }
    }

    /// Merge self with another Settings, self takes priority
    pub fn or(self, other: Self) -> Self {
        Self {
            config: self.config.or(other.config),
            config_dir: self.config_dir.or(other.config_dir),
            chain: self.chain.or(other.chain),
            algorithm: self.algorithm.or(other.algorithm),
            pool_wallet: self.pool_wallet.or(other.pool_wallet),
            rewards: self.rewards.or(other.rewards),
            coinbase_tag: self.coinbase_tag.or(other.coinbase_tag),
            instance_id: self.instance_id.or(other.instance_id),
            tx_version: self.tx_version.or(other.tx_version),
            tx_comment: self.tx_comment.or(other.tx_comment),
            proof_of_stake_hybrid: self.proof_of_stake_hybrid || other.proof_of_stake_hybrid,
            ntime_drift: self.ntime_drift.or(other.ntime_drift),
            stale_grace: self.stale_grace.or(other.stale_grace),
            update_interval: self.update_interval.or(other.update_interval),
            difficulty: self.difficulty.or(other.difficulty),
            blocks_file: self.blocks_file.or(other.blocks_file),
        }
    }

    fn or_defaults(self) -> Self {
        Self {
            config: None,
            config_dir: None,
            chain: Some(self.chain.unwrap_or_default()),
            algorithm: Some(self.algorithm.unwrap_or_default()),
            pool_wallet: self.pool_wallet,
            rewards: Some(self.rewards.unwrap_or_default()),
            coinbase_tag: Some(
                self.coinbase_tag
                    .unwrap_or_else(|| Self::DEFAULT_COINBASE_TAG.into()),
            ),
            instance_id: Some(self.instance_id.unwrap_or_default()),
            tx_version: Some(self.tx_version.unwrap_or(2)),
            tx_comment: self.tx_comment,
            proof_of_stake_hybrid: self.proof_of_stake_hybrid,
            ntime_drift: Some(self.ntime_drift.unwrap_or(Job::DEFAULT_NTIME_DRIFT)),
            stale_grace: Some(self.stale_grace.unwrap_or(Self::DEFAULT_STALE_GRACE)),
            update_interval: Some(
                self.update_interval
                    .unwrap_or(Self::DEFAULT_UPDATE_INTERVAL),
            ),
            difficulty: Some(self.difficulty.unwrap_or_default()),
            blocks_file: self.blocks_file,
        }
    }

    fn validate(&self) -> Result {
        ensure!(
            self.instance_id() <= ExtraNonce::MAX_INSTANCE_ID,
            "instance id {} exceeds maximum {}",
            self.instance_id(),
            ExtraNonce::MAX_INSTANCE_ID,
        );

        ensure!(
            self.update_interval() > Duration::ZERO,
            "update interval must be at least one second"
        );

        self.rewards().recipients(self.chain())?;

        if self.pool_wallet.is_some() {
            self.pool_wallet()?;
        }

        Ok(())
    }

    pub fn chain(&self) -> Chain {
        self.chain.unwrap_or_default()
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm.unwrap_or_default()
    }

    pub fn pool_wallet(&self) -> Result<Address> {
        let pool_wallet = self
            .pool_wallet
            .as_deref()
            .context("no pool wallet configured")?;

        Ok(self.chain().address(pool_wallet)?)
    }

    pub fn rewards(&self) -> RewardTable {
        self.rewards.clone().unwrap_or_default()
    }

    pub fn coinbase_tag(&self) -> &str {
        self.coinbase_tag
            .as_deref()
            .unwrap_or(Self::DEFAULT_COINBASE_TAG)
    }

    pub fn instance_id(&self) -> u32 {
        self.instance_id.unwrap_or_default()
    }

    pub fn tx_version(&self) -> u32 {
        self.tx_version.unwrap_or(2)
    }

    pub fn tx_comment(&self) -> Option<String> {
        self.tx_comment.clone()
    }

    pub fn proof_of_stake_hybrid(&self) -> bool {
        self.proof_of_stake_hybrid
    }

    pub fn ntime_drift(&self) -> u32 {
        self.ntime_drift.unwrap_or(Job::DEFAULT_NTIME_DRIFT)
    }

    pub fn stale_grace(&self) -> Duration {
        Duration::from_secs(self.stale_grace.unwrap_or(Self::DEFAULT_STALE_GRACE))
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_secs(
            self.update_interval
                .unwrap_or(Self::DEFAULT_UPDATE_INTERVAL),
        )
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty.unwrap_or_default()
    }

    pub fn blocks_file(&self) -> Option<&Path> {
        self.blocks_file.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use {super::*, tempfile::TempDir};

    const POOL_WALLET: &str = "mk8JqN1kNWju8o3DXEijiJyn7iqkwktAWq";
    const RECIPIENT: &str = "mrwhWEDnU6dUtHZJ2oBswTpEdbBHgYiMji";

    fn env(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    fn options(args: &[&str]) -> Options {
        Options::try_parse_from(std::iter::once("foundry").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn settings_from_empty_env() {
        let settings = Settings::from_env(&BTreeMap::new()).unwrap();
        assert!(settings.chain.is_none());
        assert!(settings.rewards.is_none());
        assert!(!settings.proof_of_stake_hybrid);
    }

    #[test]
    fn settings_from_env() {
        let settings = Settings::from_env(&env(&[
            ("CHAIN", "testnet"),
            ("ALGORITHM", "scrypt"),
            ("POOL_WALLET", POOL_WALLET),
            ("REWARDS", format!("{RECIPIENT}=1.5, ").as_str()),
            ("INSTANCE_ID", "3"),
            ("PROOF_OF_STAKE_HYBRID", "true"),
            ("DIFFICULTY", "0.5"),
        ]))
        .unwrap();

        assert_eq!(settings.chain, Some(Chain::Testnet));
        assert_eq!(settings.algorithm, Some(Algorithm::Scrypt));
        assert_eq!(settings.pool_wallet.as_deref(), Some(POOL_WALLET));
        assert_eq!(
            settings.rewards,
            Some(RewardTable::from_iter([(RECIPIENT.to_string(), 1.5)]))
        );
        assert_eq!(settings.instance_id, Some(3));
        assert!(settings.proof_of_stake_hybrid);
        assert_eq!(settings.difficulty, Some(Difficulty::new(0.5).unwrap()));
    }

    #[test]
    fn invalid_env_values() {
        assert!(Settings::from_env(&env(&[("CHAIN", "dogecoin")])).is_err());
        assert!(Settings::from_env(&env(&[("INSTANCE_ID", "-1")])).is_err());
        assert!(Settings::from_env(&env(&[("REWARDS", "nopercent")])).is_err());
        assert!(Settings::from_env(&env(&[("DIFFICULTY", "0")])).is_err());
    }

    #[test]
    fn settings_merge_priority() {
        let tempdir = TempDir::new().unwrap();
        let config = tempdir.path().join("foundry.toml");

        fs::write(
            &config,
            format!(
                r#"
                chain = "regtest"
                coinbase_tag = "/config/"
                instance_id = 7
                update_interval = 3

                [rewards]
                {RECIPIENT} = 2.0
                "#
            ),
        )
        .unwrap();

        let settings = Settings::merge(
            options(&[
                "--config-dir",
                tempdir.path().to_str().unwrap(),
                "--testnet",
            ]),
            env(&[("CHAIN", "signet"), ("COINBASE_TAG", "/env/")]),
        )
        .unwrap();

        assert_eq!(settings.chain(), Chain::Testnet);
        assert_eq!(settings.coinbase_tag(), "/env/");
        assert_eq!(settings.instance_id(), 7);
        assert_eq!(settings.update_interval(), Duration::from_secs(3));
        assert_eq!(settings.rewards().len(), 1);
        assert_eq!(settings.stale_grace(), Duration::from_secs(30));
    }

    #[test]
    fn defaults() {
        let settings = Settings::merge(
            options(&["--config", "/dev/null"]),
            BTreeMap::new(),
        )
        .unwrap();

        assert_eq!(settings.chain(), Chain::Mainnet);
        assert_eq!(settings.algorithm(), Algorithm::Sha256d);
        assert_eq!(settings.coinbase_tag(), "/foundry/");
        assert_eq!(settings.instance_id(), 0);
        assert_eq!(settings.tx_version(), 2);
        assert_eq!(settings.ntime_drift(), 7200);
        assert_eq!(settings.update_interval(), Duration::from_secs(10));
        assert_eq!(settings.difficulty(), Difficulty::new(1.0).unwrap());
        assert!(settings.rewards().is_empty());
        assert!(settings.pool_wallet().is_err());
        assert!(settings.blocks_file().is_none());
    }

    #[test]
    fn settings_boolean_merge_uses_or() {
        let a = Settings {
            proof_of_stake_hybrid: true,
            ..Default::default()
        };
        let b = Settings::default();
        assert!(a.clone().or(b.clone()).proof_of_stake_hybrid);
        assert!(b.or(a).proof_of_stake_hybrid);
    }

    #[test]
    fn config_file_parsing() {
        let config: Config = toml::from_str(&format!(
            r#"
            chain = "testnet"
            algorithm = "myr-groestl"
            pool_wallet = "{POOL_WALLET}"
            difficulty = 0.25
            stale_grace = 60

            [rewards]
            {RECIPIENT} = 1.0
            "#
        ))
        .unwrap();

        assert_eq!(config.chain, Some(Chain::Testnet));
        assert_eq!(config.algorithm, Some(Algorithm::MyrGroestl));
        assert_eq!(config.difficulty, Some(Difficulty::new(0.25).unwrap()));
        assert_eq!(config.stale_grace, Some(60));
        assert_eq!(config.rewards.unwrap().len(), 1);
    }

    #[test]
    fn config_rejects_unknown_fields() {
        assert!(toml::from_str::<Config>("port = 3333").is_err());
    }

    #[test]
    fn missing_config_file() {
        let err = Settings::merge(
            options(&["--config", "/nonexistent/foundry.toml"]),
            BTreeMap::new(),
        )
        .unwrap_err();

        assert!(err.to_string().contains("failed to open config file"));
    }

    #[test]
    fn validation() {
        assert!(
            Settings::merge(
                options(&["--instance-id", "32", "--config", "/dev/null"]),
                BTreeMap::new(),
            )
            .is_err()
        );

        assert!(
            Settings::merge(
                options(&["--testnet", "--config", "/dev/null"]),
                env(&[("REWARDS", format!("{RECIPIENT}=101").as_str())]),
            )
            .is_err()
        );

        assert!(
            Settings::merge(
                options(&["--config", "/dev/null"]),
                env(&[("POOL_WALLET", POOL_WALLET)]),
            )
            .is_err()
        );

        assert!(
            Settings::merge(
                options(&["--testnet", "--config", "/dev/null"]),
                env(&[("POOL_WALLET", POOL_WALLET)]),
            )
            .is_ok()
        );

        assert!(
            Settings::merge(
                options(&["--update-interval", "0", "--config", "/dev/null"]),
                BTreeMap::new(),
            )
            .is_err()
        );
    }
}
