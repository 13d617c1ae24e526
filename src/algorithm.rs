use super::*;

/// Proof-of-work algorithms a pool can be configured for.
#[derive(
    Default, ValueEnum, Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    #[default]
    Sha256d,
    Scrypt,
    Keccak,
    Groestl,
    MyrGroestl,
    Skein,
    Blake2s,
}

impl Algorithm {
    pub fn hasher(self) -> Result<Arc<dyn HashAlgorithm>, PoolError> {
        let hasher: Arc<dyn HashAlgorithm> = match self {
            Self::Sha256d => Arc::new(Sha256d),
            Self::Scrypt => Arc::new(Scrypt::new()?),
            Self::Keccak => Arc::new(Digester::<Keccak256>::with_multiplier(256)),
            Self::Groestl => Arc::new(Chained::new(
                vec![
                    Arc::new(Digester::<Groestl512>::new()) as Arc<dyn HashAlgorithm>,
                    Arc::new(Digester::<Groestl512>::new()),
                ],
                256,
            )?),
            Self::MyrGroestl => Arc::new(Chained::new(
                vec![
                    Arc::new(Digester::<Groestl512>::new()) as Arc<dyn HashAlgorithm>,
                    Arc::new(Digester::<Sha256>::new()),
                ],
                1,
            )?),
            Self::Skein => Arc::new(Chained::new(
                vec![
                    Arc::new(Digester::<Skein512<consts::U64>>::new()) as Arc<dyn HashAlgorithm>,
                    Arc::new(Digester::<Sha256>::new()),
                ],
                1,
            )?),
            Self::Blake2s => Arc::new(Digester::<Blake2s256>::new()),
        };

        Ok(hasher)
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self.to_possible_value() {
            Some(value) => f.write_str(value.get_name()),
            None => write!(f, "{self:?}"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true).map_err(|_| anyhow!("unknown algorithm `{s}`"))
    }
}
