use super::*;

#[derive(
    Default, ValueEnum, Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Chain {
    #[default]
    Mainnet,
    Regtest,
    Signet,
    Testnet,
    Testnet4,
}

impl Chain {
    pub fn network(self) -> Network {
        match self {
            Self::Mainnet => Network::Bitcoin,
            Self::Regtest => Network::Regtest,
            Self::Signet => Network::Signet,
            Self::Testnet => Network::Testnet,
            Self::Testnet4 => Network::Testnet4,
        }
    }

    /// Parse `address` and check it belongs to this chain.
    pub fn address(self, address: &str) -> Result<Address, PoolError> {
        address
            .parse::<Address<NetworkUnchecked>>()
            .map_err(|err| {
                ConfigurationSnafu {
                    message: format!("invalid address `{address}`: {err}"),
                }
                .build()
            })?
            .require_network(self.network())
            .map_err(|err| {
                ConfigurationSnafu {
                    message: format!("address `{address}` is not valid on {self}: {err}"),
                }
                .build()
            })
    }
}

impl Display for Chain {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Mainnet => "mainnet",
                Self::Regtest => "regtest",
                Self::Signet => "signet",
                Self::Testnet => "testnet",
                Self::Testnet4 => "testnet4",
            }
        )
    }
}

impl FromStr for Chain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Self::Mainnet),
            "regtest" => Ok(Self::Regtest),
            "signet" => Ok(Self::Signet),
            "testnet" => Ok(Self::Testnet),
            "testnet4" => Ok(Self::Testnet4),
            _ => bail!("invalid chain `{s}`"),
        }
    }
}
