use super::*;

/// Configured reward recipients: address to percentage of the coinbase value.
/// Whatever the recipients do not take goes to the pool wallet.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct RewardTable(BTreeMap<String, f64>);

impl RewardTable {
    pub fn new(rewards: BTreeMap<String, f64>) -> Self {
        Self(rewards)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(address, percent)| (address.as_str(), *percent))
    }

    /// Check percentages and addresses, returning the parsed recipients in
    /// table order.
    pub fn recipients(&self, chain: Chain) -> Result<Vec<(Address, f64)>, PoolError> {
        let mut total = 0.0;
        let mut recipients = Vec::with_capacity(self.0.len());

        for (address, percent) in self.iter() {
            if !percent.is_finite() || percent < 0.0 {
                return ConfigurationSnafu {
                    message: format!("invalid reward percentage {percent} for `{address}`"),
                }
                .fail();
            }

            total += percent;
            recipients.push((chain.address(address)?, percent));
        }

        if total > 100.0 {
            return ConfigurationSnafu {
                message: format!("reward table assigns {total}% of the block reward"),
            }
            .fail();
        }

        Ok(recipients)
    }

    /// Amount per recipient for a block paying `coinbase_value`.
    pub fn amounts(
        &self,
        chain: Chain,
        coinbase_value: u64,
    ) -> Result<Vec<(Address, u64)>, PoolError> {
        Ok(split(&self.recipients(chain)?, coinbase_value))
    }
}

/// Recipient amounts for `coinbase_value`, each rounded down.
pub fn split(recipients: &[(Address, f64)], coinbase_value: u64) -> Vec<(Address, u64)> {
    recipients
        .iter()
        .map(|(address, percent)| {
            let amount = (coinbase_value as f64 * percent / 100.0).floor() as u64;
            (address.clone(), amount.min(coinbase_value))
        })
        .collect()
}

impl FromIterator<(String, f64)> for RewardTable {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Parse a single `ADDRESS=PERCENT` entry.
pub fn parse_reward(s: &str) -> Result<(String, f64)> {
    let (address, percent) = s
        .split_once('=')
        .ok_or_else(|| anyhow!("reward `{s}` must be of the form ADDRESS=PERCENT"))?;

    let percent = percent
        .trim()
        .parse::<f64>()
        .with_context(|| format!("invalid reward percentage in `{s}`"))?;

    Ok((address.trim().to_string(), percent))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECIPIENT: &str = "mrwhWEDnU6dUtHZJ2oBswTpEdbBHgYiMji";

    #[test]
    fn one_percent_of_fifty_coins() {
        let table = RewardTable::from_iter([(RECIPIENT.to_string(), 1.0)]);

        let amounts = table.amounts(Chain::Testnet, 5_000_000_000).unwrap();

        assert_eq!(amounts.len(), 1);
        assert_eq!(amounts[0].0.to_string(), RECIPIENT);
        assert_eq!(amounts[0].1, 50_000_000);
    }

    #[test]
    fn amounts_round_down() {
        let table = RewardTable::from_iter([(RECIPIENT.to_string(), 33.333)]);
        let amounts = table.amounts(Chain::Testnet, 1_000).unwrap();
        assert_eq!(amounts[0].1, 333);
    }

    #[test]
    fn overcommitted_table_is_a_configuration_error() {
        let table = RewardTable::from_iter([
            (RECIPIENT.to_string(), 60.0),
            ("mk8JqN1kNWju8o3DXEijiJyn7iqkwktAWq".to_string(), 40.5),
        ]);

        assert!(matches!(
            table.recipients(Chain::Testnet),
            Err(PoolError::Configuration { .. })
        ));
    }

    #[test]
    fn invalid_entries() {
        for percent in [-1.0, f64::NAN, f64::INFINITY] {
            let table = RewardTable::from_iter([(RECIPIENT.to_string(), percent)]);
            assert!(table.recipients(Chain::Testnet).is_err());
        }

        let table = RewardTable::from_iter([(RECIPIENT.to_string(), 1.0)]);
        assert!(table.recipients(Chain::Mainnet).is_err());
    }

    #[test]
    fn parse_entries() {
        assert_eq!(
            parse_reward("mrwhWEDnU6dUtHZJ2oBswTpEdbBHgYiMji=1.5").unwrap(),
            (RECIPIENT.to_string(), 1.5)
        );
        assert!(parse_reward("mrwhWEDnU6dUtHZJ2oBswTpEdbBHgYiMji").is_err());
        assert!(parse_reward("a=b").is_err());
    }

    #[test]
    fn deserializes_from_toml_table() {
        #[derive(Deserialize)]
        struct Config {
            rewards: RewardTable,
        }

        let config: Config = toml::from_str(
            r#"
            [rewards]
            mrwhWEDnU6dUtHZJ2oBswTpEdbBHgYiMji = 1.0
            "#,
        )
        .unwrap();

        assert_eq!(config.rewards.len(), 1);
        assert_eq!(config.rewards.iter().next(), Some((RECIPIENT, 1.0)));
    }
}
