use super::*;

/// Coinbase outputs: the pool wallet first, taking whatever the recipients
/// leave, then one output per recipient.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outputs(Vec<TxOut>);

impl Outputs {
    pub fn new(
        pool_wallet: &Address,
        recipients: &[(Address, u64)],
        coinbase_value: u64,
    ) -> Result<Self, PoolError> {
        let committed = recipients
            .iter()
            .try_fold(0u64, |total, (_, amount)| total.checked_add(*amount))
            .filter(|total| *total <= coinbase_value)
            .ok_or_else(|| {
                ConfigurationSnafu {
                    message: format!(
                        "recipient amounts exceed the coinbase value of {coinbase_value}"
                    ),
                }
                .build()
            })?;

        let mut outputs = Vec::with_capacity(recipients.len() + 1);

        outputs.push(TxOut {
            value: Amount::from_sat(coinbase_value - committed),
            script_pubkey: pool_wallet.script_pubkey(),
        });

        outputs.extend(recipients.iter().map(|(address, amount)| TxOut {
            value: Amount::from_sat(*amount),
            script_pubkey: address.script_pubkey(),
        }));

        Ok(Self(outputs))
    }

    pub fn as_slice(&self) -> &[TxOut] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// What the pool wallet receives.
    pub fn pool_reward(&self) -> u64 {
        self.0.first().map(|output| output.value.to_sat()).unwrap_or_default()
    }

    pub fn total(&self) -> u64 {
        self.0.iter().map(|output| output.value.to_sat()).sum()
    }

    /// Output count followed by each output's value and script.
    pub fn serialize(&self) -> Vec<u8> {
        let mut buf = var_int(self.0.len() as u64);

        for output in &self.0 {
            buf.extend_from_slice(&output.value.to_sat().to_le_bytes());
            buf.extend(var_int(output.script_pubkey.len() as u64));
            buf.extend_from_slice(output.script_pubkey.as_bytes());
        }

        buf
    }
}

#[cfg(test)]
mod tests {
    use {super::*, proptest::prelude::*};

    fn pool_wallet() -> Address {
        Chain::Testnet
            .address("mk8JqN1kNWju8o3DXEijiJyn7iqkwktAWq")
            .unwrap()
    }

    fn recipient() -> Address {
        Chain::Testnet
            .address("mrwhWEDnU6dUtHZJ2oBswTpEdbBHgYiMji")
            .unwrap()
    }

    #[test]
    fn pool_wallet_first_with_remainder() {
        let outputs = Outputs::new(
            &pool_wallet(),
            &[(recipient(), 50_000_000)],
            5_000_000_000,
        )
        .unwrap();

        assert_eq!(outputs.len(), 2);
        assert_eq!(outputs.pool_reward(), 4_950_000_000);
        assert_eq!(outputs.total(), 5_000_000_000);
        assert_eq!(
            hex::encode(outputs.serialize()),
            "0280010b27010000001976a914329035234168b8da5af106ceb20560401236849888ac80f0fa02000000001976a9147d576fbfca48b899dc750167dd2a2a6572fff49588ac"
        );
    }

    #[test]
    fn serialization_matches_consensus() {
        let outputs = Outputs::new(&pool_wallet(), &[(recipient(), 1)], 100).unwrap();
        assert_eq!(
            outputs.serialize(),
            bitcoin::consensus::serialize(&outputs.as_slice().to_vec())
        );
    }

    #[test]
    fn no_recipients_pays_everything_to_pool() {
        let outputs = Outputs::new(&pool_wallet(), &[], 625_000_000).unwrap();
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs.pool_reward(), 625_000_000);
    }

    #[test]
    fn overcommitted_recipients_are_rejected() {
        assert!(matches!(
            Outputs::new(&pool_wallet(), &[(recipient(), 101)], 100),
            Err(PoolError::Configuration { .. })
        ));

        assert!(matches!(
            Outputs::new(
                &pool_wallet(),
                &[(recipient(), u64::MAX), (recipient(), 2)],
                100
            ),
            Err(PoolError::Configuration { .. })
        ));
    }

    proptest! {
        #[test]
        fn outputs_total_coinbase_value(
            coinbase_value in 0u64..=21_000_000 * 100_000_000,
            percents in proptest::collection::vec(0.0f64..=25.0, 0..=4),
        ) {
            let addresses = [
                "mrwhWEDnU6dUtHZJ2oBswTpEdbBHgYiMji",
                "mk8JqN1kNWju8o3DXEijiJyn7iqkwktAWq",
                "mipcBbFg9gMiCh81Kj8tqqdgoZub1ZJRfn",
                "n3GNqMveyvaPvUbH469vDRadqpJMPc84JA",
            ];

            let table = addresses
                .iter()
                .zip(&percents)
                .map(|(address, percent)| (address.to_string(), *percent))
                .collect::<RewardTable>();

            let amounts = table.amounts(Chain::Testnet, coinbase_value).unwrap();
            let outputs = Outputs::new(&pool_wallet(), &amounts, coinbase_value).unwrap();

            prop_assert_eq!(outputs.total(), coinbase_value);
            prop_assert_eq!(outputs.len(), amounts.len() + 1);
        }
    }
}
