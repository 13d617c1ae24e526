use super::*;

/// Failures of the job construction core. Share rejections are not errors of
/// the pool and travel as `StratumError` instead.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum PoolError {
    #[snafu(display("configuration error: {message}"))]
    Configuration { message: String },
    #[snafu(display("template error: {message}"))]
    Template { message: String },
    #[snafu(display("encoding error: {message}"))]
    Encoding { message: String },
    #[snafu(display("hash algorithm `{algorithm}` failed: {message}"))]
    HashAlgorithm { algorithm: String, message: String },
}

impl PoolError {
    /// Configuration errors halt job issuance, everything else only costs the
    /// current refresh.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            ConfigurationSnafu {
                message: "reward table overcommits block reward"
            }
            .build()
            .to_string(),
            "configuration error: reward table overcommits block reward"
        );

        assert_eq!(
            HashAlgorithmSnafu {
                algorithm: "scrypt",
                message: "invalid output length"
            }
            .build()
            .to_string(),
            "hash algorithm `scrypt` failed: invalid output length"
        );
    }

    #[test]
    fn only_configuration_is_fatal() {
        assert!(
            ConfigurationSnafu { message: "x" }
                .build()
                .is_fatal()
        );
        assert!(!TemplateSnafu { message: "x" }.build().is_fatal());
        assert!(!EncodingSnafu { message: "x" }.build().is_fatal());
    }
}
