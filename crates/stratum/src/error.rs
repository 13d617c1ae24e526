use super::*;

pub type Result<T = (), E = InternalError> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum InternalError {
    #[snafu(display("{message}"))]
    Parse { message: String },
}

/// Reasons a share submission is rejected. These go back to the miner and are
/// never treated as faults of the pool itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StratumError {
    Internal,
    JobNotFound,
    Stale,
    Duplicate,
    AboveTarget,
    NtimeOutOfRange,
    InvalidExtranonce2,
}

impl StratumError {
    pub fn code(self) -> i32 {
        match self {
            Self::Internal | Self::NtimeOutOfRange | Self::InvalidExtranonce2 => 20,
            Self::JobNotFound | Self::Stale => 21,
            Self::Duplicate => 22,
            Self::AboveTarget => 23,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Internal => "Internal error",
            Self::JobNotFound => "Job not found",
            Self::Stale => "Stale job",
            Self::Duplicate => "Duplicate share",
            Self::AboveTarget => "Low difficulty share",
            Self::NtimeOutOfRange => "Ntime out of range",
            Self::InvalidExtranonce2 => "Incorrect size of extranonce2",
        }
    }
}

impl Display for StratumError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for StratumError {}

impl Serialize for StratumError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (self.code(), self.message(), Option::<()>::None).serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_stratum_convention() {
        assert_eq!(StratumError::JobNotFound.code(), 21);
        assert_eq!(StratumError::Stale.code(), 21);
        assert_eq!(StratumError::Duplicate.code(), 22);
        assert_eq!(StratumError::AboveTarget.code(), 23);
        assert_eq!(StratumError::NtimeOutOfRange.code(), 20);
    }

    #[test]
    fn serializes_as_json_rpc_error_triple() {
        assert_eq!(
            serde_json::to_string(&StratumError::Duplicate).unwrap(),
            r#"[22,"Duplicate share",null]"#
        );
    }
}
