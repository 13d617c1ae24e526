use super::*;

#[derive(Debug, Parser)]
pub(crate) struct HashCmd {
    #[arg(help = "Hash hex encoded <INPUT>.")]
    input: String,
    #[arg(long, help = "Hash <INPUT> as UTF-8 text instead of hex.")]
    text: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct Output {
    pub(crate) algorithm: Algorithm,
    pub(crate) multiplier: u32,
    pub(crate) digest: String,
}

impl HashCmd {
    pub(crate) fn run(self, settings: Settings) -> Result {
        let input = if self.text {
            self.input.into_bytes()
        } else {
            hex::decode(&self.input).with_context(|| format!("invalid hex input `{}`", self.input))?
        };

        let algorithm = settings.algorithm();
        let hasher = algorithm.hasher()?;

        let output = Output {
            algorithm,
            multiplier: hasher.multiplier(),
            digest: hex::encode(hasher.hash(&input)?),
        };

        println!("{}", serde_json::to_string_pretty(&output)?);

        Ok(())
    }
}
