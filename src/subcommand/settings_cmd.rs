use super::*;

#[derive(Debug, Parser)]
pub(crate) struct SettingsCmd;

impl SettingsCmd {
    pub(crate) fn run(self, settings: Settings) -> Result {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        Ok(())
    }
}
