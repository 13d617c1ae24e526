use super::*;

#[test]
fn defaults() {
    let output = CommandBuilder::new("settings").run_and_deserialize_output::<Value>();

    pretty_assert_eq!(output["chain"], "mainnet");
    pretty_assert_eq!(output["algorithm"], "sha256d");
    pretty_assert_eq!(output["coinbase_tag"], "/foundry/");
    pretty_assert_eq!(output["tx_version"], 2);
    pretty_assert_eq!(output["stale_grace"], 30);
    pretty_assert_eq!(output["update_interval"], 10);
    pretty_assert_eq!(output["pool_wallet"], Value::Null);
}

#[test]
fn config_file() {
    let output = CommandBuilder::new("--config foundry.toml settings")
        .write(
            "foundry.toml",
            &format!("chain = \"testnet\"\npool_wallet = \"{POOL_WALLET}\"\ncoinbase_tag = \"/toml/\"\n"),
        )
        .run_and_deserialize_output::<Value>();

    pretty_assert_eq!(output["chain"], "testnet");
    pretty_assert_eq!(output["pool_wallet"], POOL_WALLET);
    pretty_assert_eq!(output["coinbase_tag"], "/toml/");
}

#[test]
fn options_override_config_file() {
    let output = CommandBuilder::new("--config foundry.toml --coinbase-tag /cli/ settings")
        .write("foundry.toml", "coinbase_tag = \"/toml/\"\n")
        .run_and_deserialize_output::<Value>();

    pretty_assert_eq!(output["coinbase_tag"], "/cli/");
}

#[test]
fn coinbase_tag_with_spaces() {
    let output = CommandBuilder::new("--coinbase-tag settings")
        .global_arg("/my pool/")
        .run_and_deserialize_output::<Value>();

    pretty_assert_eq!(output["coinbase_tag"], "/my pool/");
}

#[test]
fn unknown_config_keys_are_rejected() {
    CommandBuilder::new("--config foundry.toml settings")
        .write("foundry.toml", "bogus = 1\n")
        .expected_exit_code(1)
        .run_and_extract_stdout();
}

#[test]
fn instance_id_out_of_range() {
    CommandBuilder::new("--instance-id 32 settings")
        .expected_exit_code(1)
        .expected_stderr("instance id 32 exceeds maximum 31")
        .run_and_extract_stdout();
}
