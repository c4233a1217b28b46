//! Full deployments against a local Anvil node.
//!
//! Run with `cargo test -- --ignored` when `anvil` is on `PATH`.

mod common;

use alloy::node_bindings::Anvil;

use common::{fixture_artifacts, run_deployer, stderr, stdout, write_config, ANVIL_KEY};

fn assert_summary(stdout: &str) {
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3, "unexpected output: {stdout}");
    assert_eq!(
        lines[0].to_lowercase(),
        "deploying contracts with the account: 0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
    );
    let address = lines[1]
        .strip_prefix("PlatformToken deployed to: 0x")
        .expect("missing deployed address");
    assert_eq!(address.len(), 40);
    assert_eq!(lines[2], "Token name: PlatformToken");
}

#[tokio::test]
#[ignore = "requires anvil"]
async fn test_deploy_with_node_account() {
    let anvil = Anvil::new().try_spawn().expect("failed to spawn anvil");
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &anvil.endpoint(), &fixture_artifacts());

    let output = run_deployer(dir.path(), None, &[]).await;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_summary(&stdout(&output));
}

#[tokio::test]
#[ignore = "requires anvil"]
async fn test_deploy_with_local_key() {
    let anvil = Anvil::new().try_spawn().expect("failed to spawn anvil");
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &anvil.endpoint(), &fixture_artifacts());

    let output = run_deployer(dir.path(), Some(ANVIL_KEY), &[]).await;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_summary(&stdout(&output));
}

#[tokio::test]
#[ignore = "requires anvil"]
async fn test_chain_id_mismatch() {
    let anvil = Anvil::new().try_spawn().expect("failed to spawn anvil");
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deploy.toml");
    std::fs::write(
        &path,
        format!(
            "[contract]\nartifacts_dir = \"{}\"\n\n[networks.localhost]\nrpc_url = \"{}\"\nchain_id = 1\n",
            fixture_artifacts().display(),
            anvil.endpoint()
        ),
    )
    .unwrap();

    let output = run_deployer(dir.path(), Some(ANVIL_KEY), &[]).await;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Chain ID mismatch: expected 1, got 31337"));
}
