use std::path::Path;

use alloy::{
    network::EthereumWallet,
    providers::{Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
};
use anyhow::{Context, Result};
use gitstake_api::prelude::*;
use tracing::info;

/// Explorer links for the deployment at `path`, or the default explorer when
/// there is no deployment file.
pub(crate) fn explorer_for(path: &Path) -> Result<Explorer> {
    if !path.exists() {
        return Ok(Explorer::default());
    }
    let deployment = load_deployment(path)?;
    Ok(Explorer::new(deployment.explorer_url))
}

/// Loads the deployment file (contract addresses, yield source, explorer).
pub(crate) fn load_deployment(path: &Path) -> Result<Deployment> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read deployment file {}", path.display()))?;
    parse_deployment(&raw).with_context(|| format!("parse deployment file {}", path.display()))
}

fn parse_deployment(raw: &str) -> Result<Deployment> {
    Ok(toml::from_str(raw)?)
}

/// Connects to the chain with the given signer and binds the facade to it.
pub(crate) fn connect(
    rpc_url: Option<&str>,
    private_key: Option<&str>,
    deployment: &Deployment,
) -> Result<ProtocolFacade<AlloyContracts<impl Provider + Clone + 'static>>> {
    let rpc_url = rpc_url.context("missing --rpc-url (or GITSTAKE_RPC_URL)")?;
    let private_key = private_key.context("missing --private-key (or GITSTAKE_PRIVATE_KEY)")?;

    let signer: PrivateKeySigner = private_key.parse().context("parse private key")?;
    let signer_address = signer.address();

    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .on_http(rpc_url.parse().context("parse rpc url")?);
    info!(signer = %signer_address, %rpc_url, "connected");

    let contracts = AlloyContracts::new(
        provider,
        signer_address,
        deployment.contracts,
        deployment.yield_source,
    );
    Ok(ProtocolFacade::new(contracts))
}

#[cfg(test)]
mod tests {
    use alloy::primitives::Address;

    use super::*;

    const DEPLOYMENT: &str = r#"
        [contracts]
        epoch_manager = "0x1111111111111111111111111111111111111111"
        staking_pool = "0x2222222222222222222222222222222222222222"
        reward_distributor = "0x3333333333333333333333333333333333333333"
        aave_integration = "0x4444444444444444444444444444444444444444"
        mock_aave_integration = "0x5555555555555555555555555555555555555555"
    "#;

    #[test]
    fn test_parse_deployment_defaults() {
        let deployment = parse_deployment(DEPLOYMENT).unwrap();
        assert_eq!(deployment.yield_source, YieldSource::Aave);
        assert_eq!(deployment.explorer_url, DEFAULT_EXPLORER_URL);
        assert_eq!(
            deployment.contracts.epoch_manager,
            Address::repeat_byte(0x11)
        );
        assert_eq!(
            deployment.contracts.yield_contract(deployment.yield_source),
            Address::repeat_byte(0x44)
        );
    }

    #[test]
    fn test_parse_deployment_mock_yield() {
        let raw = format!(
            "yield_source = \"mock-aave\"\nexplorer_url = \"https://etherscan.io\"\n{DEPLOYMENT}"
        );
        let deployment = parse_deployment(&raw).unwrap();
        assert_eq!(deployment.yield_source, YieldSource::MockAave);
        assert_eq!(deployment.explorer_url, "https://etherscan.io");
        assert_eq!(
            deployment.contracts.yield_contract(deployment.yield_source),
            Address::repeat_byte(0x55)
        );
    }

    #[test]
    fn test_parse_deployment_missing_contract() {
        assert!(parse_deployment("[contracts]\nepoch_manager = \"0x11\"").is_err());
    }

    #[test]
    fn test_explorer_falls_back_without_deployment_file() {
        let path = std::env::temp_dir().join("gitstake-no-such-deployment.toml");
        assert_eq!(explorer_for(&path).unwrap(), Explorer::default());
    }

    #[test]
    fn test_explorer_uses_deployment_file() {
        let path = std::env::temp_dir().join(format!(
            "gitstake-explorer-{}.toml",
            std::process::id()
        ));
        std::fs::write(
            &path,
            format!("explorer_url = \"https://etherscan.io/\"\n{DEPLOYMENT}"),
        )
        .unwrap();
        let explorer = explorer_for(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(explorer, Explorer::new("https://etherscan.io"));
    }

    #[test]
    fn test_connect_signer_matches_key() {
        let deployment = parse_deployment(DEPLOYMENT).unwrap();
        let key = PrivateKeySigner::random();
        let facade = connect(
            Some("http://localhost:8545"),
            Some(&alloy::hex::encode(key.to_bytes())),
            &deployment,
        )
        .unwrap();
        assert_eq!(facade.contracts().signer_address(), key.address());
    }

    #[test]
    fn test_connect_requires_rpc_and_key() {
        let deployment = parse_deployment(DEPLOYMENT).unwrap();
        assert!(connect(None, Some("00"), &deployment).is_err());
        assert!(connect(Some("http://localhost:8545"), None, &deployment).is_err());
    }
}
