//! Read-only binding for the deployed token.

use alloy::sol;

sol! {
    /// The accessor read back after deployment.
    #[sol(rpc)]
    interface TokenMetadata {
        function name() external view returns (string memory);
    }
}
