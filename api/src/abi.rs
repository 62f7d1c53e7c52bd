//! Bindings for the deployed GitStake contracts.
//!
//! Method names and argument order follow the deployed ABI exactly.

use alloy::sol;

sol! {
    /// Epoch record as stored by the epoch manager.
    struct EpochInfo {
        uint256 id;
        uint256 startTime;
        uint256 endTime;
        uint256 totalStaked;
        bool finalized;
    }

    /// Epoch lifecycle and prize pool.
    #[sol(rpc)]
    interface IEpochManager {
        function deposit() external payable;
        function currentEpochId() external view returns (uint256 epochId);
        function getEpoch(uint256 epochId) external view returns (EpochInfo memory epoch);
        function getEpochPrize(uint256 epochId) external view returns (uint256 prize);
        function poke() external;
    }

    /// Per-user stake accounting.
    #[sol(rpc)]
    interface IStakingPool {
        function getUserStake(address user, uint256 epochId) external view returns (uint256 amount);
    }

    /// Winner submission and prize claims.
    #[sol(rpc)]
    interface IRewardDistributor {
        function winnersSet(uint256 epochId) external view returns (bool isSet);
        function getAllocation(address user, uint256 epochId) external view returns (uint256 amount);
        function submitWinners(uint256 epochId, address[] winners, bytes signature) external;
        function claim(uint256 epochId) external;
    }

    /// Yield source backed by Aave.
    #[sol(rpc)]
    interface IAaveIntegration {
        function getAaveBalance() external view returns (uint256 balance);
    }

    /// Yield source used on test networks without an Aave market.
    #[sol(rpc)]
    interface IMockAaveIntegration {
        function getAaveBalance() external view returns (uint256 balance);
    }
}
