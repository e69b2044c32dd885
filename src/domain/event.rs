//! Exchange event ABI.
//!
//! Only the fill event is declared; every other log a receipt carries is
//! ignored by the decoder.

use alloy_sol_types::sol;

sol! {
    /// Emitted by the CTF exchange for every matched order fill.
    #[derive(Debug, PartialEq, Eq)]
    event OrderFilled(
        bytes32 indexed orderHash,
        address indexed maker,
        address indexed taker,
        uint256 makerAssetId,
        uint256 takerAssetId,
        uint256 makerAmountFilled,
        uint256 takerAmountFilled,
        uint256 fee
    );
}
