//! Constants for the wallet core
//!
//! Target network, deployed contract and wallet provider error codes.

// Monad Testnet
pub const MONAD_TESTNET_CHAIN_ID: u64 = 10143; // 0x279f
pub const MONAD_TESTNET_NAME: &str = "Monad Testnet";
pub const MONAD_CURRENCY_NAME: &str = "Monad";
pub const MONAD_CURRENCY_SYMBOL: &str = "MON";
pub const MONAD_CURRENCY_DECIMALS: u8 = 18;
pub const MONAD_TESTNET_RPC_URL: &str = "https://testnet-rpc.monad.xyz";
pub const MONAD_TESTNET_EXPLORER_URL: &str = "https://testnet.monadexplorer.com";

// Deployed BlessedMonNFT contract
pub const NFT_CONTRACT_ADDRESS: &str = "0xB573A730D5C839f4F25f6EA68FcdB3f1C5b7884c";
pub const NFT_CONTRACT_SIGNATURES: &[&str] = &[
    "function mintNFT(string memory tokenURI) public payable returns (uint256)",
    "function getTotalSupply() public view returns (uint256)",
    "function getMintingFee() public view returns (uint256)",
    "function tokenURI(uint256 tokenId) public view returns (string memory)",
];

// Contract method names
pub const MINT_METHOD: &str = "mintNFT";
pub const TOTAL_SUPPLY_METHOD: &str = "getTotalSupply";
pub const MINTING_FEE_METHOD: &str = "getMintingFee";
pub const TOKEN_URI_METHOD: &str = "tokenURI";

// EIP-1193 / JSON-RPC error codes
pub const USER_REJECTED_REQUEST: i64 = 4001;
pub const UNRECOGNIZED_CHAIN: i64 = 4902;
pub const INTERNAL_JSON_RPC_ERROR: i64 = -32603;

// Gas estimate shown after connecting
pub const MINT_GAS_LIMIT: u64 = 300_000;
pub const NOMINAL_MINTING_FEE_ETHER: f64 = 0.0015;

// Token locators above this size are flagged in the log
pub const LARGE_TOKEN_URI_BYTES: usize = 100 * 1024;

// Wallet JSON-RPC endpoint used by the command line minter
pub const DEFAULT_WALLET_URL: &str = "http://127.0.0.1:1248";
pub const CHANGE_WATCH_INTERVAL_MS: u64 = 2000;
