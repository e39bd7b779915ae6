// Standard library imports
use std::{
    collections::BTreeSet,
    fmt::{self, Display, Formatter},
};

// Third party imports
use serde::{Deserialize, Serialize};

/// Goerli
pub const GOERLI_CHAIN_ID: &str = "0x5";
/// Sepolia
pub const SEPOLIA_CHAIN_ID: &str = "0xaa36a7";
/// Linea Goerli
pub const LINEA_GOERLI_CHAIN_ID: &str = "0xe704";
/// Linea Sepolia
pub const LINEA_SEPOLIA_CHAIN_ID: &str = "0xe705";
/// Holesky
pub const HOLESKY_CHAIN_ID: &str = "0x4268";

/// Các chain test mặc định
pub const DEFAULT_TEST_NETWORKS: [&str; 5] = [
    GOERLI_CHAIN_ID,
    SEPOLIA_CHAIN_ID,
    LINEA_GOERLI_CHAIN_ID,
    LINEA_SEPOLIA_CHAIN_ID,
    HOLESKY_CHAIN_ID,
];

/// Loại chain
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChainType {
    /// Mainnet
    Mainnet,
    /// Testnet
    Testnet,
}

impl Display for ChainType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ChainType::Mainnet => write!(f, "Mainnet"),
            ChainType::Testnet => write!(f, "Testnet"),
        }
    }
}

/// Phân loại chain id (hex) là mạng test hay không
pub trait NetworkClassifier: Send + Sync {
    /// Chain có phải mạng test không
    fn is_test_net(&self, chain_id: &str) -> bool;

    /// Loại chain
    fn chain_type(&self, chain_id: &str) -> ChainType {
        if self.is_test_net(chain_id) {
            ChainType::Testnet
        } else {
            ChainType::Mainnet
        }
    }
}

/// Danh sách chain test đã biết, so khớp chính xác theo chuỗi hex
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownNetworks {
    test_networks: BTreeSet<String>,
}

impl KnownNetworks {
    /// Tạo danh sách từ các chain id chỉ định
    pub fn new<I, S>(test_networks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            test_networks: test_networks.into_iter().map(Into::into).collect(),
        }
    }

    /// Các chain test đang được nhận diện
    pub fn test_networks(&self) -> impl Iterator<Item = &str> {
        self.test_networks.iter().map(String::as_str)
    }
}

impl Default for KnownNetworks {
    fn default() -> Self {
        Self::new(DEFAULT_TEST_NETWORKS)
    }
}

impl NetworkClassifier for KnownNetworks {
    fn is_test_net(&self, chain_id: &str) -> bool {
        self.test_networks.contains(chain_id)
    }
}
