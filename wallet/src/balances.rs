// Standard library imports
use std::collections::BTreeMap;

// Third party imports
use serde::{Deserialize, Serialize};

// Internal imports
use tokenview_common::CommonResult;

/// Chuỗi hex (địa chỉ, chain id, số dư), phân biệt hoa thường
pub type Hex = String;

/// token -> số dư hex
pub type TokenBalanceMap = BTreeMap<Hex, Hex>;

/// chain id -> token -> số dư hex
pub type ChainBalances = BTreeMap<Hex, TokenBalanceMap>;

/// tài khoản -> chain id -> token -> số dư hex
pub type BalanceTable = BTreeMap<Hex, ChainBalances>;

/// Khóa của entry số dư mặc định
pub const GENERAL_DEFAULT_BALANCE_KEY: &str = "generalDefault";

/// Giá trị của entry số dư mặc định
pub const GENERAL_DEFAULT_BALANCE_HEX: &str = "0x52b7d2dcc80cd2e4000000";

/// Số dư bằng 0
pub const ZERO_BALANCE_HEX: &str = "0x0";

/// Trạng thái số dư token của ví
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBalancesState {
    /// Bảng số dư thô
    #[serde(default)]
    pub token_balances: BalanceTable,
}

impl TokenBalancesState {
    pub fn new(token_balances: BalanceTable) -> Self {
        Self { token_balances }
    }

    /// Đọc trạng thái từ JSON
    pub fn from_json(json: &str) -> CommonResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Số dư thô tại [account][chain][token]
    pub fn balance(&self, account: &str, chain_id: &str, token: &str) -> Option<&Hex> {
        self.token_balances.get(account)?.get(chain_id)?.get(token)
    }

    /// Các chain của một tài khoản
    pub fn chains(&self, account: &str) -> Option<&ChainBalances> {
        self.token_balances.get(account)
    }

    /// Token của một tài khoản trên một chain
    pub fn tokens(&self, account: &str, chain_id: &str) -> Option<&TokenBalanceMap> {
        self.token_balances.get(account)?.get(chain_id)
    }

    /// Ghi số dư, tạo các tầng còn thiếu
    pub fn set_balance(&mut self, account: &str, chain_id: &str, token: &str, balance: &str) {
        self.token_balances
            .entry(account.to_string())
            .or_default()
            .entry(chain_id.to_string())
            .or_default()
            .insert(token.to_string(), balance.to_string());
    }
}

/// Bản sao token map có thêm entry mặc định. Entry mặc định luôn ghi đè.
pub fn with_default_balance(tokens: &TokenBalanceMap) -> TokenBalanceMap {
    let mut merged = tokens.clone();
    merged.insert(
        GENERAL_DEFAULT_BALANCE_KEY.to_string(),
        GENERAL_DEFAULT_BALANCE_HEX.to_string(),
    );
    merged
}

/// Thêm entry mặc định vào mọi token map của một tài khoản
pub fn merge_chain_defaults(chains: &ChainBalances) -> ChainBalances {
    chains
        .iter()
        .map(|(chain_id, tokens)| (chain_id.clone(), with_default_balance(tokens)))
        .collect()
}

/// Thêm entry mặc định vào mọi token map trong bảng
pub fn merge_table_defaults(table: &BalanceTable) -> BalanceTable {
    table
        .iter()
        .map(|(account, chains)| (account.clone(), merge_chain_defaults(chains)))
        .collect()
}

/// Số dư khác rỗng và khác "0x0"
pub fn is_nonzero_balance(balance: &str) -> bool {
    !balance.is_empty() && balance != ZERO_BALANCE_HEX
}
