// Standard library imports
use std::sync::Arc;

// Internal imports
use crate::balances::{Hex, TokenBalancesState};

/// Dữ liệu đầu vào cho các balance view.
///
/// Thay cho việc đọc trạng thái toàn cục: mỗi lần gọi view nhận một context
/// chỉ đọc. `token_balances_state` trả về `Arc` vì danh tính của nó chính là
/// khóa cache cho các view memo theo tham chiếu.
pub trait ViewContext {
    /// Trạng thái số dư hiện tại
    fn token_balances_state(&self) -> &Arc<TokenBalancesState>;

    /// Tài khoản đang chọn
    fn selected_account_address(&self) -> Option<&str>;

    /// Chain EVM đang chọn
    fn evm_chain_id(&self) -> &str;

    /// Có hiển thị số dư trên mạng test không
    fn show_fiat_in_testnets(&self) -> bool;
}

/// Snapshot trạng thái ví
#[derive(Debug, Clone, Default)]
pub struct WalletSnapshot {
    pub token_balances: Arc<TokenBalancesState>,
    pub selected_account: Option<Hex>,
    pub chain_id: Hex,
    pub show_fiat_in_testnets: bool,
}

impl WalletSnapshot {
    /// Tạo snapshot mới, chain mặc định là Ethereum mainnet
    pub fn new(token_balances: Arc<TokenBalancesState>) -> Self {
        Self {
            token_balances,
            selected_account: None,
            chain_id: "0x1".to_string(),
            show_fiat_in_testnets: false,
        }
    }

    pub fn with_selected_account(mut self, account: impl Into<Hex>) -> Self {
        self.selected_account = Some(account.into());
        self
    }

    pub fn with_chain_id(mut self, chain_id: impl Into<Hex>) -> Self {
        self.chain_id = chain_id.into();
        self
    }

    pub fn with_show_fiat_in_testnets(mut self, show: bool) -> Self {
        self.show_fiat_in_testnets = show;
        self
    }

    /// Thay trạng thái số dư, giữ nguyên lựa chọn hiện tại
    pub fn with_token_balances(mut self, token_balances: Arc<TokenBalancesState>) -> Self {
        self.token_balances = token_balances;
        self
    }
}

impl ViewContext for WalletSnapshot {
    fn token_balances_state(&self) -> &Arc<TokenBalancesState> {
        &self.token_balances
    }

    fn selected_account_address(&self) -> Option<&str> {
        self.selected_account.as_deref()
    }

    fn evm_chain_id(&self) -> &str {
        &self.chain_id
    }

    fn show_fiat_in_testnets(&self) -> bool {
        self.show_fiat_in_testnets
    }
}
