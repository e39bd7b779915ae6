// Module exports
pub mod balances;
pub mod config;
pub mod context;
pub mod selectors;

// Re-export các component chính
pub use balances::{
    BalanceTable,
    ChainBalances,
    Hex,
    TokenBalanceMap,
    TokenBalancesState,
    GENERAL_DEFAULT_BALANCE_HEX,
    GENERAL_DEFAULT_BALANCE_KEY,
    ZERO_BALANCE_HEX,
};

pub use context::{
    ViewContext,
    WalletSnapshot,
};

pub use selectors::{
    BalanceView,
    BalanceViews,
    BALANCE_VIEWS,
    select_address_has_token_balances,
    select_all_token_balances,
    select_contract_balances,
    select_contract_balances_per_chain_id,
    select_has_any_balance,
    select_single_token_balance,
    select_tokens_balances,
};

// Re-export từ common
pub use tokenview_common::{
    MemoDiscipline,
    NetworkClassifier,
};
