//! Các balance view dẫn xuất, mỗi view có cache riêng.
//!
//! | View | Input được memo | Cách so sánh |
//! |---|---|---|
//! | `tokens_balances` | state | Reference |
//! | `has_any_balance` | output của `tokens_balances` | Reference |
//! | `single_token_balance` | (state, account, chain, token) | Reference, nhiều entry |
//! | `contract_balances` | (state, account, chain) | Reference |
//! | `contract_balances_per_chain` | (state, account) | Reference |
//! | `all_token_balances` | state | DeepEqual |
//! | `address_has_token_balances` | (output của `all_token_balances`, account, show_fiat) | DeepEqual |

// Standard library imports
use std::{
    fmt,
    num::NonZeroUsize,
    sync::Arc,
};

// Third party imports
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

// Internal imports
use tokenview_common::{
    CommonError,
    CommonResult,
    KnownNetworks,
    MemoCell,
    MemoDiscipline,
    MemoMap,
    NetworkClassifier,
    DEFAULT_MEMO_MAP_CAPACITY,
};

use crate::balances::{
    is_nonzero_balance,
    merge_chain_defaults,
    merge_table_defaults,
    with_default_balance,
    BalanceTable,
    ChainBalances,
    Hex,
    TokenBalanceMap,
    TokenBalancesState,
    GENERAL_DEFAULT_BALANCE_KEY,
};
use crate::config::Config;
use crate::context::ViewContext;

type StateRef = Arc<TokenBalancesState>;

/// Tên các view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BalanceView {
    TokensBalances,
    HasAnyBalance,
    SingleTokenBalance,
    ContractBalances,
    ContractBalancesPerChainId,
    AllTokenBalances,
    AddressHasTokenBalances,
}

/// Bộ view số dư, mỗi view một cache
pub struct BalanceViews {
    classifier: Box<dyn NetworkClassifier>,
    tokens_balances: MemoCell<StateRef, Arc<BalanceTable>>,
    has_any_balance: MemoCell<Arc<BalanceTable>, bool>,
    single_token_args: MemoMap<(StateRef, Hex, Hex, Hex), Arc<TokenBalanceMap>>,
    single_token_result: MemoMap<(Option<Hex>, Hex), Arc<TokenBalanceMap>>,
    contract_balances: MemoCell<(StateRef, Option<Hex>, Hex), Arc<TokenBalanceMap>>,
    contract_balances_per_chain: MemoCell<(StateRef, Option<Hex>), Arc<ChainBalances>>,
    all_token_balances: MemoCell<StateRef, Arc<BalanceTable>>,
    address_has_token_balances: MemoCell<(Arc<BalanceTable>, Option<Hex>, bool), bool>,
}

impl BalanceViews {
    /// Tạo bộ view với danh sách mạng test mặc định
    pub fn new() -> Self {
        Self::build(Box::new(KnownNetworks::default()), DEFAULT_MEMO_MAP_CAPACITY)
    }

    /// Tạo bộ view với classifier và dung lượng cache single-token chỉ định
    pub fn with_classifier<C>(classifier: C, single_token_capacity: usize) -> CommonResult<Self>
    where
        C: NetworkClassifier + 'static,
    {
        let capacity = NonZeroUsize::new(single_token_capacity)
            .ok_or(CommonError::InvalidCapacity(single_token_capacity))?;
        Ok(Self::build(Box::new(classifier), capacity))
    }

    /// Tạo bộ view từ config
    pub fn with_config(config: &Config) -> CommonResult<Self> {
        Self::with_classifier(config.network_classifier(), config.single_token_cache_capacity)
    }

    fn build(classifier: Box<dyn NetworkClassifier>, single_token_capacity: NonZeroUsize) -> Self {
        Self {
            classifier,
            tokens_balances: MemoCell::new("tokens_balances", MemoDiscipline::Reference),
            has_any_balance: MemoCell::new("has_any_balance", MemoDiscipline::Reference),
            single_token_args: MemoMap::with_capacity("single_token_balance", single_token_capacity),
            single_token_result: MemoMap::with_capacity(
                "single_token_balance_result",
                single_token_capacity,
            ),
            contract_balances: MemoCell::new("contract_balances", MemoDiscipline::Reference),
            contract_balances_per_chain: MemoCell::new(
                "contract_balances_per_chain",
                MemoDiscipline::Reference,
            ),
            all_token_balances: MemoCell::new("all_token_balances", MemoDiscipline::DeepEqual),
            address_has_token_balances: MemoCell::new(
                "address_has_token_balances",
                MemoDiscipline::DeepEqual,
            ),
        }
    }

    /// Toàn bộ bảng số dư, mỗi token map có thêm entry mặc định
    pub fn tokens_balances<C: ViewContext + ?Sized>(&self, ctx: &C) -> Arc<BalanceTable> {
        self.tokens_balances
            .get_or_compute(ctx.token_balances_state().clone(), |state| {
                Arc::new(merge_table_defaults(&state.token_balances))
            })
    }

    /// Có token map nào không rỗng không.
    ///
    /// Entry mặc định luôn được thêm trước khi kiểm tra, nên kết quả là true
    /// ngay khi có một cặp (account, chain).
    pub fn has_any_balance<C: ViewContext + ?Sized>(&self, ctx: &C) -> bool {
        let balances = self.tokens_balances(ctx);
        self.has_any_balance.get_or_compute(balances, |balances| {
            balances
                .values()
                .flat_map(|chains| chains.values())
                .any(|tokens| !tokens.is_empty())
        })
    }

    /// `{token: balance}` từ bảng thô, hoặc `{}` nếu không có số dư.
    /// Không thêm entry mặc định.
    pub fn single_token_balance<C: ViewContext + ?Sized>(
        &self,
        ctx: &C,
        account: &str,
        chain_id: &str,
        token: &str,
    ) -> Arc<TokenBalanceMap> {
        let args = (
            ctx.token_balances_state().clone(),
            account.to_string(),
            chain_id.to_string(),
            token.to_string(),
        );

        self.single_token_args.get_or_compute(args, |(state, account, chain_id, token)| {
            let balance = state.balance(account, chain_id, token).cloned();
            self.single_token_result
                .get_or_compute((balance, token.clone()), |(balance, token)| {
                    let mut view = TokenBalanceMap::new();
                    if let Some(balance) = balance.as_ref().filter(|b| !b.is_empty()) {
                        view.insert(token.clone(), balance.clone());
                    }
                    Arc::new(view)
                })
        })
    }

    /// Token map của tài khoản và chain đang chọn, có thêm entry mặc định
    pub fn contract_balances<C: ViewContext + ?Sized>(&self, ctx: &C) -> Arc<TokenBalanceMap> {
        let key = (
            ctx.token_balances_state().clone(),
            ctx.selected_account_address().map(str::to_string),
            ctx.evm_chain_id().to_string(),
        );

        self.contract_balances.get_or_compute(key, |(state, account, chain_id)| {
            let empty = TokenBalanceMap::new();
            let tokens = account
                .as_deref()
                .and_then(|account| state.tokens(account, chain_id))
                .unwrap_or(&empty);
            Arc::new(with_default_balance(tokens))
        })
    }

    /// chain id -> token map của tài khoản đang chọn, có thêm entry mặc định
    pub fn contract_balances_per_chain<C: ViewContext + ?Sized>(
        &self,
        ctx: &C,
    ) -> Arc<ChainBalances> {
        let key = (
            ctx.token_balances_state().clone(),
            ctx.selected_account_address().map(str::to_string),
        );

        self.contract_balances_per_chain.get_or_compute(key, |(state, account)| {
            let merged = account
                .as_deref()
                .and_then(|account| state.chains(account))
                .map(merge_chain_defaults)
                .unwrap_or_default();
            Arc::new(merged)
        })
    }

    /// Giống `tokens_balances` nhưng chỉ tính lại khi nội dung state thay đổi
    pub fn all_token_balances<C: ViewContext + ?Sized>(&self, ctx: &C) -> Arc<BalanceTable> {
        self.all_token_balances
            .get_or_compute(ctx.token_balances_state().clone(), |state| {
                Arc::new(merge_table_defaults(&state.token_balances))
            })
    }

    /// Tài khoản đang chọn có số dư khác 0 trên chain nào không.
    ///
    /// Bỏ qua mạng test trừ khi bật `show_fiat_in_testnets`. Entry mặc định
    /// không được tính là số dư.
    pub fn address_has_token_balances<C: ViewContext + ?Sized>(&self, ctx: &C) -> bool {
        let key = (
            self.all_token_balances(ctx),
            ctx.selected_account_address().map(str::to_string),
            ctx.show_fiat_in_testnets(),
        );

        self.address_has_token_balances.get_or_compute(key, |(balances, address, show_testnets)| {
            let chains = match address.as_deref().filter(|a| !a.is_empty()) {
                Some(address) => match balances.get(address) {
                    Some(chains) => chains,
                    None => return false,
                },
                None => return false,
            };

            chains
                .iter()
                .filter(|(chain_id, _)| *show_testnets || !self.classifier.is_test_net(chain_id.as_str()))
                .any(|(_, tokens)| {
                    tokens.iter().any(|(token, balance)| {
                        token != GENERAL_DEFAULT_BALANCE_KEY && is_nonzero_balance(balance)
                    })
                })
        })
    }

    /// Số lần một view đã tính lại
    pub fn recomputations(&self, view: BalanceView) -> usize {
        match view {
            BalanceView::TokensBalances => self.tokens_balances.recomputations(),
            BalanceView::HasAnyBalance => self.has_any_balance.recomputations(),
            BalanceView::SingleTokenBalance => self.single_token_args.recomputations(),
            BalanceView::ContractBalances => self.contract_balances.recomputations(),
            BalanceView::ContractBalancesPerChainId => {
                self.contract_balances_per_chain.recomputations()
            }
            BalanceView::AllTokenBalances => self.all_token_balances.recomputations(),
            BalanceView::AddressHasTokenBalances => {
                self.address_has_token_balances.recomputations()
            }
        }
    }

    /// Cách so sánh input của một view
    pub fn discipline(&self, view: BalanceView) -> MemoDiscipline {
        match view {
            BalanceView::TokensBalances => self.tokens_balances.discipline(),
            BalanceView::HasAnyBalance => self.has_any_balance.discipline(),
            BalanceView::SingleTokenBalance => MemoDiscipline::Reference,
            BalanceView::ContractBalances => self.contract_balances.discipline(),
            BalanceView::ContractBalancesPerChainId => self.contract_balances_per_chain.discipline(),
            BalanceView::AllTokenBalances => self.all_token_balances.discipline(),
            BalanceView::AddressHasTokenBalances => self.address_has_token_balances.discipline(),
        }
    }
}

impl Default for BalanceViews {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BalanceViews {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BalanceViews")
            .field("tokens_balances", &self.tokens_balances)
            .field("has_any_balance", &self.has_any_balance)
            .field("single_token_args", &self.single_token_args)
            .field("single_token_result", &self.single_token_result)
            .field("contract_balances", &self.contract_balances)
            .field("contract_balances_per_chain", &self.contract_balances_per_chain)
            .field("all_token_balances", &self.all_token_balances)
            .field("address_has_token_balances", &self.address_has_token_balances)
            .finish()
    }
}

/// Bộ view dùng chung cho cả process, khởi tạo ở lần dùng đầu tiên
pub static BALANCE_VIEWS: Lazy<BalanceViews> = Lazy::new(BalanceViews::new);

pub fn select_tokens_balances<C: ViewContext + ?Sized>(ctx: &C) -> Arc<BalanceTable> {
    BALANCE_VIEWS.tokens_balances(ctx)
}

pub fn select_has_any_balance<C: ViewContext + ?Sized>(ctx: &C) -> bool {
    BALANCE_VIEWS.has_any_balance(ctx)
}

pub fn select_single_token_balance<C: ViewContext + ?Sized>(
    ctx: &C,
    account: &str,
    chain_id: &str,
    token: &str,
) -> Arc<TokenBalanceMap> {
    BALANCE_VIEWS.single_token_balance(ctx, account, chain_id, token)
}

pub fn select_contract_balances<C: ViewContext + ?Sized>(ctx: &C) -> Arc<TokenBalanceMap> {
    BALANCE_VIEWS.contract_balances(ctx)
}

pub fn select_contract_balances_per_chain_id<C: ViewContext + ?Sized>(
    ctx: &C,
) -> Arc<ChainBalances> {
    BALANCE_VIEWS.contract_balances_per_chain(ctx)
}

pub fn select_all_token_balances<C: ViewContext + ?Sized>(ctx: &C) -> Arc<BalanceTable> {
    BALANCE_VIEWS.all_token_balances(ctx)
}

pub fn select_address_has_token_balances<C: ViewContext + ?Sized>(ctx: &C) -> bool {
    BALANCE_VIEWS.address_has_token_balances(ctx)
}

/// Module tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::balances::GENERAL_DEFAULT_BALANCE_HEX;
    use crate::context::WalletSnapshot;
    use proptest::prelude::*;

    const MAINNET: &str = "0x1";
    const SEPOLIA: &str = "0xaa36a7";

    fn token_map(entries: &[(&str, &str)]) -> TokenBalanceMap {
        entries
            .iter()
            .map(|(token, balance)| (token.to_string(), balance.to_string()))
            .collect()
    }

    fn state(entries: &[(&str, &str, &str, &str)]) -> Arc<TokenBalancesState> {
        let mut state = TokenBalancesState::default();
        for (account, chain_id, token, balance) in entries {
            state.set_balance(account, chain_id, token, balance);
        }
        Arc::new(state)
    }

    fn example_state() -> Arc<TokenBalancesState> {
        state(&[("0xA", MAINNET, "0xT1", "0x5")])
    }

    /// Test tokens_balances
    #[test]
    fn test_tokens_balances_injects_default() {
        let views = BalanceViews::new();
        let ctx = WalletSnapshot::new(example_state());

        let balances = views.tokens_balances(&ctx);
        assert_eq!(
            balances["0xA"][MAINNET],
            token_map(&[("0xT1", "0x5"), (GENERAL_DEFAULT_BALANCE_KEY, GENERAL_DEFAULT_BALANCE_HEX)])
        );
    }

    #[test]
    fn test_tokens_balances_empty_table() {
        let views = BalanceViews::new();
        let ctx = WalletSnapshot::new(Arc::default());
        assert!(views.tokens_balances(&ctx).is_empty());
    }

    #[test]
    fn test_tokens_balances_memoized_by_reference() {
        let views = BalanceViews::new();
        let ctx = WalletSnapshot::new(example_state());

        let first = views.tokens_balances(&ctx);
        let second = views.tokens_balances(&ctx);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(views.recomputations(BalanceView::TokensBalances), 1);

        // Cùng nội dung, khác tham chiếu: tính lại
        let copy = ctx.clone().with_token_balances(example_state());
        let third = views.tokens_balances(&copy);
        assert_eq!(first, third);
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(views.recomputations(BalanceView::TokensBalances), 2);
    }

    /// Hành vi cũ: entry mặc định làm kết quả luôn là true khi có cặp (account, chain)
    #[test]
    fn test_has_any_balance_true_for_any_chain_entry() {
        let views = BalanceViews::new();

        let mut only_empty_chain = TokenBalancesState::default();
        only_empty_chain
            .token_balances
            .entry("0xA".to_string())
            .or_default()
            .insert(MAINNET.to_string(), TokenBalanceMap::new());
        let ctx = WalletSnapshot::new(Arc::new(only_empty_chain));
        assert!(views.has_any_balance(&ctx));

        let mut no_chains = TokenBalancesState::default();
        no_chains.token_balances.insert("0xA".to_string(), ChainBalances::new());
        assert!(!views.has_any_balance(&WalletSnapshot::new(Arc::new(no_chains))));

        assert!(!views.has_any_balance(&WalletSnapshot::new(Arc::default())));
    }

    #[test]
    fn test_has_any_balance_depends_on_tokens_balances() {
        let views = BalanceViews::new();
        let ctx = WalletSnapshot::new(example_state());

        assert!(views.has_any_balance(&ctx));
        assert!(views.has_any_balance(&ctx.clone().with_chain_id("0x89")));
        assert_eq!(views.recomputations(BalanceView::HasAnyBalance), 1);
        assert_eq!(views.recomputations(BalanceView::TokensBalances), 1);
    }

    /// Test single_token_balance
    #[test]
    fn test_single_token_balance_lookup() {
        let views = BalanceViews::new();
        let ctx = WalletSnapshot::new(state(&[
            ("0xA", MAINNET, "0xT1", "0x5"),
            ("0xA", MAINNET, "0xT2", ""),
        ]));

        let found = views.single_token_balance(&ctx, "0xA", MAINNET, "0xT1");
        assert_eq!(*found, token_map(&[("0xT1", "0x5")]));
        assert!(!found.contains_key(GENERAL_DEFAULT_BALANCE_KEY));

        assert!(views.single_token_balance(&ctx, "0xA", MAINNET, "0xT9").is_empty());
        assert!(views.single_token_balance(&ctx, "0xB", MAINNET, "0xT1").is_empty());
        assert!(views.single_token_balance(&ctx, "0xA", "0x89", "0xT1").is_empty());
        assert!(views.single_token_balance(&ctx, "0xA", MAINNET, "0xT2").is_empty());
    }

    #[test]
    fn test_single_token_balance_memoized_by_identity() {
        let views = BalanceViews::new();
        let original = example_state();
        let ctx = WalletSnapshot::new(original.clone());

        let first = views.single_token_balance(&ctx, "0xA", MAINNET, "0xT1");
        let missing = views.single_token_balance(&ctx, "0xA", MAINNET, "0xT9");
        let again = views.single_token_balance(&ctx, "0xA", MAINNET, "0xT1");
        let missing_again = views.single_token_balance(&ctx, "0xA", MAINNET, "0xT9");
        assert!(Arc::ptr_eq(&first, &again));
        assert!(Arc::ptr_eq(&missing, &missing_again));
        assert_eq!(views.recomputations(BalanceView::SingleTokenBalance), 2);

        // Snapshot có cùng nội dung nhưng khác tham chiếu là cache miss
        let copy = WalletSnapshot::new(Arc::new((*original).clone()));
        let from_copy = views.single_token_balance(&copy, "0xA", MAINNET, "0xT1");
        assert_eq!(views.recomputations(BalanceView::SingleTokenBalance), 3);
        // Kết quả giống nhau nên trả lại cùng output
        assert!(Arc::ptr_eq(&first, &from_copy));
    }

    /// Test contract_balances
    #[test]
    fn test_contract_balances_example() {
        let views = BalanceViews::new();
        let ctx = WalletSnapshot::new(example_state())
            .with_selected_account("0xA")
            .with_chain_id(MAINNET);

        let balances = views.contract_balances(&ctx);
        assert_eq!(
            *balances,
            token_map(&[
                ("0xT1", "0x5"),
                ("generalDefault", "0x52b7d2dcc80cd2e4000000"),
            ])
        );
    }

    #[test]
    fn test_contract_balances_missing_selection() {
        let views = BalanceViews::new();
        let only_default = token_map(&[(GENERAL_DEFAULT_BALANCE_KEY, GENERAL_DEFAULT_BALANCE_HEX)]);

        let no_account = WalletSnapshot::new(example_state());
        assert_eq!(*views.contract_balances(&no_account), only_default);

        let unknown_chain = no_account.clone().with_selected_account("0xA").with_chain_id("0x89");
        assert_eq!(*views.contract_balances(&unknown_chain), only_default);

        let unknown_account = no_account.with_selected_account("0xB");
        assert_eq!(*views.contract_balances(&unknown_account), only_default);
    }

    #[test]
    fn test_contract_balances_recomputes_on_selection_change() {
        let views = BalanceViews::new();
        let ctx = WalletSnapshot::new(example_state()).with_selected_account("0xA");

        views.contract_balances(&ctx);
        views.contract_balances(&ctx);
        assert_eq!(views.recomputations(BalanceView::ContractBalances), 1);

        views.contract_balances(&ctx.clone().with_chain_id("0x89"));
        assert_eq!(views.recomputations(BalanceView::ContractBalances), 2);
    }

    /// Test contract_balances_per_chain
    #[test]
    fn test_contract_balances_per_chain() {
        let views = BalanceViews::new();
        let ctx = WalletSnapshot::new(state(&[
            ("0xA", MAINNET, "0xT1", "0x5"),
            ("0xA", "0x89", "0xT2", "0x7"),
            ("0xB", MAINNET, "0xT3", "0x1"),
        ]))
        .with_selected_account("0xA");

        let per_chain = views.contract_balances_per_chain(&ctx);
        assert_eq!(per_chain.len(), 2);
        for tokens in per_chain.values() {
            assert_eq!(tokens[GENERAL_DEFAULT_BALANCE_KEY], GENERAL_DEFAULT_BALANCE_HEX);
        }
        assert_eq!(per_chain["0x89"]["0xT2"], "0x7");
        assert!(!per_chain[MAINNET].contains_key("0xT3"));
    }

    #[test]
    fn test_contract_balances_per_chain_absent_account() {
        let views = BalanceViews::new();
        let ctx = WalletSnapshot::new(example_state()).with_selected_account("0xB");
        assert!(views.contract_balances_per_chain(&ctx).is_empty());

        let no_account = WalletSnapshot::new(example_state());
        assert!(views.contract_balances_per_chain(&no_account).is_empty());
    }

    /// Test all_token_balances
    #[test]
    fn test_all_token_balances_memoized_by_value() {
        let views = BalanceViews::new();

        let first = views.all_token_balances(&WalletSnapshot::new(example_state()));
        let second = views.all_token_balances(&WalletSnapshot::new(example_state()));
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(views.recomputations(BalanceView::AllTokenBalances), 1);

        let changed = state(&[("0xA", MAINNET, "0xT1", "0x6")]);
        let third = views.all_token_balances(&WalletSnapshot::new(changed));
        assert_eq!(third["0xA"][MAINNET]["0xT1"], "0x6");
        assert_eq!(views.recomputations(BalanceView::AllTokenBalances), 2);
    }

    /// Test address_has_token_balances
    #[test]
    fn test_address_has_token_balances_skips_test_networks() {
        let views = BalanceViews::new();
        let ctx = WalletSnapshot::new(state(&[
            ("0xA", MAINNET, "0xT1", "0x0"),
            ("0xA", SEPOLIA, "0xT2", "0x5"),
        ]))
        .with_selected_account("0xA");

        assert!(!views.address_has_token_balances(&ctx));
        assert!(views.address_has_token_balances(&ctx.with_show_fiat_in_testnets(true)));
    }

    #[test]
    fn test_address_has_token_balances_mainnet_balance() {
        let views = BalanceViews::new();
        let ctx = WalletSnapshot::new(state(&[("0xA", MAINNET, "0xT1", "0x5")]));

        assert!(!views.address_has_token_balances(&ctx));
        assert!(views.address_has_token_balances(&ctx.clone().with_selected_account("0xA")));
        assert!(!views.address_has_token_balances(&ctx.clone().with_selected_account("0xB")));
        assert!(!views.address_has_token_balances(&ctx.with_selected_account("")));
    }

    #[test]
    fn test_address_has_token_balances_recomputes_only_on_dependencies() {
        let views = BalanceViews::new();
        let ctx = WalletSnapshot::new(example_state()).with_selected_account("0xA");

        assert!(views.address_has_token_balances(&ctx));
        // Đổi chain không nằm trong dependency
        assert!(views.address_has_token_balances(&ctx.clone().with_chain_id("0x89")));
        // State mới nhưng cùng nội dung
        assert!(views.address_has_token_balances(
            &ctx.clone().with_token_balances(example_state())
        ));
        assert_eq!(views.recomputations(BalanceView::AddressHasTokenBalances), 1);

        assert!(!views.address_has_token_balances(&ctx.with_selected_account("0xB")));
        assert_eq!(views.recomputations(BalanceView::AddressHasTokenBalances), 2);
    }

    #[test]
    fn test_custom_classifier() {
        let views = BalanceViews::with_classifier(KnownNetworks::new([MAINNET]), 8).unwrap();
        let ctx = WalletSnapshot::new(example_state()).with_selected_account("0xA");
        assert!(!views.address_has_token_balances(&ctx));
    }

    #[test]
    fn test_with_config() {
        let mut config = Config::default();
        config.single_token_cache_capacity = 0;
        assert!(matches!(
            BalanceViews::with_config(&config),
            Err(CommonError::InvalidCapacity(0))
        ));

        config.single_token_cache_capacity = 4;
        config.test_network_chain_ids = vec![MAINNET.to_string()];
        let views = BalanceViews::with_config(&config).unwrap();
        let ctx = WalletSnapshot::new(example_state()).with_selected_account("0xA");
        assert!(!views.address_has_token_balances(&ctx));
    }

    #[test]
    fn test_disciplines() {
        let views = BalanceViews::new();
        assert_eq!(views.discipline(BalanceView::TokensBalances), MemoDiscipline::Reference);
        assert_eq!(views.discipline(BalanceView::SingleTokenBalance), MemoDiscipline::Reference);
        assert_eq!(views.discipline(BalanceView::AllTokenBalances), MemoDiscipline::DeepEqual);
        assert_eq!(
            views.discipline(BalanceView::AddressHasTokenBalances),
            MemoDiscipline::DeepEqual
        );
    }

    #[test]
    fn test_process_wide_views() {
        let ctx = WalletSnapshot::new(state(&[("0xG", MAINNET, "0xT1", "0x9")]))
            .with_selected_account("0xG");

        let first = select_tokens_balances(&ctx);
        assert!(Arc::ptr_eq(&first, &select_tokens_balances(&ctx)));
        assert!(select_has_any_balance(&ctx));
        assert_eq!(
            *select_single_token_balance(&ctx, "0xG", MAINNET, "0xT1"),
            token_map(&[("0xT1", "0x9")])
        );
        assert_eq!(select_contract_balances(&ctx)["0xT1"], "0x9");
        assert_eq!(select_contract_balances_per_chain_id(&ctx).len(), 1);
        assert_eq!(*select_all_token_balances(&ctx), *first);
        assert!(select_address_has_token_balances(&ctx));
    }

    fn table_strategy() -> impl Strategy<Value = BalanceTable> {
        let tokens = prop::collection::btree_map("0x[0-9a-f]{1,4}", "0x[0-9a-f]{1,6}", 0..4);
        let chains = prop::collection::btree_map("0x[0-9a-f]{1,3}", tokens, 0..3);
        prop::collection::btree_map("0x[A-F0-9]{2,4}", chains, 0..3)
    }

    proptest! {
        #[test]
        fn prop_tokens_balances_is_superset_with_default(table in table_strategy()) {
            let views = BalanceViews::new();
            let ctx = WalletSnapshot::new(Arc::new(TokenBalancesState::new(table.clone())));
            let balances = views.tokens_balances(&ctx);

            prop_assert_eq!(balances.len(), table.len());
            for (account, chains) in &table {
                prop_assert_eq!(balances[account].len(), chains.len());
                for (chain_id, tokens) in chains {
                    let merged = &balances[account][chain_id];
                    prop_assert_eq!(
                        merged.get(GENERAL_DEFAULT_BALANCE_KEY).map(String::as_str),
                        Some(GENERAL_DEFAULT_BALANCE_HEX)
                    );
                    for (token, balance) in tokens {
                        prop_assert_eq!(merged.get(token), Some(balance));
                    }
                }
            }

            let has_pair = table.values().any(|chains| !chains.is_empty());
            prop_assert_eq!(views.has_any_balance(&ctx), has_pair);
            prop_assert_eq!(&*views.all_token_balances(&ctx), &*balances);
        }
    }
}
