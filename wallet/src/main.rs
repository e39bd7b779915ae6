use std::env;
use std::fs;
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::json;
use tracing::{error, info};

use tokenview_common::init_logger;
use tokenview_wallet::config::Config;
use tokenview_wallet::{BalanceViews, TokenBalancesState, WalletSnapshot};

const DEFAULT_CONFIG_PATH: &str = "config/tokenview.json";

fn usage() -> ! {
    eprintln!("Usage: tokenview <snapshot.json> [config.json] [account] [chain_id] [token]");
    process::exit(2);
}

fn run(args: &[String]) -> Result<()> {
    let snapshot_path = match args.first() {
        Some(path) => path,
        None => usage(),
    };
    let config_path = args.get(1).map(String::as_str).unwrap_or(DEFAULT_CONFIG_PATH);

    let config = Config::from_file(config_path)?;
    // Logger có thể đã được khởi tạo bởi môi trường chạy
    if let Err(e) = init_logger(&config.logger_config()) {
        eprintln!("{}", e);
    }

    let contents = fs::read_to_string(snapshot_path)
        .with_context(|| format!("Không thể đọc snapshot {}", snapshot_path))?;
    let state = TokenBalancesState::from_json(&contents)
        .with_context(|| format!("Snapshot không hợp lệ: {}", snapshot_path))?;
    info!(
        accounts = state.token_balances.len(),
        path = %snapshot_path,
        "Đã tải snapshot số dư"
    );

    let mut snapshot = WalletSnapshot::new(Arc::new(state))
        .with_show_fiat_in_testnets(config.show_fiat_in_testnets);
    if let Some(account) = args.get(2) {
        snapshot = snapshot.with_selected_account(account.as_str());
    }
    if let Some(chain_id) = args.get(3) {
        snapshot = snapshot.with_chain_id(chain_id.as_str());
    }

    let views = BalanceViews::with_config(&config)?;
    let mut report = json!({
        "tokensBalances": *views.tokens_balances(&snapshot),
        "hasAnyBalance": views.has_any_balance(&snapshot),
        "contractBalances": *views.contract_balances(&snapshot),
        "contractBalancesPerChainId": *views.contract_balances_per_chain(&snapshot),
        "allTokenBalances": *views.all_token_balances(&snapshot),
        "addressHasTokenBalances": views.address_has_token_balances(&snapshot),
    });

    if let (Some(account), Some(token)) = (snapshot.selected_account.clone(), args.get(4)) {
        let single = views.single_token_balance(&snapshot, &account, &snapshot.chain_id, token);
        report["singleTokenBalance"] = json!(*single);
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
