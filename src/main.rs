//! Asset board entry point: CLI wiring, config loading and the list view.

use std::path::Path;
use std::process;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use asset_board::assets::{CardDescriptor, EnergyAsset, classify_sector};
use asset_board::board::AssetBoard;
use asset_board::config::BoardConfig;
use asset_board::io::export::export_csv;
use asset_board::source::{HttpAssetSource, PageRequest};

/// Parsed CLI arguments.
struct CliArgs {
    config_path: Option<String>,
    base_url: Option<String>,
    token: Option<String>,
    page: Option<usize>,
    export: Option<String>,
    #[cfg(feature = "stub")]
    serve_stub: Option<std::net::SocketAddr>,
    #[cfg(feature = "tui")]
    tui: bool,
}

fn print_help() {
    eprintln!("asset-board: energy asset list, sector cards and editor");
    eprintln!();
    eprintln!("Usage: asset-board [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>          Load settings from TOML config file");
    eprintln!("  --base-url <url>         Asset API base URL (overrides config and env)");
    eprintln!("  --token <token>          Bearer token (overrides config and env)");
    eprintln!("  --page <n>               Zero-based page to list");
    eprintln!("  --export <path>          Write the fetched assets to CSV");
    #[cfg(feature = "stub")]
    eprintln!("  --serve-stub <addr>      Serve an in-memory asset API on addr");
    #[cfg(feature = "tui")]
    eprintln!("  --tui                    Open the interactive terminal board");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("Environment: ASSET_BOARD_API_URL, ASSET_BOARD_TOKEN, RUST_LOG");
}

/// Returns the value following flag `args[*i]`, or exits with a usage error.
fn flag_value(args: &[String], i: &mut usize, what: &str) -> String {
    let flag = &args[*i];
    *i += 1;
    if *i >= args.len() {
        eprintln!("error: {flag} requires {what}");
        process::exit(1);
    }
    args[*i].clone()
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        config_path: None,
        base_url: None,
        token: None,
        page: None,
        export: None,
        #[cfg(feature = "stub")]
        serve_stub: None,
        #[cfg(feature = "tui")]
        tui: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--config" => cli.config_path = Some(flag_value(&args, &mut i, "a path argument")),
            "--base-url" => cli.base_url = Some(flag_value(&args, &mut i, "a URL argument")),
            "--token" => cli.token = Some(flag_value(&args, &mut i, "a token argument")),
            "--page" => {
                let raw = flag_value(&args, &mut i, "a page number");
                if let Ok(p) = raw.parse::<usize>() {
                    cli.page = Some(p);
                } else {
                    eprintln!("error: --page value \"{raw}\" is not a valid page number");
                    process::exit(1);
                }
            }
            "--export" => cli.export = Some(flag_value(&args, &mut i, "a path argument")),
            #[cfg(feature = "stub")]
            "--serve-stub" => {
                let raw = flag_value(&args, &mut i, "an address argument");
                if let Ok(addr) = raw.parse() {
                    cli.serve_stub = Some(addr);
                } else {
                    eprintln!("error: --serve-stub value \"{raw}\" is not a socket address");
                    process::exit(1);
                }
            }
            #[cfg(feature = "tui")]
            "--tui" => {
                cli.tui = true;
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn print_table(assets: &[EnergyAsset]) {
    println!(
        "{:<36}  {:<24}  {:<16}  {:<7}  {:>10}  {}",
        "id", "name", "type", "sector", "capacity_kw", "status"
    );
    for a in assets {
        let sector = if a.asset_type.is_recognized() {
            classify_sector(a).as_str()
        } else {
            "-"
        };
        println!(
            "{:<36}  {:<24}  {:<16}  {:<7}  {:>10}  {}",
            a.id,
            a.name,
            a.asset_type,
            sector,
            a.capacity_kw.map(|c| format!("{c:.2}")).unwrap_or_default(),
            a.status.map(|s| s.as_str()).unwrap_or(""),
        );
    }
}

fn print_cards(cards: &[CardDescriptor]) {
    for card in cards {
        match card {
            CardDescriptor::GroupHeader { sector, count } => {
                println!("\n[{sector}] {count} asset(s)");
            }
            CardDescriptor::Asset {
                name,
                icon,
                dashboard_url,
                ..
            } => println!("  {:<8} {name:<24} {dashboard_url}", icon.as_str()),
        }
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = parse_args();

    // Config file (or defaults), then environment, then CLI flags
    let mut cfg = if let Some(ref path) = cli.config_path {
        match BoardConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        BoardConfig::default()
    };
    cfg.apply_env();
    if let Some(url) = cli.base_url {
        cfg.api.base_url = url;
    }
    if let Some(token) = cli.token {
        cfg.api.token = Some(token);
    }

    let errors = cfg.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("error: failed to create tokio runtime: {e}");
        process::exit(1);
    });

    #[cfg(feature = "stub")]
    if let Some(addr) = cli.serve_stub {
        use std::sync::Arc;

        use asset_board::source::InMemorySource;
        use asset_board::stub::{self, StubState};

        let mut state = StubState::new(InMemorySource::new());
        if let Some(token) = cfg.api.token.clone().filter(|t| !t.is_empty()) {
            state = state.with_token(token);
        }
        if let Err(e) = rt.block_on(stub::serve(Arc::new(state), addr)) {
            eprintln!("error: stub server failed: {e}");
            process::exit(1);
        }
        return;
    }

    let source = match HttpAssetSource::from_config(&cfg.api) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };
    let page = cli.page.map_or_else(
        || cfg.first_page(),
        |n| PageRequest::nth(n, cfg.paging.page_size),
    );
    let mut board = AssetBoard::new(source, page).with_links(cfg.dashboard_links());

    #[cfg(feature = "tui")]
    if cli.tui {
        if let Err(e) = asset_board::tui::run(rt, board) {
            eprintln!("error: TUI crashed: {e}");
            process::exit(1);
        }
        return;
    }

    // A failed fetch leaves the board empty; the table still prints.
    if let Err(e) = rt.block_on(board.refresh()) {
        warn!(error = %e, "could not load assets");
    }

    print_table(board.assets());
    print_cards(&board.cards());

    if let Some(ref path) = cli.export {
        if let Err(e) = export_csv(board.assets(), Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        info!(path = %path, rows = board.assets().len(), "assets exported");
    }
}
