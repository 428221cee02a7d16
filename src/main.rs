use std::io::Read;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use collapse_solver::constants::DEFAULT_CACHE_FILE;
use collapse_solver::domain::grid::{Dimension, NumColors};
use collapse_solver::domain::search::ExpansionLimit;
use collapse_solver::{
    generate, logging, parse_puzzle, render, CacheStore, FileCacheStore, Grid, MoveCache,
    SolverConfig, SolverService,
};

/// Click-o-mania 盤面を標準入力から読み、次にクリックするセル "row col" を出力する
#[derive(Parser, Debug)]
#[command(name = "collapse", version)]
struct Args {
    /// 手のキャッシュファイル
    #[arg(long, default_value = DEFAULT_CACHE_FILE)]
    cache: PathBuf,

    /// キャッシュを読み書きしない
    #[arg(long)]
    no_cache: bool,

    /// 詳細ログの出力先
    #[arg(long)]
    log: Option<PathBuf>,

    /// 展開回数の上限（超えたら部分解を返す）
    #[arg(long)]
    limit: Option<u64>,

    /// 盤面と手順を標準エラーに表示
    #[arg(long)]
    show: bool,

    /// 標準入力の代わりにランダム盤面を使う（例: 12x20x3）
    #[arg(long, value_name = "ROWSxCOLSxCOLORS")]
    random: Option<String>,

    /// ランダム盤面のシード
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log {
        logging::init_log_file(path)?;
    }

    let grid = match &args.random {
        Some(spec) => random_grid(spec, args.seed)?,
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("標準入力を読めません")?;
            parse_puzzle(&input).context("盤面を読み込めません")?
        }
    };

    let mut config = SolverConfig::default();
    if let Some(limit) = args.limit {
        config = config.with_expansion_limit(ExpansionLimit::new(limit)?);
    }

    let mut store = FileCacheStore::new(&args.cache);
    let cache = if args.no_cache {
        MoveCache::new()
    } else {
        store.load()?
    };
    let mut service = SolverService::with_cache(config, cache)?;

    match service.recommend_move(&grid) {
        Some(coord) => println!("{}", coord),
        None => eprintln!("消せるグループがありません"),
    }

    if args.show {
        show_trace(&mut service, &grid);
    }

    if !args.no_cache {
        store.save(service.cache())?;
    }
    Ok(())
}

/// "RxCxK" 形式からランダム盤面を作る
fn random_grid(spec: &str, seed: u64) -> Result<Grid> {
    let parts: Vec<&str> = spec.split('x').collect();
    let [rows, columns, colors] = parts.as_slice() else {
        return Err(anyhow!("--random は ROWSxCOLSxCOLORS 形式: {}", spec));
    };
    let rows = Dimension::new(rows.parse().context("行数が数値ではありません")?)?;
    let columns = Dimension::new(columns.parse().context("列数が数値ではありません")?)?;
    let colors = NumColors::new(colors.parse().context("色数が数値ではありません")?)?;
    let mut rng = StdRng::seed_from_u64(seed);
    Ok(generate(rows, columns, colors, &mut rng))
}

fn show_trace(service: &mut SolverService, grid: &Grid) {
    // 手順の再生はキャッシュヒットになるので、初回探索のサマリーを先に取る
    if let Some(summary) = service.last_summary() {
        eprintln!(
            "展開 {} / 積んだ状態 {} / {:.3} 秒 ({:.0} 展開/秒){}",
            summary.expansions,
            summary.enqueued,
            summary.elapsed_seconds,
            summary.expansions_per_second,
            if summary.cache_hit { " (キャッシュ)" } else { "" }
        );
    }
    eprint!("{}", render(grid));
    let path = service.solution_path(grid);
    for (i, mv) in path.iter().enumerate() {
        eprintln!("\n#{} クリック {} ({} セル)", i + 1, mv.coord, mv.removed);
        eprint!("{}", render(&mv.result));
    }
    let last = path.last().map_or(grid, |m| &m.result);
    if last.is_blank() {
        eprintln!("\n全消し: {} 手", path.len());
    } else {
        eprintln!("\n残り {} セル", last.non_blank_count());
    }
}
