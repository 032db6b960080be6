use bondcurve::coins::{Coin, Coins, DecCoin};
use bondcurve::plot::{plot_price_vs_supply, plot_reserve_vs_supply};
use bondcurve::verifier::{sample_supplies, verify_curve};
use bondcurve::{Amount, Bond, BondConfig, Curve, Dec};

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use std::fs::{create_dir_all, File};
use std::io::Write;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "bondcurve",
    version,
    about = "Multitoken bonding curve pricer + verifier"
)]
struct Args {
    /// JSON bond description
    #[arg(long)]
    bond: String,

    /// curve | quote | swap
    #[arg(long, default_value = "curve")]
    mode: String,

    /// Current supply of the bond token
    #[arg(long, default_value_t = 0)]
    supply: Amount,

    /// Actual reserve balances, e.g. "10000res,10000rez"
    #[arg(long, default_value = "")]
    balances: String,

    /// Amount to mint and burn in quote mode
    #[arg(long, default_value_t = 1)]
    amount: Amount,

    /// Coin to swap, e.g. "3res"
    #[arg(long)]
    from: Option<String>,
    /// Token to receive from a swap
    #[arg(long)]
    to: Option<String>,

    /// Largest supply in the schedule (defaults to the bond's max supply)
    #[arg(long)]
    max_supply: Option<Amount>,
    #[arg(long, default_value_t = 101)]
    points: usize,

    #[arg(long, default_value = "out")]
    out_dir: String,
    #[arg(long = "no-draw", action = clap::ArgAction::SetFalse, default_value_t = true)]
    draw: bool,
    #[arg(long, action = clap::ArgAction::SetTrue)]
    verbose: bool,
}

#[derive(Serialize)]
struct Row {
    supply: Amount,
    price: String,
    reserve: String,
    mint_cost: String,
    tx_fee: Amount,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut bond = BondConfig::load(&args.bond)?;
    bond.current_supply.amount = args.supply;
    let balances: Coins = args
        .balances
        .parse()
        .with_context(|| format!("parsing --balances {:?}", args.balances))?;

    match args.mode.as_str() {
        "curve" => run_curve(&args, &bond),
        "quote" => run_quote(&args, &bond, &balances),
        "swap" => run_swap(&args, &bond, &balances),
        m => Err(anyhow!("unknown mode: {}", m)),
    }
}

fn run_curve(args: &Args, bond: &Bond) -> Result<()> {
    let curve = bond.curve()?;
    if curve == Curve::Swapper {
        bail!("curve mode needs a power or sigmoid bond; use --mode quote or swap");
    }
    let max_supply = args.max_supply.unwrap_or(bond.max_supply.amount);
    let rep = verify_curve(&curve, max_supply, args.points)?;
    info!(
        bond = %bond.token,
        function = %bond.function_type,
        params = %bond.function_parameters,
        points = rep.points,
        final_reserve = %rep.final_reserve,
        zero_anchored = rep.zero_anchored,
        monotone = rep.monotone_ok,
        "verified curve"
    );
    if !rep.ok() {
        warn!(bond = %bond.token, "curve failed verification");
    }

    create_dir_all(&args.out_dir)?;
    let supplies = sample_supplies(max_supply, args.points)?;
    write_schedule_csv(&args.out_dir, bond, &curve, &supplies)?;
    if args.draw {
        plot_price_vs_supply(
            &curve,
            &supplies,
            &format!("{}/price_vs_supply.png", &args.out_dir),
        )?;
        plot_reserve_vs_supply(
            &curve,
            &supplies,
            &format!("{}/reserve_vs_supply.png", &args.out_dir),
        )?;
    }
    Ok(())
}

fn write_schedule_csv(out_dir: &str, bond: &Bond, curve: &Curve, supplies: &[Amount]) -> Result<()> {
    let file_path = format!("{}/schedule.csv", out_dir);
    let mut file = File::create(&file_path)?;

    writeln!(file, "# Bonding Curve Schedule")?;
    writeln!(file, "# Bond: {} ({})", bond.token, bond.name)?;
    writeln!(
        file,
        "# Function: {} {}",
        bond.function_type, bond.function_parameters
    )?;
    writeln!(file, "# Reserve tokens: {}", bond.reserve_tokens.join(","))?;
    writeln!(file, "# Tx fee: {}%", bond.tx_fee_percentage)?;
    writeln!(file)?;

    let mut wtr = csv::Writer::from_writer(file);
    let fee_token = bond.reserve_tokens.first().cloned().unwrap_or_default();
    let mut prev_reserve = Dec::zero();
    for supply in supplies {
        let x = Dec::from(*supply);
        let reserve = curve.integral(&x)?;
        let mint_cost = &reserve - &prev_reserve;
        let fee = bond.tx_fee(&DecCoin::new(fee_token.clone(), mint_cost.clone()))?;
        wtr.serialize(Row {
            supply: *supply,
            price: curve.price(&x)?.to_string(),
            reserve: reserve.to_string(),
            mint_cost: mint_cost.to_string(),
            tx_fee: fee.amount,
        })?;
        prev_reserve = reserve;
    }
    wtr.flush()?;
    Ok(())
}

fn run_quote(args: &Args, bond: &Bond, balances: &Coins) -> Result<()> {
    if bond.reserves_violate_sanity_rate(balances) {
        warn!(bond = %bond.token, %balances, "reserves violate sanity rate");
    }
    let current = bond.current_prices(balances)?;
    let mint = bond.prices_to_mint(args.amount, balances)?;
    let mint_fees = bond.tx_fees(&mint)?;
    println!("current price: {}", current);
    println!("mint {}{}: {} (+ fee {})", args.amount, bond.token, mint, mint_fees);
    if bond.allow_sells {
        let burn = bond.returns_for_burn(args.amount, balances)?;
        let burn_fees = bond.exit_fees(&burn)?;
        println!("burn {}{}: {} (- fee {})", args.amount, bond.token, burn, burn_fees);
    }
    Ok(())
}

fn run_swap(args: &Args, bond: &Bond, balances: &Coins) -> Result<()> {
    let from_arg = args.from.as_deref().ok_or_else(|| anyhow!("swap: need --from"))?;
    let to = args.to.as_deref().ok_or_else(|| anyhow!("swap: need --to"))?;
    let from_coins: Coins = from_arg.parse()?;
    let (denom, amount) = match from_coins.iter().collect::<Vec<_>>().as_slice() {
        [(d, a)] => (d.to_string(), *a),
        _ => bail!("swap: --from must be a single non-zero coin (got {:?})", from_arg),
    };
    if bond.any_order_quantity_limits_exceeded(&from_coins) {
        bail!("swap: {} exceeds the order quantity limit", from_arg);
    }

    let (out, fee) = bond.returns_for_swap(&Coin::new(denom.clone(), amount), to, balances)?;
    println!("swap {}: receive {} (fee {})", from_arg, out, fee);

    let mut after = Coins::new();
    for token in &bond.reserve_tokens {
        let held = balances.amount_of(token);
        let held = if *token == denom {
            held + (amount - fee.amount)
        } else {
            held - out.amount_of(token)
        };
        after.add(Coin::new(token.clone(), held))?;
    }
    if bond.reserves_violate_sanity_rate(&after) {
        warn!(bond = %bond.token, reserves = %after, "swap would violate sanity rate");
    }
    Ok(())
}
