use clap::Parser;
use lensmatch::utils::pricing::{apply_discount, suggested_retail_price};

/// Quick SRP calculator: (lens × 4) + (fitting × 2) + accessories.
#[derive(Debug, Parser)]
#[command(name = "srp_calc")]
struct Args {
    /// Lens cost
    #[arg(long)]
    lens: f64,

    /// Fitting cost
    #[arg(long, default_value = "0")]
    fitting: f64,

    /// Accessories cost
    #[arg(long, default_value = "0")]
    accessories: f64,

    /// Discount percentage
    #[arg(long, default_value = "0")]
    discount: f64,
}

fn main() {
    let args = Args::parse();

    let srp = suggested_retail_price(args.lens, args.fitting, args.accessories);
    let discounted = apply_discount(srp, args.discount);

    println!("SRP: ₹{:.2}", srp);
    if args.discount > 0.0 {
        println!("Discount: {}%", args.discount);
        println!("Final price: ₹{:.2}", discounted);
    }
}
