use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cart-cli")]
#[command(about = "A local shopping cart with checkout, persisted on this device")]
#[command(version = "0.1.0")]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding the persisted cart (overrides CART_STORAGE_DIR)
    #[arg(short, long, global = true)]
    pub storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add one unit of a product to the cart
    Add {
        /// Product name
        name: String,
        /// Unit price
        price: f64,
        /// Product image reference
        image: String,
    },
    /// Remove a product from the cart
    Remove {
        /// Product name
        name: String,
    },
    /// Set the quantity of a product (below 1 removes it)
    SetQty {
        /// Product name
        name: String,
        /// New quantity, as typed into the quantity field
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },
    /// Show the cart
    Show,
    /// Re-render the cart
    Refresh,
    /// Show the checkout order summary
    Summary,
    /// Apply a coupon code
    Coupon {
        /// Coupon code
        #[arg(default_value = "")]
        code: String,
    },
    /// Place the order
    Checkout {
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long)]
        mobile_number: Option<String>,
        #[arg(long)]
        shipping_address: Option<String>,
        #[arg(long)]
        delivery_time: Option<String>,
        /// Never prompt; treat missing fields as empty
        #[arg(long)]
        no_prompt: bool,
    },
}
