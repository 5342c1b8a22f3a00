//! Command-line arguments shared by the `starforce` and `simulate` binaries.

use crate::error::Result;
use crate::star::{ModifierFlags, MvpTier, OddsTable, StarforceRequest};
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum MvpArg {
    #[default]
    None,
    Silver,
    Gold,
    Diamond,
}

impl From<MvpArg> for MvpTier {
    fn from(arg: MvpArg) -> Self {
        match arg {
            MvpArg::None => MvpTier::None,
            MvpArg::Silver => MvpTier::Silver,
            MvpArg::Gold => MvpTier::Gold,
            MvpArg::Diamond => MvpTier::Diamond,
        }
    }
}

/// Item, star range, discount and options of a calculation.
#[derive(Debug, Clone, Args)]
pub struct RequestArgs {
    /// Item level
    #[arg(long, short = 'l')]
    pub strength: String,

    /// Current star
    #[arg(long, short = 's')]
    pub start: String,

    /// Target star (at most 25)
    #[arg(long, short = 't')]
    pub target: String,

    /// MVP tier (discount on attempts up to star 15)
    #[arg(long, value_enum, default_value_t = MvpArg::None)]
    pub mvp: MvpArg,

    /// Explicit MVP discount fraction, overriding --mvp
    #[arg(long)]
    pub mvp_discount: Option<f64>,

    /// 5/10/15: guaranteed success at stars 5, 10 and 15
    #[arg(long)]
    pub guarantee: bool,

    /// +2 stars per success up to star 10
    #[arg(long)]
    pub double: bool,

    /// 30% off every attempt
    #[arg(long)]
    pub thirty_off: bool,

    /// Star catching (+5% relative success)
    #[arg(long)]
    pub star_catch: bool,

    /// Safeguard stars 15 and 16
    #[arg(long)]
    pub safeguard: bool,

    /// JSON odds table replacing the built-in one
    #[arg(long)]
    pub odds: Option<PathBuf>,
}

impl RequestArgs {
    pub fn flags(&self) -> ModifierFlags {
        ModifierFlags {
            guaranteed_checkpoints: self.guarantee,
            double_attempt: self.double,
            thirty_percent_off: self.thirty_off,
            star_catching: self.star_catch,
            safeguard: self.safeguard,
        }
    }

    pub fn mvp_discount(&self) -> f64 {
        self.mvp_discount
            .unwrap_or_else(|| MvpTier::from(self.mvp).discount())
    }

    pub fn to_request(&self) -> Result<StarforceRequest> {
        StarforceRequest::parse(
            &self.strength,
            &self.start,
            &self.target,
            self.mvp_discount(),
            self.flags(),
        )
    }

    pub fn load_odds(&self) -> Result<OddsTable> {
        match &self.odds {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading odds table");
                OddsTable::load(path)
            }
            None => Ok(OddsTable::default()),
        }
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `starforce=info`).
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("starforce=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
