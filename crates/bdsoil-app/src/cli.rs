//! Command-line definition.

use std::path::PathBuf;

use bdsoil_types::{SoilType, WaterAvailability};
use clap::{Args, Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_FILE;

/// Farm advisory tool for Bangladeshi soils and crops.
#[derive(Debug, Parser)]
#[command(name = "bdsoil", version, about)]
pub struct Cli {
    /// Configuration file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Account username.
    #[arg(short, long, global = true, env = "BDSOIL_USERNAME")]
    pub username: Option<String>,

    /// Account password.
    #[arg(short, long, global = true, env = "BDSOIL_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// What to do.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an account with the global username and password.
    Register(RegisterArgs),

    /// Show or change the signed-in user's profile.
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Manage land parcels.
    #[command(subcommand)]
    Land(LandCommand),

    /// Recommend crops for a soil and season.
    Crops {
        /// Soil type, e.g. "Clay Loam".
        #[arg(long)]
        soil: SoilType,
        /// Season text, matched as a substring, e.g. "Kharif".
        #[arg(long)]
        season: String,
    },

    /// Fertilizer recommendation for a crop.
    Fertilizer {
        /// Exact crop name.
        #[arg(long)]
        crop: String,
    },

    /// Irrigation method for a crop.
    Irrigation {
        /// Crop name.
        #[arg(long)]
        crop: String,
        /// Water availability: Low, Medium or High.
        #[arg(long)]
        water: WaterAvailability,
    },

    /// Identify a pest from a symptom description.
    Pest {
        /// Free-text description of what was observed.
        #[arg(long)]
        description: String,
    },

    /// Market price per ton.
    Price {
        /// Exact crop name. Lists every price when omitted.
        #[arg(long)]
        crop: Option<String>,
    },

    /// Current weather snapshot.
    Weather,

    /// Estimated profit for the crops your land can grow.
    Profit,

    /// Export a report of your lands.
    #[command(subcommand)]
    Report(ReportCommand),

    /// Resolve a location from GPS text, your network, or a map message.
    Locate(LocateArgs),
}

/// Details for a new account.
#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// National id number.
    #[arg(long)]
    pub nid: String,
    /// Full name.
    #[arg(long)]
    pub name: String,
    /// Phone number.
    #[arg(long)]
    pub phone: String,
}

/// Profile subcommands.
#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Print the profile.
    Show,
    /// Replace the profile details.
    Update {
        /// New username.
        #[arg(long)]
        new_username: String,
        /// National id number.
        #[arg(long)]
        nid: String,
        /// Full name.
        #[arg(long)]
        name: String,
        /// Phone number.
        #[arg(long)]
        phone: String,
        /// Profile picture path. An empty value clears it.
        #[arg(long)]
        profile_pic: Option<String>,
    },
}

/// Land subcommands.
#[derive(Debug, Subcommand)]
pub enum LandCommand {
    /// Register a land parcel.
    Add {
        /// Location or address. Required unless `--resolve` is given.
        #[arg(long)]
        location: Option<String>,
        /// Area in hectares.
        #[arg(long)]
        area: f64,
        /// Soil type.
        #[arg(long)]
        soil: SoilType,
        /// GPS coordinates as "lat, lng".
        #[arg(long)]
        gps: Option<String>,
        /// Look up the address for `--gps` when `--location` is omitted.
        #[arg(long, requires = "gps")]
        resolve: bool,
    },
    /// List your lands.
    List,
    /// Delete a land after confirming your password.
    Delete {
        /// Land id, as shown by `land list`.
        #[arg(long)]
        id: i64,
        /// Your password.
        #[arg(long)]
        confirm_password: String,
    },
}

/// Report formats.
#[derive(Debug, Subcommand)]
pub enum ReportCommand {
    /// Crop table as CSV.
    Csv {
        /// Output file. Defaults to a timestamped name in the report directory.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Multi-page PDF report.
    Pdf {
        /// Output directory. Defaults to the configured report directory.
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

/// Location sources. Exactly one must be given.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct LocateArgs {
    /// GPS coordinates as "lat, lng".
    #[arg(long)]
    pub gps: Option<String>,
    /// Use the network's approximate location.
    #[arg(long)]
    pub current: bool,
    /// Read GPS edits from stdin, one per line.
    #[arg(long)]
    pub interactive: bool,
    /// A map selection message (JSON with lat, lng, address).
    #[arg(long)]
    pub map_message: Option<String>,
}
