use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Top-level parser for the `route360` binary.
#[derive(Debug, Parser)]
#[command(name = "route360", version, about = "Route 360 travel journal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// SQLite database file
    #[arg(long, global = true, env = "ROUTE360_DB", default_value = "route360.sqlite3")]
    pub db: PathBuf,

    /// Directory for rotated log files (logging is off when unset)
    #[arg(long, global = true, env = "ROUTE360_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, global = true, env = "ROUTE360_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Country centroids for `markers`: a JSON array of `{name, lat, lng}`,
    /// or of `{id, lat, lng}` when `--centroid-names` is given
    #[arg(long, global = true, env = "ROUTE360_CENTROIDS")]
    pub centroids: Option<PathBuf>,

    /// `id<TAB>name` table (with header line) joined onto id-keyed centroids
    #[arg(long, global = true, env = "ROUTE360_CENTROID_NAMES", requires = "centroids")]
    pub centroid_names: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create an account and sign in.
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign in.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out.
    Logout,
    /// Show the signed-in user.
    Whoami {
        /// Change the display name.
        #[arg(long)]
        set_name: Option<String>,
    },
    /// Trips of the signed-in user.
    Trip {
        #[command(subcommand)]
        action: TripCommands,
    },
    /// Visited countries of the signed-in user.
    Country {
        #[command(subcommand)]
        action: CountryCommands,
    },
    /// Print globe markers.
    Markers,
}

#[derive(Debug, Subcommand)]
pub enum TripCommands {
    Add(TripFields),
    /// List trips, newest first.
    List,
    Show {
        id: String,
    },
    /// Edit a trip; omitted fields keep their value.
    Edit {
        id: String,
        #[command(flatten)]
        fields: TripFields,
    },
    Delete {
        id: String,
    },
    ItineraryAdd {
        trip_id: String,
        #[arg(long, default_value = "")]
        title: String,
        /// YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
        #[arg(long, default_value = "")]
        note: String,
    },
    LocationAdd {
        trip_id: String,
        #[arg(long)]
        label: String,
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lng: f64,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct TripFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub desc: Option<String>,
    /// YYYY-MM-DD, empty to clear
    #[arg(long)]
    pub start: Option<String>,
    /// YYYY-MM-DD, empty to clear
    #[arg(long)]
    pub end: Option<String>,
    /// Cover image URL or data URL
    #[arg(long)]
    pub cover: Option<String>,
    /// Explicit country, empty to clear
    #[arg(long)]
    pub country: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum CountryCommands {
    List,
    Add { name: String },
    Remove { name: String },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands, CountryCommands, TripCommands};
    use clap::{CommandFactory, Parser};

    #[test]
    fn command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_location_with_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "route360",
            "trip",
            "location-add",
            "t1",
            "--label",
            "Sydney",
            "--lat",
            "-33.87",
            "--lng",
            "151.21",
        ])
        .unwrap();
        match cli.command {
            Commands::Trip {
                action: TripCommands::LocationAdd { lat, lng, .. },
            } => {
                assert_eq!(lat, -33.87);
                assert_eq!(lng, 151.21);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli =
            Cli::try_parse_from(["route360", "country", "add", "Peru", "--db", "/tmp/j.db"]).unwrap();
        assert_eq!(cli.db.to_str(), Some("/tmp/j.db"));
        assert!(matches!(
            cli.command,
            Commands::Country {
                action: CountryCommands::Add { ref name }
            } if name == "Peru"
        ));
    }

    #[test]
    fn centroid_names_need_a_centroid_file() {
        assert!(Cli::try_parse_from(["route360", "markers", "--centroid-names", "names.tsv"]).is_err());

        let cli = Cli::try_parse_from([
            "route360",
            "markers",
            "--centroids",
            "centroids.json",
            "--centroid-names",
            "names.tsv",
        ])
        .unwrap();
        assert_eq!(cli.centroid_names.unwrap().to_str(), Some("names.tsv"));
    }
}
