// xtool-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{ArgAction, ArgGroup, Args, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    name = "xtool",
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "xtool: photo workflow tool",
    long_about = "Swaps camera models, strips GPS data, inspects metadata, denoises images \
                  and extracts X3F previews by driving exiftool, Neat Image and x3f_extract."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Swap in a different camera name
    Camswap(CamswapArgs),
    /// Remove GPS metadata from images
    Rmloc(RmlocArgs),
    /// Inspect image files for GPS or camera-swap data
    Inspect(InspectArgs),
    /// Denoise images with Neat Image
    Neatimg(NeatimgArgs),
    /// Extract embedded JPEGs from Sigma X3F files
    X3fjpg(X3fjpgArgs),
    /// Print version and other information
    Version,
}

/// Output flags shared by the exiftool-based editing commands.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Write modified images to new files named with a suffix, rather than to the originals
    #[arg(short = 's')]
    pub suffix: bool,

    /// Write modified images to this directory
    #[arg(short = 'd', value_name = "OUT_DIR")]
    pub out_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("mode").required(true).args(["camera", "restore"])))]
pub struct CamswapArgs {
    /// Camera model to swap in (or an alias defined in camswap_aliases)
    #[arg(
        short = 'c',
        value_name = "CAM_MODEL",
        value_parser = clap::builder::NonEmptyStringValueParser::new()
    )]
    pub camera: Option<String>,

    /// Restore the original camera name from xtool's XMP attribute
    #[arg(short = 'r')]
    pub restore: bool,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Print exiftool output for each image; repeat (-vv) to also print commands
    #[arg(short = 'v', action = ArgAction::Count)]
    pub verbose: u8,

    /// Images to process
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct RmlocArgs {
    #[command(flatten)]
    pub output: OutputArgs,

    /// Print exiftool output for each image; repeat (-vv) to also print commands
    #[arg(short = 'v', action = ArgAction::Count)]
    pub verbose: u8,

    /// Images to process
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// Inspect image files for location/GPS data (-g is an alias)
    #[arg(short = 'l', short_alias = 'g')]
    pub location: bool,

    /// Inspect image files for camera-swap data
    #[arg(short = 's')]
    pub swap: bool,

    /// Images to inspect
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct NeatimgArgs {
    /// JPEG quality; falls back to neat_image.default_jpg_quality, then 80
    #[arg(
        short = 'q',
        value_name = "JPG_QUALITY",
        default_value_t = 0,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    pub quality: u8,

    /// Write denoised images to this directory
    #[arg(short = 'd', value_name = "OUT_DIR")]
    pub out_dir: Option<PathBuf>,

    /// Print Neat Image output for each image; repeat (-vv) to also print commands
    #[arg(short = 'v', action = ArgAction::Count)]
    pub verbose: u8,

    /// Images to denoise
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct X3fjpgArgs {
    /// Write extracted JPEGs to this directory
    #[arg(short = 'd', value_name = "OUT_DIR")]
    pub out_dir: Option<PathBuf>,

    /// Print x3f_extract output for each image; repeat (-vv) to also print commands
    #[arg(short = 'v', action = ArgAction::Count)]
    pub verbose: u8,

    /// X3F files to extract from
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

impl Commands {
    /// The `-v` count for commands that have one.
    pub fn verbose(&self) -> u8 {
        match self {
            Commands::Camswap(args) => args.verbose,
            Commands::Rmloc(args) => args.verbose,
            Commands::Neatimg(args) => args.verbose,
            Commands::X3fjpg(args) => args.verbose,
            Commands::Inspect(_) | Commands::Version => 0,
        }
    }
}

/// Parses the process arguments, exiting with usage on error.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Parses the given arguments; used by tests.
pub fn parse_cli_from<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args)
}
