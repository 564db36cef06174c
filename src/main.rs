use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod chs;
mod config;
mod disk_formats;
mod drive;
mod error;
mod frame;
mod geometry;
mod link;
mod session;
mod store;
#[cfg(test)]
mod testutil;
mod trace;
mod transfer;

use config::Config;
use link::SerialLink;
use session::Session;
use trace::Diagnostics;

pub const SECTOR_SIZE: usize = 512;

#[derive(Parser, Debug)]
#[command(about = "Serve floppy images to a remote INT 13h client over a serial line")]
struct Cli {
    /// Use TTY DEVICE
    #[arg(short, long, value_name = "DEVICE")]
    device: PathBuf,
    /// Floppy IMAGE for A:
    #[arg(short = 'a', long, value_name = "IMAGE")]
    drive_a: Option<PathBuf>,
    /// Floppy IMAGE for B:
    #[arg(short = 'b', long, value_name = "IMAGE")]
    drive_b: Option<PathBuf>,
    /// Force HPC heads per cylinder
    #[arg(
        short = 'H',
        long,
        value_name = "HPC",
        default_value_t = geometry::HEADS_PER_CYLINDER_DEFAULT
    )]
    heads: u16,
    /// Force SPT sectors per track (0 probes the boot sector)
    #[arg(short = 'S', long, value_name = "SPT")]
    sectors: Option<u16>,
    /// Line speed
    #[arg(short = 'B', long, value_name = "RATE", default_value_t = link::DEFAULT_BAUD)]
    baud: u32,
    /// Verbose debugging output
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Result<Config, error::Error> {
        Config {
            device: self.device,
            images: [self.drive_a, self.drive_b],
            heads_per_cylinder: self.heads,
            sectors_per_track: self.sectors.filter(|&spt| spt != 0),
            baud: self.baud,
            verbose: self.verbose,
        }
        .validate()
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = cli.into_config()?;

    let link = SerialLink::open(&config.device, config.baud)?;
    let mut session = Session::open(&config, link, Diagnostics::stderr(config.verbose))?;
    Err(session.run().into())
}
