//! Command line and environment settings.
//!
//! `--size` and `--seed` fall back to `MAZE_SIZE` and `MAZE_SEED`.

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::MazeError;
use crate::render::view_dims;

pub const MAX_SIZE: usize = 40;
pub const LARGE_SIZE: usize = 20;
pub const SMALL_SIZE: usize = 10;

const SIZE_ENV: &str = "MAZE_SIZE";
const SEED_ENV: &str = "MAZE_SEED";

pub fn command() -> Command {
    Command::new("maze")
        .about("Find your way through a random perfect maze")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("size")
                .short('s')
                .long("size")
                .value_name("N")
                .help("Maze side length in cells (default: 20 if it fits, else 10)")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_name("SEED")
                .help("Seed for reproducible mazes")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("no-color")
                .long("no-color")
                .help("Draw without colors")
                .action(ArgAction::SetTrue),
        )
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Fixed side length; `None` picks one from the terminal size.
    pub size: Option<usize>,
    pub seed: Option<u64>,
    pub color: bool,
}

impl Config {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, MazeError> {
        Self::from_matches_with_env(matches, |name| std::env::var(name).ok())
    }

    pub fn from_matches_with_env<F>(matches: &ArgMatches, env: F) -> Result<Self, MazeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let size = match matches.get_one::<usize>("size") {
            Some(&size) => Some(size),
            None => env_value::<usize, _>(&env, SIZE_ENV)?,
        };
        if let Some(size) = size {
            if size == 0 || size > MAX_SIZE {
                return Err(MazeError::InvalidSize(size));
            }
        }
        let seed = match matches.get_one::<u64>("seed") {
            Some(&seed) => Some(seed),
            None => env_value::<u64, _>(&env, SEED_ENV)?,
        };
        Ok(Config {
            size,
            seed,
            color: !matches.get_flag("no-color"),
        })
    }

    /// Parses a full argv (program name first) without touching the
    /// environment.
    pub fn parse_from<I, T>(args: I) -> Result<Self, MazeError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = command().try_get_matches_from(args)?;
        Self::from_matches_with_env(&matches, |_| None)
    }

    /// The configured size, or the large size when the terminal can show it.
    pub fn resolve_size(&self, term_w: u16, term_h: u16) -> usize {
        if let Some(size) = self.size {
            return size;
        }
        let (need_w, need_h) = view_dims(LARGE_SIZE);
        if term_w >= need_w && term_h >= need_h {
            LARGE_SIZE
        } else {
            SMALL_SIZE
        }
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn env_value<T, F>(env: &F, name: &'static str) -> Result<Option<T>, MazeError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match env(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| MazeError::InvalidEnv { name, value }),
    }
}
