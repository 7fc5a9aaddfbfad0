use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use joltage::machine::{GenerateOptions, Presses};

#[derive(Clone)]
pub(crate) struct Options {
    output_path: Option<PathBuf>,
    source: Source,
    solve: bool,
}

impl Options {
    pub fn from_args() -> Result<Self> {
        Self::from_arg_matches(&clap_app().get_matches())
    }

    fn from_arg_matches(matches: &ArgMatches<'_>) -> Result<Self> {
        let source = if let Some(path) = matches.value_of("input") {
            Source::File(path.into())
        } else {
            let defaults = GenerateOptions::default();
            let machine = GenerateOptions {
                counters: parse_value(matches, "counters")?.unwrap_or(defaults.counters),
                buttons: parse_value(matches, "buttons")?.unwrap_or(defaults.buttons),
                max_presses: parse_value(matches, "max_presses")?.unwrap_or(defaults.max_presses),
            };
            // every target must fit even if all buttons hit the same counter
            (machine.buttons as Presses)
                .checked_mul(machine.max_presses)
                .ok_or_else(|| anyhow!("--buttons times --max-presses is too large"))?;
            Source::Generate(Generate {
                count: parse_value(matches, "count")?.unwrap_or(1),
                machine,
            })
        };
        Ok(Self {
            output_path: matches.value_of("output_path").map(PathBuf::from),
            source,
            solve: matches.is_present("solve"),
        })
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    pub fn solve(&self) -> bool {
        self.solve
    }
}

fn parse_value<T>(matches: &ArgMatches<'_>, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    matches
        .value_of(name)
        .map(|s| s.parse::<T>().with_context(|| format!("invalid {}: {}", name, s)))
        .transpose()
}

#[derive(Clone)]
pub(crate) enum Source {
    File(PathBuf),
    Generate(Generate),
}

#[derive(Clone)]
pub(crate) struct Generate {
    pub count: u32,
    pub machine: GenerateOptions,
}

fn clap_app() -> clap::App<'static, 'static> {
    use clap::{App, AppSettings, Arg, ArgGroup};

    App::new("Joltage")
        .author("Cameron Steffen <cam.steffen94@gmail.com>")
        .about("Find the fewest button presses to configure factory machine joltage counters")
        .setting(AppSettings::ArgRequiredElseHelp)
        .group(
            ArgGroup::with_name("source")
                .args(&["generate", "input"])
                .required(true),
        )
        .arg(
            Arg::with_name("generate")
                .short("g")
                .long("generate")
                .help("generate random machine(s)")
                .display_order(1),
        )
        .arg(
            Arg::with_name("input")
                .short("i")
                .long("input")
                .takes_value(true)
                .value_name("PATH")
                .help("read machines from a file, one per line")
                .display_order(1),
        )
        .arg(
            Arg::with_name("solve")
                .short("s")
                .long("solve")
                .help("find the fewest presses for each machine"),
        )
        .arg(
            Arg::with_name("output_path")
                .long("output")
                .short("o")
                .takes_value(true)
                .value_name("PATH")
                .help("write the machines to a file"),
        )
        .arg(
            Arg::with_name("count")
                .short("c")
                .long("count")
                .requires("generate")
                .takes_value(true)
                .help("the number of machines to generate (and solve)"),
        )
        .arg(
            Arg::with_name("counters")
                .long("counters")
                .requires("generate")
                .takes_value(true)
                .help("the number of joltage counters on each generated machine"),
        )
        .arg(
            Arg::with_name("buttons")
                .long("buttons")
                .requires("generate")
                .takes_value(true)
                .help("the number of buttons on each generated machine"),
        )
        .arg(
            Arg::with_name("max_presses")
                .long("max-presses")
                .requires("generate")
                .takes_value(true)
                .help("the most times each button is pressed to derive generated targets"),
        )
}
