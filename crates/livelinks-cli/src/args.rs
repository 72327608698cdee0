use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};

pub const USAGE: &str =
    "<file.md> [--cursor N]... [--hover N] [--click N] [--html] [--stable-ids] [--config PATH]";

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Args {
    pub file: PathBuf,
    /// Caret offsets forming the selection; one range per flag.
    pub cursors: Vec<usize>,
    pub hover: Option<usize>,
    pub click: Option<usize>,
    pub html: bool,
    /// `link-1`, `link-2`, ... instead of random identifiers.
    pub stable_ids: bool,
    pub config: Option<PathBuf>,
}

impl Args {
    /// Parses everything after the program name.
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let mut parsed = Args::default();
        let mut file = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--cursor" => parsed.cursors.push(offset(&arg, args.next())?),
                "--hover" => parsed.hover = Some(offset(&arg, args.next())?),
                "--click" => parsed.click = Some(offset(&arg, args.next())?),
                "--html" => parsed.html = true,
                "--stable-ids" => parsed.stable_ids = true,
                "--config" => {
                    let path = args.next().ok_or_else(|| anyhow!("--config needs a path"))?;
                    parsed.config = Some(PathBuf::from(path));
                }
                flag if flag.starts_with("--") => bail!("Unknown option {flag}"),
                _ if file.is_none() => file = Some(PathBuf::from(&arg)),
                _ => bail!("Unexpected argument {arg}"),
            }
        }

        parsed.file = file.ok_or_else(|| anyhow!("No markdown file given"))?;
        Ok(parsed)
    }
}

fn offset(flag: &str, value: Option<String>) -> Result<usize> {
    let value = value.ok_or_else(|| anyhow!("{flag} needs an offset"))?;
    value
        .parse()
        .with_context(|| format!("{flag} expects a byte offset, got {value:?}"))
}
