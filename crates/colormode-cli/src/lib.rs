//! The `colormode` command.
//!
//! Runs the same resolution a page load does, against the OS appearance and
//! a JSON preference file, and prints the outcome:
//!
//! ```text
//! $ colormode set dark
//! preference: dark
//! value: dark
//! className: dark-mode
//! forced: false
//! htmlAttributes: class="dark-mode"
//! storage: color-mode.json
//! ```

use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colormode::env::{FileStorage, HostParts, OsMedia, PreferenceStorage, VirtualRoot};
use colormode::{ColorModeHandle, ColorModeOptions, ColorModeScript, ColorModeSnapshot, FORCED_ATTRIBUTE};
use serde::Serialize;

/// Inspect and change the stored color mode preference.
#[derive(Debug, Parser)]
#[command(name = "colormode", version, about)]
pub struct Cli {
    /// Options file (.yaml, .yml or .json)
    #[arg(long, short, env = "COLORMODE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Preference store
    #[arg(long, env = "COLORMODE_STORAGE", default_value = "color-mode.json", global = true)]
    pub storage: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Yaml, global = true)]
    pub format: Format,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve the color mode and print it
    Resolve {
        /// Simulate a forced color mode on the root
        #[arg(long)]
        forced: Option<String>,
    },
    /// Store a preference
    Set {
        #[arg(value_enum)]
        preference: PreferenceArg,
    },
    /// Store the opposite of the current scheme
    Toggle,
    /// Remove the stored preference
    Reset,
    /// Print the effective options
    Options,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PreferenceArg {
    Dark,
    Light,
    System,
}

impl PreferenceArg {
    pub fn as_str(self) -> &'static str {
        match self {
            PreferenceArg::Dark => "dark",
            PreferenceArg::Light => "light",
            PreferenceArg::System => colormode::SYSTEM_PREFERENCE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Yaml,
    Json,
}

/// What the resolving commands print.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(flatten)]
    pub snapshot: ColorModeSnapshot,
    /// Attributes for the `<html>` start tag.
    pub html_attributes: String,
    pub storage: PathBuf,
}

impl Cli {
    /// The default log filter for the verbosity flag.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "colormode=debug,colormode_cli=debug",
            _ => "colormode=trace,colormode_cli=trace",
        }
    }
}

/// Runs the command and returns the text to print.
pub fn run(cli: &Cli) -> Result<String> {
    let options = load_options(cli.config.as_deref())?;
    tracing::debug!(command = ?cli.command, storage = %cli.storage.display(), "running");

    match &cli.command {
        Command::Options => render(&options, cli.format),
        Command::Resolve { forced } => {
            let (handle, root) = resolve(&options, &cli.storage, forced.as_deref())?;
            render(&report(&handle, &root, &cli.storage), cli.format)
        }
        Command::Set { preference } => {
            let (mut handle, root) = resolve(&options, &cli.storage, None)?;
            handle.set_preference(preference.as_str());
            ensure_stored(&cli.storage, &options, Some(preference.as_str()))?;
            render(&report(&handle, &root, &cli.storage), cli.format)
        }
        Command::Toggle => {
            let (mut handle, root) = resolve(&options, &cli.storage, None)?;
            let next = handle
                .toggle()
                .with_context(|| format!("cannot toggle from '{}'", handle.value()))?;
            ensure_stored(&cli.storage, &options, Some(next.as_str()))?;
            render(&report(&handle, &root, &cli.storage), cli.format)
        }
        Command::Reset => {
            let (mut handle, root) = resolve(&options, &cli.storage, None)?;
            handle.reset_preference();
            ensure_stored(&cli.storage, &options, None)?;
            render(&report(&handle, &root, &cli.storage), cli.format)
        }
    }
}

fn load_options(path: Option<&Path>) -> Result<ColorModeOptions> {
    match path {
        Some(path) => ColorModeOptions::from_file(path)
            .with_context(|| format!("cannot load options from {}", path.display())),
        None => Ok(ColorModeOptions::default()),
    }
}

fn resolve(
    options: &ColorModeOptions,
    storage: &Path,
    forced: Option<&str>,
) -> Result<(ColorModeHandle, Rc<VirtualRoot>)> {
    let mut root = VirtualRoot::new();
    if let Some(forced) = forced {
        root = root.with_attribute(FORCED_ATTRIBUTE, forced);
    }
    let root = Rc::new(root);
    let host = HostParts::new(FileStorage::new(storage), OsMedia::detect(), Rc::clone(&root));
    let script = ColorModeScript::new(options.clone(), host).context("invalid options")?;
    Ok((script.resolve(), root))
}

/// Reads the store back, since the handle only logs failed writes.
fn ensure_stored(storage: &Path, options: &ColorModeOptions, expected: Option<&str>) -> Result<()> {
    let stored = FileStorage::new(storage).get(&options.storage_key);
    anyhow::ensure!(
        stored.as_deref() == expected,
        "cannot update {}",
        storage.display()
    );
    Ok(())
}

fn report(handle: &ColorModeHandle, root: &VirtualRoot, storage: &Path) -> Report {
    Report {
        snapshot: handle.snapshot(),
        html_attributes: root.to_html_attributes(),
        storage: storage.to_path_buf(),
    }
}

fn render<T: Serialize>(value: &T, format: Format) -> Result<String> {
    match format {
        Format::Yaml => serde_yaml::to_string(value).context("cannot serialize output"),
        Format::Json => {
            let mut out = serde_json::to_string_pretty(value).context("cannot serialize output")?;
            out.push('\n');
            Ok(out)
        }
    }
}
