//! Hemiola gadget typer: entry point.
//!
//! Types text on the USB host a Linux board is plugged into, by writing boot
//! keyboard reports to the board's HID gadget device.
//!
//! # Usage
//!
//! ```text
//! hemiola-gadget [OPTIONS] [TEXT]...
//!
//! Options:
//!   --device <PATH>       HID gadget device [default: /dev/hidg0]
//!   --config <PATH>       Config file [default: ~/.config/hemiola/config.toml]
//!   --delay-ms <MS>       Pause after every report
//!   --skip-unsupported    Drop characters the key table cannot type
//!   --dry-run             Print reports as hex instead of writing the device
//!   --chord <CHORD>       Type the word bound to CHORD in [chords.words]
//!   --anagram <LETTERS>   Type the dictionary word made of LETTERS
//! ```
//!
//! Without `TEXT` the demo string "Hemiola", RETURN, "works" is typed.
//! Command-line options override the config file; every option except
//! `--chord` and `--anagram` can also be set through a `HEMIOLA_*`
//! environment variable.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ read_config()          -- TOML settings, defaults if absent
//!  └─ tracing_subscriber     -- installed before anything is logged
//!  └─ ChordTable / Anagrammer -- when --chord or --anagram picks the word
//!  └─ HidGadgetSink::open()  -- or HexDumpSink for --dry-run
//!  └─ TypeTextUseCase
//!       └─ encode_string()   -- key-down + release per character
//!       └─ ReportSink::write_report()
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hemiola_gadget::application::type_text::{
    ReportSink, TypeTextUseCase, UnsupportedCharPolicy,
};
use hemiola_gadget::infrastructure::{
    output_sink::{HexDumpSink, HidGadgetSink},
    storage::{
        config::{config_file_path, warn_missing_config},
        load_word_list, read_config, AppConfig,
    },
};

/// Text typed when none is given on the command line.
const DEMO_TEXT: &str = "Hemiola\nworks";

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Type text through a USB HID keyboard gadget.
#[derive(Debug, Parser)]
#[command(
    name = "hemiola-gadget",
    about = "Type text on a USB host through a Linux HID keyboard gadget",
    version
)]
struct Cli {
    /// HID gadget character device to write reports to.
    #[arg(long, env = "HEMIOLA_DEVICE")]
    device: Option<PathBuf>,

    /// Path of the TOML config file.
    #[arg(long, env = "HEMIOLA_CONFIG")]
    config: Option<PathBuf>,

    /// Milliseconds to pause after every report.
    #[arg(long, env = "HEMIOLA_DELAY_MS")]
    delay_ms: Option<u64>,

    /// Drop characters missing from the key table instead of aborting.
    #[arg(long, env = "HEMIOLA_SKIP_UNSUPPORTED")]
    skip_unsupported: bool,

    /// Print each report as hex on stdout instead of writing the device.
    #[arg(long, env = "HEMIOLA_DRY_RUN")]
    dry_run: bool,

    /// Type the word bound to this chord in the config, e.g. "th+;".
    #[arg(long, conflicts_with_all = ["text", "anagram"])]
    chord: Option<String>,

    /// Type the word from the dictionary whose letters are these.
    #[arg(long, conflicts_with = "text")]
    anagram: Option<String>,

    /// Text to type; multiple words are joined with single spaces.
    text: Vec<String>,
}

/// Settings after config file and command line have been merged.
#[derive(Debug)]
struct ResolvedConfig {
    config: AppConfig,
    /// Config file that was looked for but not found.
    missing: Option<PathBuf>,
}

impl Cli {
    /// Reads the config file and applies command-line overrides.
    ///
    /// Nothing is logged here: the subscriber is not installed until the
    /// configured log level is known.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    fn resolve_config(&self) -> anyhow::Result<ResolvedConfig> {
        let path = match &self.config {
            Some(path) => Some(path.clone()),
            // No usable HOME/XDG_CONFIG_HOME: run on defaults.
            None => config_file_path().ok(),
        };

        let (mut config, missing) = match path {
            Some(path) => match read_config(&path)
                .with_context(|| format!("failed to load config {}", path.display()))?
            {
                Some(config) => (config, None),
                None => (AppConfig::default(), Some(path)),
            },
            None => (AppConfig::default(), None),
        };

        if let Some(device) = &self.device {
            config.device.path = device.clone();
        }
        if let Some(ms) = self.delay_ms {
            config.device.report_delay_ms = ms;
        }
        if self.skip_unsupported {
            config.typing.on_unsupported = UnsupportedCharPolicy::Skip;
        }
        Ok(ResolvedConfig { config, missing })
    }

    /// Picks the text to type: a chord's word, an anagram, `TEXT`, or the demo.
    ///
    /// # Errors
    ///
    /// Returns an error if the dictionary cannot be read or holds no anagram
    /// of the `--anagram` letters.
    fn text_to_type(&self, config: &AppConfig) -> anyhow::Result<String> {
        if let Some(chord) = &self.chord {
            let table = config.chords.table();
            let word = table.get_word(chord);
            info!("chord {chord:?} types {word:?}");
            return Ok(word.to_string());
        }

        if let Some(letters) = &self.anagram {
            let path = &config.anagrams.dictionary;
            let index = load_word_list(path)
                .with_context(|| format!("failed to load dictionary {}", path.display()))?;
            let words = index.lookup(letters);
            let word = words
                .first()
                .with_context(|| format!("no anagram of {letters:?} in {}", path.display()))?;
            if words.len() > 1 {
                info!("anagrams of {letters:?}: {}; typing the first", words.join(", "));
            }
            return Ok(word.clone());
        }

        Ok(self.text())
    }

    fn text(&self) -> String {
        if self.text.is_empty() {
            DEMO_TEXT.to_string()
        } else {
            self.text.join(" ")
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let ResolvedConfig { config, missing } = cli.resolve_config()?;

    // RUST_LOG wins over the configured level. Logs go to stderr so that
    // --dry-run output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Some(path) = &missing {
        warn_missing_config(path);
    }
    let text = cli.text_to_type(&config)?;

    let sink: Arc<dyn ReportSink> = if cli.dry_run {
        info!("dry run: printing reports instead of writing a device");
        Arc::new(HexDumpSink::stdout())
    } else {
        let sink = HidGadgetSink::open(&config.device.path).with_context(|| {
            format!(
                "cannot open {}; is the HID gadget configured?",
                config.device.path.display()
            )
        })?;
        Arc::new(sink)
    };

    let use_case = TypeTextUseCase::new(sink)
        .with_report_delay(config.device.report_delay())
        .with_policy(config.typing.on_unsupported);

    if config.device.release_on_start {
        use_case
            .release_all()
            .context("failed to send initial release report")?;
    }

    type_and_report(&use_case, &text)
}

/// Types `text` and logs the summary.
///
/// Failures are not logged here; they are reported once, by the error
/// returned from `main`.
fn type_and_report(use_case: &TypeTextUseCase, text: &str) -> anyhow::Result<()> {
    let summary = use_case.type_text(text).context("failed to type text")?;
    info!(
        "done: {} characters typed, {} skipped",
        summary.chars_typed,
        summary.skipped.len()
    );
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
