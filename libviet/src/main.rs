use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use libviet::{
    keys, Action, ActionKind, Engine, InputConvention, OutputEncoding, ToneStyle, VietConfig,
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "libviet")]
#[command(about = "Vietnamese Telex/VNI input engine")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Load settings from a TOML file
    #[arg(global = true, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive REPL: each line is a keystroke script
    Repl {
        /// Use the VNI convention instead of Telex
        #[arg(long)]
        vni: bool,
        /// Traditional tone placement (hòa instead of hoà)
        #[arg(long)]
        traditional: bool,
        /// Let <esc> restore the literal keystrokes
        #[arg(long)]
        esc_restore: bool,
    },
    /// Print the action produced by every keystroke of a script
    Replay {
        /// Keystrokes, e.g. "vieejt <bs><bs>"
        script: String,
        /// One JSON object per keystroke
        #[arg(long)]
        json: bool,
        /// Also print replacement bytes in this encoding
        /// (unicode, tcvn3, vni_windows, cp1258)
        #[arg(long)]
        encoding: Option<OutputEncoding>,
    },
    /// Inspect configuration
    Config {
        /// Print the effective configuration as TOML
        #[arg(long)]
        dump: bool,
    },
}

/// One keystroke of a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stroke {
    Char(char),
    Backspace,
    Escape,
    Left,
}

impl Stroke {
    fn key(self) -> Option<(u16, bool)> {
        match self {
            Stroke::Char(c) => keys::from_char(c),
            Stroke::Backspace => Some((keys::BACKSPACE, false)),
            Stroke::Escape => Some((keys::ESC, false)),
            Stroke::Left => Some((keys::LEFT, false)),
        }
    }

    fn label(self) -> String {
        match self {
            Stroke::Char(c) => c.to_string(),
            Stroke::Backspace => "<bs>".to_string(),
            Stroke::Escape => "<esc>".to_string(),
            Stroke::Left => "<left>".to_string(),
        }
    }
}

/// Split a script into keystrokes. `<bs>`, `<esc>` and `<left>` name special
/// keys; any other `<` is typed as is.
fn parse_script(script: &str) -> Vec<Stroke> {
    let mut strokes = Vec::new();
    let mut rest = script;
    while let Some(c) = rest.chars().next() {
        let named = [
            ("<bs>", Stroke::Backspace),
            ("<esc>", Stroke::Escape),
            ("<left>", Stroke::Left),
        ]
        .into_iter()
        .find(|(name, _)| rest.starts_with(name));
        match named {
            Some((name, stroke)) => {
                strokes.push(stroke);
                rest = &rest[name.len()..];
            }
            None => {
                strokes.push(Stroke::Char(c));
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    strokes
}

/// Apply an action to a simulated text field the way a host would.
fn apply_action(field: &mut String, stroke: Stroke, action: &Action) {
    match action.kind {
        ActionKind::NoOp => match stroke {
            Stroke::Char(c) => field.push(c),
            Stroke::Backspace => {
                field.pop();
            }
            Stroke::Escape | Stroke::Left => {}
        },
        ActionKind::Replace => {
            for _ in 0..action.backspace_count {
                field.pop();
            }
            field.extend(action.text());
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<VietConfig> {
    match path {
        Some(p) => VietConfig::load_toml(p)
            .map_err(|e| anyhow!("failed to load config '{}': {}", p.display(), e)),
        None => Ok(VietConfig::default()),
    }
}

fn run_repl(mut config: VietConfig, vni: bool, traditional: bool, esc_restore: bool) -> Result<()> {
    if vni {
        config.base.set_convention(InputConvention::Vni);
    }
    if traditional {
        config.tone_style = ToneStyle::Traditional;
    }
    if esc_restore {
        config.base.set_esc_restore(true);
    }
    let mut engine = Engine::new(config);
    let mut field = String::new();

    println!(
        "libviet REPL ({:?}): type keystrokes and press Enter",
        engine.config().base.convention
    );
    println!("Special keys: <bs> <esc> <left>. Ctrl-D to exit.");

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("error reading stdin")?;
        for stroke in parse_script(&line) {
            let Some((key, shift)) = stroke.key() else {
                warn!(stroke = %stroke.label(), "no key for character, skipped");
                continue;
            };
            let action = engine.process_key(key, shift, false);
            apply_action(&mut field, stroke, &action);
        }
        println!("{}", field);
        io::stdout().flush()?;
    }
    Ok(())
}

/// Bytes as space-separated hex.
fn hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

fn run_replay(
    mut config: VietConfig,
    script: &str,
    json: bool,
    encoding: Option<OutputEncoding>,
) -> Result<()> {
    if let Some(encoding) = encoding {
        config.base.set_output_encoding(encoding);
    }
    let legacy = config.base.output_encoding != OutputEncoding::Unicode;
    let mut engine = Engine::new(config);
    let mut field = String::new();
    let strokes = parse_script(script);
    if strokes.is_empty() {
        bail!("empty script");
    }
    for stroke in strokes {
        let Some((key, shift)) = stroke.key() else {
            bail!("cannot type {:?}", stroke.label());
        };
        let action = engine.process_key(key, shift, false);
        apply_action(&mut field, stroke, &action);
        let bytes = legacy.then(|| hex(&engine.encode(&action)));
        if json {
            let line = serde_json::json!({ "key": stroke.label(), "action": action, "bytes": bytes });
            println!("{}", line);
        } else {
            match (action.kind, bytes) {
                (ActionKind::NoOp, _) => println!("{:<6} noop", stroke.label()),
                (ActionKind::Replace, bytes) => println!(
                    "{:<6} replace bs={} text={:?}{}",
                    stroke.label(),
                    action.backspace_count,
                    action.replacement.to_string(),
                    bytes.map(|b| format!(" bytes=[{}]", b)).unwrap_or_default()
                ),
            }
        }
    }
    if !json {
        println!("=> {}", field);
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    debug!(?config, "configuration loaded");

    match cli.command {
        Some(Commands::Repl {
            vni,
            traditional,
            esc_restore,
        }) => run_repl(config, vni, traditional, esc_restore),
        Some(Commands::Replay {
            script,
            json,
            encoding,
        }) => run_replay(config, &script, json, encoding),
        Some(Commands::Config { dump }) => {
            if dump {
                print!("{}", config.to_toml_string().context("failed to serialize config")?);
            }
            Ok(())
        }
        None => run_repl(config, false, false, false),
    }
}
