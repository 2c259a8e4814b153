//! Building a token session from config and command-line flags.

use clap::Args;
use rand::Rng;

use thero_core::config::{ModePreference, StudioConfig};
use thero_core::{ColorRole, TokenStore};

use crate::error::CliError;

#[derive(Debug, Clone, Default, Args)]
pub struct SessionArgs {
    /// Preset applied on top of the default tokens
    #[arg(long)]
    pub preset: Option<String>,

    /// Color mode: light, dark or system
    #[arg(long, value_parser = parse_mode)]
    pub mode: Option<ModePreference>,

    /// Randomize every unlocked color role
    #[arg(long)]
    pub randomize: bool,

    /// Keep a color role fixed while randomizing (e.g. primary, mutedText)
    #[arg(long = "lock", value_name = "ROLE")]
    pub locks: Vec<String>,
}

fn parse_mode(s: &str) -> Result<ModePreference, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "light" => Ok(ModePreference::Light),
        "dark" => Ok(ModePreference::Dark),
        "system" => Ok(ModePreference::System),
        other => Err(format!("expected light, dark or system, got {other:?}")),
    }
}

/// Resolve `ModePreference::System` through the OS. Detection failure is light.
pub fn is_dark(mode: ModePreference) -> bool {
    match mode {
        ModePreference::Light => false,
        ModePreference::Dark => true,
        ModePreference::System => match dark_light::detect() {
            Ok(dark_light::Mode::Dark) => true,
            Ok(_) => false,
            Err(_) => {
                tracing::warn!("Failed to detect system color mode, using light");
                false
            }
        },
    }
}

/// Apply preset, mode, locks and randomization, in that order.
pub fn build_tokens<R: Rng + ?Sized>(
    args: &SessionArgs,
    config: &StudioConfig,
    rng: &mut R,
) -> Result<TokenStore, CliError> {
    let mut store = TokenStore::new();

    if let Some(preset) = args.preset.as_ref().or(config.session.preset.as_ref()) {
        if !store.apply_preset(preset) {
            return Err(CliError::UnknownPreset(preset.clone()));
        }
    }

    store.set_mode(is_dark(args.mode.unwrap_or(config.session.mode)));

    for id in &args.locks {
        let role = ColorRole::from_id(id).ok_or_else(|| CliError::UnknownRole(id.clone()))?;
        if !store.is_locked(role) {
            store.toggle_lock(role);
        }
    }

    if args.randomize {
        let changed = store.randomize(rng);
        tracing::debug!(changed = changed.len(), "randomized palette");
    }

    Ok(store)
}
