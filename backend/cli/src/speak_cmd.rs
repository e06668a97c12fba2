//! CLI Speak Command
//!
//! Runs text through the installed hook the way the host would before
//! handing it to the synthesizer.

use anyhow::Result;
use yomiage_config::YomiageConfig;
use yomiage_hooks::SymbolLevel;
use yomiage_speech::ExtraArgs;

use crate::session::Session;
use crate::terminal_output::note_info;

pub fn run(
    config: &YomiageConfig,
    locale: &str,
    level: SymbolLevel,
    disabled: bool,
    text: &str,
) -> Result<()> {
    let session = Session::start(config)?;
    if disabled {
        session.enhancer.set_enabled(false);
    }
    if !session.enhancer.is_enabled() {
        note_info("Text processing is disabled; speaking with the host dictionary only");
    }

    let spoken = session.host.speak(locale, text, level, &ExtraArgs::new())?;
    println!("{spoken}");

    session.enhancer.terminate();
    Ok(())
}
