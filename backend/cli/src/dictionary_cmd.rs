//! CLI Dictionary Command
//!
//! Shows the builtin dictionary before, during and after a session, and
//! checks that ending the session restores it.

use anyhow::Result;
use yomiage_config::YomiageConfig;
use yomiage_speech::{DictionaryEntry, DictionaryStore};

use crate::session::{builtin_dictionary, Session};
use crate::terminal_output::{note_error, note_success, render_table, Column};

pub fn run(config: &YomiageConfig) -> Result<()> {
    let before = builtin_dictionary();
    println!("\nBuiltin dictionary ({} entries):\n", before.len());
    print!("{}", entry_table(&before));

    let Session {
        store, enhancer, ..
    } = Session::start(config)?;

    let modified = store.entries();
    println!("\nWhile running ({} entries):\n", modified.len());
    print!("{}", entry_table(&modified));

    enhancer.terminate();

    println!();
    if store.entries() == before {
        note_success("Dictionary restored after session end");
    } else {
        note_error("Dictionary differs from the builtin after session end");
        anyhow::bail!("dictionary was not restored");
    }
    Ok(())
}

fn entry_table(entries: &[DictionaryEntry]) -> String {
    let columns = [
        Column::right("#"),
        Column::left("Pattern"),
        Column::left("Replacement"),
        Column::left("Type"),
        Column::left("Case"),
        Column::left("Comment"),
    ];
    let rows: Vec<Vec<String>> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            vec![
                i.to_string(),
                e.pattern.clone(),
                format!("{:?}", e.replacement),
                format!("{:?}", e.kind).to_lowercase(),
                if e.case_sensitive { "yes" } else { "no" }.to_string(),
                e.comment.clone(),
            ]
        })
        .collect();
    render_table(&columns, &rows)
}
